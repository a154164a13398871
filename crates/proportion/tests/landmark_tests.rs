use proportion::{BodyJoint, JOINT_COUNT, JointTable, Landmark, landmark, validate_landmarks};

#[test]
fn test_landmark_indices() {
    assert_eq!(Landmark::LeftShoulder.index(), 17);
    assert_eq!(Landmark::RightShoulder.index(), 18);
    assert_eq!(Landmark::LeftHip.index(), 2);
    assert_eq!(Landmark::RightHip.index(), 5);
    assert_eq!(Landmark::Neck.index(), 11);
    assert_eq!(Landmark::LeftKnee.index(), 6);
    assert_eq!(Landmark::RightKnee.index(), 3);
}

#[test]
fn test_body_joint_indices() {
    assert_eq!(BodyJoint::HeadTop.index(), 38);
    assert_eq!(BodyJoint::LeftHeel.index(), 21);
    assert_eq!(BodyJoint::RightHeel.index(), 24);
    assert_eq!(BodyJoint::Pelvis.index(), 8);
    assert_eq!(BodyJoint::LeftWrist.index(), 36);
    assert_eq!(BodyJoint::RightWrist.index(), 31);
}

#[test]
fn test_tables_are_complete_and_unique() {
    fn check<T: JointTable>(expected: usize) {
        let mut indices: Vec<usize> = T::ALL.iter().map(|j| j.index()).collect();
        assert_eq!(indices.len(), expected);
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), expected);
        assert!(indices.iter().all(|&i| i < JOINT_COUNT));
    }
    check::<Landmark>(7);
    check::<BodyJoint>(15);
}

#[test]
fn test_validate_landmarks() {
    assert!(validate_landmarks().is_ok());
}

#[derive(Clone, Copy)]
struct Bogus;

impl JointTable for Bogus {
    const ALL: &'static [Self] = &[Bogus];

    fn index(self) -> usize {
        JOINT_COUNT
    }

    fn name(self) -> &'static str {
        "bogus"
    }
}

#[test]
fn test_validate_rejects_out_of_range() {
    let err = landmark::validate::<Bogus>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "landmark bogus uses index 44, outside the joint set"
    );
}

#[derive(Clone, Copy)]
enum Twins {
    Left,
    Right,
}

impl JointTable for Twins {
    const ALL: &'static [Self] = &[Twins::Left, Twins::Right];

    fn index(self) -> usize {
        7
    }

    fn name(self) -> &'static str {
        match self {
            Twins::Left => "left_twin",
            Twins::Right => "right_twin",
        }
    }
}

#[test]
fn test_validate_rejects_duplicates() {
    let err = landmark::validate::<Twins>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "landmarks left_twin and right_twin both use index 7"
    );
}
