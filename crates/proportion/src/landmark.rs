use crate::error::{AnalyzeError, Result};

/// Number of joints produced by the mesh pipeline per person.
pub const JOINT_COUNT: usize = 44;

/// A fixed mapping from anatomical names to joint positions.
pub trait JointTable: Copy + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;
    fn name(self) -> &'static str;
}

/// Landmarks used by the proportion report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    LeftHip = 2,
    RightKnee = 3,
    RightHip = 5,
    LeftKnee = 6,
    Neck = 11,
    LeftShoulder = 17,
    RightShoulder = 18,
}

impl JointTable for Landmark {
    const ALL: &'static [Self] = &[
        Landmark::LeftHip,
        Landmark::RightKnee,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::Neck,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Landmark::LeftHip => "left_hip",
            Landmark::RightKnee => "right_knee",
            Landmark::RightHip => "right_hip",
            Landmark::LeftKnee => "left_knee",
            Landmark::Neck => "neck",
            Landmark::LeftShoulder => "left_shoulder",
            Landmark::RightShoulder => "right_shoulder",
        }
    }
}

/// OpenPose body joints, the first 25 entries of the joint set plus the
/// extra head-top and wrist joints used for scaled measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyJoint {
    Neck = 1,
    RightShoulder = 2,
    RightElbow = 3,
    LeftShoulder = 5,
    LeftElbow = 6,
    Pelvis = 8,
    RightHip = 9,
    RightKnee = 10,
    LeftHip = 12,
    LeftKnee = 13,
    LeftHeel = 21,
    RightHeel = 24,
    RightWrist = 31,
    LeftWrist = 36,
    HeadTop = 38,
}

impl JointTable for BodyJoint {
    const ALL: &'static [Self] = &[
        BodyJoint::Neck,
        BodyJoint::RightShoulder,
        BodyJoint::RightElbow,
        BodyJoint::LeftShoulder,
        BodyJoint::LeftElbow,
        BodyJoint::Pelvis,
        BodyJoint::RightHip,
        BodyJoint::RightKnee,
        BodyJoint::LeftHip,
        BodyJoint::LeftKnee,
        BodyJoint::LeftHeel,
        BodyJoint::RightHeel,
        BodyJoint::RightWrist,
        BodyJoint::LeftWrist,
        BodyJoint::HeadTop,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            BodyJoint::Neck => "neck",
            BodyJoint::RightShoulder => "right_shoulder",
            BodyJoint::RightElbow => "right_elbow",
            BodyJoint::LeftShoulder => "left_shoulder",
            BodyJoint::LeftElbow => "left_elbow",
            BodyJoint::Pelvis => "pelvis",
            BodyJoint::RightHip => "right_hip",
            BodyJoint::RightKnee => "right_knee",
            BodyJoint::LeftHip => "left_hip",
            BodyJoint::LeftKnee => "left_knee",
            BodyJoint::LeftHeel => "left_heel",
            BodyJoint::RightHeel => "right_heel",
            BodyJoint::RightWrist => "right_wrist",
            BodyJoint::LeftWrist => "left_wrist",
            BodyJoint::HeadTop => "head_top",
        }
    }
}

/// Check that every entry of a table addresses a distinct joint inside the
/// set.
pub fn validate<T: JointTable>() -> Result<()> {
    if let Some(joint) = T::ALL.iter().find(|joint| joint.index() >= JOINT_COUNT) {
        return Err(AnalyzeError::LandmarkOutOfRange {
            name: joint.name(),
            index: joint.index(),
        });
    }
    let mut owners: [Option<&'static str>; JOINT_COUNT] = [None; JOINT_COUNT];
    for joint in T::ALL {
        if let Some(first) = owners[joint.index()].replace(joint.name()) {
            return Err(AnalyzeError::DuplicateLandmark {
                first,
                second: joint.name(),
                index: joint.index(),
            });
        }
    }
    Ok(())
}

/// Validate every landmark table the analyzer relies on. Run once at startup.
pub fn validate_landmarks() -> Result<()> {
    validate::<Landmark>()?;
    validate::<BodyJoint>()
}
