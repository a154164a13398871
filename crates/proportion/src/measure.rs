use {
    crate::{joints::JointSet, landmark::Landmark},
    serde::Serialize,
};

/// Body distances in model units, taken from a normalized joint set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyMeasurements {
    pub shoulder_width: f64,
    pub waist_width: f64,
    pub torso_length: f64,
    pub leg_length: f64,
}

impl BodyMeasurements {
    pub fn from_joints(joints: &JointSet) -> Self {
        let left_shoulder = joints.landmark(Landmark::LeftShoulder);
        let right_shoulder = joints.landmark(Landmark::RightShoulder);
        let left_hip = joints.landmark(Landmark::LeftHip);
        let right_hip = joints.landmark(Landmark::RightHip);
        let neck = joints.landmark(Landmark::Neck);
        let left_knee = joints.landmark(Landmark::LeftKnee);
        let right_knee = joints.landmark(Landmark::RightKnee);

        let mid_hip = left_hip.midpoint(right_hip);
        let left_leg = left_hip.distance_to(left_knee);
        let right_leg = right_hip.distance_to(right_knee);

        Self {
            shoulder_width: left_shoulder.distance_to(right_shoulder),
            waist_width: left_hip.distance_to(right_hip),
            torso_length: neck.distance_to(mid_hip),
            leg_length: (left_leg + right_leg) / 2.0,
        }
    }
}
