//! Real-world body measurements.
//!
//! Model-space distances between OpenPose joints are scaled to centimeters
//! using the subject's known height (head top to left heel), then combined
//! into ratios.

use {
    crate::{
        error::{AnalyzeError, Result},
        joints::JointSet,
        landmark::BodyJoint,
    },
    serde::Serialize,
};

/// Lengths in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledMeasurements {
    pub height: f64,
    pub torso: f64,
    pub leg: f64,
    pub upper_leg: f64,
    pub lower_leg: f64,
    pub arm: f64,
    pub upper_arm: f64,
    pub forearm: f64,
    pub shoulder_width: f64,
    pub hip_width: f64,
    pub arm_span: f64,
    pub chest: f64,
    pub waist: f64,
    pub thigh: f64,
    pub calf: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProportionRatios {
    pub leg_to_height: f64,
    pub torso_to_height: f64,
    pub arm_to_height: f64,
    pub upper_to_lower_leg: f64,
    pub upper_to_lower_arm: f64,
    pub arm_to_leg: f64,
    pub shoulder_to_hip_ratio: f64,
    pub shoulder_to_height: f64,
    pub arm_span_ratio: f64,
    pub chest_to_waist: f64,
    pub thigh_to_calf: f64,
    pub chest_to_height: f64,
    pub waist_to_height: f64,
    pub thigh_to_height: f64,
    pub calf_to_height: f64,
    pub shoulder_to_waist: f64,
    pub hip_to_waist: f64,
    pub arm_to_torso: f64,
    pub leg_to_torso: f64,
    pub chest_to_arm: f64,
    pub waist_to_leg: f64,
}

impl ProportionRatios {
    pub fn from_measurements(m: &ScaledMeasurements) -> Self {
        Self {
            leg_to_height: m.leg / m.height,
            torso_to_height: m.torso / m.height,
            arm_to_height: m.arm / m.height,
            upper_to_lower_leg: m.upper_leg / m.lower_leg,
            upper_to_lower_arm: m.upper_arm / m.forearm,
            arm_to_leg: m.arm / m.leg,
            shoulder_to_hip_ratio: m.shoulder_width / m.hip_width,
            shoulder_to_height: m.shoulder_width / m.height,
            arm_span_ratio: m.arm_span / m.height,
            chest_to_waist: m.chest / m.waist,
            thigh_to_calf: m.thigh / m.calf,
            chest_to_height: m.chest / m.height,
            waist_to_height: m.waist / m.height,
            thigh_to_height: m.thigh / m.height,
            calf_to_height: m.calf / m.height,
            shoulder_to_waist: m.shoulder_width / m.waist,
            hip_to_waist: m.hip_width / m.waist,
            arm_to_torso: m.arm / m.torso,
            leg_to_torso: m.leg / m.torso,
            chest_to_arm: m.chest / m.arm,
            waist_to_leg: m.waist / m.leg,
        }
    }
}

/// Scaled measurements together with their ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaledAnalysis {
    pub measurements: ScaledMeasurements,
    pub proportions: ProportionRatios,
}

impl ScaledAnalysis {
    /// Scale the joint set so that head top to left heel equals
    /// `actual_height` centimeters.
    pub fn from_joints(joints: &JointSet, actual_height: f64) -> Result<Self> {
        if !actual_height.is_finite() || actual_height <= 0.0 {
            return Err(AnalyzeError::InvalidHeight(actual_height));
        }

        let joint = |j: BodyJoint| joints.landmark(j);
        let dist = |a: BodyJoint, b: BodyJoint| joint(a).distance_to(joint(b));

        let model_height = dist(BodyJoint::HeadTop, BodyJoint::LeftHeel);
        if !model_height.is_finite() || model_height <= f64::EPSILON {
            return Err(AnalyzeError::DegenerateModel(model_height));
        }
        let scale = actual_height / model_height;

        let left_thigh = dist(BodyJoint::LeftHip, BodyJoint::LeftKnee);
        let right_thigh = dist(BodyJoint::RightHip, BodyJoint::RightKnee);
        let left_shin = dist(BodyJoint::LeftKnee, BodyJoint::LeftHeel);
        let right_shin = dist(BodyJoint::RightKnee, BodyJoint::RightHeel);
        let upper_leg = (left_thigh + right_thigh) / 2.0;
        let lower_leg = (left_shin + right_shin) / 2.0;
        let leg = ((left_thigh + left_shin) + (right_thigh + right_shin)) / 2.0;

        let arm = (dist(BodyJoint::LeftShoulder, BodyJoint::LeftWrist)
            + dist(BodyJoint::RightShoulder, BodyJoint::RightWrist))
            / 2.0;
        let upper_arm = (dist(BodyJoint::LeftShoulder, BodyJoint::LeftElbow)
            + dist(BodyJoint::RightShoulder, BodyJoint::RightElbow))
            / 2.0;
        let forearm = (dist(BodyJoint::LeftElbow, BodyJoint::LeftWrist)
            + dist(BodyJoint::RightElbow, BodyJoint::RightWrist))
            / 2.0;

        let shoulder_width = dist(BodyJoint::LeftShoulder, BodyJoint::RightShoulder);
        let hip_width = dist(BodyJoint::LeftHip, BodyJoint::RightHip);

        // Chest and waist have no joints of their own; they reuse the
        // shoulder and hip spans, as do thigh and calf with the leg segments.
        let measurements = ScaledMeasurements {
            height: model_height * scale,
            torso: dist(BodyJoint::Neck, BodyJoint::Pelvis) * scale,
            leg: leg * scale,
            upper_leg: upper_leg * scale,
            lower_leg: lower_leg * scale,
            arm: arm * scale,
            upper_arm: upper_arm * scale,
            forearm: forearm * scale,
            shoulder_width: shoulder_width * scale,
            hip_width: hip_width * scale,
            arm_span: dist(BodyJoint::LeftWrist, BodyJoint::RightWrist) * scale,
            chest: shoulder_width * scale,
            waist: hip_width * scale,
            thigh: upper_leg * scale,
            calf: lower_leg * scale,
        };

        Ok(Self {
            proportions: ProportionRatios::from_measurements(&measurements),
            measurements,
        })
    }
}
