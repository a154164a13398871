use {
    crate::{joints::JointSet, measure::BodyMeasurements},
    base::Vec3,
    serde::Serialize,
};

/// Everything computed from one joint bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionAnalysis {
    /// Mean of the raw joints.
    pub center: Vec3<f64>,
    /// Joints after centering, Y/Z flip and vertical re-centering.
    pub joints: JointSet,
    /// Camera translation relative to `center`.
    pub cam_t: Option<Vec3<f64>>,
    pub measurements: BodyMeasurements,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionSummary {
    #[serde(rename = "allJoints")]
    pub all_joints: Vec<[f64; 3]>,
    pub center: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cam_t: Option<[f64; 3]>,
    #[serde(flatten)]
    pub measurements: Option<BodyMeasurements>,
}

/// Report returned to clients; failures travel as data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProportionReport {
    Success(ProportionSummary),
    Failure { error: String },
}

impl ProportionReport {
    pub fn from_analysis(analysis: &ProportionAnalysis, include_measurements: bool) -> Self {
        ProportionReport::Success(ProportionSummary {
            all_joints: analysis.joints.to_nested(),
            center: analysis.center.to_array(),
            cam_t: analysis.cam_t.map(Vec3::to_array),
            measurements: include_measurements.then_some(analysis.measurements),
        })
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ProportionReport::Failure {
            error: message.into(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ProportionReport::Success(_) => None,
            ProportionReport::Failure { error } => Some(error),
        }
    }
}
