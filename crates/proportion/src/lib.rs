//! Body-proportion analysis over the 44-joint output of the mesh pipeline.

pub mod analyzer;
pub mod anthropometry;
pub mod error;
pub mod joints;
pub mod landmark;
pub mod measure;
pub mod report;

pub use analyzer::{AnalyzerOptions, analyze, analyze_body_proportions, analyze_joints};
pub use anthropometry::{ProportionRatios, ScaledAnalysis, ScaledMeasurements};
pub use error::AnalyzeError;
pub use joints::JointSet;
pub use landmark::{BodyJoint, JOINT_COUNT, JointTable, Landmark, validate_landmarks};
pub use measure::BodyMeasurements;
pub use report::{ProportionAnalysis, ProportionReport, ProportionSummary};
