use {
    crate::{
        error::Result,
        joints::{JointSet, camera_translation},
        measure::BodyMeasurements,
        report::{ProportionAnalysis, ProportionReport},
    },
    npz::NpzArchive,
    std::path::Path,
};

pub const JOINTS_KEY: &str = "joints_3d";
pub const CAMERA_KEY: &str = "cam_t";

/// Options for [`analyze_body_proportions`].
#[derive(Clone, Debug, Default)]
pub struct AnalyzerOptions {
    include_measurements: bool,
}

impl AnalyzerOptions {
    /// Add the scalar body measurements to successful reports.
    pub fn with_include_measurements(mut self, include: bool) -> Self {
        self.include_measurements = include;
        self
    }

    pub fn include_measurements(&self) -> bool {
        self.include_measurements
    }
}

/// Run the proportion pipeline over a joint set and optional camera
/// translation.
pub fn analyze_joints(raw: &JointSet, cam_t: Option<base::Vec3<f64>>) -> ProportionAnalysis {
    let center = raw.center();
    let joints = raw.normalized(center).vertically_centered();
    let measurements = BodyMeasurements::from_joints(&joints);
    ProportionAnalysis {
        center,
        joints,
        // Relative to the raw center; the vertical correction is not applied.
        cam_t: cam_t.map(|t| t - center),
        measurements,
    }
}

/// Load `joints_3d` (and `cam_t` when present) from an `.npz` bundle and
/// analyze it.
pub fn analyze(path: impl AsRef<Path>) -> Result<ProportionAnalysis> {
    let path = path.as_ref();
    let mut archive = NpzArchive::open(path)?;
    let joints = JointSet::from_tensor(&archive.array(JOINTS_KEY)?)?;
    let cam_t = archive
        .optional_array(CAMERA_KEY)?
        .map(|t| camera_translation(&t))
        .transpose()?;
    log::debug!(
        "Loaded {} joints from {} (cam_t: {})",
        joints.points().len(),
        path.display(),
        cam_t.is_some()
    );
    Ok(analyze_joints(&joints, cam_t))
}

/// Analyze a bundle, folding any failure into the report's `error` field.
pub fn analyze_body_proportions(path: impl AsRef<Path>, options: &AnalyzerOptions) -> ProportionReport {
    let path = path.as_ref();
    match analyze(path) {
        Ok(analysis) => ProportionReport::from_analysis(&analysis, options.include_measurements),
        Err(e) => {
            log::warn!("Analysis of {} failed: {}", path.display(), e);
            ProportionReport::failure(e.to_string())
        }
    }
}
