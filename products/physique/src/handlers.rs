use {
    crate::{AppState, error::ApiError},
    axum::{Json, extract::State},
    proportion::{
        AnalyzeError, ProportionRatios, ProportionReport, ScaledAnalysis, ScaledMeasurements,
        analyze, analyze_body_proportions,
    },
    serde::{Deserialize, Serialize},
    std::{path::PathBuf, sync::Arc},
};

const SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub img_folder: String,
    pub out_folder: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub npz_path: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub proportions: ProportionReport,
}

#[derive(Debug, Deserialize)]
pub struct MeasureRequest {
    pub npz_path: String,
    pub actual_height: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureAnalysis {
    pub all_joints: Vec<[f64; 3]>,
    pub measurements: ScaledMeasurements,
    pub proportions: ProportionRatios,
    pub actual_height: f64,
}

#[derive(Debug, Serialize)]
pub struct MeasureResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub analysis: MeasureAnalysis,
}

fn existing_file(npz_path: &str) -> Result<PathBuf, ApiError> {
    let path = PathBuf::from(npz_path);
    if path.exists() {
        Ok(path)
    } else {
        Err(ApiError::bad_request(format!("NPZ file does not exist: {npz_path}")))
    }
}

/// Run the external mesh pipeline over an image folder.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    log::info!("Received mesh generation request");
    log::info!("Image folder: {}", req.img_folder);
    log::info!("Output folder: {}", req.out_folder);

    let output = state
        .generator
        .generate(&req.img_folder, &req.out_folder)
        .await
        .inspect_err(|e| log::error!("Mesh generation failed: {}", e))?;

    Ok(Json(GenerateResponse {
        status: SUCCESS,
        message: "Mesh generation complete",
        output: output.stdout,
    }))
}

/// Proportion report for a joint bundle. Analysis failures are reported
/// inside `proportions`, with a 200 status.
pub async fn analyze_proportions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    log::info!("Received analysis request");
    log::info!("NPZ path: {}", req.npz_path);

    let path = existing_file(&req.npz_path)?;
    let options = state.analyzer.clone();
    let proportions =
        tokio::task::spawn_blocking(move || analyze_body_proportions(&path, &options))
            .await
            .map_err(|e| {
                log::error!("Analysis task failed: {}", e);
                ApiError::internal("Analysis failed")
            })?;

    Ok(Json(AnalyzeResponse {
        status: SUCCESS,
        message: "Analysis complete",
        proportions,
    }))
}

/// Measurements in centimeters scaled from the subject's real height.
pub async fn measure(Json(req): Json<MeasureRequest>) -> Result<Json<MeasureResponse>, ApiError> {
    log::info!("Received measurement request");
    log::info!("NPZ path: {}, height: {} cm", req.npz_path, req.actual_height);

    if !req.actual_height.is_finite() || req.actual_height <= 0.0 {
        return Err(ApiError::bad_request(
            "Valid actual_height in centimeters is required",
        ));
    }
    let path = existing_file(&req.npz_path)?;
    let actual_height = req.actual_height;

    let result = tokio::task::spawn_blocking(move || {
        let analysis = analyze(&path)?;
        let scaled = ScaledAnalysis::from_joints(&analysis.joints, actual_height)?;
        Ok::<_, AnalyzeError>((analysis, scaled))
    })
    .await
    .map_err(|e| {
        log::error!("Measurement task failed: {}", e);
        ApiError::internal("Analysis failed")
    })?;

    let (analysis, scaled) = result.map_err(|e| {
        log::warn!("Measurement failed: {}", e);
        match e {
            AnalyzeError::InvalidHeight(_) => ApiError::bad_request(e.to_string()),
            _ => ApiError::internal(format!("Analysis failed: {e}")),
        }
    })?;

    Ok(Json(MeasureResponse {
        status: SUCCESS,
        message: "Analysis complete",
        analysis: MeasureAnalysis {
            all_joints: analysis.joints.to_nested(),
            measurements: scaled.measurements,
            proportions: scaled.proportions,
            actual_height,
        },
    }))
}
