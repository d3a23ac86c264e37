use crate::config::Config;
use crate::errors::AppError;
use crate::models::{PointsResponse, ProcessReceiptResponse};
use crate::services::ReceiptService;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Receipt submission and scoring.
    pub receipts: ReceiptService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let receipts = ReceiptService::new(&config);
        Self { config, receipts }
    }
}

/// POST /receipts/process
///
/// Stores the submitted receipt and returns its generated id. No content
/// type is required; any body that does not decode as a receipt maps to 400.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `body` - Raw request body.
///
/// # Returns
///
/// * `Result<Json<ProcessReceiptResponse>, AppError>` - The receipt id or a 400 error.
pub async fn process_receipt(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ProcessReceiptResponse>, AppError> {
    tracing::info!("POST /receipts/process - {} bytes", body.len());

    let id = state.receipts.submit(&body).await?;

    Ok(Json(ProcessReceiptResponse { id }))
}

/// GET /receipts/:id/points
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - Receipt id returned by `process_receipt`.
///
/// # Returns
///
/// * `Result<Json<PointsResponse>, AppError>` - The points awarded or a 404 error.
pub async fn get_points(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, AppError> {
    tracing::info!("GET /receipts/{}/points", id);

    let points = state.receipts.get_points(&id).await?;

    Ok(Json(PointsResponse { points }))
}
