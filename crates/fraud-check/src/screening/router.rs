use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use super::classifier::Classifier;
use super::selection::SelectionState;
use super::service::{FraudScreeningService, Verdict};
use crate::error::AppError;

/// Router builder exposing the cascade and verdict endpoints.
pub fn screening_router<C>(service: Arc<FraudScreeningService<C>>) -> Router
where
    C: Classifier + 'static,
{
    Router::new()
        .route("/api/v1/screening/options", post(options_handler::<C>))
        .route("/api/v1/screening/verdict", post(verdict_handler::<C>))
        .with_state(service)
}

pub(crate) async fn options_handler<C>(
    State(service): State<Arc<FraudScreeningService<C>>>,
    axum::Json(selection): axum::Json<SelectionState>,
) -> Response
where
    C: Classifier + 'static,
{
    let options = service.options(&selection);
    (StatusCode::OK, axum::Json(options)).into_response()
}

pub(crate) async fn verdict_handler<C>(
    State(service): State<Arc<FraudScreeningService<C>>>,
    axum::Json(selection): axum::Json<SelectionState>,
) -> Result<axum::Json<Verdict>, AppError>
where
    C: Classifier + 'static,
{
    let verdict = service.screen(&selection)?;
    Ok(axum::Json(verdict))
}
