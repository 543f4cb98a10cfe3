use crate::cli::DataArgs;
use fraud_check::config::AppConfig;
use fraud_check::error::AppError;
use fraud_check::screening::{FraudScreeningService, TrainedModel};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolves data locations (config, then CLI overrides) and loads the screening service.
pub(crate) fn load_service(
    data: DataArgs,
) -> Result<FraudScreeningService<TrainedModel>, AppError> {
    let mut config = AppConfig::load()?;
    data.apply(&mut config.data);
    load_from_config(&config)
}

pub(crate) fn load_from_config(
    config: &AppConfig,
) -> Result<FraudScreeningService<TrainedModel>, AppError> {
    let service =
        FraudScreeningService::load(&config.data.reference_data, &config.data.model_path)?;
    Ok(service)
}
