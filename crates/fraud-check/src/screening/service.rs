use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::cascade::{CascadeOptions, SelectionCascade};
use super::classifier::{
    self, verify_schema, ArtifactError, Classifier, ClassifierError, Label, TrainedModel,
};
use super::dataset::{DatasetError, ReferenceDataset};
use super::features::{self, EncodingError, FeatureVector};
use super::selection::{SelectionField, SelectionState};

/// Service composing the selection cascade, feature encoder, and classifier.
///
/// Both collaborators are shared read-only for the lifetime of the process.
pub struct FraudScreeningService<C: ?Sized> {
    cascade: Arc<SelectionCascade>,
    classifier: Arc<C>,
}

impl<C> Clone for FraudScreeningService<C>
where
    C: ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            cascade: Arc::clone(&self.cascade),
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl FraudScreeningService<TrainedModel> {
    /// Loads the reference dataset and model artifact, failing fast on any defect.
    pub fn load(
        reference_path: impl AsRef<Path>,
        model_path: impl AsRef<Path>,
    ) -> Result<Self, StartupError> {
        let dataset = ReferenceDataset::from_path(reference_path.as_ref())?;
        let model = TrainedModel::from_path(model_path.as_ref())?;
        info!(
            rows = dataset.len(),
            trees = model.n_trees(),
            "screening collaborators loaded"
        );

        let service = Self::from_dataset(&dataset, Arc::new(model))?;
        Ok(service)
    }
}

impl<C> FraudScreeningService<C>
where
    C: Classifier + ?Sized + 'static,
{
    pub fn new(
        cascade: Arc<SelectionCascade>,
        classifier: Arc<C>,
    ) -> Result<Self, ClassifierError> {
        verify_schema(classifier.feature_names())?;
        Ok(Self {
            cascade,
            classifier,
        })
    }

    pub fn from_dataset(
        dataset: &ReferenceDataset,
        classifier: Arc<C>,
    ) -> Result<Self, ClassifierError> {
        Self::new(Arc::new(SelectionCascade::build(dataset)), classifier)
    }

    /// Candidate values for every dependent form field.
    pub fn options(&self, selection: &SelectionState) -> CascadeOptions {
        self.cascade.options(selection)
    }

    /// Encodes a confirmed selection and asks the classifier for a verdict.
    pub fn screen(&self, selection: &SelectionState) -> Result<Verdict, ScreeningError> {
        let features = features::build(selection)?;

        let options = self.cascade.options(selection);
        if let Some((field, value)) = options.unoffered(selection) {
            return Err(ScreeningError::NotOffered { field, value });
        }
        debug!(columns = features.named().len(), "selection encoded");

        let label = classifier::predict(self.classifier.as_ref(), &features)?;
        debug!(fraud = label.is_fraud(), "classifier verdict");
        Ok(Verdict::new(label, features))
    }
}

/// Outcome of one screening interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub label: Label,
    pub message: &'static str,
    pub features: FeatureVector,
}

impl Verdict {
    pub fn new(label: Label, features: FeatureVector) -> Self {
        Self {
            label,
            message: label.message(),
            features,
        }
    }
}

/// Error raised while screening a single interaction.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("{field} '{value}' is not offered for the current selection")]
    NotOffered { field: SelectionField, value: String },
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl ScreeningError {
    /// Form field the error points at, when it concerns a single input.
    pub fn field(&self) -> Option<SelectionField> {
        match self {
            ScreeningError::Encoding(EncodingError::IncompleteSelection(field))
            | ScreeningError::Encoding(EncodingError::InvalidIdentifier { field, .. })
            | ScreeningError::NotOffered { field, .. } => Some(*field),
            ScreeningError::Encoding(EncodingError::InvalidAmount(_))
            | ScreeningError::Classifier(_) => None,
        }
    }
}

/// Error preventing the screening service from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Model(#[from] ArtifactError),
    #[error("model schema check failed: {0}")]
    Schema(#[from] ClassifierError),
}
