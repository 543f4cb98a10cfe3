//! Boundary to the pre-trained fraud classifier.
//!
//! The classifier is opaque: it accepts one feature row in its training-time column
//! order and returns a discrete class. [`verify_schema`] guards that column order so a
//! reordered encoder cannot silently feed the model the wrong features.

mod artifact;
mod tree;

pub use artifact::{ArtifactError, TrainedModel};
pub use tree::{DecisionTree, RandomForest, TreeError};

use super::features::{FeatureVector, FEATURE_COLUMNS};
use serde::{Deserialize, Serialize};

/// Capability implemented by every model backend the screening service can call.
pub trait Classifier: Send + Sync {
    /// Column names in the order the model was trained on.
    fn feature_names(&self) -> &[String];

    /// Raw class for a single row ordered as [`Classifier::feature_names`].
    fn predict(&self, row: &[f64]) -> Result<i64, ClassifierError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier expects {expected} features, received {actual}")]
    Arity { expected: usize, actual: usize },
    #[error("feature {position} is '{actual}' but the classifier was trained on '{expected}'")]
    SchemaMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
    #[error("classifier returned unexpected class {0}")]
    UnexpectedClass(i64),
    #[error("classifier rejected input: {0}")]
    Rejected(String),
}

/// Binary verdict produced for a screened transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Fraud,
    NotFraud,
}

impl Label {
    pub fn from_class(class: i64) -> Result<Self, ClassifierError> {
        match class {
            1 => Ok(Self::Fraud),
            0 => Ok(Self::NotFraud),
            other => Err(ClassifierError::UnexpectedClass(other)),
        }
    }

    pub const fn is_fraud(self) -> bool {
        matches!(self, Self::Fraud)
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Fraud => "Fraud Detected!",
            Self::NotFraud => "No Fraud Detected.",
        }
    }
}

/// Confirms the classifier's training columns match the encoder's output order.
pub fn verify_schema(feature_names: &[String]) -> Result<(), ClassifierError> {
    if feature_names.len() != FEATURE_COLUMNS.len() {
        return Err(ClassifierError::Arity {
            expected: feature_names.len(),
            actual: FEATURE_COLUMNS.len(),
        });
    }

    for (position, (expected, actual)) in feature_names.iter().zip(FEATURE_COLUMNS).enumerate() {
        if expected != actual {
            return Err(ClassifierError::SchemaMismatch {
                position,
                expected: expected.clone(),
                actual: actual.to_string(),
            });
        }
    }

    Ok(())
}

/// Delegates one encoded transaction to the classifier and maps its raw class.
pub fn predict<C>(classifier: &C, vector: &FeatureVector) -> Result<Label, ClassifierError>
where
    C: Classifier + ?Sized,
{
    let class = classifier.predict(&vector.to_row())?;
    Label::from_class(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        FEATURE_COLUMNS.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn label_maps_binary_classes_only() {
        assert_eq!(Label::from_class(1), Ok(Label::Fraud));
        assert_eq!(Label::from_class(0), Ok(Label::NotFraud));
        assert_eq!(
            Label::from_class(2),
            Err(ClassifierError::UnexpectedClass(2))
        );
        assert_eq!(Label::Fraud.message(), "Fraud Detected!");
        assert_eq!(Label::NotFraud.message(), "No Fraud Detected.");
        assert!(!Label::NotFraud.is_fraud());
    }

    #[test]
    fn schema_check_accepts_training_order() {
        assert_eq!(verify_schema(&columns()), Ok(()));
    }

    #[test]
    fn schema_check_flags_reordered_columns() {
        let mut names = columns();
        names.swap(0, 1);
        assert_eq!(
            verify_schema(&names),
            Err(ClassifierError::SchemaMismatch {
                position: 0,
                expected: "CustomerId".to_string(),
                actual: "AccountId".to_string(),
            })
        );
    }

    #[test]
    fn schema_check_flags_missing_columns() {
        let mut names = columns();
        names.pop();
        assert_eq!(
            verify_schema(&names),
            Err(ClassifierError::Arity {
                expected: 11,
                actual: 12
            })
        );
    }
}
