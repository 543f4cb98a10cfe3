//! Transaction screening: selection cascade, feature encoding, and classifier invocation.

pub mod cascade;
pub mod category;
pub mod classifier;
pub mod dataset;
pub mod features;
pub mod router;
pub mod selection;
pub mod service;

pub use cascade::{CascadeOptions, SelectionCascade};
pub use category::{ProductCategory, UNKNOWN_CATEGORY_CODE};
pub use classifier::{Classifier, ClassifierError, Label, TrainedModel};
pub use dataset::{DatasetError, ReferenceDataset, TransactionRecord};
pub use features::{EncodingError, FeatureVector, FEATURE_COLUMNS};
pub use router::screening_router;
pub use selection::{SelectionField, SelectionState};
pub use service::{FraudScreeningService, ScreeningError, StartupError, Verdict};
