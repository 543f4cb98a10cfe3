use super::tree::{DecisionTree, RandomForest, TreeError};
use super::{Classifier, ClassifierError};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model artifact declares no feature names")]
    NoFeatures,
    #[error("tree {index} is malformed: {source}")]
    Tree { index: usize, source: TreeError },
}

#[derive(Debug, Deserialize)]
struct ArtifactDocument {
    feature_names: Vec<String>,
    model: EstimatorDocument,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EstimatorDocument {
    DecisionTree { tree: TreeDocument },
    RandomForest { trees: Vec<TreeDocument> },
}

#[derive(Debug, Deserialize)]
struct TreeDocument {
    feature: Vec<i64>,
    threshold: Vec<f64>,
    left: Vec<i64>,
    right: Vec<i64>,
    class: Vec<Option<i64>>,
}

impl TreeDocument {
    fn build(&self, index: usize, n_features: usize) -> Result<DecisionTree, ArtifactError> {
        DecisionTree::from_arrays(
            &self.feature,
            &self.threshold,
            &self.left,
            &self.right,
            &self.class,
            n_features,
        )
        .map_err(|source| ArtifactError::Tree { index, source })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Estimator {
    Tree(DecisionTree),
    Forest(RandomForest),
}

/// Pre-trained classifier loaded from its serialized JSON artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    feature_names: Vec<String>,
    estimator: Estimator,
}

impl TrainedModel {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let file = std::fs::File::open(path.as_ref())?;
        let model = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            path = %path.as_ref().display(),
            features = model.feature_names.len(),
            trees = model.n_trees(),
            nodes = model.n_nodes(),
            leaves = model.n_leaves(),
            "model artifact loaded"
        );
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let document: ArtifactDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    fn from_document(document: ArtifactDocument) -> Result<Self, ArtifactError> {
        let n_features = document.feature_names.len();
        if n_features == 0 {
            return Err(ArtifactError::NoFeatures);
        }

        let estimator = match document.model {
            EstimatorDocument::DecisionTree { tree } => Estimator::Tree(tree.build(0, n_features)?),
            EstimatorDocument::RandomForest { trees } => {
                let trees = trees
                    .iter()
                    .enumerate()
                    .map(|(index, tree)| tree.build(index, n_features))
                    .collect::<Result<Vec<_>, _>>()?;
                let forest = RandomForest::new(trees)
                    .map_err(|source| ArtifactError::Tree { index: 0, source })?;
                Estimator::Forest(forest)
            }
        };

        Ok(Self {
            feature_names: document.feature_names,
            estimator,
        })
    }

    pub fn n_trees(&self) -> usize {
        match &self.estimator {
            Estimator::Tree(_) => 1,
            Estimator::Forest(forest) => forest.n_trees(),
        }
    }

    /// Total node count across every tree.
    pub fn n_nodes(&self) -> usize {
        self.tree_slice().iter().map(DecisionTree::n_nodes).sum()
    }

    pub fn n_leaves(&self) -> usize {
        self.tree_slice().iter().map(DecisionTree::n_leaves).sum()
    }

    fn tree_slice(&self) -> &[DecisionTree] {
        match &self.estimator {
            Estimator::Tree(tree) => std::slice::from_ref(tree),
            Estimator::Forest(forest) => forest.trees(),
        }
    }
}

impl Classifier for TrainedModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &[f64]) -> Result<i64, ClassifierError> {
        if row.len() != self.feature_names.len() {
            return Err(ClassifierError::Arity {
                expected: self.feature_names.len(),
                actual: row.len(),
            });
        }

        Ok(match &self.estimator {
            Estimator::Tree(tree) => tree.predict(row),
            Estimator::Forest(forest) => forest.predict(row),
        })
    }
}
