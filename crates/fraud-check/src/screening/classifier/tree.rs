use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,
    #[error("tree arrays have mismatched lengths")]
    LengthMismatch,
    #[error("node {node} splits on feature {feature}, model has {n_features} features")]
    FeatureOutOfRange {
        node: usize,
        feature: i64,
        n_features: usize,
    },
    #[error("node {node} points to invalid child {child}")]
    InvalidChild { node: usize, child: i64 },
    #[error("leaf node {node} has no class")]
    MissingLeafClass { node: usize },
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

/// Binary decision tree in the flat array layout used by common tree exporters.
///
/// A negative `feature` marks a leaf. Samples go left when `row[feature] <= threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn from_arrays(
        feature: &[i64],
        threshold: &[f64],
        left: &[i64],
        right: &[i64],
        class: &[Option<i64>],
        n_features: usize,
    ) -> Result<Self, TreeError> {
        let len = feature.len();
        if len == 0 {
            return Err(TreeError::Empty);
        }
        if [threshold.len(), left.len(), right.len(), class.len()]
            .iter()
            .any(|other| *other != len)
        {
            return Err(TreeError::LengthMismatch);
        }

        let mut nodes = Vec::with_capacity(len);
        for node in 0..len {
            if feature[node] < 0 {
                let class = class[node].ok_or(TreeError::MissingLeafClass { node })?;
                nodes.push(Node::Leaf { class });
                continue;
            }

            let split_feature = usize::try_from(feature[node])
                .ok()
                .filter(|index| *index < n_features)
                .ok_or(TreeError::FeatureOutOfRange {
                    node,
                    feature: feature[node],
                    n_features,
                })?;

            nodes.push(Node::Split {
                feature: split_feature,
                threshold: threshold[node],
                left: child_index(node, left[node], len)?,
                right: child_index(node, right[node], len)?,
            });
        }

        Ok(Self { nodes })
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Caller guarantees `row` covers every feature index the tree splits on.
    pub fn predict(&self, row: &[f64]) -> i64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

// Children must come after their parent, which rules out cycles.
fn child_index(node: usize, child: i64, len: usize) -> Result<usize, TreeError> {
    usize::try_from(child)
        .ok()
        .filter(|index| *index > node && *index < len)
        .ok_or(TreeError::InvalidChild { node, child })
}

/// Majority vote over decision trees; ties go to the lower class.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(trees: Vec<DecisionTree>) -> Result<Self, TreeError> {
        if trees.is_empty() {
            return Err(TreeError::Empty);
        }
        Ok(Self { trees })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn predict(&self, row: &[f64]) -> i64 {
        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.predict(row)).or_default() += 1;
        }

        let mut winner = (0, 0);
        for (class, count) in votes {
            if count > winner.1 {
                winner = (class, count);
            }
        }
        winner.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: i64, threshold: f64, low: i64, high: i64) -> DecisionTree {
        DecisionTree::from_arrays(
            &[feature, -1, -1],
            &[threshold, 0.0, 0.0],
            &[1, -1, -1],
            &[2, -1, -1],
            &[None, Some(low), Some(high)],
            3,
        )
        .expect("valid stump")
    }

    #[test]
    fn stump_routes_on_threshold_inclusive_left() {
        let tree = stump(1, 70.0, 0, 1);
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict(&[0.0, 69.9, 0.0]), 0);
        assert_eq!(tree.predict(&[0.0, 70.0, 0.0]), 0);
        assert_eq!(tree.predict(&[0.0, 70.1, 0.0]), 1);
    }

    #[test]
    fn rejects_structural_defects() {
        assert_eq!(
            DecisionTree::from_arrays(&[], &[], &[], &[], &[], 1),
            Err(TreeError::Empty)
        );
        assert_eq!(
            DecisionTree::from_arrays(&[-1], &[0.0, 1.0], &[-1], &[-1], &[Some(0)], 1),
            Err(TreeError::LengthMismatch)
        );
        assert_eq!(
            DecisionTree::from_arrays(&[-1], &[0.0], &[-1], &[-1], &[None], 1),
            Err(TreeError::MissingLeafClass { node: 0 })
        );
        assert_eq!(
            DecisionTree::from_arrays(
                &[4, -1, -1],
                &[0.0; 3],
                &[1, -1, -1],
                &[2, -1, -1],
                &[None, Some(0), Some(1)],
                3
            ),
            Err(TreeError::FeatureOutOfRange {
                node: 0,
                feature: 4,
                n_features: 3
            })
        );
    }

    #[test]
    fn rejects_backward_children() {
        let result = DecisionTree::from_arrays(
            &[0, 0, -1],
            &[0.0; 3],
            &[1, 0, -1],
            &[2, 2, -1],
            &[None, None, Some(1)],
            1,
        );
        assert_eq!(result, Err(TreeError::InvalidChild { node: 1, child: 0 }));
    }

    #[test]
    fn forest_takes_majority_and_breaks_ties_low() {
        let forest = RandomForest::new(vec![
            stump(0, 10.0, 0, 1),
            stump(1, 10.0, 0, 1),
            stump(2, 10.0, 0, 1),
        ])
        .expect("forest builds");
        assert_eq!(forest.n_trees(), 3);
        assert_eq!(forest.predict(&[20.0, 20.0, 0.0]), 1);
        assert_eq!(forest.predict(&[20.0, 0.0, 0.0]), 0);

        let tied = RandomForest::new(vec![stump(0, 10.0, 0, 1), stump(1, 10.0, 0, 1)])
            .expect("forest builds");
        assert_eq!(tied.predict(&[20.0, 0.0, 0.0]), 0);
        assert!(RandomForest::new(Vec::new()).is_err());
    }
}
