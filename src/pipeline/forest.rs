use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::capabilities::Classifier;
use super::error::PipelineError;

/// A node in a decision tree: either an internal split on one feature or a
/// leaf carrying a probability distribution over the class identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

/// A single decision tree stored as a flat node array; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Walks the tree for the given features and returns the leaf
    /// distribution it reaches.
    fn traverse(&self, features: &Array1<f64>) -> Result<&[f64], PipelineError> {
        let mut idx = 0;
        loop {
            let node = self.nodes.get(idx).ok_or_else(|| {
                PipelineError::ModelError(format!("tree node index {} out of range", idx))
            })?;
            match node {
                TreeNode::Leaf { distribution } => return Ok(distribution),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        PipelineError::ModelError(format!(
                            "split references feature {} but input has {} features",
                            feature,
                            features.len()
                        ))
                    })?;
                    idx = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Pre-trained random forest, deserialized from `random_forest.json`.
///
/// Prediction averages the leaf distributions reached across all trees;
/// the predicted class is the argmax of that averaged distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(n_features: usize, n_classes: usize, trees: Vec<DecisionTree>) -> Self {
        Self {
            n_features,
            n_classes,
            trees,
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Checks that the artifact is structurally usable: at least one tree,
    /// every split in range, every leaf as wide as the class count.
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest contains no trees".to_string());
        }
        if self.n_classes == 0 {
            return Err("forest declares zero classes".to_string());
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {} has no nodes", t));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                match node {
                    TreeNode::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if *feature >= self.n_features {
                            return Err(format!(
                                "tree {} node {} splits on feature {} (model has {})",
                                t, n, feature, self.n_features
                            ));
                        }
                        if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                            return Err(format!(
                                "tree {} node {} has a child index out of range",
                                t, n
                            ));
                        }
                    }
                    TreeNode::Leaf { distribution } => {
                        if distribution.len() != self.n_classes {
                            return Err(format!(
                                "tree {} node {} has a {}-wide leaf (model has {} classes)",
                                t,
                                n,
                                distribution.len(),
                                self.n_classes
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &Array1<f64>) -> Result<usize, PipelineError> {
        let distribution = self.predict_probabilities(features)?;
        distribution
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
            .ok_or_else(|| PipelineError::ModelError("empty probability distribution".into()))
    }

    fn predict_probabilities(&self, features: &Array1<f64>) -> Result<Vec<f64>, PipelineError> {
        if features.len() != self.n_features {
            return Err(PipelineError::ModelError(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        if self.trees.is_empty() {
            return Err(PipelineError::ModelError("forest contains no trees".into()));
        }

        let mut distribution = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.traverse(features)?;
            for (acc, p) in distribution.iter_mut().zip(leaf) {
                *acc += p;
            }
        }
        for p in &mut distribution {
            *p /= self.trees.len() as f64;
        }
        Ok(distribution)
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Two-feature, three-class forest: feature 0 separates class 0, then
    /// feature 1 separates class 1 from class 2.
    fn test_forest() -> RandomForest {
        let tree = DecisionTree::new(vec![
            TreeNode::Split {
                feature: 0,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            TreeNode::Split {
                feature: 1,
                threshold: 0.5,
                left: 3,
                right: 4,
            },
            TreeNode::Leaf {
                distribution: vec![0.8, 0.1, 0.1],
            },
            TreeNode::Leaf {
                distribution: vec![0.1, 0.1, 0.8],
            },
            TreeNode::Leaf {
                distribution: vec![0.1, 0.8, 0.1],
            },
        ]);
        RandomForest::new(2, 3, vec![tree])
    }

    #[test]
    fn test_leaf_routing() {
        let forest = test_forest();
        assert_eq!(forest.predict(&array![1.0, 0.0]).unwrap(), 0);
        assert_eq!(forest.predict(&array![0.0, 1.0]).unwrap(), 1);
        assert_eq!(forest.predict(&array![0.0, 0.0]).unwrap(), 2);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let forest = test_forest();
        let distribution = forest.predict_probabilities(&array![1.0, 0.0]).unwrap();
        let total: f64 = distribution.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_tree_averaging() {
        let unanimous = DecisionTree::new(vec![TreeNode::Leaf {
            distribution: vec![1.0, 0.0],
        }]);
        let split_vote = DecisionTree::new(vec![TreeNode::Leaf {
            distribution: vec![0.0, 1.0],
        }]);
        let forest = RandomForest::new(1, 2, vec![unanimous, split_vote]);

        let distribution = forest.predict_probabilities(&array![0.0]).unwrap();
        assert_eq!(distribution, vec![0.5, 0.5]);
    }

    #[test]
    fn test_predict_is_argmax_of_distribution() {
        let forest = test_forest();
        let features = array![0.0, 1.0];
        let distribution = forest.predict_probabilities(&features).unwrap();
        let argmax = distribution
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(id, _)| id)
            .unwrap();
        assert_eq!(forest.predict(&features).unwrap(), argmax);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let forest = test_forest();
        let result = forest.predict_probabilities(&array![1.0]);
        assert!(matches!(result, Err(PipelineError::ModelError(_))));
    }

    #[test]
    fn test_validate_rejects_dangling_child() {
        let tree = DecisionTree::new(vec![TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: 7,
            right: 8,
        }]);
        let forest = RandomForest::new(1, 2, vec![tree]);
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_narrow_leaf() {
        let tree = DecisionTree::new(vec![TreeNode::Leaf {
            distribution: vec![1.0],
        }]);
        let forest = RandomForest::new(1, 3, vec![tree]);
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_consistent_artifact() {
        assert!(test_forest().validate().is_ok());
    }
}
