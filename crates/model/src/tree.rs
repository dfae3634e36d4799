//! Gradient-boosted regression trees with a logistic link
//!
//! Each tree is a flat node array rooted at index 0. A split sends the
//! sample left when `x[feature] < threshold`. The margin is
//! `base_score + sum(leaf values)` and the probability its sigmoid.

use serde::{Deserialize, Serialize};
use sentinel_core::{FEATURE_COUNT, FeatureVector};
use sentinel_ports::{Classifier, InferenceError, Prediction};

use crate::error::ModelError;
use crate::logistic::check_threshold;
use crate::{default_threshold, sigmoid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Children must point strictly forward so traversal always terminates
    fn validate(&self, tree_idx: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::invalid(format!("tree {tree_idx} has no nodes")));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelError::invalid(format!(
                            "tree {tree_idx} node {idx}: feature index {feature} out of range"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::invalid(format!(
                            "tree {tree_idx} node {idx}: threshold is not finite"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ModelError::invalid(format!(
                                "tree {tree_idx} node {idx}: child {child} is not a later node"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(ModelError::invalid(format!(
                            "tree {tree_idx} node {idx}: leaf is not finite"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Leaf value reached by `x`
    fn score(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { leaf } => return *leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    /// Initial margin (log-odds)
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::invalid("ensemble has no trees"));
        }
        if !self.base_score.is_finite() {
            return Err(ModelError::invalid("base_score is not finite"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx)?;
        }
        check_threshold(self.threshold)
    }

    pub fn margin(&self, features: &FeatureVector) -> f64 {
        let x = features.to_array();
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.score(&x))
    }

    /// Probability of the BUY class
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        sigmoid(self.margin(features))
    }

}

impl Classifier for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let probability = self.probability(features);
        Ok(Prediction {
            class: u8::from(probability >= self.threshold),
            probability,
        })
    }

    fn name(&self) -> &str {
        "tree_ensemble"
    }
}
