//! Model artifact loading

use serde::{Deserialize, Serialize};
use sentinel_ports::Classifier;
use std::path::Path;
use tracing::info;

use crate::error::ModelError;
use crate::logistic::LogisticModel;
use crate::tree::TreeEnsemble;

/// A serialized classifier, tagged by `"kind"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    /// Parse and validate an artifact from JSON text
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read, parse and validate an artifact file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelArtifact::Logistic(model) => model.validate(),
            ModelArtifact::TreeEnsemble(model) => model.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Logistic(_) => "logistic",
            ModelArtifact::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            ModelArtifact::Logistic(model) => Box::new(model),
            ModelArtifact::TreeEnsemble(model) => Box::new(model),
        }
    }
}

/// Load the classifier used by the ingestion loop
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Box<dyn Classifier>, ModelError> {
    let path = path.as_ref();
    let artifact = ModelArtifact::from_path(path)?;

    match &artifact {
        ModelArtifact::Logistic(model) => {
            info!(
                "Loaded logistic model from {} (threshold {})",
                path.display(),
                model.threshold
            );
        }
        ModelArtifact::TreeEnsemble(model) => {
            info!(
                "Loaded tree ensemble from {} ({} trees, threshold {})",
                path.display(),
                model.trees.len(),
                model.threshold
            );
        }
    }

    Ok(artifact.into_classifier())
}
