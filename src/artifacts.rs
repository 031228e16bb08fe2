use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::pipeline::{
    Classifier, LabelCodec, LabelEncoder, Pipeline, RandomForest, TfidfVectorizer, Vectorizer,
};

/// Fixed artifact file names inside the artifacts directory.
pub const CLASSIFIER_FILE: &str = "random_forest.json";
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    Missing(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unusable artifact {path}: {reason}")]
    Unusable { path: PathBuf, reason: String },
    #[error("Artifact mismatch: {0}")]
    Misaligned(String),
}

/// Loads the three pre-trained artifacts from a directory and assembles the
/// inference pipeline. Artifacts are produced out-of-band, loaded once at
/// startup and never reloaded; any failure here is fatal and the process
/// must not serve.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates an ArtifactStore with the default artifacts directory
    pub fn new_default() -> Self {
        Self::new(Self::default_artifacts_dir())
    }

    /// Returns the default artifacts directory path
    pub fn default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("SKRIPSI_MODELS") {
            return PathBuf::from(path);
        }

        // 2. Use the models directory next to the server executable
        if let Ok(exe) = env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("models");
            }
        }

        // 3. Fallback to the working directory
        PathBuf::from("models")
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.artifacts_dir.join(CLASSIFIER_FILE)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifacts_dir.join(VECTORIZER_FILE)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.artifacts_dir.join(LABEL_ENCODER_FILE)
    }

    /// Deserializes all three artifacts and assembles the pipeline.
    ///
    /// Succeeds only if every artifact parses, is structurally usable and
    /// the artifacts agree with each other: the vectorizer's feature
    /// dimension must match the classifier's input width, and the
    /// classifier's class count must match the label encoder's class list.
    pub fn load(&self) -> Result<Pipeline, ArtifactError> {
        log::info!("Loading artifacts from {:?}", self.artifacts_dir);

        let classifier: RandomForest = self.read_artifact(self.classifier_path())?;
        let vectorizer: TfidfVectorizer = self.read_artifact(self.vectorizer_path())?;
        let labels: LabelEncoder = self.read_artifact(self.label_encoder_path())?;

        classifier.validate().map_err(|reason| ArtifactError::Unusable {
            path: self.classifier_path(),
            reason,
        })?;
        vectorizer.validate().map_err(|reason| ArtifactError::Unusable {
            path: self.vectorizer_path(),
            reason,
        })?;
        labels.validate().map_err(|reason| ArtifactError::Unusable {
            path: self.label_encoder_path(),
            reason,
        })?;

        if vectorizer.dimension() != classifier.n_features() {
            return Err(ArtifactError::Misaligned(format!(
                "vectorizer produces {}-dimensional vectors but the classifier expects {} features",
                vectorizer.dimension(),
                classifier.n_features()
            )));
        }
        if classifier.n_classes() != labels.class_names().len() {
            return Err(ArtifactError::Misaligned(format!(
                "classifier distinguishes {} classes but the label encoder knows {}",
                classifier.n_classes(),
                labels.class_names().len()
            )));
        }

        log::info!(
            "Artifacts loaded: {} classes, {} features, {} trees, vocabulary of {}",
            classifier.n_classes(),
            classifier.n_features(),
            classifier.n_trees(),
            vectorizer.vocabulary_size()
        );
        log::info!("Known classes: {:?}", labels.class_names());

        Ok(Pipeline::new(
            Arc::new(classifier),
            Arc::new(vectorizer),
            Arc::new(labels),
        ))
    }

    fn read_artifact<T: DeserializeOwned>(&self, path: PathBuf) -> Result<T, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path));
        }
        let bytes = fs::read(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Corrupt { path, source })
    }
}
