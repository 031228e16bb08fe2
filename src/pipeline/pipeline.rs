use std::collections::HashMap;
use std::sync::Arc;

use super::capabilities::{Classifier, LabelCodec, Vectorizer};
use super::error::PipelineError;

/// The inference pipeline composing the three pre-trained artifacts:
/// text -> feature vector -> class distribution -> labelled probabilities.
///
/// # Thread Safety
///
/// All artifacts are read-only after load and shared through `Arc`, so the
/// pipeline is `Send + Sync` and can serve concurrent requests without
/// synchronization.
#[derive(Clone)]
pub struct Pipeline {
    classifier: Arc<dyn Classifier>,
    vectorizer: Arc<dyn Vectorizer>,
    labels: Arc<dyn LabelCodec>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Pipeline>();
    }
};

/// Information about the loaded pipeline, for startup logging and the
/// read-only endpoints.
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub n_classes: usize,
    pub class_names: Vec<String>,
    pub feature_dimension: usize,
}

impl Pipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        vectorizer: Arc<dyn Vectorizer>,
        labels: Arc<dyn LabelCodec>,
    ) -> Self {
        Self {
            classifier,
            vectorizer,
            labels,
        }
    }

    /// Returns information about the pipeline's loaded artifacts
    pub fn info(&self) -> PipelineInfo {
        PipelineInfo {
            n_classes: self.classifier.n_classes(),
            class_names: self.labels.class_names().to_vec(),
            feature_dimension: self.vectorizer.dimension(),
        }
    }

    /// The ordered list of class names the model distinguishes.
    pub fn class_names(&self) -> &[String] {
        self.labels.class_names()
    }

    /// Predicts the concentration for the given thesis title.
    ///
    /// The title is lower-cased, vectorized and classified; the argmax class
    /// and every index of the probability distribution are decoded to class
    /// names. Returns the predicted class name and the full name -> probability
    /// map, which covers every known class and sums to ~1.0.
    ///
    /// The caller validates that the title is non-empty after trimming;
    /// this method performs no input validation of its own. Any artifact
    /// error propagates with its cause message.
    pub fn predict(&self, title: &str) -> Result<(String, HashMap<String, f64>), PipelineError> {
        let features = self.vectorizer.transform(&title.to_lowercase())?;

        let distribution = self.classifier.predict_probabilities(&features)?;
        let class_id = self.classifier.predict(&features)?;

        let concentration = self.labels.decode(class_id)?.to_string();

        let mut probabilities = HashMap::with_capacity(distribution.len());
        for (id, probability) in distribution.iter().enumerate() {
            probabilities.insert(self.labels.decode(id)?.to_string(), *probability);
        }

        Ok((concentration, probabilities))
    }
}
