use ndarray::Array1;

use super::error::PipelineError;

/// Capability exposed by a pre-trained classification model.
///
/// The probability distribution returned by `predict_probabilities` is
/// indexed by class identifier, in the same order as the label codec's
/// class list. That alignment is an artifact-production invariant; the
/// loader checks the counts match at startup.
pub trait Classifier: Send + Sync {
    /// Returns the identifier of the most probable class for the features.
    fn predict(&self, features: &Array1<f64>) -> Result<usize, PipelineError>;

    /// Returns the full probability distribution over all known classes.
    fn predict_probabilities(&self, features: &Array1<f64>) -> Result<Vec<f64>, PipelineError>;

    /// Number of classes the model distinguishes.
    fn n_classes(&self) -> usize;

    /// Width of the feature vector the model expects.
    fn n_features(&self) -> usize;
}

/// Capability exposed by a pre-trained text vectorizer.
pub trait Vectorizer: Send + Sync {
    /// Transforms raw text into a fixed-dimension feature vector.
    fn transform(&self, text: &str) -> Result<Array1<f64>, PipelineError>;

    /// Dimension of the vectors produced by `transform`.
    fn dimension(&self) -> usize;
}

/// Bidirectional mapping between class identifiers and class names.
///
/// The ordered class list is the authoritative class universe for the
/// service; `/health` reports it verbatim.
pub trait LabelCodec: Send + Sync {
    /// Maps a class name to its identifier.
    fn encode(&self, name: &str) -> Result<usize, PipelineError>;

    /// Maps a class identifier back to its name.
    fn decode(&self, id: usize) -> Result<&str, PipelineError>;

    /// The ordered list of known class names.
    fn class_names(&self) -> &[String];
}
