use std::collections::HashMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::capabilities::Vectorizer;
use super::error::PipelineError;

/// Pre-trained TF-IDF vectorizer, deserialized from `vectorizer.json`.
///
/// Holds the vocabulary (token -> feature index) and one IDF weight per
/// feature, both produced out-of-band at training time. `transform`
/// computes raw term counts, applies the IDF weights and L2-normalises
/// the result, matching the conventions of the vectorizer the model was
/// trained against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Token -> feature index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per feature index; its length is the feature dimension
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self { vocabulary, idf }
    }

    /// Checks that the artifact is structurally usable: every vocabulary
    /// index must address an IDF weight.
    pub fn validate(&self) -> Result<(), String> {
        if self.idf.is_empty() {
            return Err("vectorizer has an empty feature space".to_string());
        }
        for (token, &idx) in &self.vocabulary {
            if idx >= self.idf.len() {
                return Err(format!(
                    "vocabulary entry '{}' maps to index {} but only {} IDF weights are present",
                    token,
                    idx,
                    self.idf.len()
                ));
            }
        }
        Ok(())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Splits text into alphanumeric runs of at least two characters,
    /// the token pattern the vectorizer was trained with.
    fn tokenize(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= 2)
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<Array1<f64>, PipelineError> {
        let mut features = Array1::zeros(self.idf.len());
        for token in Self::tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(token) {
                features[idx] += 1.0;
            }
        }

        for (idx, weight) in features.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        // Out-of-vocabulary input yields the zero vector, which stays zero.
        let norm: f64 = features.iter().map(|&x| x * x).sum::<f64>().sqrt();
        if norm > 1e-10 {
            features /= norm;
        }

        Ok(features)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vectorizer() -> TfidfVectorizer {
        let vocabulary = HashMap::from([
            ("jaringan".to_string(), 0),
            ("multimedia".to_string(), 1),
            ("aplikasi".to_string(), 2),
        ]);
        TfidfVectorizer::new(vocabulary, vec![1.0, 1.0, 2.0])
    }

    #[test]
    fn test_known_token_weighting() {
        let vectorizer = test_vectorizer();
        let features = vectorizer.transform("pengembangan aplikasi jaringan").unwrap();
        assert_eq!(features.len(), 3);
        // aplikasi carries twice the IDF weight of jaringan
        assert!(features[2] > features[0]);
        assert_eq!(features[1], 0.0);
    }

    #[test]
    fn test_l2_normalization() {
        let vectorizer = test_vectorizer();
        let features = vectorizer.transform("aplikasi multimedia jaringan").unwrap();
        let norm: f64 = features.iter().map(|&x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let vectorizer = test_vectorizer();
        let features = vectorizer.transform("completely unrelated words").unwrap();
        assert!(features.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_short_tokens_filtered() {
        // Single-character runs never match the trained token pattern.
        let tokens: Vec<&str> = TfidfVectorizer::tokenize("a di jaringan x").collect();
        assert_eq!(tokens, vec!["di", "jaringan"]);
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        let tokens: Vec<&str> = TfidfVectorizer::tokenize("aplikasi-multimedia (jaringan)").collect();
        assert_eq!(tokens, vec!["aplikasi", "multimedia", "jaringan"]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let vocabulary = HashMap::from([("jaringan".to_string(), 5)]);
        let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]);
        assert!(vectorizer.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_consistent_artifact() {
        assert!(test_vectorizer().validate().is_ok());
    }
}
