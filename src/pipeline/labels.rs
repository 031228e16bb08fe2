use serde::{Deserialize, Serialize};

use super::capabilities::LabelCodec;
use super::error::PipelineError;

/// Pre-trained label encoder, deserialized from `label_encoder.json`.
///
/// The class identifier of a name is its index in `classes`; that ordering
/// must match the classifier's probability-array order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("label encoder has no classes".to_string());
        }
        Ok(())
    }
}

impl LabelCodec for LabelEncoder {
    fn encode(&self, name: &str) -> Result<usize, PipelineError> {
        self.classes
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PipelineError::LabelError(format!("unknown class name '{}'", name)))
    }

    fn decode(&self, id: usize) -> Result<&str, PipelineError> {
        self.classes
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| {
                PipelineError::LabelError(format!(
                    "class identifier {} out of range ({} classes)",
                    id,
                    self.classes.len()
                ))
            })
    }

    fn class_names(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "Jaringan Komputer".to_string(),
            "Multimedia".to_string(),
            "Rekayasa Perangkat Lunak".to_string(),
        ])
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let encoder = test_encoder();
        for name in ["Jaringan Komputer", "Multimedia", "Rekayasa Perangkat Lunak"] {
            let id = encoder.encode(name).unwrap();
            assert_eq!(encoder.decode(id).unwrap(), name);
        }
    }

    #[test]
    fn test_decode_out_of_range() {
        let encoder = test_encoder();
        assert!(matches!(
            encoder.decode(3),
            Err(PipelineError::LabelError(_))
        ));
    }

    #[test]
    fn test_encode_unknown_name() {
        let encoder = test_encoder();
        assert!(encoder.encode("Sistem Informasi").is_err());
    }

    #[test]
    fn test_class_names_preserve_order() {
        let encoder = test_encoder();
        assert_eq!(encoder.class_names()[0], "Jaringan Komputer");
        assert_eq!(encoder.class_names()[2], "Rekayasa Perangkat Lunak");
    }

    #[test]
    fn test_validate_rejects_empty_class_list() {
        assert!(LabelEncoder::new(vec![]).validate().is_err());
    }
}
