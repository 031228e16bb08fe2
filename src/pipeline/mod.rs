mod capabilities;
mod error;
mod forest;
mod labels;
mod pipeline;
mod tfidf;

pub use capabilities::{Classifier, LabelCodec, Vectorizer};
pub use error::PipelineError;
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use labels::LabelEncoder;
pub use pipeline::{Pipeline, PipelineInfo};
pub use tfidf::TfidfVectorizer;
