//! A thin HTTP inference service: given a thesis title, predict its
//! concentration (academic specialization) and the per-class probabilities.
//!
//! The service wraps three pre-trained artifacts produced out-of-band: a
//! random-forest classifier, a TF-IDF vectorizer and a label encoder. They
//! are deserialized once at startup, held read-only for the process
//! lifetime and composed into a fixed pipeline: lower-case the title,
//! vectorize, classify, decode the labels.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use skripsi::ArtifactStore;
//!
//! let pipeline = ArtifactStore::new("models").load()?;
//!
//! let (concentration, probabilities) =
//!     pipeline.predict("Analisis Keamanan Jaringan Kampus")?;
//! println!("Predicted concentration: {}", concentration);
//! for (class, probability) in probabilities {
//!     println!("{}: {:.3}", class, probability);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Serving over HTTP
//!
//! ```rust,no_run
//! # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use skripsi::{server, ArtifactStore};
//!
//! let pipeline = Arc::new(ArtifactStore::new_default().load()?);
//! let app = server::app(pipeline);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline is `Send + Sync`; concurrent requests read the shared
//! artifacts without synchronization because nothing mutates them after
//! load.

pub mod artifacts;
pub mod pipeline;
pub mod server;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use pipeline::{
    Classifier, DecisionTree, LabelCodec, LabelEncoder, Pipeline, PipelineError, PipelineInfo,
    RandomForest, TfidfVectorizer, TreeNode, Vectorizer,
};

pub fn init_logger() {
    env_logger::init();
}
