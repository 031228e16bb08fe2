use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::info;
use skripsi::{server, ArtifactStore};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the three model artifacts
    /// (defaults to $SKRIPSI_MODELS, then a models/ directory next to the binary)
    #[arg(short, long)]
    artifacts_dir: Option<PathBuf>,

    /// Listen port (defaults to $PORT, then 8000)
    #[arg(short, long)]
    port: Option<u16>,
}

fn resolve_port(flag: Option<u16>) -> anyhow::Result<u16> {
    if let Some(port) = flag {
        return Ok(port);
    }
    match std::env::var("PORT") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("PORT must be a valid port number, got {:?}", value)),
        Err(_) => Ok(8000),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = match args.artifacts_dir {
        Some(dir) => ArtifactStore::new(dir),
        None => ArtifactStore::new_default(),
    };

    // Fatal on any artifact failure: the process must not serve without
    // all three artifacts loaded and aligned.
    let pipeline = store
        .load()
        .with_context(|| format!("failed to load artifacts from {:?}", store.artifacts_dir()))?;

    let pipeline_info = pipeline.info();
    info!(
        "Pipeline ready: {} classes, {}-dimensional features",
        pipeline_info.n_classes, pipeline_info.feature_dimension
    );

    let port = resolve_port(args.port)?;
    let app = server::app(Arc::new(pipeline));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Serving on {}", addr);

    axum::serve(listener, app)
        .await
        .context("server exited with an error")?;

    Ok(())
}
