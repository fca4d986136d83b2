mod cache;
mod cli;
mod error;
mod pipeline;
mod server;
mod source;

use std::{env, path::Path};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::TtlCache;
use cli::Mode;
use pipeline::Pipeline;
use server::AppState;
use source::{HttpSource, LineSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("walls_proxy=info,walls_parser=info")),
        )
        .init();

    let source = HttpSource::new(args.url, args.selector, args.timeout)?;
    let pipeline = Pipeline::new(source);

    match args.mode {
        Mode::Write => write_calendar(&pipeline, &args.output).await,
        Mode::Serve => {
            let state = AppState::new(pipeline, TtlCache::new(args.cache_ttl));
            server::serve(args.address, state).await?;
            Ok(())
        }
    }
}

async fn write_calendar<S: LineSource + Sync>(
    pipeline: &Pipeline<S>,
    output: &Path,
) -> anyhow::Result<()> {
    let calendar = pipeline.run().await?;

    tokio::fs::write(output, &calendar)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    info!(path = %output.display(), bytes = calendar.len(), "wrote calendar");
    Ok(())
}
