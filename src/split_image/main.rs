mod application;
mod domain;
mod infrastructure;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use application::split_job::SplitJob;
use application::split_service::SplitService;
use infrastructure::file_storage::LocalFileStorage;
use infrastructure::image_codec::DefaultImageCodec;

/// Split an image into its top and bottom halves
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input image
    input: PathBuf,

    /// Output path for the top half (default: <input>_top.<ext>)
    #[arg(long)]
    top: Option<PathBuf>,

    /// Output path for the bottom half (default: <input>_bottom.<ext>)
    #[arg(long)]
    bottom: Option<PathBuf>,

    /// Print a JSON report instead of the confirmation message
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let job = SplitJob::new(args.input, args.top, args.bottom)?;
    let service = SplitService::new(
        Arc::new(DefaultImageCodec::new()),
        Arc::new(LocalFileStorage::new()),
    );

    let outcome = service
        .split_file(&job)
        .await
        .with_context(|| format!("failed to split {}", job.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "Images saved as: {} and {}",
            outcome.top.path.display(),
            outcome.bottom.path.display()
        );
    }
    Ok(())
}
