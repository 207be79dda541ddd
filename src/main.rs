// ABOUTME: Entry point for the spinup CLI application.
// ABOUTME: Resolves run configuration, wires console output to the event stream, and runs the pipeline.

mod cli;

use clap::Parser;
use cli::Cli;
use spinup::config::PipelineContext;
use spinup::error::{Error, Result};
use spinup::events::EventDispatcher;
use spinup::output::{Output, OutputMode};
use spinup::pipeline::{Pipeline, Plan};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over the verbose flag
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output_mode());
    let result = run(cli, output).await;

    if let Err(e) = result {
        // Normal and quiet modes already printed the `error` event to stderr.
        let reported = matches!(e, Error::Pipeline(_)) && output.mode() != OutputMode::Json;
        if !reported {
            output.error(&e.to_string());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    let ctx = PipelineContext::from_env(cli.pipeline_args())?;

    if cli.dry_run {
        let plan = Plan::for_context(&ctx).map_err(Error::Plan)?;
        println!("Dry run for {} ({})", ctx.repo_path.display(), ctx.environment);
        print!("{plan}");
        return Ok(());
    }

    output.progress(&format!(
        "Deploying {} on {} ({})",
        ctx.framework, ctx.platform, ctx.environment
    ));

    let events = Arc::new(EventDispatcher::new());
    events.subscribe_all(move |event| output.emit(event));

    let pipeline = Pipeline::new(events);
    pipeline.run(&ctx).await?;
    Ok(())
}
