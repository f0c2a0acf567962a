use anyhow::{Context, Result};
use clap::Parser;
use photonsim_io::CategoryForest;
use photonsim_lib::{load_config, ReplayApp, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Label optical photons with their track genealogy", long_about = None)]
struct Args {
    /// Recorded engine notifications, one JSON object per line
    #[arg(short, long)]
    input: PathBuf,

    /// Where the labelled JSON output is written
    #[arg(short, long)]
    output: PathBuf,

    /// Custom config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Also write one Graphviz file per event next to the output
    #[arg(long)]
    dot: bool,

    /// Replay events one after another on the current thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    photonsim_core::init_logging();
    let args = Args::parse();

    let config = load_config(&args.config)?;
    let mut app = ReplayApp::new(config)?;
    if args.sequential {
        app.set_parallel(false);
    }

    let streams = photonsim_io::read_event_file(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let run = app.run(&streams);

    photonsim_io::write_json_file(&run, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(
        output = %args.output.display(),
        events = run.events.len(),
        photons = run.total_photons(),
        "Output written"
    );

    if args.dot {
        for event in &run.events {
            let path = args
                .output
                .with_extension(format!("event{}.dot", event.event_id));
            std::fs::write(&path, CategoryForest::build(event).to_dot())
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }

    Ok(())
}
