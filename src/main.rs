use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use field_tracker::config::TrackerConfig;
use field_tracker::io::ReplaySource;
use field_tracker::system::FieldSystem;
use field_tracker::tracking::DiffMode;
use field_tracker::transport::{Framing, TcpSink};

/// Replay recorded tag detections and stream pose deltas to a TCP consumer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded detections (frame,id,t0,t1,t2,r00..r22 per row)
    replay: PathBuf,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Consumer address, overrides the config file
    #[arg(short, long)]
    sink: Option<String>,

    /// Wrap angular deltas into [-pi, pi]
    #[arg(long)]
    wrap_angles: bool,

    /// Drop tags not seen for this many consecutive frames
    #[arg(long)]
    evict_after: Option<u64>,

    /// Terminate each record with a newline
    #[arg(long)]
    newline: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("field_tracker=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    if let Some(address) = args.sink {
        config.sink.address = address;
    }
    if args.wrap_angles {
        config.diff_mode = DiffMode::ShortestAngular;
    }
    if args.evict_after.is_some() {
        config.evict_after_ticks = args.evict_after;
    }
    if args.newline {
        config.sink.framing = Framing::Newline;
    }
    config.validate()?;

    info!(
        "Diff mode {:?}, eviction {:?}, precision {}",
        config.diff_mode, config.evict_after_ticks, config.precision
    );

    let source = ReplaySource::from_path(&args.replay)?;
    let sink = TcpSink::connect(&config.sink.address, config.sink.framing)?;

    let mut system = FieldSystem::new(&config, Box::new(source), Box::new(sink));
    let summary = system.run()?;
    system.shutdown();

    info!(
        "Done: {} frames, {} observations, {} records sent, {} not ready, {} rejected, {} send failures, {} evicted",
        summary.ticks,
        summary.observations,
        summary.records_sent,
        summary.not_ready,
        summary.rejected,
        summary.send_failures,
        summary.evicted
    );

    Ok(())
}
