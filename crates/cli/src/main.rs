use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dots::metrics::{compression_ratio, evaluate, ErrorMeasure};
use dots::synth::{random_walk, ReplayToken, WalkCfg};
use dots::{DotsCfg, Point, Simplifier};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Online trajectory simplification (DOTS) runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Simplify a CSV trajectory with columns x,y,t
    Simplify {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        cfg: CfgArgs,
    },
    /// Write a reproducible random-walk trajectory as CSV
    Synth {
        #[arg(long, default_value_t = 1000)]
        points: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Copy, Debug)]
struct CfgArgs {
    /// LSSD bound per kept segment
    #[arg(long, default_value_t = DotsCfg::default().error_threshold)]
    threshold: f64,
    /// Retire a candidate parent once its LSSD exceeds threshold × factor
    #[arg(long, default_value_t = DotsCfg::default().termination_factor)]
    termination_factor: f64,
    /// Maximum size of the layer under construction
    #[arg(long, default_value_t = DotsCfg::default().max_frontier_width)]
    max_width: usize,
}

impl From<CfgArgs> for DotsCfg {
    fn from(a: CfgArgs) -> Self {
        DotsCfg::new(a.threshold, a.termination_factor, a.max_width)
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    input_points: usize,
    output_points: usize,
    /// Emitted before `finish`.
    online_points: usize,
    compression_ratio: f64,
    measures: BTreeMap<&'static str, f64>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Simplify { input, out, cfg } => {
            let summary = simplify(&input, &out, cfg.into())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Action::Synth { points, seed, out } => synth(points, seed, &out),
        Action::Report => report(),
    }
}

fn simplify(input: &Path, out: &Path, cfg: DotsCfg) -> Result<Summary> {
    tracing::info!(input = %input.display(), out = %out.display(), ?cfg, "simplify");
    let points = io::read_points(input)?;
    let (kept, online) = run_stream(&points, cfg)?;

    let mut measures = BTreeMap::new();
    if !points.is_empty() {
        for m in ErrorMeasure::ALL {
            measures.insert(m.name(), evaluate(&points, &kept, m)?);
        }
    }
    let summary = Summary {
        input_points: points.len(),
        output_points: kept.len(),
        online_points: online,
        compression_ratio: compression_ratio(points.len(), kept.len()),
        measures,
    };
    tracing::info!(
        input = summary.input_points,
        output = summary.output_points,
        online = summary.online_points,
        "simplified"
    );

    io::write_kept(out, &points, &kept)?;
    let params = serde_json::json!({
        "input": input.to_string_lossy(),
        "error_threshold": cfg.error_threshold,
        "termination_factor": cfg.termination_factor,
        "max_frontier_width": cfg.max_frontier_width,
    });
    provenance::write_sidecar(
        out,
        provenance::Payload::new(params).with_summary(serde_json::to_value(&summary)?),
    )?;
    Ok(summary)
}

/// Stream points through a simplifier. Returns the kept indices and how many
/// were read before `finish`.
fn run_stream(points: &[Point], cfg: DotsCfg) -> Result<(Vec<usize>, usize)> {
    let mut s = Simplifier::new(cfg)?;
    let mut online = 0usize;
    for (i, p) in points.iter().enumerate() {
        s.feed_point(*p)
            .with_context(|| format!("feeding row {i}"))?;
        while s.read_output().is_some() {
            online += 1;
        }
    }
    s.finish();
    Ok((s.output_indices().to_vec(), online))
}

fn synth(points: usize, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(points, seed, out = %out.display(), "synth");
    let walk = random_walk(
        WalkCfg {
            points,
            ..WalkCfg::default()
        },
        ReplayToken::new(seed, 0),
    );
    io::write_points(out, &walk)?;
    provenance::write_sidecar(
        out,
        provenance::Payload::new(serde_json::json!({ "points": points, "seed": seed })),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "dots_version": dots::VERSION,
        "defaults": {
            "error_threshold": DotsCfg::default().error_threshold,
            "termination_factor": DotsCfg::default().termination_factor,
            "max_frontier_width": DotsCfg::default().max_frontier_width,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
