use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ncurve::io::save_file;
use ncurve::rand::{draw_monotone_curve, MonotoneCfg, ReplayToken};
use ncurve::{Direction, LoadError, SaveCfg, Session};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod shell;

#[derive(Parser)]
#[command(name = "ncurve-cli")]
#[command(about = "Load monotone point curves and report length, area and extrema")]
struct Cmd {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write fixed-decimal coordinates instead of exact round-trip values
    #[arg(long, global = true)]
    precision: Option<usize>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Load a point file and print its statistics
    Stats {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Translate every point of a file and save the result to a new file
    Shift {
        input: PathBuf,
        out: PathBuf,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        dx: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        dy: f64,
    },
    /// Sample a random monotone curve and save it to a new file
    Generate {
        out: PathBuf,
        #[arg(long, default_value_t = 32)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        descending: bool,
    },
    /// Menu-driven session on stdin/stdout
    Interactive,
}

#[derive(Serialize)]
struct StatsReport {
    input: String,
    points: usize,
    direction: String,
    complete: bool,
    length: f64,
    area: f64,
    low: [f64; 2],
    high: [f64; 2],
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let save_cfg = SaveCfg {
        precision: cmd.precision,
    };
    match cmd.action {
        Action::Stats { input, json } => stats(input, json),
        Action::Shift { input, out, dx, dy } => shift(input, out, dx, dy, save_cfg),
        Action::Generate {
            out,
            count,
            seed,
            index,
            descending,
        } => generate(out, count, seed, index, descending, save_cfg),
        Action::Interactive => interactive(save_cfg),
    }
}

fn stats(input: PathBuf, json: bool) -> Result<()> {
    tracing::info!(input = %input.display(), "stats");
    let mut session = Session::new();
    let complete = match session.load_from_file(&input) {
        Ok(_) => true,
        Err(LoadError::PartialSequenceViolation {
            line,
            accepted,
            reason,
        }) => {
            tracing::warn!(line, accepted, %reason, "using points read before the violation");
            false
        }
        Err(e) => return Err(e).with_context(|| format!("loading {}", input.display())),
    };
    let m = *session
        .metrics()
        .with_context(|| format!("no statistics for {}", input.display()))?;
    let report = StatsReport {
        input: input.display().to_string(),
        points: session.point_count(),
        direction: session.curve().direction().to_string(),
        complete,
        length: m.length,
        area: m.area,
        low: [m.low.x, m.low.y],
        high: [m.high.x, m.high.y],
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("points:    {}", report.points);
        println!("direction: {}", report.direction);
        println!("length:    {:.6}", report.length);
        println!("area:      {:.6}", report.area);
        println!("low:       ({:.6}, {:.6})", m.low.x, m.low.y);
        println!("high:      ({:.6}, {:.6})", m.high.x, m.high.y);
    }
    Ok(())
}

fn shift(input: PathBuf, out: PathBuf, dx: f64, dy: f64, save_cfg: SaveCfg) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), dx, dy, "shift");
    let mut session = Session::with_save_cfg(save_cfg);
    session
        .load_from_file(&input)
        .with_context(|| format!("loading {}", input.display()))?;
    session
        .shift(dx, dy)
        .with_context(|| format!("shifting {} by ({dx}, {dy})", input.display()))?;
    session
        .save_to_file(&out)
        .with_context(|| format!("saving {}", out.display()))?;
    Ok(())
}

fn generate(
    out: PathBuf,
    count: usize,
    seed: u64,
    index: u64,
    descending: bool,
    save_cfg: SaveCfg,
) -> Result<()> {
    if count == 0 {
        bail!("--count must be at least 1");
    }
    let cfg = MonotoneCfg {
        point_count: count,
        direction: if descending {
            Direction::Descending
        } else {
            Direction::Ascending
        },
        ..MonotoneCfg::default()
    };
    let curve = draw_monotone_curve(cfg, ReplayToken { seed, index });
    tracing::info!(out = %out.display(), points = curve.len(), seed, index, "generate");
    save_file(&out, curve.iter(), save_cfg).with_context(|| format!("saving {}", out.display()))?;
    Ok(())
}

fn interactive(save_cfg: SaveCfg) -> Result<()> {
    let mut session = Session::with_save_cfg(save_cfg);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell::Shell::new(stdin.lock(), stdout.lock(), &mut session).run()?;
    if session.state().modified {
        tracing::warn!(points = session.point_count(), "exited with unsaved changes");
    }
    Ok(())
}
