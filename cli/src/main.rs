use anyhow::{bail, Result};
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;
use weekly_ppr::{OutputFormat, PbpDf};

/// Builds per-player, per-week PPR stats from a play-by-play snapshot
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding pbp_<date>.parquet snapshots; the newest is used
    #[arg(long, value_name = "DIR", default_value = "data/parquet")]
    snapshot_dir: PathBuf,

    /// Use this snapshot instead of the newest one in --snapshot-dir
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Directory the player-week table is written to
    #[arg(long, value_name = "DIR", default_value = "data/agg")]
    out_dir: PathBuf,

    /// Number of leaders to print for the latest week
    #[arg(short = 'n', long = "top", default_value_t = 5)]
    top: usize,

    /// feather, parquet or csv
    #[arg(long, default_value = "feather")]
    format: String,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set the default level based on verbosity
    let default_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = ConfigBuilder::new()
        .add_filter_allow_str("weekly_ppr")
        .build();

    TermLogger::init(
        default_level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    log::trace!("Args {:#?}", args);

    let format: OutputFormat = match args.format.parse() {
        Ok(format) => format,
        Err(_) => bail!("Unsupported format {:?}. Use: feather, parquet, or csv", args.format),
    };

    let snapshot = match args.file {
        Some(file) => file,
        None => weekly_ppr::latest_snapshot(&args.snapshot_dir)?,
    };
    let pbp = PbpDf::load(&snapshot)?;
    println!(
        "Loaded {} plays from {}",
        pbp.height(),
        snapshot.display()
    );

    let player_weeks = pbp.player_weeks()?;
    let (season, week) = player_weeks.latest_week()?;

    println!("\nTop-{} PPR, {} week {}:", args.top, season, week);
    let leaders = player_weeks.leaders(season, week, args.top)?;
    println!("{}", leaders);

    let out_file = player_weeks.write(&args.out_dir, season, week, format)?;
    println!(
        "\nSaved {} rows to {}",
        player_weeks.height(),
        out_file.display()
    );

    Ok(())
}
