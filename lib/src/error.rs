use polars::error::PolarsError;
use std::io::Error as IoError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("No pbp_*.parquet snapshot found in {}", .0.display())]
    NoSnapshot(PathBuf),

    #[error("Snapshot {} contains no plays", .0.display())]
    EmptySnapshot(PathBuf),

    #[error("Snapshot is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No player-week rows to report on")]
    NoPlayerWeeks,
}
