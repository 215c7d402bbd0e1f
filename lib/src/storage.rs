use crate::{error::Error, Result};
use parse_display::{Display, FromStr};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

const SNAPSHOT_PREFIX: &str = "pbp_";
const SNAPSHOT_EXTENSION: &str = ".parquet";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, FromStr)]
#[display(style = "lowercase")]
pub enum OutputFormat {
    /// Arrow IPC file
    #[default]
    Feather,
    Parquet,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Feather => "feather",
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

pub fn load_parquet<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let mut file = File::open(path)?;
    let df = ParquetReader::new(&mut file).finish()?;
    Ok(df)
}

/// Finds the newest `pbp_<date>.parquet` in `dir`.
///
/// Snapshot names carry an ISO date stamp, so the lexicographically greatest name is the latest.
pub fn latest_snapshot<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let mut latest: Option<PathBuf> = None;

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_snapshot = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| {
                name.starts_with(SNAPSHOT_PREFIX) && name.ends_with(SNAPSHOT_EXTENSION)
            });

        if is_snapshot && path.is_file() && latest.as_ref().map_or(true, |l| path > *l) {
            latest = Some(path);
        }
    }

    let latest = latest.ok_or_else(|| Error::NoSnapshot(dir.to_path_buf()))?;
    log::debug!("Latest snapshot {}", latest.display());
    Ok(latest)
}

pub fn write_dataframe<P: AsRef<Path>>(
    df: &mut DataFrame,
    path: P,
    format: OutputFormat,
) -> Result<()> {
    let mut file = File::create(path)?;
    match format {
        OutputFormat::Feather => IpcWriter::new(&mut file).finish(df)?,
        OutputFormat::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        OutputFormat::Csv => CsvWriter::new(&mut file).include_header(true).finish(df)?,
    }
    Ok(())
}
