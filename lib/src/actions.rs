use crate::{weeks::PlayerWeeksDf, Result, Stat, KEY_COLUMNS};
use derive_deref::Deref;
use itertools::Itertools;
use polars::prelude::*;

/// Per-play, per-role stat contributions sharing the player-week stat schema.
#[derive(Clone, Deref)]
pub struct ActionsDf(DataFrame);

impl ActionsDf {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self(df)
    }

    pub fn lazy(self) -> LazyFrame {
        self.0.lazy()
    }

    /// Sums every stat column per (season, week, team, player_name).
    ///
    /// Player names are matched as opaque text, so two different players printed
    /// with the same name on the same team and week are merged into one row.
    pub fn aggregate(self) -> Result<PlayerWeeksDf> {
        log::trace!("actions::aggregate");
        let keys = KEY_COLUMNS.iter().map(|name| col(name)).collect_vec();
        let sums = Stat::ALL
            .iter()
            .map(|stat| col(&stat.column()).sum())
            .collect_vec();

        let df = self
            .0
            .lazy()
            .group_by(keys)
            .agg(sums)
            .sort(KEY_COLUMNS, SortMultipleOptions::default())
            .collect()?;
        log::debug!("{} player weeks", df.height());
        Ok(PlayerWeeksDf::new(df))
    }
}
