use crate::{
    error::Error,
    filter::WeekFilter,
    scoring::{Scoring, POINTS_COLUMN},
    storage::{self, OutputFormat},
    Result,
};
use derive_deref::Deref;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// One row per (season, week, team, player_name) with summed stats and, once scored, PPR points.
#[derive(Clone, Deref)]
pub struct PlayerWeeksDf(DataFrame);

impl PlayerWeeksDf {
    pub fn new(df: DataFrame) -> Self {
        Self(df)
    }

    pub fn into_inner(self) -> DataFrame {
        self.0
    }

    /// Adds the `fantasy_points_ppr` column computed from the stat columns.
    pub fn score(self, scoring: Scoring) -> Result<Self> {
        let df = self
            .0
            .lazy()
            .with_column(scoring.expr().alias(POINTS_COLUMN))
            .collect()?;
        Ok(Self(df))
    }

    /// Latest (season, week) present, comparing season first. Rows missing either are skipped.
    pub fn latest_week(&self) -> Result<(i32, i32)> {
        let df = self
            .0
            .clone()
            .lazy()
            .select([col("season"), col("week")])
            .filter(col("season").is_not_null().and(col("week").is_not_null()))
            .sort(
                ["season", "week"],
                SortMultipleOptions::default().with_order_descending(true),
            )
            .limit(1)
            .collect()?;

        if df.height() == 0 {
            return Err(Error::NoPlayerWeeks);
        }
        let season = df.column("season")?.i32()?.get(0);
        let week = df.column("week")?.i32()?.get(0);
        match (season, week) {
            (Some(season), Some(week)) => Ok((season, week)),
            _ => Err(Error::NoPlayerWeeks),
        }
    }

    /// Top `n` scorers of one week.
    ///
    /// The sort is stable, so tied scores keep table order: team, then player name.
    pub fn leaders(&self, season: i32, week: i32, n: usize) -> Result<DataFrame> {
        let filter = WeekFilter::new().season(season).week(week).build();
        let df = self
            .0
            .clone()
            .lazy()
            .filter(filter)
            .sort(
                [POINTS_COLUMN],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .limit(IdxSize::try_from(n).unwrap_or(IdxSize::MAX))
            .select([cols(["player_name", "team", POINTS_COLUMN])])
            .collect()?;
        Ok(df)
    }

    /// Writes the whole table (every season and week) into `dir`, named after the given week.
    pub fn write<P: AsRef<Path>>(
        &self,
        dir: P,
        season: i32,
        week: i32,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let path = dir.join(output_file_name(season, week, format));
        let mut df = self.0.clone();
        storage::write_dataframe(&mut df, &path, format)?;
        log::info!("Saved {} rows to {}", df.height(), path.display());
        Ok(path)
    }
}

pub fn output_file_name(season: i32, week: i32, format: OutputFormat) -> String {
    format!("player_weeks_{}_wk{}.{}", season, week, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Every week 1..=10 of 2022 and 2023, newest rows first.
    fn two_seasons() -> PlayerWeeksDf {
        let mut season = Vec::new();
        let mut week = Vec::new();
        for s in [2023i32, 2022] {
            for w in (1..=10i32).rev() {
                season.push(s);
                week.push(w);
            }
        }
        // Shuffle deterministically so the latest week isn't first or last.
        season.rotate_left(7);
        week.rotate_left(7);
        PlayerWeeksDf::new(df!("season" => season, "week" => week).unwrap())
    }

    fn scored_week() -> PlayerWeeksDf {
        PlayerWeeksDf::new(
            df!(
                "season" => [2023i32, 2023, 2023, 2023, 2023, 2023, 2023],
                "week" => [10i32, 10, 10, 10, 10, 10, 9],
                "team" => ["BAL", "BAL", "CIN", "MIA", "MIA", "SF", "SF"],
                "player_name" => ["L.Jackson", "Z.Flowers", "J.Chase", "T.Hill", "J.Waddle", "C.McCaffrey", "C.McCaffrey"],
                "rush_yds" => [70.0, 0.0, 0.0, 0.0, 0.0, 95.0, 200.0],
                "rec_yds" => [0.0, 60.0, 80.0, 120.0, 20.0, 45.0, 0.0],
                "pass_yds" => [250.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                "rush_td" => [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 3.0],
                "rec_td" => [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
                "pass_td" => [2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                "receptions" => [0.0, 6.0, 4.0, 8.0, 2.0, 4.0, 0.0]
            )
            .unwrap(),
        )
        .score(Scoring::ppr())
        .unwrap()
    }

    #[test]
    fn latest_week_compares_season_before_week() {
        assert_eq!(two_seasons().latest_week().unwrap(), (2023, 10));
    }

    #[test]
    fn latest_week_of_empty_table_is_an_error() {
        let empty = PlayerWeeksDf::new(two_seasons().0.head(Some(0)));
        assert!(matches!(empty.latest_week(), Err(Error::NoPlayerWeeks)));
    }

    #[test]
    fn latest_week_skips_rows_without_a_week() {
        let weeks = PlayerWeeksDf::new(
            df!(
                "season" => [Some(2023i32), Some(2023), Some(2023), None],
                "week" => [Some(1i32), Some(2), None, Some(17)]
            )
            .unwrap(),
        );
        assert_eq!(weeks.latest_week().unwrap(), (2023, 2));
    }

    #[test]
    fn latest_week_with_only_null_weeks_is_an_error() {
        let weeks = PlayerWeeksDf::new(
            df!(
                "season" => [Some(2023i32)],
                "week" => [None::<i32>]
            )
            .unwrap(),
        );
        assert!(matches!(weeks.latest_week(), Err(Error::NoPlayerWeeks)));
    }

    #[test]
    fn leaders_with_huge_limit_returns_whole_week() {
        let top = scored_week().leaders(2023, 10, usize::MAX).unwrap();
        assert_eq!(top.height(), 6);
    }

    #[test]
    fn leaders_ranks_one_week_by_points() {
        let weeks = scored_week();
        let top = weeks.leaders(2023, 10, 3).unwrap();
        assert_eq!(top.get_column_names(), ["player_name", "team", POINTS_COLUMN]);
        assert_eq!(top.height(), 3);

        let names = top.column("player_name").unwrap().str().unwrap();
        let points = top.column(POINTS_COLUMN).unwrap().f64().unwrap();
        // L.Jackson 7 + 10 + 6 + 8 = 31, T.Hill 12 + 6 + 8 = 26, C.McCaffrey 9.5 + 4.5 + 6 + 4 = 24
        assert_eq!(names.get(0), Some("L.Jackson"));
        assert_eq!(names.get(1), Some("T.Hill"));
        assert_eq!(names.get(2), Some("C.McCaffrey"));
        assert_relative_eq!(points.get(0).unwrap(), 31.0);
        assert_relative_eq!(points.get(1).unwrap(), 26.0);
        assert_relative_eq!(points.get(2).unwrap(), 24.0);
    }

    #[test]
    fn leaders_ties_keep_table_order() {
        // Z.Flowers 6 + 6 = 12 and J.Chase 8 + 4 = 12
        let top = scored_week().leaders(2023, 10, 5).unwrap();
        let names = top.column("player_name").unwrap().str().unwrap();
        assert_eq!(names.get(3), Some("Z.Flowers"));
        assert_eq!(names.get(4), Some("J.Chase"));
    }

    #[test]
    fn leaders_of_short_week_returns_what_exists() {
        let top = scored_week().leaders(2023, 9, 5).unwrap();
        assert_eq!(top.height(), 1);
    }

    #[test]
    fn writes_full_table_named_after_week() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("agg");
        let weeks = scored_week();

        let path = weeks.write(&out_dir, 2023, 10, OutputFormat::Feather).unwrap();
        assert_eq!(path, out_dir.join("player_weeks_2023_wk10.feather"));

        let file = std::fs::File::open(&path).unwrap();
        let loaded = IpcReader::new(file).finish().unwrap();
        assert_eq!(loaded.height(), weeks.height());
        assert!(loaded.equals(&weeks));
    }

    #[test]
    fn file_names_follow_format() {
        assert_eq!(
            output_file_name(2024, 3, OutputFormat::Csv),
            "player_weeks_2024_wk3.csv"
        );
        assert_eq!(
            output_file_name(2024, 3, OutputFormat::Parquet),
            "player_weeks_2024_wk3.parquet"
        );
    }
}
