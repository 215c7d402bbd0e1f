use crate::{
    actions::ActionsDf, error::Error, weeks::PlayerWeeksDf, Result, Role, Stat, Scoring,
};
use derive_deref::Deref;
use itertools::Itertools;
use polars::prelude::*;
use std::path::Path;

/// Play-by-play columns the pipeline reads. Anything else in the snapshot is carried, not used.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "season",
    "week",
    "posteam",
    "rusher_player_name",
    "receiver_player_name",
    "passer_player_name",
    "yards_gained",
    "touchdown",
    "complete_pass",
];

#[derive(Clone, Deref)]
pub struct PbpDf(DataFrame);

impl PbpDf {
    pub fn new(df: DataFrame) -> Self {
        PbpDf(df)
    }

    /// Loads a snapshot file and checks it has plays and the columns we consume.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let df = crate::load_parquet(path)?;
        if df.height() == 0 {
            return Err(Error::EmptySnapshot(path.to_path_buf()));
        }
        let pbp = PbpDf(df);
        pbp.validate()?;

        let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
        log::info!("Loaded {} plays from {}", pbp.height(), name);
        Ok(pbp)
    }

    pub fn validate(&self) -> Result<()> {
        let missing = REQUIRED_COLUMNS
            .iter()
            .filter(|name| self.0.get_column_index(name).is_none())
            .map(|name| name.to_string())
            .collect_vec();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingColumns(missing))
        }
    }

    fn project_lazy(&self, role: Role) -> LazyFrame {
        let actor = role.actor_column();

        let mut exprs = vec![
            col("season").cast(DataType::Int32),
            col("week").cast(DataType::Int32),
            col("posteam").cast(DataType::String).alias("team"),
            col(&actor).cast(DataType::String).alias("player_name"),
        ];
        exprs.extend(Stat::ALL.iter().map(|&stat| stat_expr(role, stat)));

        // Cloning the frame only bumps column refcounts; the shared plays are never touched.
        self.0
            .clone()
            .lazy()
            .filter(col(&actor).is_not_null())
            .select(exprs)
    }

    /// Action records for one role: a row per play where that role's actor is known.
    pub fn project(&self, role: Role) -> Result<ActionsDf> {
        let df = self.project_lazy(role).collect()?;
        log::debug!("{} {} actions", df.height(), role);
        Ok(ActionsDf::new(df))
    }

    /// Union of the rusher, receiver and passer projections.
    pub fn actions(&self) -> Result<ActionsDf> {
        log::trace!("pbp::actions");
        let frames = Role::ALL
            .iter()
            .map(|&role| self.project(role).map(|actions| actions.lazy()))
            .collect::<Result<Vec<_>>>()?;

        let df = concat(frames, UnionArgs::default())?.collect()?;
        log::debug!("{} total actions", df.height());
        Ok(ActionsDf::new(df))
    }

    /// Runs projection, aggregation and PPR scoring over the whole snapshot.
    pub fn player_weeks(&self) -> Result<PlayerWeeksDf> {
        let totals = self.actions()?.aggregate()?;
        totals.score(Scoring::ppr())
    }
}

fn stat_expr(role: Role, stat: Stat) -> Expr {
    let expr = match role.source_column(stat) {
        Some(source) => col(source).cast(DataType::Float64).fill_null(lit(0.0)),
        None => lit(0.0),
    };
    expr.alias(&stat.column())
}
