use crate::Stat;
use polars::prelude::*;

/// Column holding the computed score on a player-week table.
pub const POINTS_COLUMN: &str = "fantasy_points_ppr";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scoring {
    pub passing_yd_per_point: f64,
    pub passing_td_points: f64,

    pub rushing_yd_per_point: f64,
    pub rushing_td_points: f64,

    pub reception_points: f64,
    pub receiving_yd_per_point: f64,
    pub receiving_td_points: f64,
}

impl Scoring {
    pub fn ppr() -> Self {
        Self {
            passing_yd_per_point: 25.0,
            passing_td_points: 4.0,
            rushing_yd_per_point: 10.0,
            rushing_td_points: 6.0,
            reception_points: 1.0,
            receiving_yd_per_point: 10.0,
            receiving_td_points: 6.0,
        }
    }

    /// Multiplier applied to one unit of `stat`.
    pub fn weight(&self, stat: Stat) -> f64 {
        match stat {
            Stat::RushYds => 1.0 / self.rushing_yd_per_point,
            Stat::RecYds => 1.0 / self.receiving_yd_per_point,
            Stat::PassYds => 1.0 / self.passing_yd_per_point,
            Stat::RushTd => self.rushing_td_points,
            Stat::RecTd => self.receiving_td_points,
            Stat::PassTd => self.passing_td_points,
            Stat::Receptions => self.reception_points,
        }
    }

    /// Scores a single player-week.
    pub fn points(&self, line: &StatLine) -> f64 {
        Stat::ALL
            .iter()
            .map(|&stat| line.get(stat) * self.weight(stat))
            .sum()
    }

    /// Same formula as [`Scoring::points`], as an expression over the stat columns.
    pub fn expr(&self) -> Expr {
        Stat::ALL
            .iter()
            .map(|&stat| col(&stat.column()) * lit(self.weight(stat)))
            .fold(lit(0.0), |acc, expr| acc + expr)
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::ppr()
    }
}

/// The seven summed stats of one player-week.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatLine {
    pub rush_yds: f64,
    pub rec_yds: f64,
    pub pass_yds: f64,
    pub rush_td: f64,
    pub rec_td: f64,
    pub pass_td: f64,
    pub receptions: f64,
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::RushYds => self.rush_yds,
            Stat::RecYds => self.rec_yds,
            Stat::PassYds => self.pass_yds,
            Stat::RushTd => self.rush_td,
            Stat::RecTd => self.rec_td,
            Stat::PassTd => self.pass_td,
            Stat::Receptions => self.receptions,
        }
    }
}
