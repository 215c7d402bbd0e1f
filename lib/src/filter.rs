use polars::prelude::*;

/// Builds a row predicate over player-week tables.
#[derive(Clone, Default)]
pub struct WeekFilter {
    filter_expr: Option<Expr>,
}

impl WeekFilter {
    pub fn new() -> Self {
        Self { filter_expr: None }
    }

    pub fn season(mut self, season: i32) -> Self {
        let expr = col("season").eq(lit(season));
        self.extend_filter(expr)
    }

    pub fn week(mut self, week: i32) -> Self {
        let expr = col("week").eq(lit(week));
        self.extend_filter(expr)
    }

    pub fn team(mut self, team_name: &str) -> Self {
        let expr = col("team").eq(lit(team_name));
        self.extend_filter(expr)
    }

    // Combines the current filter with a new one using AND logic
    fn extend_filter(&mut self, new_expr: Expr) -> Self {
        self.filter_expr = match self.filter_expr.take() {
            Some(existing_expr) => Some(existing_expr.and(new_expr)),
            None => Some(new_expr),
        };
        self.clone()
    }

    pub fn build(self) -> Expr {
        self.filter_expr.unwrap_or_else(|| lit(true))
    }
}
