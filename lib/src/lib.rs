use parse_display::{Display, FromStr};

pub mod actions;
mod error;
pub mod filter;
pub mod pbp;
pub mod scoring;
pub mod storage;
pub mod weeks;

pub use error::Error;
pub use pbp::PbpDf;
pub use scoring::Scoring;
pub use storage::{latest_snapshot, load_parquet, OutputFormat};
pub use weeks::PlayerWeeksDf;

pub type Result<T> = std::result::Result<T, error::Error>;

/// Offensive role a play can attribute stats to.
///
/// Displays as the prefix of the play-by-play actor column, e.g. `rusher`
/// for `rusher_player_name`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromStr)]
#[display(style = "lowercase")]
pub enum Role {
    Rusher,
    Receiver,
    Passer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Rusher, Role::Receiver, Role::Passer];

    pub fn actor_column(self) -> String {
        format!("{}_player_name", self)
    }

    /// The play-by-play column feeding `stat` for this role, if the role owns it.
    pub fn source_column(self, stat: Stat) -> Option<&'static str> {
        match (self, stat) {
            (Role::Rusher, Stat::RushYds) => Some("yards_gained"),
            (Role::Rusher, Stat::RushTd) => Some("touchdown"),
            (Role::Receiver, Stat::RecYds) => Some("yards_gained"),
            (Role::Receiver, Stat::RecTd) => Some("touchdown"),
            (Role::Receiver, Stat::Receptions) => Some("complete_pass"),
            (Role::Passer, Stat::PassYds) => Some("yards_gained"),
            (Role::Passer, Stat::PassTd) => Some("touchdown"),
            _ => None,
        }
    }
}

/// Stat columns shared by action records and player-week rows, in output order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromStr)]
#[display(style = "snake_case")]
pub enum Stat {
    RushYds,
    RecYds,
    PassYds,
    RushTd,
    RecTd,
    PassTd,
    Receptions,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::RushYds,
        Stat::RecYds,
        Stat::PassYds,
        Stat::RushTd,
        Stat::RecTd,
        Stat::PassTd,
        Stat::Receptions,
    ];

    pub fn column(self) -> String {
        self.to_string()
    }
}

/// Grouping key columns of a player-week row.
pub const KEY_COLUMNS: [&str; 4] = ["season", "week", "team", "player_name"];
