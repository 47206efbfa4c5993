/// One of the five tables, in the order their foreign keys require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Team,
    Agent,
    Player,
    Game,
    Stat,
}

impl Entity {
    /// Parents always come before the rows referencing them.
    pub const LOAD_ORDER: [Entity; 5] = [
        Entity::Team,
        Entity::Agent,
        Entity::Player,
        Entity::Game,
        Entity::Stat,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            Self::Team => "teams",
            Self::Agent => "agents",
            Self::Player => "players",
            Self::Game => "games",
            Self::Stat => "stats",
        }
    }

    pub fn source_file(&self) -> &'static str {
        match self {
            Self::Team => "teams.csv",
            Self::Agent => "agents.csv",
            Self::Player => "players.csv",
            Self::Game => "games.csv",
            Self::Stat => "stats.csv",
        }
    }

    /// Column order of the target table.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Team => &["team_id", "team_name"],
            Self::Agent => &["agent_id", "agent_name", "role"],
            Self::Player => &["player_id", "player_name", "team_id"],
            Self::Game => &[
                "game_id", "team1_id", "team2_id", "map", "winner_id", "w_score", "l_score",
            ],
            Self::Stat => &[
                "player_id",
                "game_id",
                "agent_id",
                "rating",
                "acs",
                "kills",
                "deaths",
                "assists",
                "kast_percent",
                "adr",
                "hs_percent",
                "first_kills",
                "first_deaths",
            ],
        }
    }

    /// The identity column, `None` for the composite-keyed stats.
    pub fn id_column(&self) -> Option<&'static str> {
        match self {
            Self::Team => Some("team_id"),
            Self::Agent => Some("agent_id"),
            Self::Player => Some("player_id"),
            Self::Game => Some("game_id"),
            Self::Stat => None,
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
