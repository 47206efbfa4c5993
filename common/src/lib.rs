pub mod roster;
pub use roster::{RosterError, TeamDraft};

/// The in-game role of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Duelist,
    Initiator,
    Controller,
    Sentinel,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Duelist,
        Role::Initiator,
        Role::Controller,
        Role::Sentinel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duelist => "Duelist",
            Self::Initiator => "Initiator",
            Self::Controller => "Controller",
            Self::Sentinel => "Sentinel",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown agent role '{0}'")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamInfo {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerInfo {
    pub id: i32,
    pub name: String,
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgentInfo {
    pub id: i32,
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameInfo {
    pub id: i32,
    pub team1: i32,
    pub team2: i32,
    pub map: Option<String>,
    pub winner: Option<i32>,
    pub w_score: Option<i32>,
    pub l_score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatLine {
    pub game_id: i32,
    pub player_id: i32,
    pub agent_id: i32,
    pub rating: f32,
    pub acs: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub kast_percent: i32,
    pub adr: i32,
    pub hs_percent: i32,
    pub first_kills: i32,
    pub first_deaths: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatedTeam {
    pub team: TeamInfo,
    pub player_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenameTeam {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub team_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NewGame {
    pub team1_id: i32,
    pub team2_id: i32,
    pub map: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameResult {
    pub winner_id: i32,
    pub w_score: i32,
    pub l_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_ignores_case() {
        assert_eq!(Ok(Role::Duelist), "duelist".parse::<Role>());
        assert_eq!(Ok(Role::Controller), " CONTROLLER ".parse::<Role>());
        assert_eq!(
            Err(UnknownRole("Support".to_owned())),
            "Support".parse::<Role>()
        );
    }
}
