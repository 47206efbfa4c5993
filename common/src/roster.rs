//! Validation for a new team and its starting roster.

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamDraft {
    pub name: String,
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("please enter a team name")]
    MissingName,
    #[error("a team must have at least 5 players, got {0}")]
    TooFewPlayers(usize),
    #[error("a team can have at most 7 players, got {0}")]
    TooManyPlayers(usize),
}

/// A draft that passed [`TeamDraft::validate`], names trimmed and blanks removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTeam {
    pub name: String,
    pub players: Vec<String>,
}

impl TeamDraft {
    pub fn validate(&self) -> Result<ValidTeam, RosterError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RosterError::MissingName);
        }

        let players: Vec<String> = self
            .players
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| p.to_owned())
            .collect();

        if players.len() < MIN_PLAYERS {
            return Err(RosterError::TooFewPlayers(players.len()));
        }
        if players.len() > MAX_PLAYERS {
            return Err(RosterError::TooManyPlayers(players.len()));
        }

        Ok(ValidTeam {
            name: name.to_owned(),
            players,
        })
    }
}
