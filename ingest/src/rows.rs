//! Typed rows of each source file and the generic CSV reader producing them.

use common::Role;

use crate::SourceError;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct TeamRow {
    pub team_id: i32,
    pub team_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    pub agent_id: i32,
    pub agent_name: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PlayerRow {
    pub player_id: i32,
    pub player_name: String,
    pub team_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct GameRow {
    pub game_id: i32,
    pub team1_id: i32,
    pub team2_id: i32,
    pub map: Option<String>,
    pub winner_id: Option<i32>,
    pub w_score: Option<i32>,
    pub l_score: Option<i32>,
}

/// One player's line for one game, percent columns already converted.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub player_id: i32,
    pub game_id: i32,
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

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawAgent {
    agent_id: i32,
    agent_name: String,
    role: Option<String>,
}

/// A single bad value, turned into [`SourceError::Malformed`] once the line is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

pub(crate) fn unchanged(header: &str) -> &str {
    header
}

pub(crate) fn read<Raw, Row, R>(
    reader: R,
    file: &str,
    rename: fn(&str) -> &str,
    convert: fn(Raw) -> Result<Row, FieldError>,
) -> Result<Vec<Row>, SourceError>
where
    Raw: serde::de::DeserializeOwned,
    R: std::io::Read,
{
    let csv_err = |source: csv::Error| SourceError::Csv {
        file: file.to_owned(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: csv::StringRecord = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(rename)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw: Raw = record.deserialize(Some(&headers)).map_err(csv_err)?;
        let row = convert(raw).map_err(|e| SourceError::Malformed {
            file: file.to_owned(),
            line,
            field: e.field.to_owned(),
            value: e.value,
            reason: e.reason,
        })?;

        rows.push(row);
    }

    Ok(rows)
}

fn require_name(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError {
            field,
            value: value.to_owned(),
            reason: "name must not be empty".to_owned(),
        });
    }
    Ok(())
}

pub(crate) fn team(raw: TeamRow) -> Result<TeamRow, FieldError> {
    require_name("team_name", &raw.team_name)?;
    Ok(raw)
}

pub(crate) fn player(raw: PlayerRow) -> Result<PlayerRow, FieldError> {
    require_name("player_name", &raw.player_name)?;
    Ok(raw)
}

pub(crate) fn game(raw: GameRow) -> Result<GameRow, FieldError> {
    Ok(raw)
}

pub(crate) fn agent(raw: RawAgent) -> Result<AgentRow, FieldError> {
    require_name("agent_name", &raw.agent_name)?;

    let role = match raw.role {
        Some(role) => Some(role.parse::<Role>().map_err(|e| FieldError {
            field: "role",
            value: role.clone(),
            reason: e.to_string(),
        })?),
        None => None,
    };

    Ok(AgentRow {
        agent_id: raw.agent_id,
        agent_name: raw.agent_name,
        role,
    })
}
