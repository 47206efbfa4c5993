//! Normalization of the scraped stats export.
//!
//! The export names several columns differently from the `stats` table and
//! writes KAST and headshot percentage as text like `73%`.

use crate::rows::{FieldError, StatRow};

static RENAMES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "player_id_y" => "player_id",
    "kill" => "kills",
    "death" => "deaths",
    "assist" => "assists",
    "kast%" => "kast_percent",
    "hs%" => "hs_percent",
    "fk" => "first_kills",
    "fd" => "first_deaths",
};

/// Maps a stats export header to its column name, anything unknown is kept.
pub fn canonical_header(header: &str) -> &str {
    RENAMES.get(header).copied().unwrap_or(header)
}

/// Parses `"73%"` (or a bare `"73"`) into 73.
pub fn parse_percent(raw: &str) -> Result<i32, String> {
    let digits = raw.replace('%', "");
    let value: i32 = digits
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;

    if !(0..=100).contains(&value) {
        return Err(format!("{} is outside 0..=100", value));
    }

    Ok(value)
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawStat {
    player_id: i32,
    game_id: i32,
    agent_id: i32,
    rating: f32,
    acs: i32,
    kills: i32,
    deaths: i32,
    assists: i32,
    kast_percent: String,
    adr: i32,
    hs_percent: String,
    first_kills: i32,
    first_deaths: i32,
}

fn percent_field(field: &'static str, raw: &str) -> Result<i32, FieldError> {
    parse_percent(raw).map_err(|reason| FieldError {
        field,
        value: raw.to_owned(),
        reason,
    })
}

pub(crate) fn normalize(raw: RawStat) -> Result<StatRow, FieldError> {
    Ok(StatRow {
        player_id: raw.player_id,
        game_id: raw.game_id,
        agent_id: raw.agent_id,
        rating: raw.rating,
        acs: raw.acs,
        kills: raw.kills,
        deaths: raw.deaths,
        assists: raw.assists,
        kast_percent: percent_field("kast_percent", &raw.kast_percent)?,
        adr: raw.adr,
        hs_percent: percent_field("hs_percent", &raw.hs_percent)?,
        first_kills: raw.first_kills,
        first_deaths: raw.first_deaths,
    })
}
