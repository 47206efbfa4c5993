use diesel::prelude::*;

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Team {
    pub team_id: i32,
    pub team_name: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam<'a> {
    pub team_name: &'a str,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::agents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Agent {
    pub agent_id: i32,
    pub agent_name: String,
    pub role: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::agents)]
pub struct NewAgent<'a> {
    pub agent_name: &'a str,
    pub role: &'a str,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Player {
    pub player_id: i32,
    pub player_name: String,
    pub team_id: Option<i32>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::players)]
pub struct NewPlayer<'a> {
    pub player_name: &'a str,
    pub team_id: i32,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Game {
    pub game_id: i32,
    pub team1_id: i32,
    pub team2_id: i32,
    pub map: Option<String>,
    pub winner_id: Option<i32>,
    pub w_score: Option<i32>,
    pub l_score: Option<i32>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::games)]
pub struct NewGame<'a> {
    pub team1_id: i32,
    pub team2_id: i32,
    pub map: Option<&'a str>,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stat {
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

impl From<ingest::TeamRow> for Team {
    fn from(row: ingest::TeamRow) -> Self {
        Self {
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

impl From<ingest::AgentRow> for Agent {
    fn from(row: ingest::AgentRow) -> Self {
        Self {
            agent_id: row.agent_id,
            agent_name: row.agent_name,
            role: row.role.map(|r| r.as_str().to_owned()),
        }
    }
}

impl From<ingest::PlayerRow> for Player {
    fn from(row: ingest::PlayerRow) -> Self {
        Self {
            player_id: row.player_id,
            player_name: row.player_name,
            team_id: row.team_id,
        }
    }
}

impl From<ingest::GameRow> for Game {
    fn from(row: ingest::GameRow) -> Self {
        Self {
            game_id: row.game_id,
            team1_id: row.team1_id,
            team2_id: row.team2_id,
            map: row.map,
            winner_id: row.winner_id,
            w_score: row.w_score,
            l_score: row.l_score,
        }
    }
}

impl From<ingest::StatRow> for Stat {
    fn from(row: ingest::StatRow) -> Self {
        Self {
            player_id: row.player_id,
            game_id: row.game_id,
            agent_id: row.agent_id,
            rating: row.rating,
            acs: row.acs,
            kills: row.kills,
            deaths: row.deaths,
            assists: row.assists,
            kast_percent: row.kast_percent,
            adr: row.adr,
            hs_percent: row.hs_percent,
            first_kills: row.first_kills,
            first_deaths: row.first_deaths,
        }
    }
}

impl From<Team> for common::TeamInfo {
    fn from(team: Team) -> Self {
        Self {
            id: team.team_id,
            name: team.team_name,
        }
    }
}

impl From<Agent> for common::AgentInfo {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.agent_id,
            name: agent.agent_name,
            role: agent.role,
        }
    }
}

impl From<Game> for common::GameInfo {
    fn from(game: Game) -> Self {
        Self {
            id: game.game_id,
            team1: game.team1_id,
            team2: game.team2_id,
            map: game.map,
            winner: game.winner_id,
            w_score: game.w_score,
            l_score: game.l_score,
        }
    }
}

impl From<Stat> for common::StatLine {
    fn from(stat: Stat) -> Self {
        Self {
            game_id: stat.game_id,
            player_id: stat.player_id,
            agent_id: stat.agent_id,
            rating: stat.rating,
            acs: stat.acs,
            kills: stat.kills,
            deaths: stat.deaths,
            assists: stat.assists,
            kast_percent: stat.kast_percent,
            adr: stat.adr,
            hs_percent: stat.hs_percent,
            first_kills: stat.first_kills,
            first_deaths: stat.first_deaths,
        }
    }
}
