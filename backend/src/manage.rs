//! Create, read, update and delete for the management API.
//!
//! Ids come from the identity columns, never from `MAX(id) + 1`.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::schema::{agents, games, players, stats, teams};
use crate::Error;

/// Blank text is stored as NULL.
fn optional(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

fn required<'s>(what: &str, value: &'s str) -> Result<&'s str, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("please enter a {}", what)));
    }
    Ok(value)
}

pub async fn list_teams(conn: &mut AsyncPgConnection) -> Result<Vec<common::TeamInfo>, Error> {
    let query = teams::table
        .order(teams::team_id.asc())
        .select(crate::models::Team::as_select());

    let results: Vec<crate::models::Team> = query.load(conn).await?;
    Ok(results.into_iter().map(Into::into).collect())
}

/// Creates a team together with its players, nothing is written if any part fails.
#[tracing::instrument(skip(conn, draft), fields(team = %draft.name))]
pub async fn create_team(
    conn: &mut AsyncPgConnection,
    draft: &common::TeamDraft,
) -> Result<common::CreatedTeam, Error> {
    let team = draft.validate()?;

    let created = conn
        .build_transaction()
        .run::<_, Error, _>(|conn| {
            Box::pin(async move {
                let team_id: i32 = diesel::dsl::insert_into(teams::table)
                    .values(crate::models::NewTeam {
                        team_name: &team.name,
                    })
                    .returning(teams::team_id)
                    .get_result(conn)
                    .await?;

                let new_players: Vec<_> = team
                    .players
                    .iter()
                    .map(|name| crate::models::NewPlayer {
                        player_name: name,
                        team_id,
                    })
                    .collect();

                let player_ids: Vec<i32> = diesel::dsl::insert_into(players::table)
                    .values(&new_players)
                    .returning(players::player_id)
                    .get_results(conn)
                    .await?;

                Ok(common::CreatedTeam {
                    team: common::TeamInfo {
                        id: team_id,
                        name: team.name.clone(),
                    },
                    player_ids,
                })
            })
        })
        .await;

    match created {
        Ok(created) => {
            tracing::info!(
                "Team '{}' and {} players added",
                created.team.name,
                created.player_ids.len()
            );
            Ok(created)
        }
        Err(e) => {
            tracing::error!("Transaction failed: {}", e);
            Err(e)
        }
    }
}

#[tracing::instrument(skip(conn))]
pub async fn rename_team(
    conn: &mut AsyncPgConnection,
    team_id: i32,
    name: &str,
) -> Result<(), Error> {
    let name = required("team name", name)?;

    let updated = diesel::dsl::update(teams::table.find(team_id))
        .set(teams::team_name.eq(name))
        .execute(conn)
        .await?;

    if updated == 0 {
        return Err(Error::NotFound(format!("team {}", team_id)));
    }
    Ok(())
}

/// Fails with [`Error::ReferentialViolation`] while players or games still reference the team.
#[tracing::instrument(skip(conn))]
pub async fn delete_team(conn: &mut AsyncPgConnection, team_id: i32) -> Result<(), Error> {
    let deleted = diesel::dsl::delete(teams::table.find(team_id))
        .execute(conn)
        .await?;

    if deleted == 0 {
        return Err(Error::NotFound(format!("team {}", team_id)));
    }
    Ok(())
}

pub async fn list_players(conn: &mut AsyncPgConnection) -> Result<Vec<common::PlayerInfo>, Error> {
    let query = players::table
        .left_join(teams::table)
        .order(players::player_id.asc())
        .select((
            players::player_id,
            players::player_name,
            teams::team_name.nullable(),
        ));

    let results: Vec<(i32, String, Option<String>)> = query.load(conn).await?;
    Ok(results
        .into_iter()
        .map(|(id, name, team)| common::PlayerInfo { id, name, team })
        .collect())
}

#[tracing::instrument(skip(conn))]
pub async fn create_player(
    conn: &mut AsyncPgConnection,
    player: &common::NewPlayer,
) -> Result<i32, Error> {
    let name = required("player name", &player.name)?;

    let player_id = diesel::dsl::insert_into(players::table)
        .values(crate::models::NewPlayer {
            player_name: name,
            team_id: player.team_id,
        })
        .returning(players::player_id)
        .get_result(conn)
        .await?;

    tracing::info!("Player '{}' added", name);
    Ok(player_id)
}

pub async fn list_agents(conn: &mut AsyncPgConnection) -> Result<Vec<common::AgentInfo>, Error> {
    let query = agents::table
        .order(agents::agent_id.asc())
        .select(crate::models::Agent::as_select());

    let results: Vec<crate::models::Agent> = query.load(conn).await?;
    Ok(results.into_iter().map(Into::into).collect())
}

#[tracing::instrument(skip(conn))]
pub async fn create_agent(
    conn: &mut AsyncPgConnection,
    agent: &common::NewAgent,
) -> Result<i32, Error> {
    let name = required("agent name", &agent.name)?;

    let agent_id = diesel::dsl::insert_into(agents::table)
        .values(crate::models::NewAgent {
            agent_name: name,
            role: agent.role.as_str(),
        })
        .returning(agents::agent_id)
        .get_result(conn)
        .await?;

    tracing::info!("Agent '{}' added", name);
    Ok(agent_id)
}

pub async fn list_games(conn: &mut AsyncPgConnection) -> Result<Vec<common::GameInfo>, Error> {
    let query = games::table
        .order(games::game_id.asc())
        .select(crate::models::Game::as_select());

    let results: Vec<crate::models::Game> = query.load(conn).await?;
    Ok(results.into_iter().map(Into::into).collect())
}

#[tracing::instrument(skip(conn))]
pub async fn create_game(
    conn: &mut AsyncPgConnection,
    game: &common::NewGame,
) -> Result<i32, Error> {
    if game.team1_id == game.team2_id {
        return Err(Error::InvalidInput(
            "a team cannot play against itself".to_owned(),
        ));
    }
    let map = optional(&game.map);

    let game_id = diesel::dsl::insert_into(games::table)
        .values(crate::models::NewGame {
            team1_id: game.team1_id,
            team2_id: game.team2_id,
            map,
        })
        .returning(games::game_id)
        .get_result(conn)
        .await?;

    tracing::info!("Game {} added", game_id);
    Ok(game_id)
}

/// Games still missing their winner or either score.
pub async fn incomplete_games(
    conn: &mut AsyncPgConnection,
) -> Result<Vec<common::GameInfo>, Error> {
    let query = games::table
        .filter(
            games::winner_id
                .is_null()
                .or(games::w_score.is_null())
                .or(games::l_score.is_null()),
        )
        .order(games::game_id.asc())
        .select(crate::models::Game::as_select());

    let results: Vec<crate::models::Game> = query.load(conn).await?;
    Ok(results.into_iter().map(Into::into).collect())
}

pub fn check_result(
    game: &crate::models::Game,
    result: &common::GameResult,
) -> Result<(), Error> {
    if result.winner_id != game.team1_id && result.winner_id != game.team2_id {
        return Err(Error::InvalidInput(format!(
            "team {} did not play in game {}",
            result.winner_id, game.game_id
        )));
    }
    if result.w_score < 0 || result.l_score < 0 {
        return Err(Error::InvalidInput("scores cannot be negative".to_owned()));
    }
    if result.w_score < result.l_score {
        return Err(Error::InvalidInput(
            "the winning score cannot be below the losing score".to_owned(),
        ));
    }
    Ok(())
}

#[tracing::instrument(skip(conn))]
pub async fn record_result(
    conn: &mut AsyncPgConnection,
    game_id: i32,
    result: &common::GameResult,
) -> Result<(), Error> {
    let game: Option<crate::models::Game> = games::table
        .find(game_id)
        .select(crate::models::Game::as_select())
        .first(conn)
        .await
        .optional()?;
    let game = game.ok_or_else(|| Error::NotFound(format!("game {}", game_id)))?;

    check_result(&game, result)?;

    diesel::dsl::update(games::table.find(game_id))
        .set((
            games::winner_id.eq(result.winner_id),
            games::w_score.eq(result.w_score),
            games::l_score.eq(result.l_score),
        ))
        .execute(conn)
        .await?;

    tracing::info!("Game {} updated", game_id);
    Ok(())
}

pub async fn list_stats(conn: &mut AsyncPgConnection) -> Result<Vec<common::StatLine>, Error> {
    let query = stats::table
        .order((stats::game_id.asc(), stats::player_id.asc()))
        .select(crate::models::Stat::as_select());

    let results: Vec<crate::models::Stat> = query.load(conn).await?;
    Ok(results.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> crate::models::Game {
        crate::models::Game {
            game_id: 2,
            team1_id: 101,
            team2_id: 102,
            map: Some("Bind".to_owned()),
            winner_id: None,
            w_score: None,
            l_score: None,
        }
    }

    fn result(winner_id: i32, w_score: i32, l_score: i32) -> common::GameResult {
        common::GameResult {
            winner_id,
            w_score,
            l_score,
        }
    }

    #[test]
    fn winner_must_have_played() {
        assert!(check_result(&game(), &result(102, 13, 11)).is_ok());

        let err = check_result(&game(), &result(103, 13, 11)).unwrap_err();
        assert_eq!(crate::ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn scores() {
        assert!(check_result(&game(), &result(101, -1, 0)).is_err());
        assert!(check_result(&game(), &result(101, 9, 13)).is_err());
        assert!(check_result(&game(), &result(101, 14, 12)).is_ok());
    }

    #[test]
    fn blank_names() {
        assert!(required("team name", "   ").is_err());
        assert_eq!("Leviatán", required("team name", " Leviatán ").unwrap());
    }

    #[test]
    fn blank_map_is_null() {
        assert_eq!(None, optional(""));
        assert_eq!(None, optional("  "));
        assert_eq!(Some("Lotus"), optional(" Lotus"));
    }
}
