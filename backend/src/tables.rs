//! Creates the five tables if they do not exist yet.

use diesel_async::{AsyncPgConnection, RunQueryDsl};
use ingest::Entity;

/// One statement per table, in foreign key order.
pub const CREATE_TABLES: [(Entity, &str); 5] = [
    (
        Entity::Team,
        "CREATE TABLE IF NOT EXISTS teams (
            team_id INT GENERATED BY DEFAULT AS IDENTITY (START WITH 101) PRIMARY KEY,
            team_name VARCHAR(255) NOT NULL
        )",
    ),
    (
        Entity::Agent,
        "CREATE TABLE IF NOT EXISTS agents (
            agent_id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            agent_name VARCHAR(255) NOT NULL,
            role VARCHAR(255)
        )",
    ),
    (
        Entity::Player,
        "CREATE TABLE IF NOT EXISTS players (
            player_id INT GENERATED BY DEFAULT AS IDENTITY (START WITH 1001) PRIMARY KEY,
            player_name VARCHAR(255) NOT NULL,
            team_id INT,
            CONSTRAINT fk_players_teams FOREIGN KEY (team_id) REFERENCES teams(team_id)
        )",
    ),
    (
        Entity::Game,
        "CREATE TABLE IF NOT EXISTS games (
            game_id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            team1_id INT NOT NULL,
            team2_id INT NOT NULL,
            map VARCHAR(255),
            winner_id INT,
            w_score INT,
            l_score INT,
            CONSTRAINT fk_games_team1 FOREIGN KEY (team1_id) REFERENCES teams(team_id),
            CONSTRAINT fk_games_team2 FOREIGN KEY (team2_id) REFERENCES teams(team_id),
            CONSTRAINT fk_games_winner FOREIGN KEY (winner_id) REFERENCES teams(team_id)
        )",
    ),
    (
        Entity::Stat,
        "CREATE TABLE IF NOT EXISTS stats (
            player_id INT NOT NULL,
            game_id INT NOT NULL,
            agent_id INT NOT NULL,
            rating REAL NOT NULL,
            acs INT NOT NULL,
            kills INT NOT NULL,
            deaths INT NOT NULL,
            assists INT NOT NULL,
            kast_percent INT NOT NULL,
            adr INT NOT NULL,
            hs_percent INT NOT NULL,
            first_kills INT NOT NULL,
            first_deaths INT NOT NULL,
            PRIMARY KEY (game_id, player_id),
            CONSTRAINT fk_stats_players FOREIGN KEY (player_id) REFERENCES players(player_id),
            CONSTRAINT fk_stats_games FOREIGN KEY (game_id) REFERENCES games(game_id),
            CONSTRAINT fk_stats_agents FOREIGN KEY (agent_id) REFERENCES agents(agent_id)
        )",
    ),
];

/// Safe to run against an already initialized database.
#[tracing::instrument(skip(connection))]
pub async fn create_tables(connection: &mut AsyncPgConnection) -> Result<(), crate::Error> {
    connection
        .build_transaction()
        .run::<_, crate::Error, _>(|conn| {
            Box::pin(async move {
                for (entity, statement) in CREATE_TABLES {
                    tracing::info!("Creating table '{}'", entity);
                    diesel::sql_query(statement).execute(conn).await?;
                }

                Ok(())
            })
        })
        .await?;

    tracing::info!("All tables created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_load_order() {
        let order: Vec<_> = CREATE_TABLES.iter().map(|(e, _)| *e).collect();
        assert_eq!(Entity::LOAD_ORDER.to_vec(), order);
    }

    #[test]
    fn statements_are_idempotent() {
        for (entity, statement) in CREATE_TABLES {
            let expected = format!("CREATE TABLE IF NOT EXISTS {} (", entity.table());
            assert!(statement.starts_with(&expected), "{}", statement);
        }
    }

    #[test]
    fn declares_every_column() {
        for (entity, statement) in CREATE_TABLES {
            for column in entity.columns() {
                assert!(
                    statement.contains(&format!("\n            {} ", column)),
                    "{} is missing {}",
                    entity,
                    column
                );
            }
        }
    }
}
