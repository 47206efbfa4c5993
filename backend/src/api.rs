use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json};

use crate::{DbConfig, Error, ErrorKind};

#[derive(Clone)]
pub struct ApiState {
    config: Arc<DbConfig>,
}

impl ApiState {
    async fn connection(&self) -> Result<diesel_async::AsyncPgConnection, ApiError> {
        crate::connect(&self.config).await.map_err(ApiError)
    }
}

#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl ApiError {
    pub fn status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self.0.kind() {
            ErrorKind::InvalidInput | ErrorKind::MalformedField => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ReferentialViolation | ErrorKind::DuplicateKey => StatusCode::CONFLICT,
            ErrorKind::AccessDenied
            | ErrorKind::ConnectionUnavailable
            | ErrorKind::UnknownDatabase => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::SourceNotFound
            | ErrorKind::SourceUnreadable
            | ErrorKind::UnclassifiedStorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub mod teams {
    use super::*;

    pub async fn list(
        State(state): State<ApiState>,
    ) -> Result<Json<Vec<common::TeamInfo>>, ApiError> {
        let mut db_con = state.connection().await?;
        Ok(Json(crate::manage::list_teams(&mut db_con).await?))
    }

    pub async fn create(
        State(state): State<ApiState>,
        Json(draft): Json<common::TeamDraft>,
    ) -> Result<(axum::http::StatusCode, Json<common::CreatedTeam>), ApiError> {
        // Reject bad rosters before touching the database at all.
        draft.validate().map_err(Error::from)?;

        let mut db_con = state.connection().await?;
        let created = crate::manage::create_team(&mut db_con, &draft).await?;

        Ok((axum::http::StatusCode::CREATED, Json(created)))
    }

    pub async fn rename(
        State(state): State<ApiState>,
        Path(team_id): Path<i32>,
        Json(body): Json<common::RenameTeam>,
    ) -> Result<axum::http::StatusCode, ApiError> {
        let mut db_con = state.connection().await?;
        crate::manage::rename_team(&mut db_con, team_id, &body.name).await?;

        Ok(axum::http::StatusCode::NO_CONTENT)
    }

    pub async fn delete(
        State(state): State<ApiState>,
        Path(team_id): Path<i32>,
    ) -> Result<axum::http::StatusCode, ApiError> {
        let mut db_con = state.connection().await?;
        crate::manage::delete_team(&mut db_con, team_id).await?;

        Ok(axum::http::StatusCode::NO_CONTENT)
    }
}

pub mod players {
    use super::*;

    pub async fn list(
        State(state): State<ApiState>,
    ) -> Result<Json<Vec<common::PlayerInfo>>, ApiError> {
        let mut db_con = state.connection().await?;
        Ok(Json(crate::manage::list_players(&mut db_con).await?))
    }

    pub async fn create(
        State(state): State<ApiState>,
        Json(player): Json<common::NewPlayer>,
    ) -> Result<(axum::http::StatusCode, Json<i32>), ApiError> {
        let mut db_con = state.connection().await?;
        let id = crate::manage::create_player(&mut db_con, &player).await?;

        Ok((axum::http::StatusCode::CREATED, Json(id)))
    }
}

pub mod agents {
    use super::*;

    pub async fn list(
        State(state): State<ApiState>,
    ) -> Result<Json<Vec<common::AgentInfo>>, ApiError> {
        let mut db_con = state.connection().await?;
        Ok(Json(crate::manage::list_agents(&mut db_con).await?))
    }

    pub async fn create(
        State(state): State<ApiState>,
        Json(agent): Json<common::NewAgent>,
    ) -> Result<(axum::http::StatusCode, Json<i32>), ApiError> {
        let mut db_con = state.connection().await?;
        let id = crate::manage::create_agent(&mut db_con, &agent).await?;

        Ok((axum::http::StatusCode::CREATED, Json(id)))
    }
}

pub mod games {
    use super::*;

    pub async fn list(
        State(state): State<ApiState>,
    ) -> Result<Json<Vec<common::GameInfo>>, ApiError> {
        let mut db_con = state.connection().await?;
        Ok(Json(crate::manage::list_games(&mut db_con).await?))
    }

    pub async fn incomplete(
        State(state): State<ApiState>,
    ) -> Result<Json<Vec<common::GameInfo>>, ApiError> {
        let mut db_con = state.connection().await?;
        Ok(Json(crate::manage::incomplete_games(&mut db_con).await?))
    }

    pub async fn create(
        State(state): State<ApiState>,
        Json(game): Json<common::NewGame>,
    ) -> Result<(axum::http::StatusCode, Json<i32>), ApiError> {
        let mut db_con = state.connection().await?;
        let id = crate::manage::create_game(&mut db_con, &game).await?;

        Ok((axum::http::StatusCode::CREATED, Json(id)))
    }

    pub async fn result(
        State(state): State<ApiState>,
        Path(game_id): Path<i32>,
        Json(result): Json<common::GameResult>,
    ) -> Result<axum::http::StatusCode, ApiError> {
        let mut db_con = state.connection().await?;
        crate::manage::record_result(&mut db_con, game_id, &result).await?;

        Ok(axum::http::StatusCode::NO_CONTENT)
    }
}

pub mod stats {
    use super::*;

    pub async fn list(
        State(state): State<ApiState>,
    ) -> Result<Json<Vec<common::StatLine>>, ApiError> {
        let mut db_con = state.connection().await?;
        Ok(Json(crate::manage::list_stats(&mut db_con).await?))
    }
}

pub fn router(config: DbConfig) -> axum::Router {
    use axum::routing::{get, put};

    axum::Router::new()
        .route("/teams", get(teams::list).post(teams::create))
        .route("/teams/:id", put(teams::rename).delete(teams::delete))
        .route("/players", get(players::list).post(players::create))
        .route("/agents", get(agents::list).post(agents::create))
        .route("/games", get(games::list).post(games::create))
        .route("/games/incomplete", get(games::incomplete))
        .route("/games/:id/result", put(games::result))
        .route("/stats", get(stats::list))
        .with_state(ApiState {
            config: Arc::new(config),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn status_codes() {
        let status = |e: Error| ApiError(e).status();

        assert_eq!(
            StatusCode::BAD_REQUEST,
            status(common::RosterError::TooFewPlayers(4).into())
        );
        assert_eq!(StatusCode::NOT_FOUND, status(Error::NotFound("team 7".to_owned())));
        assert_eq!(
            StatusCode::CONFLICT,
            status(Error::ReferentialViolation("fk_players_teams".to_owned()))
        );
        assert_eq!(
            StatusCode::SERVICE_UNAVAILABLE,
            status(Error::ConnectionUnavailable("refused".to_owned()))
        );
    }

    #[tokio::test]
    async fn short_roster_is_rejected_without_a_database() {
        // Nothing listens on this port, a database round trip would surface as 503.
        let state = ApiState {
            config: Arc::new(DbConfig::from_url("postgres://127.0.0.1:1/none")),
        };
        let draft = common::TeamDraft {
            name: "Paper Rex".to_owned(),
            players: vec!["f0rsakeN".to_owned(), "Jinggg".to_owned(), " ".to_owned()],
        };

        let err = teams::create(State(state), Json(draft)).await.unwrap_err();

        assert_eq!(StatusCode::BAD_REQUEST, err.status());
    }
}
