pub mod models;
pub mod schema;

mod config;
pub use config::DbConfig;

mod error;
pub use error::{Error, ErrorKind};

pub mod api;
pub mod loader;
pub mod manage;
pub mod tables;
pub mod target;

/// Opens the single connection a run works with. Dropping it closes it.
pub async fn connect(config: &DbConfig) -> Result<diesel_async::AsyncPgConnection, Error> {
    use diesel_async::AsyncConnection;

    tracing::debug!(?config, "Connecting");

    let connection =
        diesel_async::AsyncPgConnection::establish(&config.connection_string()).await?;

    tracing::info!("Connection to the database successful");
    Ok(connection)
}
