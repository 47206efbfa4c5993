use std::path::PathBuf;

/// The kind of an [`Error`], without any of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceNotFound,
    SourceUnreadable,
    MalformedField,
    ReferentialViolation,
    DuplicateKey,
    AccessDenied,
    ConnectionUnavailable,
    UnknownDatabase,
    UnclassifiedStorageError,
    InvalidInput,
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the file '{}' was not found", .0.display())]
    SourceNotFound(PathBuf),
    #[error("could not read '{}': {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed source data: {0}")]
    MalformedField(#[source] ingest::SourceError),
    #[error("a row refers to an id that does not exist in a parent table: {0}")]
    ReferentialViolation(String),
    #[error("a row with the same key already exists: {0}")]
    DuplicateKey(String),
    #[error("access denied, check the database user and password: {0}")]
    AccessDenied(String),
    #[error("could not connect to the database server: {0}")]
    ConnectionUnavailable(String),
    #[error("the database does not exist: {0}")]
    UnknownDatabase(String),
    #[error("database error: {0}")]
    UnclassifiedStorageError(#[source] diesel::result::Error),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceNotFound(_) => ErrorKind::SourceNotFound,
            Self::SourceUnreadable { .. } => ErrorKind::SourceUnreadable,
            Self::MalformedField(_) => ErrorKind::MalformedField,
            Self::ReferentialViolation(_) => ErrorKind::ReferentialViolation,
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::ConnectionUnavailable(_) => ErrorKind::ConnectionUnavailable,
            Self::UnknownDatabase(_) => ErrorKind::UnknownDatabase,
            Self::UnclassifiedStorageError(_) => ErrorKind::UnclassifiedStorageError,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl From<ingest::SourceError> for Error {
    fn from(value: ingest::SourceError) -> Self {
        match value {
            ingest::SourceError::NotFound { path } => Self::SourceNotFound(path),
            ingest::SourceError::Unreadable { path, source } => {
                Self::SourceUnreadable { path, source }
            }
            other => Self::MalformedField(other),
        }
    }
}

impl From<common::RosterError> for Error {
    fn from(value: common::RosterError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<diesel::result::Error> for Error {
    fn from(value: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match value {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ReferentialViolation(info.message().to_owned())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::DuplicateKey(info.message().to_owned())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                Self::ConnectionUnavailable(info.message().to_owned())
            }
            diesel::result::Error::NotFound => Self::NotFound("row".to_owned()),
            other => Self::UnclassifiedStorageError(other),
        }
    }
}

impl From<diesel::ConnectionError> for Error {
    fn from(value: diesel::ConnectionError) -> Self {
        match value {
            diesel::ConnectionError::BadConnection(msg) => classify_connection_failure(msg),
            diesel::ConnectionError::InvalidConnectionUrl(msg) => Self::ConnectionUnavailable(msg),
            // diesel-async reports every failed connect this way.
            diesel::ConnectionError::CouldntSetupConfiguration(
                diesel::result::Error::DatabaseError(_, info),
            ) => classify_connection_failure(info.message().to_owned()),
            diesel::ConnectionError::CouldntSetupConfiguration(e) => {
                Self::ConnectionUnavailable(e.to_string())
            }
            other => Self::ConnectionUnavailable(other.to_string()),
        }
    }
}

/// Postgres only reports why a connection was refused in the message text.
fn classify_connection_failure(msg: String) -> Error {
    let lower = msg.to_lowercase();

    if lower.contains("password authentication failed")
        || lower.contains("no pg_hba.conf entry")
        || (lower.contains("role \"") && lower.contains("does not exist"))
    {
        Error::AccessDenied(msg)
    } else if lower.contains("database \"") && lower.contains("does not exist") {
        Error::UnknownDatabase(msg)
    } else {
        Error::ConnectionUnavailable(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_connect(kind: diesel::result::DatabaseErrorKind, message: &str) -> Error {
        Error::from(diesel::ConnectionError::CouldntSetupConfiguration(
            diesel::result::Error::DatabaseError(kind, Box::new(message.to_owned())),
        ))
    }

    #[test]
    fn connection_failures() {
        use diesel::result::DatabaseErrorKind;

        let access = failed_connect(
            DatabaseErrorKind::Unknown,
            "password authentication failed for user \"stats\"",
        );
        assert_eq!(ErrorKind::AccessDenied, access.kind());

        let role = failed_connect(DatabaseErrorKind::Unknown, "role \"nobody\" does not exist");
        assert_eq!(ErrorKind::AccessDenied, role.kind());

        let database = failed_connect(
            DatabaseErrorKind::Unknown,
            "database \"stattrack\" does not exist",
        );
        assert_eq!(ErrorKind::UnknownDatabase, database.kind());

        let refused = failed_connect(
            DatabaseErrorKind::UnableToSendCommand,
            "error connecting to server: Connection refused (os error 111)",
        );
        assert_eq!(ErrorKind::ConnectionUnavailable, refused.kind());
    }

    #[test]
    fn other_setup_failures_are_unavailable() {
        let err = Error::from(diesel::ConnectionError::CouldntSetupConfiguration(
            diesel::result::Error::BrokenTransactionManager,
        ));
        assert_eq!(ErrorKind::ConnectionUnavailable, err.kind());

        let err = Error::from(diesel::ConnectionError::BadConnection(
            "db error: FATAL: database \"stattrack\" does not exist".to_owned(),
        ));
        assert_eq!(ErrorKind::UnknownDatabase, err.kind());
    }

    #[test]
    fn missing_source() {
        let err = Error::from(ingest::SourceError::NotFound {
            path: PathBuf::from("data/teams.csv"),
        });

        assert_eq!(ErrorKind::SourceNotFound, err.kind());
        assert_eq!("the file 'data/teams.csv' was not found", err.to_string());
    }

    #[test]
    fn roster_errors_are_invalid_input() {
        let err = Error::from(common::RosterError::TooFewPlayers(3));
        assert_eq!(ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn row_not_found() {
        let err = Error::from(diesel::result::Error::NotFound);
        assert_eq!(ErrorKind::NotFound, err.kind());
    }
}
