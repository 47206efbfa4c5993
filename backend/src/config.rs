/// Where the database lives and how to log in.
///
/// Every field can come from the command line or from the usual libpq
/// environment variables. `DATABASE_URL` wins over the individual fields.
#[derive(Clone, Default, clap::Args)]
pub struct DbConfig {
    #[arg(long = "db-host", env = "PGHOST", default_value = "localhost")]
    pub host: String,
    #[arg(long = "db-port", env = "PGPORT", default_value_t = 5432)]
    pub port: u16,
    #[arg(long = "db-user", env = "PGUSER")]
    pub user: Option<String>,
    #[arg(long = "db-password", env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long = "db-name", env = "PGDATABASE", default_value = "stattrack")]
    pub database: String,
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl DbConfig {
    pub fn from_url<IS>(url: IS) -> Self
    where
        IS: Into<String>,
    {
        Self {
            database_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// The connection string handed to the driver, a URL or libpq `key=value` pairs.
    pub fn connection_string(&self) -> String {
        if let Some(url) = self.database_url.as_ref() {
            return url.clone();
        }

        let mut parts = vec![
            format!("host={}", quote(&self.host)),
            format!("port={}", self.port),
            format!("dbname={}", quote(&self.database)),
        ];
        if let Some(user) = self.user.as_ref() {
            parts.push(format!("user={}", quote(user)));
        }
        if let Some(password) = self.password.as_ref() {
            parts.push(format!("password={}", quote(password)));
        }

        parts.join(" ")
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("database_url", &self.database_url.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> DbConfig {
        DbConfig {
            host: "db.internal".to_owned(),
            port: 5433,
            user: Some("loader".to_owned()),
            password: Some("it's a \\secret".to_owned()),
            database: "stattrack".to_owned(),
            database_url: None,
        }
    }

    #[test]
    fn key_value_connection_string() {
        assert_eq!(
            "host='db.internal' port=5433 dbname='stattrack' user='loader' password='it\\'s a \\\\secret'",
            config().connection_string()
        );
    }

    #[test]
    fn url_overrides_fields() {
        let config = DbConfig {
            database_url: Some("postgres://localhost/other".to_owned()),
            ..config()
        };
        assert_eq!("postgres://localhost/other", config.connection_string());
    }

    #[test]
    fn debug_hides_password() {
        let output = format!("{:?}", config());
        assert!(!output.contains("secret"), "{}", output);
        assert!(output.contains("loader"), "{}", output);
    }
}
