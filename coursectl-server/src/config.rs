//! Database connection settings
//!
//! `DATABASE_URL` is used as-is when set. Otherwise the URL is assembled
//! from discrete variables:
//! - `DB_HOST` (default: localhost)
//! - `DB_PORT` (default: 5432)
//! - `DB_USER` (default: postgres)
//! - `DB_PASSWORD` (default: empty)
//! - `DB_NAME` (default: course_management)
//! - `DB_SSLMODE` (default: disable)

/// Discrete PostgreSQL connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub sslmode: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "course_management".to_string(),
            sslmode: "disable".to_string(),
        }
    }
}

impl DatabaseSettings {
    /// Create settings from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create settings from any key lookup; unset or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("DB_PORT").map(|raw| raw.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                tracing::warn!(default = defaults.port, "DB_PORT is not a valid port, using default");
                defaults.port
            }
            None => defaults.port,
        };

        Self {
            host: get("DB_HOST").unwrap_or(defaults.host),
            port,
            user: get("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            dbname: get("DB_NAME").unwrap_or(defaults.dbname),
            sslmode: get("DB_SSLMODE").unwrap_or(defaults.sslmode),
        }
    }

    /// Connection URL with user and password percent-encoded
    pub fn url(&self) -> String {
        self.render(&urlencoding::encode(&self.password))
    }

    /// Connection URL safe for logs
    pub fn redacted_url(&self) -> String {
        if self.password.is_empty() {
            self.url()
        } else {
            self.render("***")
        }
    }

    fn render(&self, password: &str) -> String {
        let credentials = if password.is_empty() {
            urlencoding::encode(&self.user).into_owned()
        } else {
            format!("{}:{}", urlencoding::encode(&self.user), password)
        };

        format!(
            "postgres://{}@{}:{}/{}?sslmode={}",
            credentials, self.host, self.port, self.dbname, self.sslmode
        )
    }
}

/// Resolve the connection URL: an explicit URL wins over discrete settings.
pub fn resolve_database_url(explicit: Option<&str>) -> String {
    match explicit.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => DatabaseSettings::from_env().url(),
    }
}
