//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `CIRCULATION_*` environment variables
//! and configuration files. Unset values fall back to the defaults below.

use std::net::{IpAddr, SocketAddr};

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
/// Conventional variable consulted when no prefixed database URL is set.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The configured host is not an IP address.
    #[error("host {host:?} is not a valid IP address")]
    InvalidHost { host: String },
    /// The configured pool size was zero.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
}

/// Configuration values controlling the HTTP listener and storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CIRCULATION")]
pub struct CirculationSettings {
    /// Listen address.
    pub host: Option<String>,
    /// Listen port.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Without one the server keeps state in
    /// process memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply pending migrations before serving. Unset means yes.
    pub run_migrations: Option<bool>,
}

impl CirculationSettings {
    /// Socket address to bind, from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured pool size, falling back to the default.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// Whether pending migrations run at startup, defaulting to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Database URL from settings, else from [`DATABASE_URL_ENV`].
    ///
    /// Blank values count as unset.
    ///
    /// # Examples
    /// ```
    /// use circulation::settings::CirculationSettings;
    /// use mockable::DefaultEnv;
    ///
    /// let settings = CirculationSettings {
    ///     host: None,
    ///     port: None,
    ///     database_url: Some("postgres://db/circulation".into()),
    ///     pool_max_size: None,
    ///     run_migrations: None,
    /// };
    /// assert_eq!(
    ///     settings.database_url(&DefaultEnv::new()).as_deref(),
    ///     Some("postgres://db/circulation")
    /// );
    /// ```
    pub fn database_url<E: Env>(&self, env: &E) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env.string(DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and fallbacks.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::{DefaultEnv, MockEnv};
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "CIRCULATION_HOST",
        "CIRCULATION_PORT",
        "CIRCULATION_DATABASE_URL",
        "CIRCULATION_POOL_MAX_SIZE",
        "CIRCULATION_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> CirculationSettings {
        CirculationSettings::load_from_iter([OsString::from("circulation")])
            .expect("config should load")
    }

    fn env_returning(value: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| {
                if key == DATABASE_URL_ENV {
                    value.map(str::to_owned)
                } else {
                    None
                }
            });
        env
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.pool_max_size(), Ok(10));
        assert_eq!(settings.run_migrations, None);
        assert!(settings.run_migrations());
        assert!(settings.database_url(&env_returning(None)).is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CIRCULATION_HOST", Some("127.0.0.1".to_owned())),
            ("CIRCULATION_PORT", Some("9090".to_owned())),
            (
                "CIRCULATION_DATABASE_URL",
                Some("postgres://localhost/circulation".to_owned()),
            ),
            ("CIRCULATION_POOL_MAX_SIZE", Some("4".to_owned())),
            ("CIRCULATION_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        assert_eq!(settings.pool_max_size(), Ok(4));
        assert!(!settings.run_migrations());
        assert_eq!(
            settings.database_url(&env_returning(Some("postgres://other/db"))).as_deref(),
            Some("postgres://localhost/circulation")
        );
    }

    #[rstest]
    #[case(Some("postgres://fallback/db"), Some("postgres://fallback/db"))]
    #[case(Some("  "), None)]
    #[case(None, None)]
    fn database_url_falls_back_to_conventional_variable(
        #[case] fallback: Option<&'static str>,
        #[case] expected: Option<&str>,
    ) {
        let settings = CirculationSettings {
            host: None,
            port: None,
            database_url: None,
            pool_max_size: None,
            run_migrations: None,
        };
        assert_eq!(
            settings.database_url(&env_returning(fallback)).as_deref(),
            expected
        );
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(true), true)]
    #[case(Some(false), false)]
    fn migrations_run_unless_disabled(#[case] configured: Option<bool>, #[case] expected: bool) {
        let settings = CirculationSettings {
            host: None,
            port: None,
            database_url: Some("postgres://localhost/circulation".into()),
            pool_max_size: None,
            run_migrations: configured,
        };
        assert_eq!(settings.run_migrations(), expected);
        assert_eq!(
            settings.database_url(&DefaultEnv::new()).as_deref(),
            Some("postgres://localhost/circulation")
        );
    }

    #[rstest]
    fn invalid_host_and_empty_pool_are_reported() {
        let settings = CirculationSettings {
            host: Some("library.local".into()),
            port: None,
            database_url: None,
            pool_max_size: Some(0),
            run_migrations: None,
        };
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost {
                host: "library.local".into()
            })
        );
        assert_eq!(settings.pool_max_size(), Err(SettingsError::EmptyPool));
    }
}
