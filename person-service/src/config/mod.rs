use secrecy::{ExposeSecret, Secret};
use service_core::config::{self as core_config, get_env, EnvSource};
use service_core::error::AppError;

pub const MONGODB_SERVICE_HOST: &str = "MONGODB_SERVICE_HOST";
pub const MONGODB_SERVICE_PORT: &str = "MONGODB_SERVICE_PORT";
pub const MONGODB_DATABASE: &str = "MONGODB_DATABASE";
pub const MONGODB_USER: &str = "MONGODB_USER";
pub const MONGODB_PASSWORD: &str = "MONGODB_PASSWORD";

const DEFAULT_DATABASE: &str = "sampledb";
const DEFAULT_USER: &str = "sadhal";
const DEFAULT_PASSWORD: &str = "sadhal";

#[derive(Debug, Clone)]
pub struct PersonConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub environment: String,
}

/// Connection parameters for the person store.
///
/// Host and port are kept as read; [`MongoConfig::address`] validates them
/// when the store is first built.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub host: Option<String>,
    pub port: Option<String>,
    pub database: String,
    pub username: String,
    pub password: Secret<String>,
}

impl PersonConfig {
    pub fn from_env(common: core_config::Config, env: &dyn EnvSource) -> Result<Self, AppError> {
        let environment = env.var("ENVIRONMENT").unwrap_or_else(|| "dev".to_string());
        let is_prod = environment == "prod";

        Ok(PersonConfig {
            common,
            mongodb: MongoConfig::from_env(env, is_prod)?,
            environment,
        })
    }

    pub fn is_prod(&self) -> bool {
        self.environment == "prod"
    }
}

impl MongoConfig {
    pub fn from_env(env: &dyn EnvSource, is_prod: bool) -> Result<Self, AppError> {
        Ok(MongoConfig {
            host: env.var(MONGODB_SERVICE_HOST),
            port: env.var(MONGODB_SERVICE_PORT),
            database: get_env(env, MONGODB_DATABASE, Some(DEFAULT_DATABASE), is_prod)?,
            username: get_env(env, MONGODB_USER, Some(DEFAULT_USER), is_prod)?,
            password: Secret::new(get_env(
                env,
                MONGODB_PASSWORD,
                Some(DEFAULT_PASSWORD),
                is_prod,
            )?),
        })
    }

    /// Host and port of the server, or a configuration error when either is
    /// missing or the port is not in `1..=65535`.
    pub fn address(&self) -> Result<(String, u16), AppError> {
        let (host, port) = match (self.host.as_deref(), self.port.as_deref()) {
            (Some(host), Some(port)) => (host, port),
            _ => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} or {} is not set",
                    MONGODB_SERVICE_HOST,
                    MONGODB_SERVICE_PORT
                )))
            }
        };

        let port = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "{} must be a positive port number, got '{}'",
                    MONGODB_SERVICE_PORT,
                    port
                ))
            })?;

        Ok((host.to_string(), port))
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}
