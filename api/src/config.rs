//! Startup configuration: flags, environment and an optional `.env` file.
use clap::Parser;
use log::info;
use rocket::figment::Figment;

use crate::error::ApiError;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_NAME: &str = "rewatch";
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 10;

/// cmd line args, each also readable from the environment
#[derive(Parser, Default, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Full connection string; wins over the DB_* parts.
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: Option<String>,
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,
    /// Atlas cluster host, e.g. cluster0.abcde.mongodb.net
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,
    #[arg(long, env = "DB_NAME", default_value = DEFAULT_DB_NAME)]
    pub db_name: String,
    #[arg(long, env = "ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub access_token_secret: Option<String>,
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<String>,
    #[arg(long, env = "STRIPE_API_BASE", default_value = DEFAULT_STRIPE_API_BASE)]
    pub stripe_api_base: String,
    /// Lifetime of issued access tokens.
    #[arg(long, env = "TOKEN_TTL_DAYS", default_value_t = DEFAULT_TOKEN_TTL_DAYS)]
    pub token_ttl_days: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mongo_uri: String,
    pub db_name: String,
    pub access_token_secret: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub token_ttl_days: i64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ApiError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("loaded environment from {}", path.display());
        }
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self, ApiError> {
        let mongo_uri = match (args.mongodb_uri, args.db_user, args.db_password, args.db_host) {
            (Some(uri), ..) => uri,
            (None, Some(user), Some(password), Some(host)) => atlas_uri(&user, &password, &host),
            _ => {
                return Err(ApiError::Config(
                    "set MONGODB_URI or all of DB_USER, DB_PASSWORD and DB_HOST".to_string(),
                ))
            }
        };
        let access_token_secret = required(args.access_token_secret, "ACCESS_TOKEN_SECRET")?;
        let stripe_secret_key = required(args.stripe_secret_key, "STRIPE_SECRET_KEY")?;

        Ok(AppConfig {
            port: args.port,
            mongo_uri,
            db_name: args.db_name,
            access_token_secret,
            stripe_secret_key,
            stripe_api_base: args.stripe_api_base,
            token_ttl_days: args.token_ttl_days,
        })
    }

    /// Rocket's own figment with the port and pool url overridden.
    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("port", self.port))
            .merge(("databases.rewatch.url", self.mongo_uri.as_str()))
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Config(format!("missing environment variable '{}'", name))),
    }
}

pub fn atlas_uri(user: &str, password: &str, host: &str) -> String {
    format!("mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority", user, password, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            port: DEFAULT_PORT,
            db_name: DEFAULT_DB_NAME.to_string(),
            access_token_secret: Some("secret".to_string()),
            stripe_secret_key: Some("sk_test_123".to_string()),
            stripe_api_base: DEFAULT_STRIPE_API_BASE.to_string(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            ..Default::default()
        }
    }

    #[test]
    fn builds_atlas_uri_from_parts() {
        let config = AppConfig::from_args(Args {
            db_user: Some("rewatch".to_string()),
            db_password: Some("pw".to_string()),
            db_host: Some("cluster0.example.mongodb.net".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(
            config.mongo_uri,
            "mongodb+srv://rewatch:pw@cluster0.example.mongodb.net/?retryWrites=true&w=majority"
        );
    }

    #[test]
    fn full_uri_wins() {
        let config = AppConfig::from_args(Args {
            mongodb_uri: Some("mongodb://localhost:27017".to_string()),
            db_user: Some("ignored".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(config.mongo_uri, "mongodb://localhost:27017");
        assert_eq!(config.db_name, "rewatch");
    }

    #[test]
    fn missing_database_location_is_an_error() {
        let err = AppConfig::from_args(args()).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn secrets_are_required() {
        let err = AppConfig::from_args(Args {
            mongodb_uri: Some("mongodb://localhost:27017".to_string()),
            access_token_secret: None,
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("ACCESS_TOKEN_SECRET"));

        let err = AppConfig::from_args(Args {
            mongodb_uri: Some("mongodb://localhost:27017".to_string()),
            stripe_secret_key: Some(String::new()),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("STRIPE_SECRET_KEY"));
    }

    #[test]
    fn figment_carries_port_and_pool_url() {
        let config = AppConfig::from_args(Args {
            port: 8123,
            mongodb_uri: Some("mongodb://localhost:27017".to_string()),
            ..args()
        })
        .unwrap();
        let figment = config.figment();
        assert_eq!(figment.extract_inner::<u16>("port").unwrap(), 8123);
        assert_eq!(
            figment.extract_inner::<String>("databases.rewatch.url").unwrap(),
            "mongodb://localhost:27017"
        );
    }
}
