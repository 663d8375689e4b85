/// Shop service configuration loaded from environment variables.
///
/// Every value has a local-development default so the service starts with
/// no environment at all.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Database connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3000). Env var: `PORT`.
    pub port: u16,
    /// HMAC secret for signing access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds (default 86400). Env var: `JWT_EXPIRES_IN`.
    pub jwt_expires_in: u64,
    /// Deployment label used in startup logs. Env var: `APP_ENV`, falling back to `NODE_ENV`.
    pub environment: String,
}

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/sweetshop";
const DEFAULT_JWT_SECRET: &str = "supersecret";

impl ShopConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_owned()),
            jwt_expires_in: lookup("JWT_EXPIRES_IN")
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400),
            environment: lookup("APP_ENV")
                .or_else(|| lookup("NODE_ENV"))
                .unwrap_or_else(|| "development".to_owned()),
        }
    }
}
