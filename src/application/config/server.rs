use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// Listening port, from `INVITELINK_API_PORT`, falling back to the platform `PORT`.
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("INVITELINK_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("INVITELINK_API_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
        }
    }
}
