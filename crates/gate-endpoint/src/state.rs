//! # Endpoint Configuration
//!
//! Bind address for the ephemeral endpoint process. The demo driver passes
//! these variables to the child process it spawns.

/// Endpoint server configuration
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl EndpointConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("ENDPOINT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("ENDPOINT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8722),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Base URL the endpoint serves on
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        std::env::remove_var("ENDPOINT_HOST");
        std::env::remove_var("ENDPOINT_PORT");

        let config = EndpointConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8722);
    }

    #[test]
    fn test_socket_addr_and_base_url() {
        let config = EndpointConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.base_url(), "http://0.0.0.0:3000");
    }
}
