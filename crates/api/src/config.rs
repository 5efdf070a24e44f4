//! Application configuration loaded from environment variables.

/// Shipping provider credentials.
#[derive(Debug, Clone)]
pub struct ShiprocketConfig {
    pub api_url: String,
    pub email: String,
    pub password: String,
}

/// Payment gateway credentials.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `5050`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `JWT_SECRET` — HS256 signing secret (default: `"dev-secret"`)
/// - `SHIPROCKET_API_URL`, `SHIPROCKET_EMAIL`, `SHIPROCKET_PASSWORD` —
///   shipping provider; the in-memory double is used when unset
/// - `RAZORPAY_KEY_ID`, `RAZORPAY_KEY_SECRET` — payment gateway;
///   the in-memory double is used when unset
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub shiprocket: Option<ShiprocketConfig>,
    pub razorpay: Option<RazorpayConfig>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let shiprocket = match (
            std::env::var("SHIPROCKET_API_URL"),
            std::env::var("SHIPROCKET_EMAIL"),
            std::env::var("SHIPROCKET_PASSWORD"),
        ) {
            (Ok(api_url), Ok(email), Ok(password)) => Some(ShiprocketConfig {
                api_url,
                email,
                password,
            }),
            _ => None,
        };

        let razorpay = match (
            std::env::var("RAZORPAY_KEY_ID"),
            std::env::var("RAZORPAY_KEY_SECRET"),
        ) {
            (Ok(key_id), Ok(key_secret)) => Some(RazorpayConfig { key_id, key_secret }),
            _ => None,
        };

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5050),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret".to_string()),
            shiprocket,
            razorpay,
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5050,
            log_level: "info".to_string(),
            jwt_secret: "dev-secret".to_string(),
            shiprocket: None,
            razorpay: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5050);
        assert!(config.shiprocket.is_none());
        assert!(config.razorpay.is_none());
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
