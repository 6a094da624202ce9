use std::net::SocketAddr;
use std::time::Duration;

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Countries directory endpoint.
    pub countries_api_url: String,
    /// Exchange-rate feed endpoint.
    pub exchange_rate_api_url: String,
    /// Per-request timeout for both upstream calls.
    pub api_timeout: Duration,
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// SQLite database file path.
    pub db_path: String,
    /// Directory for generated artifacts (the summary image).
    pub data_dir: String,
}

const DEFAULT_COUNTRIES_API_URL: &str = "https://restcountries.com/v2/all";
const DEFAULT_EXCHANGE_RATE_API_URL: &str = "https://open.er-api.com/v6/latest/USD";
const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_PORT: u16 = 3000;

impl Config {
    pub fn from_env() -> Self {
        let countries_api_url = std::env::var("COUNTRIES_API_URL")
            .unwrap_or_else(|_| DEFAULT_COUNTRIES_API_URL.to_string());
        let exchange_rate_api_url = std::env::var("EXCHANGE_RATE_API_URL")
            .unwrap_or_else(|_| DEFAULT_EXCHANGE_RATE_API_URL.to_string());

        // API_TIMEOUT is in milliseconds.
        let timeout_ms = std::env::var("API_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_MS);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let listen_addr = SocketAddr::from(([0, 0, 0, 0], port));

        let db_path = std::env::var("CD_DB_PATH")
            .unwrap_or_else(|_| "data/countrydata.db".to_string());
        let data_dir = std::env::var("CD_DATA_DIR").unwrap_or_else(|_| {
            std::path::Path::new(&db_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| ".".to_string())
        });

        Config {
            countries_api_url,
            exchange_rate_api_url,
            api_timeout: Duration::from_millis(timeout_ms),
            listen_addr,
            db_path,
            data_dir,
        }
    }
}
