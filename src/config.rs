use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// FilePursuit search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// How long a stream lookup stays in the in-memory cache
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// `cacheMaxAge` hint sent to the add-on host with every stream response
    #[serde(default = "default_stream_cache_max_age_secs")]
    pub stream_cache_max_age_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7000
}

fn default_search_url() -> String {
    "https://filepursuit.com/jsn/v1/search.php".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    4 * 24 * 60 * 60
}

fn default_stream_cache_max_age_secs() -> u64 {
    24 * 60 * 60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            search_url: default_search_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
            stream_cache_max_age_secs: default_stream_cache_max_age_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.search_url, "https://filepursuit.com/jsn/v1/search.php");
        assert_eq!(config.cache_ttl_secs, 345_600);
        assert_eq!(config.stream_cache_max_age_secs, 86_400);
        assert_eq!(config.bind_addr(), "0.0.0.0:7000");
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("CACHE_TTL_SECS".to_string(), "60".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.host, "0.0.0.0");
    }
}
