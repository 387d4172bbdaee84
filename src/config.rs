use std::env;
use std::fmt;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LANDING_URL: &str = "/index.html";
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_DEEPSEEK_URL: &str = "https://api.deepseek.com/v1";
const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// Application configuration from environment variables.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub redirect_uri: String,
    pub deepseek_api_key: String,
    /// Where the browser lands after a successful login.
    pub client_landing_url: String,
    pub static_dir: String,
    pub spotify_accounts_url: String,
    pub spotify_api_url: String,
    pub deepseek_api_url: String,
    pub deepseek_model: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).ok_or_else(|| anyhow::anyhow!("{} is required", key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = match get("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {:?}", p))?,
            None => DEFAULT_PORT,
        };

        let spotify_client_id = required("SPOTIFY_CLIENT_ID")?;
        let spotify_client_secret = required("SPOTIFY_CLIENT_SECRET")?;
        let redirect_uri = required("REDIRECT_URI")?;
        let deepseek_api_key = required("DEEPSEEK_API_KEY")?;

        Ok(Self {
            port,
            spotify_client_id,
            spotify_client_secret,
            redirect_uri,
            deepseek_api_key,
            client_landing_url: or_default("CLIENT_LANDING_URL", DEFAULT_LANDING_URL),
            static_dir: or_default("STATIC_DIR", DEFAULT_STATIC_DIR),
            spotify_accounts_url: trim_base(or_default("SPOTIFY_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL)),
            spotify_api_url: trim_base(or_default("SPOTIFY_API_URL", DEFAULT_API_URL)),
            deepseek_api_url: trim_base(or_default("DEEPSEEK_API_URL", DEFAULT_DEEPSEEK_URL)),
            deepseek_model: or_default("DEEPSEEK_MODEL", DEFAULT_DEEPSEEK_MODEL),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("spotify_client_id", &self.spotify_client_id)
            .field("spotify_client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("deepseek_api_key", &"<redacted>")
            .field("client_landing_url", &self.client_landing_url)
            .field("static_dir", &self.static_dir)
            .field("spotify_accounts_url", &self.spotify_accounts_url)
            .field("spotify_api_url", &self.spotify_api_url)
            .field("deepseek_api_url", &self.deepseek_api_url)
            .field("deepseek_model", &self.deepseek_model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete() -> HashMap<String, String> {
        vars(&[
            ("SPOTIFY_CLIENT_ID", "client-id"),
            ("SPOTIFY_CLIENT_SECRET", "client-secret"),
            ("REDIRECT_URI", "http://localhost:3000/callback"),
            ("DEEPSEEK_API_KEY", "sk-test"),
        ])
    }

    fn load(map: &HashMap<String, String>) -> anyhow::Result<Config> {
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = load(&complete()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.spotify_client_id, "client-id");
        assert_eq!(config.redirect_uri, "http://localhost:3000/callback");
        assert_eq!(config.client_landing_url, "/index.html");
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.spotify_accounts_url, "https://accounts.spotify.com");
        assert_eq!(config.spotify_api_url, "https://api.spotify.com/v1");
        assert_eq!(config.deepseek_api_url, "https://api.deepseek.com/v1");
        assert_eq!(config.deepseek_model, "deepseek-chat");
    }

    #[test]
    fn each_required_value_is_enforced() {
        for key in [
            "SPOTIFY_CLIENT_ID",
            "SPOTIFY_CLIENT_SECRET",
            "REDIRECT_URI",
            "DEEPSEEK_API_KEY",
        ] {
            let mut map = complete();
            map.remove(key);
            let err = load(&map).unwrap_err();
            assert!(err.to_string().contains(key), "unexpected error: {}", err);
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut map = complete();
        map.insert("SPOTIFY_CLIENT_SECRET".into(), "   ".into());
        assert!(load(&map).is_err());
    }

    #[test]
    fn port_and_base_urls_are_overridable() {
        let mut map = complete();
        map.insert("PORT".into(), "8080".into());
        map.insert("SPOTIFY_API_URL".into(), "http://127.0.0.1:9000/v1/".into());
        let config = load(&map).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.spotify_api_url, "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut map = complete();
        map.insert("PORT".into(), "not-a-port".into());
        assert!(load(&map).is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = load(&complete()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("client-secret"));
        assert!(!printed.contains("sk-test"));
        assert!(printed.contains("client-id"));
    }
}
