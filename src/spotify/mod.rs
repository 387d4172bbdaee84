//! Spotify Web API client.
//!
//! Uses the Authorization Code flow. Access tokens belong to the browser:
//! they are passed in per call and never cached here.

use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::UpstreamError;

const SERVICE: &str = "Spotify";
const SCOPE: &str = "user-top-read";
const TOP_ARTISTS_LIMIT: u32 = 5;

/// Spotify API client bound to one registered application.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    accounts_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            accounts_url: config.spotify_accounts_url.clone(),
            api_url: config.spotify_api_url.clone(),
        }
    }

    /// URL of the consent page the browser is sent to by `/login`.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}",
            self.accounts_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(SCOPE),
        )
    }

    /// Trades an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, UpstreamError> {
        let params = [
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let res = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .form(&params)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service: SERVICE, source })?;

        let body: TokenResponse = UpstreamError::check(SERVICE, res)
            .await?
            .json()
            .await
            .map_err(|e| malformed(format!("token parse failed: {}", e)))?;

        body.access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| malformed("no access_token in token response".into()))
    }

    /// Names of the user's top artists, in the order Spotify ranks them.
    pub async fn top_artists(&self, access_token: &str) -> Result<Vec<String>, UpstreamError> {
        let url = format!("{}/me/top/artists?limit={}", self.api_url, TOP_ARTISTS_LIMIT);

        let res = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service: SERVICE, source })?;

        let body: TopArtistsResponse = UpstreamError::check(SERVICE, res)
            .await?
            .json()
            .await
            .map_err(|e| malformed(format!("top artists parse failed: {}", e)))?;

        Ok(body.items.into_iter().map(|a| a.name).collect())
    }
}

fn malformed(reason: String) -> UpstreamError {
    UpstreamError::Malformed { service: SERVICE, reason }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct TopArtistsResponse {
    items: Vec<Artist>,
}

/// A Spotify artist; every field except the name is dropped.
#[derive(Clone, Debug, Deserialize)]
pub struct Artist {
    pub name: String,
}
