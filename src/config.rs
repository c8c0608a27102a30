use std::env;

pub const CLIENT_ID: &str = "CLIENT_ID";
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const YOUTUBE_REFRESH_TOKEN: &str = "YOUTUBE_REFRESH_TOKEN";
pub const YOUTUBE_ACCESS_TOKEN: &str = "YOUTUBE_ACCESS_TOKEN";
pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
pub const YOUTUBE_CHANNEL_ID: &str = "YOUTUBE_CHANNEL_ID";

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

// Redirect the tools at a local stub server
const TOKEN_URL_OVERRIDE: &str = "GOOGLE_TOKEN_URL";
const API_BASE_OVERRIDE: &str = "YOUTUBE_API_BASE";

/// Unset keys read as empty strings; the API rejects them later.
fn env_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl OAuthCredentials {
    pub fn from_env() -> Self {
        Self {
            client_id: env_or_empty(CLIENT_ID),
            client_secret: env_or_empty(CLIENT_SECRET),
            refresh_token: env_or_empty(YOUTUBE_REFRESH_TOKEN),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct YouTubeConfig {
    pub api_key: String,
    pub access_token: String,
    pub channel_id: String,
}

impl YouTubeConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env_or_empty(YOUTUBE_API_KEY),
            access_token: env_or_empty(YOUTUBE_ACCESS_TOKEN),
            channel_id: env_or_empty(YOUTUBE_CHANNEL_ID),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Endpoints {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            token_url: env::var(TOKEN_URL_OVERRIDE).unwrap_or(defaults.token_url),
            api_base: env::var(API_BASE_OVERRIDE).unwrap_or(defaults.api_base),
        }
    }
}

/// Last five characters of a secret, or `NONE` when it is empty.
pub fn key_suffix(key: &str) -> String {
    if key.is_empty() {
        return "NONE".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    chars[chars.len().saturating_sub(5)..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_suffix() {
        assert_eq!(key_suffix(""), "NONE");
        assert_eq!(key_suffix("abc"), "abc");
        assert_eq!(key_suffix("AIzaSyD-1234567890"), "67890");
    }

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.token_url, "https://oauth2.googleapis.com/token");
        assert_eq!(endpoints.api_base, "https://www.googleapis.com/youtube/v3");
    }
}
