use crate::config::{Endpoints, OAuthCredentials, YouTubeConfig};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const SEARCH_MAX_RESULTS: u32 = 10;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API returned error (HTTP {status}): {message}")]
    ApiError { status: StatusCode, message: String },
}

/// Status plus decoded body of a single call. Non-JSON bodies are kept as a JSON string.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }

    /// One-line reason pulled from either the Data API or the OAuth error shape.
    pub fn error_summary(&self) -> Option<String> {
        let error = self.body.get("error")?;
        if let Some(message) = error.get("message").and_then(Value::as_str) {
            return Some(message.to_string());
        }

        let code = error.as_str()?;
        match self.body.get("error_description").and_then(Value::as_str) {
            Some(description) => Some(format!("{}: {}", code, description)),
            None => Some(code.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Reads a token endpoint body. Only a string `access_token` is required;
    /// optional fields of an unexpected type are dropped.
    pub fn from_body(body: &Value) -> Option<Self> {
        let access_token = body.get("access_token")?.as_str()?.to_string();

        let expires_in = body.get("expires_in").and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            access_token,
            expires_in,
            token_type: text("token_type"),
            scope: text("scope"),
        })
    }

    /// `None` when `expires_in` is absent or out of range for a timestamp.
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let lifetime = Duration::try_seconds(self.expires_in?)?;
        issued_at.checked_add_signed(lifetime)
    }
}

#[derive(Debug)]
pub enum TokenRefresh {
    Refreshed(TokenResponse),
    /// No string `access_token` in the body; carries the raw payload.
    Rejected(ApiResponse),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub published_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    id: SearchItemId,
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    title: String,
    published_at: String,
}

/// Videos from a search response, in the order the API returned them.
///
/// A body without `items` is reported as [`ApiError::ApiError`].
pub fn videos_from_search(response: &ApiResponse) -> Result<Vec<VideoSummary>, ApiError> {
    let Some(items) = response.body.get("items") else {
        return Err(ApiError::ApiError {
            status: response.status,
            message: response
                .error_summary()
                .unwrap_or_else(|| "response has no items".to_string()),
        });
    };

    let items: Vec<SearchItem> = serde_json::from_value(items.clone())?;
    Ok(items
        .into_iter()
        .map(|item| VideoSummary {
            video_id: item.id.video_id,
            title: item.snippet.title,
            published_at: item.snippet.published_at,
        })
        .collect())
}

/// Title and id of the first channel in a `channels` response.
pub fn first_channel(response: &ApiResponse) -> Option<(String, String)> {
    let channel = response.body.get("items")?.as_array()?.first()?;
    let id = channel.get("id")?.as_str()?.to_string();
    let title = channel
        .get("snippet")
        .and_then(|s| s.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some((title, id))
}

pub struct ApiClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> Self {
        let client = reqwest::Client::new();
        Self { client, endpoints }
    }

    async fn read_response(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(e) => {
                debug!("non-JSON body ({}), keeping raw text", e);
                Value::String(text)
            }
        };

        debug!("HTTP {} with {} top-level keys", status, body.as_object().map_or(0, |o| o.len()));
        Ok(ApiResponse { status, body })
    }

    /// Exchanges the refresh token for a new access token. One attempt, no retry.
    pub async fn refresh_access_token(
        &self,
        credentials: &OAuthCredentials,
    ) -> Result<TokenRefresh, ApiError> {
        debug!("POST {}", self.endpoints.token_url);

        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&self.endpoints.token_url)
            .form(&form)
            .send()
            .await?;
        let response = Self::read_response(response).await?;

        match TokenResponse::from_body(&response.body) {
            Some(token) => Ok(TokenRefresh::Refreshed(token)),
            None => Ok(TokenRefresh::Rejected(response)),
        }
    }

    async fn get(
        &self,
        resource: &str,
        config: &YouTubeConfig,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}/{}", self.endpoints.api_base.trim_end_matches('/'), resource);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", config.api_key.as_str())])
            .bearer_auth(&config.access_token)
            .send()
            .await?;

        Self::read_response(response).await
    }

    pub async fn channel_info(&self, config: &YouTubeConfig) -> Result<ApiResponse, ApiError> {
        self.get(
            "channels",
            config,
            &[("part", "snippet"), ("id", config.channel_id.as_str())],
        )
        .await
    }

    /// Channel owned by the access token, regardless of the configured channel id.
    pub async fn my_channel(&self, config: &YouTubeConfig) -> Result<ApiResponse, ApiError> {
        self.get("channels", config, &[("part", "snippet"), ("mine", "true")])
            .await
    }

    pub async fn search_recent_videos(
        &self,
        config: &YouTubeConfig,
        max_results: u32,
    ) -> Result<ApiResponse, ApiError> {
        let max_results = max_results.to_string();
        self.get(
            "search",
            config,
            &[
                ("part", "snippet"),
                ("channelId", config.channel_id.as_str()),
                ("maxResults", max_results.as_str()),
                ("order", "date"),
                ("type", "video"),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn test_error_summary_data_api_shape() {
        let r = response(
            403,
            json!({"error": {"code": 403, "message": "quotaExceeded", "errors": []}}),
        );
        assert_eq!(r.error_summary().as_deref(), Some("quotaExceeded"));
    }

    #[test]
    fn test_error_summary_oauth_shape() {
        let r = response(
            400,
            json!({"error": "invalid_grant", "error_description": "Token has been expired or revoked."}),
        );
        assert_eq!(
            r.error_summary().as_deref(),
            Some("invalid_grant: Token has been expired or revoked.")
        );
        assert!(response(200, json!({"items": []})).error_summary().is_none());
    }

    #[test]
    fn test_videos_keep_order() {
        let r = response(
            200,
            json!({
                "kind": "youtube#searchListResponse",
                "items": [
                    {"id": {"kind": "youtube#video", "videoId": "b2"}, "snippet": {"title": "Second upload", "publishedAt": "2024-05-02T10:00:00Z"}},
                    {"id": {"kind": "youtube#video", "videoId": "a1"}, "snippet": {"title": "First upload", "publishedAt": "2024-05-01T09:30:00Z"}}
                ]
            }),
        );

        let videos = videos_from_search(&r).unwrap();
        assert_eq!(
            videos,
            vec![
                VideoSummary {
                    video_id: "b2".into(),
                    title: "Second upload".into(),
                    published_at: "2024-05-02T10:00:00Z".into(),
                },
                VideoSummary {
                    video_id: "a1".into(),
                    title: "First upload".into(),
                    published_at: "2024-05-01T09:30:00Z".into(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_items_is_api_error() {
        let r = response(401, json!({"error": {"code": 401, "message": "Invalid Credentials"}}));
        match videos_from_search(&r) {
            Err(ApiError::ApiError { status, message }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Invalid Credentials");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_first_channel() {
        let r = response(
            200,
            json!({"items": [{"id": "UC123", "snippet": {"title": "Studio"}}]}),
        );
        assert_eq!(first_channel(&r), Some(("Studio".into(), "UC123".into())));
        assert_eq!(first_channel(&response(200, json!({"items": []}))), None);
    }

    #[test]
    fn test_token_expiry() {
        let token = TokenResponse {
            access_token: "ya29.x".into(),
            expires_in: Some(3599),
            token_type: Some("Bearer".into()),
            scope: None,
        };
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            token.expires_at(issued),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 59, 59).unwrap())
        );
    }

    #[test]
    fn test_token_expiry_out_of_range() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        for seconds in [i64::MAX, i64::MIN] {
            let token = TokenResponse {
                access_token: "ya29.x".into(),
                expires_in: Some(seconds),
                token_type: None,
                scope: None,
            };
            assert_eq!(token.expires_at(issued), None);
        }
    }

    #[test]
    fn test_token_optional_fields_are_lenient() {
        let token = TokenResponse::from_body(&json!({
            "access_token": "ya29.new",
            "expires_in": "3599",
            "scope": 5,
            "token_type": ["Bearer"]
        }))
        .unwrap();

        assert_eq!(token.access_token, "ya29.new");
        assert_eq!(token.expires_in, Some(3599));
        assert_eq!(token.scope, None);
        assert_eq!(token.token_type, None);

        let token = TokenResponse::from_body(&json!({"access_token": "t", "expires_in": 12.5})).unwrap();
        assert_eq!(token.expires_in, None);
    }

    #[test]
    fn test_token_requires_string_access_token() {
        assert!(TokenResponse::from_body(&json!({"access_token": null})).is_none());
        assert!(TokenResponse::from_body(&json!({"access_token": 42})).is_none());
        assert!(TokenResponse::from_body(&json!({"error": "invalid_grant"})).is_none());
    }
}
