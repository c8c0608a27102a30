use crate::api_client::{ApiClient, ApiError, ApiResponse, TokenRefresh, TokenResponse};
use crate::config::{OAuthCredentials, YOUTUBE_ACCESS_TOKEN};
use crate::env_file::{self, EnvFileError, KeyUpdate};
use log::info;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to update env file: {0}")]
    EnvFile(#[from] EnvFileError),
}

#[derive(Debug)]
pub enum RefreshOutcome {
    Stored {
        token: TokenResponse,
        update: KeyUpdate,
    },
    /// The env file was not opened.
    Rejected(ApiResponse),
}

/// Refreshes the access token and writes it to `YOUTUBE_ACCESS_TOKEN` in `env_path`.
pub async fn refresh_and_store(
    client: &ApiClient,
    credentials: &OAuthCredentials,
    env_path: &Path,
) -> Result<RefreshOutcome, RefreshError> {
    match client.refresh_access_token(credentials).await? {
        TokenRefresh::Refreshed(token) => {
            let update = env_file::update_env_file(env_path, YOUTUBE_ACCESS_TOKEN, &token.access_token)?;
            info!("stored new access token in {}", env_path.display());
            Ok(RefreshOutcome::Stored { token, update })
        }
        TokenRefresh::Rejected(response) => Ok(RefreshOutcome::Rejected(response)),
    }
}
