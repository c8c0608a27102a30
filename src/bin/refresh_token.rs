use brand_tools::config::{Endpoints, OAuthCredentials, YOUTUBE_ACCESS_TOKEN};
use brand_tools::api_client::ApiClient;
use brand_tools::env_file::{self, KeyUpdate, DEFAULT_ENV_FILE};
use brand_tools::refresh::{self, RefreshOutcome};
use chrono::Utc;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let env_path = Path::new(DEFAULT_ENV_FILE);
    env_file::load_into_env(env_path);

    let credentials = OAuthCredentials::from_env();
    let client = ApiClient::new(Endpoints::from_env());

    println!("Refreshing Access Token...");
    let issued_at = Utc::now();

    match refresh::refresh_and_store(&client, &credentials, env_path).await? {
        RefreshOutcome::Stored { token, update } => {
            println!("Successfully refreshed token.");
            if let Some(expires_at) = token.expires_at(issued_at) {
                println!("Token expires at {}", expires_at.to_rfc3339());
            }

            match update {
                KeyUpdate::Replaced(_) => println!("{} file updated.", DEFAULT_ENV_FILE),
                KeyUpdate::Appended => println!(
                    "{} had no {} line; appended one.",
                    DEFAULT_ENV_FILE, YOUTUBE_ACCESS_TOKEN
                ),
            }
        }
        RefreshOutcome::Rejected(response) => {
            println!("Failed to refresh token.");
            if let Some(reason) = response.error_summary() {
                println!("HTTP {}: {}", response.status, reason);
            }
            println!("{}", response.pretty_body());
        }
    }

    Ok(())
}
