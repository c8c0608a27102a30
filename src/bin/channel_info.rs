use brand_tools::api_client::{self, ApiClient};
use brand_tools::config::{key_suffix, Endpoints, YouTubeConfig};
use brand_tools::env_file::{self, DEFAULT_ENV_FILE};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    env_file::load_into_env(Path::new(DEFAULT_ENV_FILE));

    let check_mine = std::env::args().skip(1).any(|arg| arg == "--mine");

    let config = YouTubeConfig::from_env();
    let client = ApiClient::new(Endpoints::from_env());

    println!("Testing with API Key ending in: {}", key_suffix(&config.api_key));
    let response = client.channel_info(&config).await?;
    println!("Status: {}", response.status.as_u16());
    println!("Body:");
    println!("{}", response.pretty_body());

    if check_mine {
        println!();
        println!("--- Token ownership ---");
        let response = client.my_channel(&config).await?;
        if !response.status.is_success() {
            println!(
                "Mine check failed: {}",
                response
                    .error_summary()
                    .unwrap_or_else(|| response.status.to_string())
            );
        } else if let Some((title, id)) = api_client::first_channel(&response) {
            println!("Token belongs to channel: {}", title);
            println!("Channel ID: {}", id);
        } else {
            println!("Token is valid but no channel found for this user.");
        }
    }

    Ok(())
}
