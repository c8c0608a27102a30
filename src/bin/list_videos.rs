use brand_tools::api_client::{self, ApiClient, ApiError, SEARCH_MAX_RESULTS};
use brand_tools::config::{Endpoints, YouTubeConfig};
use brand_tools::env_file::{self, DEFAULT_ENV_FILE};
use brand_tools::report;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    env_file::load_into_env(Path::new(DEFAULT_ENV_FILE));

    let config = YouTubeConfig::from_env();
    let client = ApiClient::new(Endpoints::from_env());

    println!("Checking videos for channel: {}", config.channel_id);
    let response = client
        .search_recent_videos(&config, SEARCH_MAX_RESULTS)
        .await?;
    println!("Status: {}", response.status.as_u16());

    match api_client::videos_from_search(&response) {
        Ok(videos) => {
            for line in report::video_listing(&videos) {
                println!("{}", line);
            }
        }
        Err(ApiError::ApiError { .. }) => {
            println!("No videos found or error.");
            println!("{}", response.pretty_body());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
