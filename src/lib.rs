pub mod api_client;
pub mod config;
pub mod env_file;
pub mod logo;
pub mod refresh;
pub mod report;
