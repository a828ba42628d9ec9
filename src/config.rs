use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    /// Directory the disbursement slips are written into.
    pub output_dir: String,
    pub token_cache_path: String,
    pub drive_upload_url: String,

    // Rate limiting
    pub rate_submit_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "records".to_string()),
            token_cache_path: env::var("TOKEN_CACHE_PATH")
                .unwrap_or_else(|_| "token_cache.json".to_string()),
            drive_upload_url: env::var("DRIVE_UPLOAD_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/upload/drive/v3/files".to_string()),

            rate_submit_per_min: env::var("RATE_SUBMIT_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
