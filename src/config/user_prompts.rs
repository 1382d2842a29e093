//! User interaction and prompts for configuration setup
//!
//! Handles first-run input collection when no config file exists yet.

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Prompts the user for their team page URL and returns the trimmed input.
pub async fn prompt_for_team_url() -> Result<String, AppError> {
    println!("Please enter your team page URL (e.g. https://www.ballertv.com/teams/<team>): ");
    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}
