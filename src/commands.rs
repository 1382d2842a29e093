//! Handlers for the configuration-mutating CLI flags.

use crate::cli::Args;
use courtside::config::Config;
use courtside::config::user_prompts::prompt_for_team_url;
use courtside::error::AppError;

/// Applies `--config`, `--set-log-file`, and `--clear-log-file` to the saved
/// configuration. Returns true if any config operation was handled, in which
/// case the caller exits without entering the dashboard.
pub async fn handle_config_operations(args: &Args) -> Result<bool, AppError> {
    let mut handled = false;

    if let Some(new_team_url) = &args.new_team_url {
        let team_page_url = if new_team_url.is_empty() {
            prompt_for_team_url().await?
        } else {
            new_team_url.clone()
        };

        let mut config = Config::load().await.unwrap_or_default();
        config.team_page_url = team_page_url;
        config.validate()?;
        config.save().await?;
        println!("Team page URL updated to: {}", config.team_page_url);
        handled = true;
    }

    if let Some(new_log_file_path) = &args.new_log_file_path {
        let mut config = Config::load().await?;
        config.log_file_path = Some(new_log_file_path.clone());
        config.validate()?;
        config.save().await?;
        println!("Log file path updated to: {new_log_file_path}");
        handled = true;
    }

    if args.clear_log_file_path {
        let mut config = Config::load().await?;
        config.log_file_path = None;
        config.save().await?;
        println!("Log file path cleared, using default location");
        handled = true;
    }

    if args.list_config {
        Config::display().await?;
        handled = true;
    }

    Ok(handled)
}
