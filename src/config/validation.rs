use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Team page URL cannot be empty and must carry an http(s) scheme, since
///   it seeds every other URL the dashboard builds
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(team_page_url: &str, log_file_path: &Option<String>) -> Result<(), AppError> {
    if team_page_url.is_empty() {
        return Err(AppError::config_error("Team page URL cannot be empty"));
    }

    if !team_page_url.starts_with("http://") && !team_page_url.starts_with("https://") {
        return Err(AppError::config_error(
            "Team page URL must start with http:// or https://",
        ));
    }

    // Validate log file path if provided
    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        // Check if parent directory exists or can be created
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
