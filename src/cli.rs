use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode
/// Non-interactive mode is used when any of these conditions are met:
/// - --once flag is set (render once and exit)
/// - config operations are requested
/// - --debug mode is enabled (debug mode always runs once and exits)
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once
        || args.new_team_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
        || args.debug
}

/// BallerTV Team Dashboard
///
/// A terminal dashboard for a BallerTV team page. Shows the team's game
/// history grouped by event, with scores, outcomes, and on-demand video
/// manifest links per game.
///
/// In interactive mode (default):
/// - Use arrow keys (↑/↓) to select a game, (←/→) to change pages
/// - Press Enter to load (or reload) the selected game's video link
/// - Press 'r' to refresh data (10s cooldown between refreshes)
/// - Press 'q' to quit
#[derive(Parser, Debug)]
#[command(author = "Courtside contributors", about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Render the dashboard once and exit immediately. Useful for scripts or
    /// quick checks. The output stays visible in terminal history.
    #[arg(short, long)]
    pub once: bool,

    /// Disable clickable hyperlinks in the output.
    /// Useful for terminals that don't support links or for plain text output.
    #[arg(long = "plain", short = 'p', help_heading = "Display Options")]
    pub disable_links: bool,

    /// Show a specific team page URL for this run only, without touching the
    /// saved configuration.
    #[arg(long = "team", short = 't', help_heading = "Display Options", value_name = "URL")]
    pub team_url: Option<String>,

    /// Update the team page URL in config. Will prompt for a URL if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "TEAM_URL",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_team_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode which renders once without clearing the terminal.
    /// In this mode, info logs are written to the log file instead of being
    /// displayed in the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noninteractive_detection() {
        let base = Args {
            once: false,
            disable_links: false,
            team_url: None,
            new_team_url: None,
            new_log_file_path: None,
            clear_log_file_path: false,
            list_config: false,
            debug: false,
            log_file: None,
        };
        assert!(!is_noninteractive_mode(&base));

        let once = Args { once: true, ..base };
        assert!(is_noninteractive_mode(&once));
    }

    #[test]
    fn test_config_ops_are_noninteractive() {
        let args = Args {
            once: false,
            disable_links: false,
            team_url: None,
            new_team_url: Some("https://www.ballertv.com/teams/x".to_string()),
            new_log_file_path: None,
            clear_log_file_path: false,
            list_config: false,
            debug: false,
            log_file: None,
        };
        assert!(is_noninteractive_mode(&args));
    }
}
