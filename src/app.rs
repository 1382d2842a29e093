use crate::cli::Args;
use courtside::data_fetcher::api::ScrapeContext;
use courtside::error::AppError;
use courtside::ui;
use crossterm::{
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

/// Run the interactive application flow.
///
/// - Sets up terminal raw mode and alternate screen
/// - Runs the interactive UI
/// - Cleans up terminal state
pub async fn run_interactive(args: &Args, ctx: ScrapeContext) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut out = stdout();

    // Set terminal title/header to show app name
    execute!(out, SetTitle("COURTSIDE"))?;

    execute!(out, EnterAlternateScreen)?;

    let result = ui::run_interactive_ui(ctx, args.disable_links).await;

    // Clean up terminal
    execute!(out, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}
