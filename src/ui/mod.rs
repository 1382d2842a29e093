//! Page construction and the interactive UI entry point.

pub mod interactive;

pub use interactive::run_interactive_ui;

use std::io::stdout;
use tracing::{info, instrument};

use crate::dashboard_ui::DashboardPage;
use crate::data_fetcher::api::{ScrapeContext, fetch_team_info, resolve_event};
use crate::data_fetcher::models::TeamInfo;
use crate::data_fetcher::processors::{build_game_view, starts_new_group};
use crate::error::AppError;

/// Builds the dashboard page from a team's stream history.
///
/// Walks `past_streams` in source order. A record whose event name differs
/// from the previous record's opens a new group: its event is resolved (one
/// fetch per distinct name per cache window) and a header row is emitted.
/// Records keep their header until the name changes again, so grouping is
/// purely adjacency-based.
#[instrument(skip(ctx, team_info), fields(team = %team_info.team.name))]
pub async fn build_dashboard(
    ctx: &ScrapeContext,
    team_info: &TeamInfo,
    disable_links: bool,
    show_footer: bool,
    ignore_height_limit: bool,
) -> Result<DashboardPage, AppError> {
    let mut page = DashboardPage::new(
        team_info.team.name.clone(),
        disable_links,
        show_footer,
        ignore_height_limit,
    );

    let mut last_event_name: Option<&str> = None;
    for record in &team_info.past_streams {
        if starts_new_group(last_event_name, &record.event_name) {
            let detail = resolve_event(ctx, team_info, &record.event_name).await?;
            page.add_event_header(&detail);
            last_event_name = Some(&record.event_name);
        }

        let view = build_game_view(&team_info.team.name, record)?;
        page.add_game(view);
    }

    info!(
        games = page.game_count(),
        "built dashboard page from stream history"
    );
    Ok(page)
}

/// Renders the full dashboard once to stdout and returns. Video panels stay
/// collapsed; this mode exists for scripts and quick checks, and its output
/// survives in terminal scrollback.
pub async fn run_once(ctx: &ScrapeContext, disable_links: bool) -> Result<(), AppError> {
    let team_info = fetch_team_info(ctx).await?;
    let page = build_dashboard(ctx, &team_info, disable_links, false, true).await?;

    let mut out = stdout();
    page.render_buffered(&mut out)?;
    Ok(())
}
