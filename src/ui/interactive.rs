//! Interactive UI loop: keyboard-driven selection, manual refresh with a
//! cooldown, and per-game video loading on background tasks.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::constants::{REFRESH_COOLDOWN_SECONDS, polling};
use crate::dashboard_ui::VideoPanelState;
use crate::data_fetcher::api::{ScrapeContext, fetch_team_info, fetch_video_info};
use crate::error::AppError;

use super::build_dashboard;

/// Completion message from a background video load.
enum VideoOutcome {
    Loaded { link: String, video_url: String },
    Failed { link: String, message: String },
}

/// Runs the interactive dashboard until the user quits.
///
/// Key bindings: `q` quit, `r` refresh (10 s cooldown), up/down select a
/// game, left/right change page, Enter load (or reload) the selected game's
/// video. Video loads run on spawned tasks and report back over a channel;
/// re-triggering a load aborts the previous in-flight task for that game so
/// only the latest request can fill the panel.
pub async fn run_interactive_ui(ctx: ScrapeContext, disable_links: bool) -> Result<(), AppError> {
    let mut out = stdout();

    let team_info = fetch_team_info(&ctx).await?;
    let mut page = build_dashboard(&ctx, &team_info, disable_links, true, false).await?;
    page.render_buffered(&mut out)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<VideoOutcome>();
    let mut inflight: HashMap<String, JoinHandle<()>> = HashMap::new();
    let mut last_refresh: Option<Instant> = None;
    let mut dirty = false;

    loop {
        // Apply completed video loads before handling input. A message for a
        // load that was aborted after completion is harmless: it writes the
        // state the aborted task produced, and the newer task overwrites it.
        while let Ok(outcome) = rx.try_recv() {
            match outcome {
                VideoOutcome::Loaded { link, video_url } => {
                    inflight.remove(&link);
                    page.set_video_state(&link, VideoPanelState::Loaded { video_url });
                }
                VideoOutcome::Failed { link, message } => {
                    inflight.remove(&link);
                    warn!(game = %link, %message, "video load failed");
                    page.set_video_state(&link, VideoPanelState::Error { message });
                }
            }
            dirty = true;
        }

        if event::poll(Duration::from_millis(polling::ACTIVE_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('r') => {
                        let cooled_down = last_refresh.is_none_or(|at| {
                            at.elapsed() >= Duration::from_secs(REFRESH_COOLDOWN_SECONDS)
                        });
                        if !cooled_down {
                            debug!("refresh ignored, cooldown active");
                            continue;
                        }
                        last_refresh = Some(Instant::now());

                        match rebuild(&ctx, disable_links).await {
                            Ok(mut rebuilt) => {
                                // Keep open panels open across the rebuild.
                                rebuilt.restore_video_states(&page.video_states());
                                page = rebuilt;
                                info!("dashboard refreshed");
                            }
                            Err(e) => {
                                warn!("refresh failed: {e}");
                                page.set_error_message(Some(e.to_string()));
                            }
                        }
                        dirty = true;
                    }
                    KeyCode::Up => {
                        page.move_selection_up();
                        dirty = true;
                    }
                    KeyCode::Down => {
                        page.move_selection_down();
                        dirty = true;
                    }
                    KeyCode::Left => {
                        page.previous_page();
                        dirty = true;
                    }
                    KeyCode::Right => {
                        page.next_page();
                        dirty = true;
                    }
                    KeyCode::Enter => {
                        if let Some(link) = page.selected_link() {
                            // Re-triggering cancels the previous load for
                            // this game; the fetch is repeated deliberately
                            // so a live stream's manifest stays current.
                            if let Some(handle) = inflight.remove(&link) {
                                handle.abort();
                                debug!(game = %link, "aborted previous video load");
                            }
                            page.set_video_state(&link, VideoPanelState::Loading);

                            let task_ctx = ctx.clone();
                            let task_tx = tx.clone();
                            let task_link = link.clone();
                            inflight.insert(
                                link,
                                tokio::spawn(async move {
                                    let outcome =
                                        match fetch_video_info(&task_ctx, &task_link).await {
                                            Ok(video) => VideoOutcome::Loaded {
                                                link: task_link,
                                                video_url: video.video_url,
                                            },
                                            Err(e) => VideoOutcome::Failed {
                                                link: task_link,
                                                message: e.to_string(),
                                            },
                                        };
                                    let _ = task_tx.send(outcome);
                                }),
                            );
                            dirty = true;
                        }
                    }
                    _ => {}
                },
                Event::Resize(_, _) => {
                    page.handle_resize();
                    dirty = true;
                }
                _ => {}
            }
        }

        if dirty {
            page.render_buffered(&mut out)?;
            dirty = false;
        }
    }

    // Leaving the dashboard cancels whatever is still loading.
    for (link, handle) in inflight {
        debug!(game = %link, "aborting video load on exit");
        handle.abort();
    }

    Ok(())
}

async fn rebuild(
    ctx: &ScrapeContext,
    disable_links: bool,
) -> Result<crate::dashboard_ui::DashboardPage, AppError> {
    let team_info = fetch_team_info(ctx).await?;
    build_dashboard(ctx, &team_info, disable_links, true, false).await
}
