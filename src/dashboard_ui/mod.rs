//! Dashboard page: the team's stream history grouped under event headers,
//! with a per-game video panel and buffered terminal rendering.

pub mod colors;

use crossterm::{execute, style::Print, terminal};
use std::collections::HashMap;
use std::io::Stdout;
use tracing::debug;

use crate::constants::ui as ui_consts;
use crate::data_fetcher::models::{EventDetail, GameOutcome, GameView};
use crate::error::AppError;
use self::colors::*;

/// Per-game video panel. Driven only by user action: triggering a load moves
/// to Loading, completion to Loaded or Error, and nothing ever moves a panel
/// back to Collapsed on its own. Re-triggering from Loaded or Error starts a
/// fresh load.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoPanelState {
    Collapsed,
    Loading,
    Loaded { video_url: String },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub struct GameRow {
    pub view: GameView,
    pub video: VideoPanelState,
}

#[derive(Debug, Clone)]
pub enum DashboardRow {
    EventHeader {
        name: String,
        date: Option<String>,
        logo: Option<String>,
    },
    Game(GameRow),
}

/// A renderable dashboard for one team.
#[derive(Debug)]
pub struct DashboardPage {
    team_name: String,
    rows: Vec<DashboardRow>,
    current_page: usize,
    screen_height: u16,
    disable_links: bool,
    show_footer: bool,
    ignore_height_limit: bool,
    /// Index into `rows` of the selected game row, if any games exist.
    selected: Option<usize>,
    error_message: Option<String>,
}

/// Formats an RFC 3339 start time for display; anything unparseable is
/// shown verbatim, since the field comes from scraped data.
fn format_start_time(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

impl DashboardPage {
    pub fn new(
        team_name: String,
        disable_links: bool,
        show_footer: bool,
        ignore_height_limit: bool,
    ) -> Self {
        let screen_height = terminal::size()
            .map(|(_, height)| height)
            .unwrap_or(ui_consts::DEFAULT_SCREEN_HEIGHT);

        Self {
            team_name,
            rows: Vec::new(),
            current_page: 0,
            screen_height,
            disable_links,
            show_footer,
            ignore_height_limit,
            selected: None,
            error_message: None,
        }
    }

    pub fn add_event_header(&mut self, detail: &EventDetail) {
        self.rows.push(DashboardRow::EventHeader {
            name: detail.name.clone(),
            date: detail.date.clone(),
            logo: detail.logo.clone(),
        });
    }

    pub fn add_game(&mut self, view: GameView) {
        self.rows.push(DashboardRow::Game(GameRow {
            view,
            video: VideoPanelState::Collapsed,
        }));
        if self.selected.is_none() {
            self.selected = Some(self.rows.len() - 1);
        }
    }

    pub fn rows(&self) -> &[DashboardRow] {
        &self.rows
    }

    pub fn game_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, DashboardRow::Game(_)))
            .count()
    }

    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    pub fn has_error_message(&self, message: &str) -> bool {
        self.error_message
            .as_deref()
            .is_some_and(|m| m.contains(message))
    }

    /// Move the selection to the next game row, skipping event headers.
    pub fn move_selection_down(&mut self) {
        if let Some(current) = self.selected {
            if let Some(next) = self
                .rows
                .iter()
                .enumerate()
                .skip(current + 1)
                .find(|(_, row)| matches!(row, DashboardRow::Game(_)))
                .map(|(i, _)| i)
            {
                self.selected = Some(next);
                self.scroll_selection_into_view();
            }
        }
    }

    /// Move the selection to the previous game row, skipping event headers.
    pub fn move_selection_up(&mut self) {
        if let Some(current) = self.selected {
            if let Some(previous) = self.rows[..current]
                .iter()
                .enumerate()
                .rev()
                .find(|(_, row)| matches!(row, DashboardRow::Game(_)))
                .map(|(i, _)| i)
            {
                self.selected = Some(previous);
                self.scroll_selection_into_view();
            }
        }
    }

    /// The game link of the selected row. Links are unique per game, so this
    /// is the key used for video panel updates.
    pub fn selected_link(&self) -> Option<String> {
        match self.selected.map(|i| &self.rows[i]) {
            Some(DashboardRow::Game(game)) => Some(game.view.link.clone()),
            _ => None,
        }
    }

    /// Updates the video panel of the game with the given link. Returns false
    /// if no such game exists on the page.
    pub fn set_video_state(&mut self, link: &str, state: VideoPanelState) -> bool {
        for row in &mut self.rows {
            if let DashboardRow::Game(game) = row
                && game.view.link == link
            {
                debug!(game = %link, state = ?state, "video panel transition");
                game.video = state;
                return true;
            }
        }
        false
    }

    pub fn video_state(&self, link: &str) -> Option<&VideoPanelState> {
        self.rows.iter().find_map(|row| match row {
            DashboardRow::Game(game) if game.view.link == link => Some(&game.video),
            _ => None,
        })
    }

    /// Non-collapsed video panels keyed by game link, for carrying panel
    /// state across a rebuild.
    pub fn video_states(&self) -> HashMap<String, VideoPanelState> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                DashboardRow::Game(game) if game.video != VideoPanelState::Collapsed => {
                    Some((game.view.link.clone(), game.video.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Re-applies previously captured panel states after a refresh, so an
    /// open panel stays open when the page is rebuilt.
    pub fn restore_video_states(&mut self, states: &HashMap<String, VideoPanelState>) {
        for row in &mut self.rows {
            if let DashboardRow::Game(game) = row
                && let Some(state) = states.get(&game.view.link)
            {
                game.video = state.clone();
            }
        }
    }

    pub fn handle_resize(&mut self) {
        if let Ok((_, height)) = terminal::size() {
            self.screen_height = height;
        }
        self.scroll_selection_into_view();
    }

    fn row_height(row: &DashboardRow) -> usize {
        match row {
            DashboardRow::EventHeader { .. } => 3,
            DashboardRow::Game(game) => {
                if game.video == VideoPanelState::Collapsed {
                    2
                } else {
                    3
                }
            }
        }
    }

    fn rows_per_screen(&self) -> usize {
        let reserved = ui_consts::HEADER_LINES
            + if self.show_footer {
                ui_consts::FOOTER_LINES
            } else {
                0
            };
        (self.screen_height as usize).saturating_sub(reserved).max(3)
    }

    /// Splits rows into pages by cumulative height. Each page holds at least
    /// one row even if that row alone exceeds the screen.
    fn pages(&self) -> Vec<(usize, usize)> {
        if self.ignore_height_limit {
            return vec![(0, self.rows.len())];
        }

        let capacity = self.rows_per_screen();
        let mut pages = Vec::new();
        let mut start = 0;
        let mut used = 0;

        for (index, row) in self.rows.iter().enumerate() {
            let height = Self::row_height(row);
            if index > start && used + height > capacity {
                pages.push((start, index));
                start = index;
                used = 0;
            }
            used += height;
        }
        if start < self.rows.len() || pages.is_empty() {
            pages.push((start, self.rows.len()));
        }
        pages
    }

    pub fn total_pages(&self) -> usize {
        self.pages().len()
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        if total > 0 {
            self.current_page = (self.current_page + 1) % total;
        }
    }

    pub fn previous_page(&mut self) {
        let total = self.total_pages();
        if total > 0 {
            self.current_page = (self.current_page + total - 1) % total;
        }
    }

    fn scroll_selection_into_view(&mut self) {
        if let Some(selected) = self.selected {
            for (page_index, (start, end)) in self.pages().iter().enumerate() {
                if (*start..*end).contains(&selected) {
                    self.current_page = page_index;
                    return;
                }
            }
        }
        self.current_page = self.current_page.min(self.total_pages().saturating_sub(1));
    }

    fn hyperlink(&self, url: &str, text: &str) -> String {
        if self.disable_links {
            text.to_string()
        } else {
            format!("\x1b]8;;{url}\x07{text}\x1b]8;;\x07")
        }
    }

    fn outcome_color(outcome: GameOutcome) -> u8 {
        match outcome {
            GameOutcome::Won => get_ansi_code(won_fg(), 46),
            GameOutcome::Tied => get_ansi_code(tied_fg(), 226),
            GameOutcome::Lost => get_ansi_code(lost_fg(), 196),
        }
    }

    fn push_event_header(&self, buffer: &mut String, name: &str, date: &Option<String>, logo: &Option<String>) {
        let event_code = get_ansi_code(event_fg(), 46);
        let detail_code = get_ansi_code(detail_fg(), 250);

        buffer.push('\n');
        buffer.push_str(&format!("\x1b[38;5;{event_code}m━━ {name}\x1b[0m\n"));

        let mut detail_line = String::new();
        if let Some(date) = date {
            detail_line.push_str(date);
        }
        if let Some(logo) = logo {
            if !detail_line.is_empty() {
                detail_line.push_str("  ");
            }
            detail_line.push_str(&self.hyperlink(logo, "[logo]"));
        }
        buffer.push_str(&format!("\x1b[38;5;{detail_code}m   {detail_line}\x1b[0m\n"));
    }

    fn push_game(&self, buffer: &mut String, index: usize, game: &GameRow) {
        let view = &game.view;
        let outcome_code = Self::outcome_color(view.outcome);
        let detail_code = get_ansi_code(detail_fg(), 250);
        let link_code = get_ansi_code(link_fg(), 51);
        let error_code = get_ansi_code(error_fg(), 196);

        let marker = if self.selected == Some(index) { "▶" } else { " " };
        let matchup = format!("{} vs {}", view.our_team_name, view.opposing_team_name);
        let title = self.hyperlink(&view.link, &matchup);
        buffer.push_str(&format!(
            "\x1b[38;5;{link_code}m{marker} \x1b[38;5;{outcome_code}m{title}  {}\x1b[0m\n",
            view.outcome
        ));

        let mut details = format!("{} : {}", view.points_for, view.points_against);
        if let Some(venue) = &view.venue_name {
            details.push_str(&format!("  {venue}"));
        }
        if let Some(start_time) = &view.start_time {
            details.push_str(&format!("  {}", format_start_time(start_time)));
        }
        if let Some(thumbnail) = &view.thumbnail {
            details.push_str("  ");
            details.push_str(&self.hyperlink(thumbnail, "[thumb]"));
        }
        buffer.push_str(&format!("\x1b[38;5;{detail_code}m    {details}\x1b[0m\n"));

        match &game.video {
            VideoPanelState::Collapsed => {}
            VideoPanelState::Loading => {
                buffer.push_str(&format!(
                    "\x1b[38;5;{detail_code}m    Loading video...\x1b[0m\n"
                ));
            }
            VideoPanelState::Loaded { video_url } => {
                let shown = if self.disable_links {
                    video_url.clone()
                } else {
                    self.hyperlink(video_url, &format!("▶ {video_url}"))
                };
                buffer.push_str(&format!("\x1b[38;5;{link_code}m    {shown}\x1b[0m\n"));
            }
            VideoPanelState::Error { message } => {
                buffer.push_str(&format!("\x1b[38;5;{error_code}m    ⚠ {message}\x1b[0m\n"));
            }
        }
    }

    /// Renders the page into a string of terminal escape sequences. Split
    /// from [`render_buffered`] so tests can inspect output without a
    /// terminal.
    pub fn render_to_string(&self, width: u16) -> String {
        let mut buffer = String::new();
        let width = width as usize;

        if !self.ignore_height_limit {
            buffer.push_str("\x1b[H"); // Move to home position
            buffer.push_str("\x1b[0J"); // Clear from cursor down
        }

        // Title bar
        let title_bg_code = get_ansi_code(title_bg(), 21);
        let title_fg_code = get_ansi_code(title_fg(), 231);
        let pages = self.pages();
        let page_indicator = if pages.len() > 1 {
            format!("{}/{}", self.current_page.min(pages.len() - 1) + 1, pages.len())
        } else {
            String::new()
        };
        let title = format!(" COURTSIDE - {} ", self.team_name);
        buffer.push_str(&format!(
            "\x1b[48;5;{title_bg_code}m\x1b[38;5;{title_fg_code}m{title:<left$}{page_indicator:>right$}\x1b[0m\n",
            left = width.saturating_sub(page_indicator.len()).max(title.len()),
            right = page_indicator.len(),
        ));

        let (start, end) = pages
            .get(self.current_page.min(pages.len() - 1))
            .copied()
            .unwrap_or((0, self.rows.len()));

        for index in start..end {
            match &self.rows[index] {
                DashboardRow::EventHeader { name, date, logo } => {
                    self.push_event_header(&mut buffer, name, date, logo);
                }
                DashboardRow::Game(game) => self.push_game(&mut buffer, index, game),
            }
        }

        if self.show_footer {
            let footer = match &self.error_message {
                Some(message) => {
                    let error_code = get_ansi_code(error_fg(), 196);
                    format!("\x1b[38;5;{error_code}m⚠ {message}\x1b[0m")
                }
                None => {
                    let detail_code = get_ansi_code(detail_fg(), 250);
                    format!(
                        "\x1b[38;5;{detail_code}mq=Quit r=Refresh ↑/↓=Select ←/→=Page Enter=Load video\x1b[0m"
                    )
                }
            };
            buffer.push_str(&format!("\n{footer}\n"));
        }

        buffer
    }

    /// Renders the whole page into one buffer and writes it with a single
    /// Print, avoiding visible flicker from incremental drawing.
    pub fn render_buffered(&self, stdout: &mut Stdout) -> Result<(), AppError> {
        execute!(stdout, crossterm::cursor::Hide)?;

        let width = terminal::size().map(|(w, _)| w).unwrap_or(80);
        let buffer = self.render_to_string(width);
        execute!(stdout, Print(buffer))?;

        execute!(stdout, crossterm::cursor::Show)?;
        Ok(())
    }
}
