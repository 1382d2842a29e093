//! Data model for the embedded page state and the derived per-game view.
//!
//! The serde shapes mirror the JSON the site serializes into its
//! `data-react-props` attributes. Unknown fields are ignored so markup-side
//! additions don't break parsing; the fields here are the contract.

use serde::{Deserialize, Serialize};

/// Root state of a team profile page.
///
/// `past_streams` keeps the order the source delivers: the dashboard groups
/// adjacent records by event name, so reordering would change the grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team: Team,
    #[serde(default)]
    pub past_events: Vec<Event>,
    #[serde(default)]
    pub live_events: Vec<Event>,
    #[serde(default)]
    pub past_streams: Vec<StreamRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
}

/// One event entry in a team's past/live event lists. The name is the lookup
/// key; the slug builds the event detail URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub slug: String,
}

/// Root state of an event detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPage {
    pub event: EventDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetail {
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// One recorded game in a team's stream history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    pub event_name: String,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    /// Canonical game URL. Doubles as the stable key for the game's video
    /// panel in the UI.
    pub link: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub team_1_name: String,
    pub team_2_name: String,
    pub team_1_score: i32,
    pub team_2_score: i32,
}

/// Root state of a game page; only the stream manifest URL is of interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(rename = "videoUrl")]
    pub video_url: String,
}

/// Outcome of a game from the profiled team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Won,
    Tied,
    Lost,
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Won => write!(f, "Won"),
            GameOutcome::Tied => write!(f, "Tied"),
            GameOutcome::Lost => write!(f, "Lost"),
        }
    }
}

/// Per-game display data derived from a [`StreamRecord`] and the page's team
/// name. Never persisted; rebuilt on every render pass.
#[derive(Debug, Clone)]
pub struct GameView {
    pub event_name: String,
    pub link: String,
    pub thumbnail: Option<String>,
    pub venue_name: Option<String>,
    pub start_time: Option<String>,
    pub our_team_name: String,
    pub opposing_team_name: String,
    pub points_for: i32,
    pub points_against: i32,
    pub outcome: GameOutcome,
}
