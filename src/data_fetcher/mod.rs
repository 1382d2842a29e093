pub mod api;
pub mod cache;
pub mod extract;
pub mod models;
pub mod processors;

pub use api::{ScrapeContext, fetch_team_info, fetch_video_info, resolve_event};
pub use models::{GameOutcome, GameView, StreamRecord, TeamInfo, VideoInfo};
pub use processors::{build_game_view, score_outcome};
