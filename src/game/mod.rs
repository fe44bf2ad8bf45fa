pub mod captures;
pub mod controller;
pub mod history;
pub mod playback;
pub mod selection;
pub mod status;

pub use captures::{collect_captures, Captures};
pub use controller::{BoardController, ClickOutcome};
pub use history::{move_rows, MoveRow};
pub use playback::{play_random, replay};
pub use selection::Selection;
pub use status::{describe_game_state, GameState};
