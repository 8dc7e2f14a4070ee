//! Smeshariki adventure core crate.
//!
//! The game progression store (stage sequencing, score and reward accounting,
//! memory-match board, music-repeat sequence, maze position, game clock) plus
//! the timer collaborators and session controller that drive it. Rendering,
//! gestures and sound synthesis live on the JavaScript side and talk to the
//! session through the handle returned by `start_game()`.
//!
//! Everything except `web` is plain Rust and tests natively.

use wasm_bindgen::prelude::*;

pub mod characters;
pub mod config;
pub mod error;
pub mod maze;
pub mod session;
pub mod stage;
pub mod store;
pub mod timers;
mod web;

pub use characters::{CHARACTERS, CharacterId, CharacterInfo, RewardKind};
pub use config::GameConfig;
pub use error::GameError;
pub use session::{NoteResult, Session};
pub use stage::{STAGE_ORDER, Stage};
pub use store::{Action, GameState, GameStore, MazePosition};
pub use web::{GameSession, start_game};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_tracing")]
    web::install_console_tracing();
}
