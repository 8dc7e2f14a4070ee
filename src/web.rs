//! Browser surface: a `wasm-bindgen` handle over the session, the
//! animation-frame loop that drives its timers and the DOM listeners that feed
//! the inactivity watchdog.
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::characters::CharacterId;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::maze::{Direction, MoveOutcome};
use crate::session::Session;
use crate::stage::Stage;
use crate::store::{Action, MazePosition};
use crate::timers::ActivitySignal;

impl From<GameError> for JsValue {
    fn from(e: GameError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Buffers one formatted event and logs it to the browser console on drop.
#[cfg(feature = "console_tracing")]
#[derive(Default)]
struct ConsoleWriter(Vec<u8>);

#[cfg(feature = "console_tracing")]
impl std::io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "console_tracing")]
impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.0.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.0);
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
    }
}

/// Install a `tracing` subscriber writing to the console. No-op if one is already set.
#[cfg(feature = "console_tracing")]
pub(crate) fn install_console_tracing() {
    // wasm32 has no system clock for the default timer
    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(ConsoleWriter::default)
        .try_init();
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

struct Shared {
    session: RefCell<Session>,
    callbacks: RefCell<Vec<js_sys::Function>>,
    seen_revision: Cell<u64>,
}

impl Shared {
    /// Run `f` against the session, then notify JS callbacks once the borrow is released.
    fn with_session<T>(&self, f: impl FnOnce(&mut Session, f64) -> T) -> T {
        let now = performance_now();
        let (out, revision) = {
            let mut session = self.session.borrow_mut();
            let out = f(&mut *session, now);
            (out, session.store().revision())
        };
        if revision != self.seen_revision.get() {
            self.seen_revision.set(revision);
            let callbacks = self.callbacks.borrow().clone();
            for cb in callbacks {
                if let Err(err) = cb.call0(&JsValue::NULL) {
                    tracing::warn!(?err, "on_change callback threw");
                }
            }
        }
        out
    }

    fn dispatch(&self, action: Action) {
        self.with_session(|s, now| s.dispatch(action, now));
    }
}

/// Handle to a running game session.
#[wasm_bindgen]
pub struct GameSession {
    shared: Rc<Shared>,
}

/// Start a session, its frame loop and activity listeners. `config_json` may
/// override the inactivity timeout, clock interval and RNG seed.
#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> Result<GameSession, JsValue> {
    let config = match config_json.as_deref() {
        #[cfg(feature = "serde_json")]
        Some(json) => GameConfig::from_json(json)?,
        #[cfg(not(feature = "serde_json"))]
        Some(_) => return Err(GameError::Config("built without JSON config support".into()).into()),
        None => GameConfig::default(),
    };
    config.validate()?;

    let shared = Rc::new(Shared {
        session: RefCell::new(Session::new(&config, performance_now())),
        callbacks: RefCell::new(Vec::new()),
        seen_revision: Cell::new(0),
    });
    install_activity_listeners(Rc::downgrade(&shared))?;
    start_frame_loop(Rc::downgrade(&shared));
    tracing::info!(timeout_ms = config.inactivity_timeout_ms, "game session started");
    Ok(GameSession { shared })
}

fn install_activity_listeners(shared: Weak<Shared>) -> Result<(), JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    for signal in ActivitySignal::ALL {
        let weak = shared.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(shared) = weak.upgrade() {
                shared.with_session(|s, now| s.record_activity(signal, now));
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback(
            signal.event_name(),
            closure.as_ref().unchecked_ref(),
        )?;
        closure.forget();
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop; stops once the session handle is freed.
fn start_frame_loop(shared: Weak<Shared>) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        shared.with_session(|s, now| s.tick(now));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen]
impl GameSession {
    pub fn advance_stage(&self) {
        self.shared.dispatch(Action::AdvanceStage);
    }

    pub fn set_stage(&self, stage: &str) -> Result<(), JsValue> {
        let stage: Stage = stage.parse()?;
        self.shared.dispatch(Action::SetStage(stage));
        Ok(())
    }

    pub fn select_character(&self, id: &str) -> Result<(), JsValue> {
        let id: CharacterId = id.parse()?;
        self.shared.dispatch(Action::SelectCharacter(id));
        Ok(())
    }

    pub fn add_score(&self, delta: i32) {
        self.shared.dispatch(Action::AddScore(delta));
    }

    pub fn add_reward(&self, count: u32) {
        self.shared.dispatch(Action::AddReward(count));
    }

    pub fn lose_life(&self) {
        self.shared.dispatch(Action::LoseLife);
    }

    pub fn toggle_pause(&self) {
        self.shared.dispatch(Action::TogglePause);
    }

    pub fn reset_game(&self) {
        self.shared.dispatch(Action::ResetGame);
    }

    pub fn init_memory_game(&self) {
        self.shared.dispatch(Action::InitMemoryGame);
    }

    pub fn flip_card(&self, id: u32) {
        self.shared.dispatch(Action::FlipCard(id));
    }

    pub fn reset_flipped_cards(&self) {
        self.shared.dispatch(Action::ResetFlippedCards);
    }

    pub fn set_music_sequence(&self, notes: Vec<String>) -> Result<(), JsValue> {
        let notes = notes
            .iter()
            .map(|n| n.parse::<CharacterId>())
            .collect::<Result<Vec<_>, _>>()?;
        self.shared.dispatch(Action::SetMusicSequence(notes));
        Ok(())
    }

    pub fn add_player_note(&self, note: &str) -> Result<(), JsValue> {
        let note: CharacterId = note.parse()?;
        self.shared.dispatch(Action::AddPlayerNote(note));
        Ok(())
    }

    pub fn reset_player_sequence(&self) {
        self.shared.dispatch(Action::ResetPlayerSequence);
    }

    pub fn set_maze_position(&self, x: i32, y: i32) {
        self.shared.dispatch(Action::SetMazePosition(MazePosition::new(x, y)));
    }

    pub fn update_game_time(&self, seconds: u32) {
        self.shared.dispatch(Action::UpdateGameTime(seconds));
    }

    pub fn auto_return_to_main(&self) {
        self.shared.dispatch(Action::AutoReturnToMain);
    }

    /// Report a user-activity DOM event by name (e.g. from an iframe or canvas).
    pub fn record_activity(&self, event_name: &str) -> Result<(), JsValue> {
        let signal: ActivitySignal = event_name.parse()?;
        self.shared.with_session(|s, now| s.record_activity(signal, now));
        Ok(())
    }

    /// Generate the melody for the current music level; returns character ids.
    pub fn start_music_level(&self) -> Vec<String> {
        self.shared
            .with_session(|s, now| s.start_music_level(now))
            .into_iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }

    /// Play a note and return `ignored`, `pending`, `wrong`, `level-cleared` or `finished`.
    pub fn play_note(&self, note: &str) -> Result<String, JsValue> {
        let note: CharacterId = note.parse()?;
        let result = self.shared.with_session(|s, now| s.play_note(note, now));
        Ok(result.as_str().to_string())
    }

    pub fn restart_music(&self) {
        self.shared.with_session(|s, now| s.restart_music(now));
    }

    pub fn start_maze(&self) {
        self.shared.with_session(|s, now| s.start_maze(now));
    }

    /// Move by direction name or key; returns `blocked`, `moved`, `obstacle` or `finished`.
    pub fn move_in_maze(&self, direction: &str) -> Result<String, JsValue> {
        let dir: Direction = direction.parse()?;
        let outcome = self.shared.with_session(|s, now| s.move_in_maze(dir, now));
        let label = match outcome {
            MoveOutcome::Blocked => "blocked",
            MoveOutcome::Moved(_) => "moved",
            MoveOutcome::HitObstacle(_) => "obstacle",
            MoveOutcome::Finished(_) => "finished",
        };
        Ok(label.to_string())
    }

    pub fn current_stage(&self) -> String {
        self.shared.session.borrow().current_stage().as_str().to_string()
    }

    pub fn score(&self) -> i32 {
        self.shared.session.borrow().state().score
    }

    /// Full read-only state as JSON.
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        #[cfg(feature = "serde_json")]
        {
            serde_json::to_string(self.shared.session.borrow().state())
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }
        #[cfg(not(feature = "serde_json"))]
        {
            Err(GameError::Config("built without JSON support".into()).into())
        }
    }

    /// Register a callback invoked after any state change.
    pub fn on_change(&self, callback: js_sys::Function) {
        self.shared.callbacks.borrow_mut().push(callback);
    }
}
