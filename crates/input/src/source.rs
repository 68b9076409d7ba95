//! Platform input adapters.
//!
//! Every adapter answers one question per frame: which logical keys are
//! active right now? Polling never blocks; pending terminal events are
//! drained and collapsed into set membership.
//!
//! The adapter is picked once at startup (see [`InputBackend`]) and the game
//! loop is generic over it, so there is no dynamic dispatch per frame.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::{debug, warn};

use crate::map::{logical_key, should_quit};
use crate::types::KeySet;

/// A per-platform source of currently active logical keys.
pub trait InputAdapter {
    /// Keys active at the moment of the call. Must return promptly.
    fn poll(&mut self) -> Result<KeySet>;

    /// Whether a quit key was seen.
    fn quit_requested(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// Which adapter to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBackend {
    /// Probe the terminal and pick the best available
    Auto,
    /// Press/release tracking via keyboard enhancement
    KeyState,
    /// Buffered key presses only
    Buffered,
}

impl InputBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(InputBackend::Auto),
            "keystate" | "key-state" => Some(InputBackend::KeyState),
            "buffered" => Some(InputBackend::Buffered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputBackend::Auto => "auto",
            InputBackend::KeyState => "keystate",
            InputBackend::Buffered => "buffered",
        }
    }

    /// Replace `Auto` with a concrete backend.
    pub fn resolve(self) -> InputBackend {
        match self {
            InputBackend::Auto => detect_backend(),
            other => other,
        }
    }
}

/// Pick [`InputBackend::KeyState`] if the terminal can report key releases.
///
/// Call this with raw mode enabled.
pub fn detect_backend() -> InputBackend {
    match terminal::supports_keyboard_enhancement() {
        Ok(true) => InputBackend::KeyState,
        Ok(false) => InputBackend::Buffered,
        Err(err) => {
            warn!(error = %err, "keyboard enhancement probe failed");
            InputBackend::Buffered
        }
    }
}

/// Drain every pending terminal key event without blocking.
fn drain_key_events(mut f: impl FnMut(KeyEvent)) -> Result<()> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            f(key);
        }
    }
    Ok(())
}

/// Tracks held keys from press and release events.
///
/// This is the key-state query flavor: a key stays active from its press
/// until its release. A key pressed and released within one frame still
/// counts for that frame.
#[derive(Debug, Default)]
pub struct KeyStateInput {
    held: KeySet,
    tapped: KeySet,
    quit: bool,
    attached: bool,
}

impl KeyStateInput {
    /// A tracker that is fed manually through [`KeyStateInput::apply`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the terminal to report press/repeat/release event types.
    ///
    /// The flags are popped again on drop.
    pub fn attach() -> Result<Self> {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        debug!("keyboard enhancement flags pushed");
        let mut input = Self::default();
        input.attached = true;
        Ok(input)
    }

    pub fn apply(&mut self, key: KeyEvent) {
        if should_quit(key) {
            if key.kind != KeyEventKind::Release {
                self.quit = true;
            }
            return;
        }
        let Some(logical) = logical_key(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(logical);
                self.tapped.insert(logical);
            }
            KeyEventKind::Release => self.held.remove(logical),
        }
    }

    /// Keys active this frame; starts the next frame.
    pub fn take_frame(&mut self) -> KeySet {
        let frame = self.held.union(self.tapped);
        self.tapped.clear();
        frame
    }
}

impl InputAdapter for KeyStateInput {
    fn poll(&mut self) -> Result<KeySet> {
        drain_key_events(|key| self.apply(key))?;
        Ok(self.take_frame())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }

    fn name(&self) -> &'static str {
        "keystate"
    }
}

impl Drop for KeyStateInput {
    fn drop(&mut self) {
        if self.attached {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

/// Reports the keys whose presses arrived during the frame.
///
/// For terminals that never send release events. A held key shows up only
/// as often as the terminal auto-repeats it.
#[derive(Debug, Default)]
pub struct BufferedInput {
    frame: KeySet,
    quit: bool,
}

impl BufferedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if should_quit(key) {
            self.quit = true;
            return;
        }
        if let Some(logical) = logical_key(key.code) {
            self.frame.insert(logical);
        }
    }

    pub fn take_frame(&mut self) -> KeySet {
        std::mem::take(&mut self.frame)
    }
}

impl InputAdapter for BufferedInput {
    fn poll(&mut self) -> Result<KeySet> {
        drain_key_events(|key| self.apply(key))?;
        Ok(self.take_frame())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }

    fn name(&self) -> &'static str {
        "buffered"
    }
}

/// Replays a fixed sequence of key sets, then reports no keys.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<KeySet>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = KeySet>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            quit_when_done: false,
        }
    }

    /// Request quit once the script is exhausted.
    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }
}

impl InputAdapter for ScriptedInput {
    fn poll(&mut self) -> Result<KeySet> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }

    fn quit_requested(&self) -> bool {
        self.quit_when_done && self.frames.is_empty()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
