//! Per-frame input aggregation.
//!
//! Converts a possibly multi-key pressed set into a remembered horizontal
//! direction plus a single prioritized action key.

use crate::types::{ActionKey, HorizontalDirection, InputEvent, KeySet, LogicalKey};

/// Direction memory across frames.
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    last_direction: HorizontalDirection,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_direction(&self) -> HorizontalDirection {
        self.last_direction
    }

    /// Fold this frame's active keys into one event.
    ///
    /// A horizontal key that was not the remembered direction takes over at
    /// once (Left is checked first). Releasing the remembered key clears it.
    /// The action is the highest-priority active key: Up, Space, Hold, Down.
    /// Held action keys fire again every frame.
    pub fn step(&mut self, current: KeySet) -> InputEvent {
        let last = self.last_direction;

        self.last_direction =
            if current.contains(LogicalKey::Left) && last != HorizontalDirection::Left {
                HorizontalDirection::Left
            } else if current.contains(LogicalKey::Right) && last != HorizontalDirection::Right {
                HorizontalDirection::Right
            } else {
                match last.key() {
                    Some(key) if current.contains(key) => last,
                    _ => HorizontalDirection::None,
                }
            };

        let action = ActionKey::PRIORITY
            .into_iter()
            .find(|action| current.contains(action.key()));

        InputEvent::new(self.last_direction, action)
    }
}
