//! Key mapping from terminal events to logical keys.

use crate::types::LogicalKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code to a logical key.
pub fn logical_key(code: KeyCode) -> Option<LogicalKey> {
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(LogicalKey::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(LogicalKey::Right),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(LogicalKey::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(LogicalKey::Down),
        KeyCode::Char(' ') => Some(LogicalKey::Space),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(LogicalKey::Hold),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(logical_key(KeyCode::Left), Some(LogicalKey::Left));
        assert_eq!(logical_key(KeyCode::Right), Some(LogicalKey::Right));
        assert_eq!(logical_key(KeyCode::Up), Some(LogicalKey::Up));
        assert_eq!(logical_key(KeyCode::Down), Some(LogicalKey::Down));
    }

    #[test]
    fn test_vim_keys() {
        assert_eq!(logical_key(KeyCode::Char('h')), Some(LogicalKey::Left));
        assert_eq!(logical_key(KeyCode::Char('L')), Some(LogicalKey::Right));
        assert_eq!(logical_key(KeyCode::Char('k')), Some(LogicalKey::Up));
        assert_eq!(logical_key(KeyCode::Char('J')), Some(LogicalKey::Down));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(logical_key(KeyCode::Char(' ')), Some(LogicalKey::Space));
        assert_eq!(logical_key(KeyCode::Char('c')), Some(LogicalKey::Hold));
        assert_eq!(logical_key(KeyCode::Char('x')), None);
        assert_eq!(logical_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
