//! Held modifier key set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A key that changes the meaning of other keys while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Windows,
    /// Insert used as the screen reader modifier.
    Insert,
    /// Caps Lock used as the screen reader modifier.
    CapsLock,
}

impl Modifier {
    pub fn label(&self) -> &'static str {
        match self {
            Modifier::Shift => "shift",
            Modifier::Control => "control",
            Modifier::Alt => "alt",
            Modifier::Windows => "windows",
            Modifier::Insert => "insert",
            Modifier::CapsLock => "capsLock",
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Press,
    Release,
}

/// Set of modifiers currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierState {
    held: BTreeSet<Modifier>,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event for a modifier.
    pub fn apply(&mut self, modifier: Modifier, direction: KeyDirection) {
        match direction {
            KeyDirection::Press => {
                self.held.insert(modifier);
            }
            KeyDirection::Release => {
                self.held.remove(&modifier);
            }
        }
    }

    pub fn is_held(&self, modifier: Modifier) -> bool {
        self.held.contains(&modifier)
    }

    pub fn held(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.held.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Forget every held modifier.
    ///
    /// Unconditional: the caller knows no release events will arrive for
    /// the keys currently recorded as held.
    pub fn clear(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!(count = self.held.len(), "clearing held modifiers");
        }
        self.held.clear();
    }
}

impl FromIterator<Modifier> for ModifierState {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut state = ModifierState::new();
        state.apply(Modifier::Shift, KeyDirection::Press);
        state.apply(Modifier::Control, KeyDirection::Press);
        assert!(state.is_held(Modifier::Shift));
        assert_eq!(state.len(), 2);

        state.apply(Modifier::Shift, KeyDirection::Release);
        assert!(!state.is_held(Modifier::Shift));
        assert!(state.is_held(Modifier::Control));
    }

    #[test]
    fn test_repeat_press_is_single_entry() {
        let mut state = ModifierState::new();
        state.apply(Modifier::Alt, KeyDirection::Press);
        state.apply(Modifier::Alt, KeyDirection::Press);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut state = ModifierState::new();
        state.apply(Modifier::Windows, KeyDirection::Release);
        assert!(state.is_empty());
    }

    #[test]
    fn test_clear_empties_any_state() {
        let mut state: ModifierState =
            [Modifier::Shift, Modifier::Control, Modifier::Insert].into_iter().collect();
        state.clear();
        assert!(state.is_empty());

        // Clearing an empty set is fine too.
        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_held_is_ordered() {
        let state: ModifierState = [Modifier::Alt, Modifier::Shift].into_iter().collect();
        let held: Vec<_> = state.held().collect();
        assert_eq!(held, vec![Modifier::Shift, Modifier::Alt]);
    }
}
