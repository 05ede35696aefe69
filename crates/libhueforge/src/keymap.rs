use std::fmt::{self, Display};

use crate::{Error, Result};

/// Editor commands reachable from a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Undo,
    Redo,
    Generate,
    ToggleTheme,
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::Generate => "generate",
            Action::ToggleTheme => "toggle theme",
        };

        write!(f, "{}", name)
    }
}

/// A key press with its modifiers. `ctrl` and `meta` (cmd) are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    /// Parses chords written like `ctrl+shift+z` or `cmd+g`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidKeyChord(input.to_string());
        let mut chord = KeyChord::default();
        let mut key = None;

        for part in input.split('+').map(|p| p.trim().to_ascii_lowercase()) {
            match part.as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "cmd" | "meta" | "super" => chord.meta = true,
                "shift" => chord.shift = true,
                _ => {
                    let mut chars = part.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return Err(invalid()),
                    }
                }
            }
        }

        chord.key = key.ok_or_else(invalid)?;
        Ok(chord)
    }

    /// The action bound to this chord.
    ///
    /// Front ends should suppress their default handling of any chord that
    /// resolves to an action.
    pub fn action(&self) -> Option<Action> {
        if !(self.ctrl || self.meta) {
            return None;
        }

        match (self.key.to_ascii_lowercase(), self.shift) {
            ('z', false) => Some(Action::Undo),
            ('z', true) | ('y', _) => Some(Action::Redo),
            ('g', _) => Some(Action::Generate),
            ('d', _) => Some(Action::ToggleTheme),
            _ => None,
        }
    }
}

impl Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.meta {
            write!(f, "cmd+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn action(chord: &str) -> Option<Action> {
        KeyChord::parse(chord).unwrap().action()
    }

    #[test]
    fn resolves_bindings() {
        assert_eq!(action("ctrl+z"), Some(Action::Undo));
        assert_eq!(action("cmd+z"), Some(Action::Undo));
        assert_eq!(action("ctrl+shift+z"), Some(Action::Redo));
        assert_eq!(action("ctrl+y"), Some(Action::Redo));
        assert_eq!(action("cmd+g"), Some(Action::Generate));
        assert_eq!(action("Ctrl+D"), Some(Action::ToggleTheme));
    }

    #[test]
    fn requires_a_modifier() {
        assert_eq!(action("z"), None);
        assert_eq!(action("shift+g"), None);
        assert_eq!(action("ctrl+q"), None);
    }

    #[test]
    fn rejects_malformed_chords() {
        for input in ["ctrl+", "ctrl+zz", "ctrl+z+y", ""] {
            assert!(
                matches!(KeyChord::parse(input), Err(Error::InvalidKeyChord(_))),
                "{} should not parse",
                input
            );
        }
    }

    #[test]
    fn displays_round_trip() {
        let chord = KeyChord::parse("shift+ctrl+z").unwrap();
        assert_eq!(chord.to_string(), "ctrl+shift+z");
        assert_eq!(KeyChord::parse(&chord.to_string()).unwrap(), chord);
    }
}
