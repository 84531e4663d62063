//! Context-aware keybindings parsed from key strings
//!
//! A binding table maps command names to key strings such as `"down"`,
//! `"ctrl+n"` or `"G"`, one table per context. In config files:
//!
//! ```json
//! { "drop": { "choose": ["enter", "space"] } }
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named set of bindings, e.g. "while the popup is open"
pub trait BindingContext: Copy + Eq + Hash {
    /// Name used as the config key
    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

type CommandTable = HashMap<String, Vec<String>>;

/// Command bindings grouped by context
#[derive(Debug, Clone)]
pub struct Keybindings<C: BindingContext> {
    contexts: HashMap<C, CommandTable>,
}

impl<C: BindingContext> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BindingContext> Serialize for Keybindings<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.contexts
                .iter()
                .map(|(context, table)| (context.name(), table)),
        )
    }
}

impl<'de, C: BindingContext> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: HashMap<String, CommandTable> = HashMap::deserialize(deserializer)?;
        let contexts = raw
            .into_iter()
            .filter_map(|(name, table)| match C::from_name(&name) {
                Some(context) => Some((context, table)),
                None => {
                    tracing::debug!(context = %name, "Ignoring bindings for unknown context");
                    None
                }
            })
            .collect();
        Ok(Self { contexts })
    }
}

impl<C: BindingContext> Keybindings<C> {
    pub fn new() -> Self {
        Self {
            contexts: HashMap::new(),
        }
    }

    /// Bind `command` to `keys` in `context`, replacing earlier keys
    pub fn with(mut self, context: C, command: &str, keys: &[&str]) -> Self {
        self.contexts.entry(context).or_default().insert(
            command.to_string(),
            keys.iter().map(|k| k.to_string()).collect(),
        );
        self
    }

    /// Command bound to `key` in `context`
    pub fn get_command(&self, key: KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)?
            .iter()
            .find(|(_, keys)| {
                keys.iter()
                    .filter_map(|s| parse_key_string(s))
                    .any(|bound| key_matches(bound, key))
            })
            .map(|(command, _)| command.as_str())
    }

    /// Overlay `user` onto `defaults`; a command the user rebinds loses its default keys
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        for (context, table) in user.contexts {
            defaults.contexts.entry(context).or_default().extend(table);
        }
        defaults
    }
}

/// Characters compare exactly and ignore SHIFT, which terminals already
/// fold into the reported character. Other keys compare code and modifiers.
fn key_matches(bound: KeyEvent, key: KeyEvent) -> bool {
    match (bound.code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => {
            let strip = |m: KeyModifiers| m.difference(KeyModifiers::SHIFT);
            a == b && strip(bound.modifiers) == strip(key.modifiers)
        }
        (a, b) => a == b && bound.modifiers == key.modifiers,
    }
}

/// Parse a key string like `"q"`, `"esc"`, `"ctrl+p"`, `"shift+tab"`
///
/// Named keys and modifiers are case-insensitive. A single character keeps
/// its case, so `"g"` and `"G"` are different keys.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let (prefix, key_part) = match key_str.rsplit_once('+') {
        // "+" on its own, or "ctrl++"
        Some((prefix, "")) => (prefix.strip_suffix('+').unwrap_or(prefix), "+"),
        Some(split) => split,
        None => ("", key_str),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        modifiers |= match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return None,
        };
    }

    let mut chars = key_part.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => named_key(&key_part.to_lowercase())?,
    };

    let code = match code {
        KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        KeyCode::BackTab => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        other => other,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

fn named_key(name: &str) -> Option<KeyCode> {
    Some(match name {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        f => match f.strip_prefix('f')?.parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Mode {
        Closed,
        Open,
    }

    impl BindingContext for Mode {
        fn name(&self) -> &'static str {
            match self {
                Mode::Closed => "closed",
                Mode::Open => "open",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "closed" => Some(Mode::Closed),
                "open" => Some(Mode::Open),
                _ => None,
            }
        }
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_parse_chars_keep_case() {
        let key = parse_key_string("q").unwrap();
        assert_eq!(key.code, KeyCode::Char('q'));
        assert_eq!(key.modifiers, KeyModifiers::empty());
        assert_eq!(parse_key_string("G").unwrap().code, KeyCode::Char('G'));
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key_string("ESC").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key_string("down").unwrap().code, KeyCode::Down);
        assert_eq!(parse_key_string("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("f5").unwrap().code, KeyCode::F(5));
        assert!(parse_key_string("f13").is_none());
        assert!(parse_key_string("nope").is_none());
        assert!(parse_key_string("").is_none());
    }

    #[test]
    fn test_parse_modifiers() {
        let key = parse_key_string("ctrl+p").unwrap();
        assert_eq!(key.code, KeyCode::Char('p'));
        assert!(key.modifiers.contains(KeyModifiers::CONTROL));

        for s in ["shift+tab", "backtab"] {
            let key = parse_key_string(s).unwrap();
            assert_eq!(key.code, KeyCode::BackTab, "{s}");
            assert!(key.modifiers.contains(KeyModifiers::SHIFT), "{s}");
        }

        let key = parse_key_string("ctrl++").unwrap();
        assert_eq!(key.code, KeyCode::Char('+'));
        assert!(key.modifiers.contains(KeyModifiers::CONTROL));

        assert!(parse_key_string("hyper+x").is_none());
    }

    #[test]
    fn test_get_command_per_context() {
        let bindings = Keybindings::new()
            .with(Mode::Open, "dismiss", &["esc"])
            .with(Mode::Closed, "show", &["down"]);

        let esc = press(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(bindings.get_command(esc, Mode::Open), Some("dismiss"));
        assert_eq!(bindings.get_command(esc, Mode::Closed), None);
    }

    #[test]
    fn test_shifted_chars_are_distinct() {
        let bindings = Keybindings::new()
            .with(Mode::Open, "first", &["g"])
            .with(Mode::Open, "last", &["G"]);

        let lower = press(KeyCode::Char('g'), KeyModifiers::NONE);
        let upper = press(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(bindings.get_command(lower, Mode::Open), Some("first"));
        assert_eq!(bindings.get_command(upper, Mode::Open), Some("last"));
    }

    #[test]
    fn test_merge_overrides_per_command() {
        let defaults = Keybindings::new()
            .with(Mode::Closed, "show", &["down"])
            .with(Mode::Closed, "clear", &["ctrl+u"]);
        let user = Keybindings::new().with(Mode::Closed, "show", &["space"]);
        let merged = Keybindings::merge(defaults, user);

        let space = press(KeyCode::Char(' '), KeyModifiers::NONE);
        let down = press(KeyCode::Down, KeyModifiers::NONE);
        let ctrl_u = press(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(merged.get_command(space, Mode::Closed), Some("show"));
        assert_eq!(merged.get_command(down, Mode::Closed), None);
        assert_eq!(merged.get_command(ctrl_u, Mode::Closed), Some("clear"));
    }

    #[test]
    fn test_json_round_trip_skips_unknown_contexts() {
        let json = r#"{ "open": { "dismiss": ["esc"] }, "other": { "x": ["y"] } }"#;
        let bindings: Keybindings<Mode> = serde_json::from_str(json).unwrap();

        let esc = press(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(bindings.get_command(esc, Mode::Open), Some("dismiss"));

        let value = serde_json::to_value(&bindings).unwrap();
        assert_eq!(value, serde_json::json!({ "open": { "dismiss": ["esc"] } }));
    }
}
