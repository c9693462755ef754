use crate::config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// High-level actions that can be performed in the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Line movement
    MoveUp,
    MoveDown,

    // Page movement
    MovePageUp,
    MovePageDown,

    // Jumps
    MoveDocumentStart,
    MoveDocumentEnd,

    // Horizontal scroll
    ScrollLeft,
    ScrollRight,

    Quit,

    // No-op
    None,
}

impl Action {
    /// Parse action from string (used when loading from config)
    pub fn from_str(s: &str) -> Option<Action> {
        match s {
            "move_up" => Some(Action::MoveUp),
            "move_down" => Some(Action::MoveDown),
            "move_page_up" => Some(Action::MovePageUp),
            "move_page_down" => Some(Action::MovePageDown),
            "move_document_start" => Some(Action::MoveDocumentStart),
            "move_document_end" => Some(Action::MoveDocumentEnd),
            "scroll_left" => Some(Action::ScrollLeft),
            "scroll_right" => Some(Action::ScrollRight),
            "quit" => Some(Action::Quit),
            "none" => Some(Action::None),
            _ => None,
        }
    }
}

/// Resolves key events to actions based on configuration
pub struct KeybindingResolver {
    /// Map from (key, modifiers) to action
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,

    /// Default bindings (used as fallback)
    default_bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl KeybindingResolver {
    /// Create a new resolver from configuration
    pub fn new(config: &Config) -> Self {
        let mut resolver = Self {
            bindings: HashMap::new(),
            default_bindings: Self::create_default_bindings(),
        };
        resolver.reload(config);
        resolver
    }

    /// Resolve a key event to an action
    pub fn resolve(&self, event: &KeyEvent) -> Action {
        let key = Self::normalize(event.code, event.modifiers);

        // Try custom bindings first
        if let Some(action) = self.bindings.get(&key) {
            return *action;
        }

        // Fall back to default bindings
        if let Some(action) = self.default_bindings.get(&key) {
            return *action;
        }

        Action::None
    }

    /// Terminals disagree on whether an uppercase letter carries SHIFT;
    /// the character already says it, so drop the flag.
    fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
        match code {
            KeyCode::Char(_) => (code, modifiers - KeyModifiers::SHIFT),
            _ => (code, modifiers),
        }
    }

    /// Parse a key string to KeyCode
    fn parse_key(key: &str) -> Option<KeyCode> {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            // Single characters keep their case: "g" and "G" differ.
            return Some(KeyCode::Char(c));
        }

        match key.to_lowercase().as_str() {
            "enter" => Some(KeyCode::Enter),
            "tab" => Some(KeyCode::Tab),
            "esc" | "escape" => Some(KeyCode::Esc),
            "space" => Some(KeyCode::Char(' ')),

            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            "pageup" => Some(KeyCode::PageUp),
            "pagedown" => Some(KeyCode::PageDown),

            _ => None,
        }
    }

    /// Parse modifiers from strings
    fn parse_modifiers(modifiers: &[String]) -> KeyModifiers {
        let mut result = KeyModifiers::empty();
        for m in modifiers {
            match m.to_lowercase().as_str() {
                "ctrl" | "control" => result |= KeyModifiers::CONTROL,
                "shift" => result |= KeyModifiers::SHIFT,
                "alt" => result |= KeyModifiers::ALT,
                _ => {}
            }
        }
        result
    }

    /// Create default keybindings
    fn create_default_bindings() -> HashMap<(KeyCode, KeyModifiers), Action> {
        let mut bindings = HashMap::new();
        let none = KeyModifiers::empty();

        // Line movement
        bindings.insert((KeyCode::Up, none), Action::MoveUp);
        bindings.insert((KeyCode::Char('k'), none), Action::MoveUp);
        bindings.insert((KeyCode::Down, none), Action::MoveDown);
        bindings.insert((KeyCode::Char('j'), none), Action::MoveDown);

        // Page movement
        bindings.insert((KeyCode::PageUp, none), Action::MovePageUp);
        bindings.insert((KeyCode::Char('b'), none), Action::MovePageUp);
        bindings.insert((KeyCode::PageDown, none), Action::MovePageDown);
        bindings.insert((KeyCode::Char(' '), none), Action::MovePageDown);

        // Jumps
        bindings.insert((KeyCode::Home, none), Action::MoveDocumentStart);
        bindings.insert((KeyCode::Char('g'), none), Action::MoveDocumentStart);
        bindings.insert((KeyCode::End, none), Action::MoveDocumentEnd);
        bindings.insert((KeyCode::Char('G'), none), Action::MoveDocumentEnd);

        // Horizontal scroll
        bindings.insert((KeyCode::Left, none), Action::ScrollLeft);
        bindings.insert((KeyCode::Right, none), Action::ScrollRight);

        // Quit
        bindings.insert((KeyCode::Char('q'), none), Action::Quit);
        bindings.insert((KeyCode::Esc, none), Action::Quit);
        bindings.insert((KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);

        bindings
    }

    /// Reload bindings from config (for hot reload)
    pub fn reload(&mut self, config: &Config) {
        self.bindings.clear();
        for binding in &config.keybindings {
            let Some(key_code) = Self::parse_key(&binding.key) else {
                tracing::warn!("Ignoring binding for unknown key {:?}", binding.key);
                continue;
            };
            let Some(action) = Action::from_str(&binding.action) else {
                tracing::warn!("Ignoring binding for unknown action {:?}", binding.action);
                continue;
            };
            let modifiers = Self::parse_modifiers(&binding.modifiers);
            self.bindings
                .insert(Self::normalize(key_code, modifiers), action);
        }
    }
}
