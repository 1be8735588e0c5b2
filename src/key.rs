//! Key bindings shared by the table components.
//!
//! A [`Binding`] groups the key codes that trigger one action together with
//! the help text shown for it. Components expose their bindings through the
//! [`KeyMap`] trait so a help view can list them.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A set of keys bound to a single action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Key codes that trigger the action.
    pub keys: Vec<KeyCode>,
    /// Short key label for help output, e.g. `"←/h"`.
    pub help: String,
    /// What the action does, e.g. `"prev columns"`.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given key codes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_pagedtable::key::Binding;
    /// use crossterm::event::KeyCode;
    ///
    /// let next = Binding::new(vec![KeyCode::PageDown, KeyCode::Char('n')])
    ///     .with_help("pgdn/n", "next page");
    /// assert_eq!(next.help, "pgdn/n");
    /// ```
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
            enabled: true,
        }
    }

    /// Sets the help label and description (builder pattern).
    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the key message triggers this binding.
    ///
    /// Keys pressed together with Ctrl or Alt never match, so application
    /// level shortcuts like `ctrl+l` stay available to the host.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        if !self.enabled {
            return false;
        }
        if key_msg
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        self.keys.contains(&key_msg.key)
    }
}

/// Exposes a component's bindings for help views.
pub trait KeyMap {
    /// Bindings for a compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for an expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
