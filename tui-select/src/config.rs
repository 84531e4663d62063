//! Select configuration
//!
//! Everything about a select that is not the data itself: behaviour flags,
//! messages, layout and drop placement, keybindings. Loadable from JSON.
//!
//! ```json
//! {
//!   "multiple": true,
//!   "close_on_change": false,
//!   "messages": { "multiple": "several", "empty_search": "Nothing here" },
//!   "disabled_key": "sold_out",
//!   "drop_align": { "bottom": "top" },
//!   "keybindings": { "trigger": { "open": ["space"] } }
//! }
//! ```

use std::path::Path;

use ratatui::layout::{Margin, Rect};
use serde::{Deserialize, Deserializer, Serialize};
use tui_select_core::Keybindings;

use crate::drop::DropAlign;
use crate::error::{ConfigError, Result};
use crate::keymap::{default_keybindings, SelectContext};

/// Fixed strings shown by the select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Shown instead of the value when several items are selected
    pub multiple: String,
    /// Shown in the drop when there are no options to list
    pub empty_search: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            multiple: "multiple".to_string(),
            empty_search: "No matches found".to_string(),
        }
    }
}

/// Outer spacing around the trigger, in cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub horizontal: u16,
    pub vertical: u16,
}

impl From<Spacing> for Margin {
    fn from(s: Spacing) -> Self {
        Margin::new(s.horizontal, s.vertical)
    }
}

/// Configuration for a [`Select`](crate::Select)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Close the drop when a value is chosen
    pub close_on_change: bool,
    /// Ignore all interaction
    pub disabled: bool,
    /// Choosing toggles options in and out of a list value
    pub multiple: bool,
    /// Draw the trigger without a border
    pub plain: bool,
    /// Shown when nothing is selected
    pub placeholder: Option<String>,
    /// Shown in the empty search row of a searchable drop
    pub search_placeholder: Option<String>,
    /// Object field that marks an option as unavailable
    pub disabled_key: Option<String>,
    /// Object field that stands in for an option in change values
    pub value_key: Option<String>,
    pub messages: Messages,
    pub drop_align: DropAlign,
    /// Maximum visible option rows in the drop
    pub drop_height: u16,
    /// Trigger width; `None` takes the whole area
    pub width: Option<u16>,
    pub margin: Spacing,
    /// Drop-down indicator at the trigger's right edge
    pub icon: String,
    /// Overrides on top of [`default_keybindings`]
    #[serde(deserialize_with = "merge_with_default_keybindings")]
    pub keybindings: Keybindings<SelectContext>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            close_on_change: true,
            disabled: false,
            multiple: false,
            plain: false,
            placeholder: None,
            search_placeholder: None,
            disabled_key: None,
            value_key: None,
            messages: Messages::default(),
            drop_align: DropAlign::default(),
            drop_height: 8,
            width: None,
            margin: Spacing::default(),
            icon: "▾".to_string(),
            keybindings: default_keybindings(),
        }
    }
}

fn merge_with_default_keybindings<'de, D>(
    deserializer: D,
) -> std::result::Result<Keybindings<SelectContext>, D::Error>
where
    D: Deserializer<'de>,
{
    let user = Keybindings::deserialize(deserializer)?;
    Ok(Keybindings::merge(default_keybindings(), user))
}

impl SelectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "Loaded select config");
        Ok(config)
    }

    pub fn with_close_on_change(mut self, close_on_change: bool) -> Self {
        self.close_on_change = close_on_change;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = Some(placeholder.into());
        self
    }

    pub fn with_empty_search_message(mut self, message: impl Into<String>) -> Self {
        self.messages.empty_search = message.into();
        self
    }

    pub fn with_disabled_key(mut self, key: impl Into<String>) -> Self {
        self.disabled_key = Some(key.into());
        self
    }

    pub fn with_value_key(mut self, key: impl Into<String>) -> Self {
        self.value_key = Some(key.into());
        self
    }

    pub fn with_multiple_message(mut self, message: impl Into<String>) -> Self {
        self.messages.multiple = message.into();
        self
    }

    pub fn with_drop_align(mut self, drop_align: DropAlign) -> Self {
        self.drop_align = drop_align;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Rows the trigger needs: one line, plus a border unless plain
    pub fn trigger_height(&self) -> u16 {
        if self.plain {
            1
        } else {
            3
        }
    }

    /// Lay the trigger out inside `area`: margin, then width and height
    pub fn trigger_area(&self, area: Rect) -> Rect {
        let inner = area.inner(self.margin.into());
        Rect {
            width: self.width.map_or(inner.width, |w| w.min(inner.width)),
            height: self.trigger_height().min(inner.height),
            ..inner
        }
    }

    /// Drop height for `option_count` options, border and search row included
    pub fn drop_rows(&self, option_count: usize, search: bool) -> u16 {
        let rows = option_count.clamp(1, self.drop_height.max(1) as usize) as u16;
        rows.saturating_add(2).saturating_add(u16::from(search))
    }
}
