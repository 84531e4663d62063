//! Change event payload

use ratatui::layout::Rect;
use tui_select_core::ComponentId;

use crate::value::{Item, SelectValue, Selected};

/// Reference to the trigger's input element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRef {
    pub id: ComponentId,
    /// Where the input was last rendered
    pub area: Rect,
}

/// A value was chosen in the drop
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// The trigger input; set by the select before the event leaves it
    pub target: Option<InputRef>,
    /// The option that was chosen
    pub option: Item,
    /// Index of `option` in the options
    pub index: usize,
    /// The value after the change
    pub value: SelectValue,
    /// The selected indices after the change
    pub selected: Selected,
}

impl ChangeEvent {
    /// Same event, pointing at `target`
    pub fn with_target(self, target: InputRef) -> Self {
        Self {
            target: Some(target),
            ..self
        }
    }
}
