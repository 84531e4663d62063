//! Dropdown select widget for ratatui apps
//!
//! [`Select`] renders a read-only trigger showing the current selection and,
//! when open, a drop listing the options. It follows the component pattern
//! from `tui-select-core`: the host owns the value and passes it in through
//! [`SelectProps`]; the select returns actions built from the props'
//! callbacks.
//!
//! What the trigger shows is decided by [`Selection`], from an explicit
//! `value_label`, the `value` (projected through a [`LabelKey`] for objects),
//! or legacy `selected` indices.
//!
//! # Example
//!
//! ```ignore
//! use tui_select::prelude::*;
//!
//! let mut select = Select::new(ComponentId(1));
//!
//! // render
//! select.render(frame, area, props(&state));
//!
//! // events
//! for action in select.handle_event(&event, props(&state)) {
//!     store.dispatch(action);
//! }
//!
//! fn props(state: &FormState) -> SelectProps<'_, FormAction> {
//!     SelectProps::new(&state.sizes, &state.config)
//!         .with_value(state.size.as_ref())
//!         .focused(true)
//!         .on_change(FormAction::SizeChanged)
//! }
//! ```
//!
//! # Features
//!
//! - `describe`: compile in [`describe`], a table documenting the props

mod change;
mod config;
mod container;
mod drop;
mod error;
mod input;
mod keymap;
mod select;
mod selection;
mod value;

#[cfg(feature = "describe")]
pub mod describe;

pub use change::{ChangeEvent, InputRef};
pub use config::{Messages, SelectConfig, Spacing};
pub use container::{choose, selected_indices, SelectContainer, SelectContainerProps};
pub use drop::{drop_area, render_drop_background, DropAlign, HorizontalEdge, VerticalEdge};
pub use error::{ConfigError, Result};
pub use input::{SelectInput, SelectInputProps};
pub use keymap::{command_for, default_keybindings, SelectCommand, SelectContext};
pub use select::{Select, SelectProps};
pub use selection::Selection;
pub use value::{plain_text, Displayed, Item, LabelKey, SelectValue, Selected};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ChangeEvent, DropAlign, InputRef, Item, LabelKey, Select, SelectConfig, SelectProps,
        SelectValue, Selected,
    };
    pub use tui_select_core::prelude::*;
}
