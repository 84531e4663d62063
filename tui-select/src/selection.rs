//! Deciding what the trigger shows
//!
//! A select can be told what is selected in three ways: an explicit
//! `value_label`, a `value` (optionally with a `label_key`), or the legacy
//! `selected` indices into the options. [`Selection::classify`] picks the one
//! source that wins, and [`Selection::display`] resolves it.
//!
//! Precedence, highest first:
//!
//! 1. `value_label`
//! 2. a list `value`
//! 3. an object `value` with a `label_key`
//! 4. an element `value`
//! 5. `selected`
//! 6. any other `value`, shown as plain text (absent shows nothing)

use ratatui::text::Line;
use serde_json::Value;

use crate::value::{plain_text, Displayed, Item, LabelKey, SelectValue, Selected};

/// The selection source that decides the trigger display
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// Explicit label, shown verbatim
    Labelled(&'a Line<'static>),
    /// Resolve from the value
    Value {
        value: Option<&'a SelectValue>,
        label_key: Option<&'a LabelKey>,
    },
    /// Resolve from indices into the options
    Indexed(&'a Selected),
}

impl<'a> Selection<'a> {
    /// Pick the winning selection source
    pub fn classify(
        value_label: Option<&'a Line<'static>>,
        value: Option<&'a SelectValue>,
        selected: Option<&'a Selected>,
        label_key: Option<&'a LabelKey>,
    ) -> Self {
        if let Some(label) = value_label {
            return Selection::Labelled(label);
        }
        match (value, selected) {
            (Some(v), _) if value_takes_precedence(v, label_key) => {
                Selection::Value { value, label_key }
            }
            (_, Some(selected)) => Selection::Indexed(selected),
            _ => Selection::Value { value, label_key },
        }
    }

    /// Resolve to what the trigger shows
    ///
    /// `multiple_message` replaces the display when several non-element
    /// items are selected.
    pub fn display(&self, options: &[Item], multiple_message: &str) -> Displayed {
        match *self {
            Selection::Labelled(label) => Displayed::Label(label.clone()),
            Selection::Value { value, label_key } => {
                display_value(value, label_key, multiple_message)
            }
            Selection::Indexed(selected) => display_indexed(selected, options, multiple_message),
        }
    }
}

/// Whether `value` wins over legacy `selected` indices
fn value_takes_precedence(value: &SelectValue, label_key: Option<&LabelKey>) -> bool {
    match value {
        SelectValue::Many(_) => true,
        SelectValue::One(Item::Element(_)) => true,
        SelectValue::One(item) => label_key.is_some() && item.as_object().is_some(),
    }
}

fn display_value(
    value: Option<&SelectValue>,
    label_key: Option<&LabelKey>,
    multiple_message: &str,
) -> Displayed {
    match value {
        None => Displayed::empty(),
        Some(SelectValue::One(item)) => display_item(item, label_key),
        Some(SelectValue::Many(items)) => match items.as_slice() {
            [] => Displayed::empty(),
            [item] => display_item(item, label_key),
            items => {
                let lines: Option<Vec<_>> = items
                    .iter()
                    .map(|item| match item {
                        Item::Element(line) => Some(line.clone()),
                        Item::Data(_) => None,
                    })
                    .collect();
                lines.map_or_else(
                    || Displayed::Text(multiple_message.to_string()),
                    Displayed::Elements,
                )
            }
        },
    }
}

fn display_item(item: &Item, label_key: Option<&LabelKey>) -> Displayed {
    match (item, label_key) {
        (Item::Element(line), _) => Displayed::Elements(vec![line.clone()]),
        (Item::Data(value @ Value::Object(_)), Some(key)) => Displayed::Text(key.project(value)),
        (Item::Data(value), _) => Displayed::Text(plain_text(value)),
    }
}

fn display_indexed(selected: &Selected, options: &[Item], multiple_message: &str) -> Displayed {
    match selected {
        Selected::Index(index) => display_option(options, *index),
        Selected::Indices(indices) => match indices.as_slice() {
            [] => Displayed::empty(),
            [index] => display_option(options, *index),
            _ => Displayed::Text(multiple_message.to_string()),
        },
    }
}

/// An option shown as-is; out of range shows nothing
fn display_option(options: &[Item], index: usize) -> Displayed {
    match options.get(index) {
        Some(Item::Element(line)) => Displayed::Elements(vec![line.clone()]),
        Some(Item::Data(value)) => Displayed::Text(plain_text(value)),
        None => Displayed::empty(),
    }
}
