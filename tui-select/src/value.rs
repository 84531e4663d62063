//! Option items, select values and what the trigger ends up showing

use std::slice;

use ratatui::text::{Line, Span};
use serde_json::{Map, Value};

/// One option, or one entry of a value
///
/// Either something already renderable or arbitrary data. Data is shown as
/// text: strings verbatim, `null` as nothing, everything else as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A renderable element, displayed as-is
    Element(Line<'static>),
    /// Arbitrary data: object, string, number, bool, null or array
    Data(Value),
}

impl Item {
    /// Create an element item
    pub fn element(line: impl Into<Line<'static>>) -> Self {
        Item::Element(line.into())
    }

    /// Create a data item
    pub fn data(value: impl Into<Value>) -> Self {
        Item::Data(value.into())
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Item::Element(_))
    }

    /// The object fields, if this is object data
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Item::Data(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Whether the object field `disabled_key` is set to anything but `null` or `false`
    pub fn is_disabled(&self, disabled_key: Option<&str>) -> bool {
        match (self.as_object(), disabled_key) {
            (Some(map), Some(key)) => !matches!(
                map.get(key),
                None | Some(Value::Null) | Some(Value::Bool(false))
            ),
            _ => false,
        }
    }

    /// The item as it goes into a change value
    ///
    /// With `value_key`, object data is replaced by that field (`null` when
    /// missing). Everything else passes through unchanged.
    pub fn value_of(&self, value_key: Option<&str>) -> Item {
        match (self.as_object(), value_key) {
            (Some(map), Some(key)) => Item::Data(map.get(key).cloned().unwrap_or(Value::Null)),
            _ => self.clone(),
        }
    }

    /// Label for this item as a list row
    ///
    /// Objects go through `label_key` when one is given.
    pub fn label(&self, label_key: Option<&LabelKey>) -> Line<'static> {
        match (self, label_key) {
            (Item::Element(line), _) => line.clone(),
            (Item::Data(value @ Value::Object(_)), Some(key)) => Line::raw(key.project(value)),
            (Item::Data(value), _) => Line::raw(plain_text(value)),
        }
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Data(Value::String(s.to_string()))
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::Data(Value::String(s))
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        Item::Data(value)
    }
}

impl From<Line<'static>> for Item {
    fn from(line: Line<'static>) -> Self {
        Item::Element(line)
    }
}

/// Current value of a select
#[derive(Debug, Clone, PartialEq)]
pub enum SelectValue {
    One(Item),
    Many(Vec<Item>),
}

impl SelectValue {
    /// All items of the value, one or many
    pub fn items(&self) -> &[Item] {
        match self {
            SelectValue::One(item) => slice::from_ref(item),
            SelectValue::Many(items) => items,
        }
    }
}

impl From<Item> for SelectValue {
    fn from(item: Item) -> Self {
        SelectValue::One(item)
    }
}

impl From<&str> for SelectValue {
    fn from(s: &str) -> Self {
        SelectValue::One(s.into())
    }
}

/// A JSON array becomes a list value, one item per element
impl From<Value> for SelectValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => SelectValue::Many(items.into_iter().map(Item::Data).collect()),
            other => SelectValue::One(Item::Data(other)),
        }
    }
}

impl From<Vec<Item>> for SelectValue {
    fn from(items: Vec<Item>) -> Self {
        SelectValue::Many(items)
    }
}

/// Legacy selection as index(es) into the options list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selected {
    Index(usize),
    Indices(Vec<usize>),
}

impl Selected {
    pub fn indices(&self) -> &[usize] {
        match self {
            Selected::Index(index) => slice::from_ref(index),
            Selected::Indices(indices) => indices,
        }
    }
}

/// How to get a display label out of an object value
#[derive(Debug, Clone)]
pub enum LabelKey {
    /// Read this field; a missing field gives an empty label
    Field(String),
    /// Compute the label from the whole object
    Accessor(fn(&Value) -> String),
}

impl LabelKey {
    /// Project the label for an object value
    pub fn project(&self, value: &Value) -> String {
        match self {
            LabelKey::Field(field) => value.get(field).map(plain_text).unwrap_or_default(),
            LabelKey::Accessor(accessor) => accessor(value),
        }
    }
}

impl From<&str> for LabelKey {
    fn from(field: &str) -> Self {
        LabelKey::Field(field.to_string())
    }
}

/// Text form of a data value
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// What the trigger shows
///
/// Exactly one of these is produced per render.
#[derive(Debug, Clone, PartialEq)]
pub enum Displayed {
    /// An explicit value label
    Label(Line<'static>),
    /// One or more renderable elements from the value or options
    Elements(Vec<Line<'static>>),
    /// Plain input text
    Text(String),
}

impl Displayed {
    pub fn empty() -> Self {
        Displayed::Text(String::new())
    }

    /// Plain text, when the trigger shows text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Displayed::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Displayed::Label(line) => line.width() == 0,
            Displayed::Elements(lines) => lines.iter().all(|line| line.width() == 0),
            Displayed::Text(text) => text.is_empty(),
        }
    }

    /// Flatten to a single line for the trigger
    pub fn to_line(&self) -> Line<'static> {
        match self {
            Displayed::Label(line) => line.clone(),
            Displayed::Elements(lines) => {
                let mut spans = Vec::new();
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        spans.push(", ".into());
                    }
                    spans.extend(line.spans.iter().map(|span| {
                        Span::styled(span.content.clone(), line.style.patch(span.style))
                    }));
                }
                Line::from(spans)
            }
            Displayed::Text(text) => Line::raw(text.clone()),
        }
    }
}
