//! Prop documentation for [`Select`](crate::Select)
//!
//! Compiled in with the `describe` feature, for tools that list a widget's
//! props (form builders, doc generators).

use serde::Serialize;

/// One documented prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropDoc {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    pub description: &'static str,
}

const fn prop(
    name: &'static str,
    kind: &'static str,
    default: Option<&'static str>,
    description: &'static str,
) -> PropDoc {
    PropDoc {
        name,
        kind,
        default,
        description,
    }
}

/// Props accepted by a select, through `SelectProps` or `SelectConfig`
pub const SELECT_PROPS: &[PropDoc] = &[
    prop("options", "Item[]", None, "Options shown in the drop."),
    prop("value", "Item | Item[]", None, "Currently selected value."),
    prop(
        "value_label",
        "Line",
        None,
        "Shown in the trigger instead of anything derived from the value.",
    ),
    prop(
        "selected",
        "usize | usize[]",
        None,
        "Selected option indices. Ignored when the value is a list, an element, or an object with label_key.",
    ),
    prop(
        "label_key",
        "string | fn(&Value) -> String",
        None,
        "Field name or accessor used to label object values.",
    ),
    prop("multiple", "bool", Some("false"), "Choosing toggles options in a list value."),
    prop(
        "messages.multiple",
        "string",
        Some("multiple"),
        "Shown when several non-element values are selected.",
    ),
    prop(
        "close_on_change",
        "bool",
        Some("true"),
        "Close the drop when a value is chosen.",
    ),
    prop(
        "disabled",
        "bool",
        Some("false"),
        "Never open; an open drop closes on the next event.",
    ),
    prop(
        "disabled_key",
        "string",
        None,
        "Object field that marks an option as unavailable. Such options are skipped and cannot be chosen.",
    ),
    prop(
        "value_key",
        "string",
        None,
        "Object field used in place of the whole option in change values.",
    ),
    prop("placeholder", "string", None, "Shown when nothing is selected."),
    prop(
        "search_placeholder",
        "string",
        None,
        "Shown in the search row while the query is empty.",
    ),
    prop(
        "messages.empty_search",
        "string",
        Some("No matches found"),
        "Shown in the drop when there are no options.",
    ),
    prop("plain", "bool", Some("false"), "Draw the trigger without a border."),
    prop(
        "drop_align",
        "{top, bottom, left, right}",
        Some("{top: bottom, left: left}"),
        "Which drop edges line up with which anchor edges.",
    ),
    prop(
        "drop_target",
        "Rect",
        None,
        "Anchor the drop here instead of the trigger.",
    ),
    prop("drop_height", "u16", Some("8"), "Maximum visible option rows."),
    prop("width", "u16", None, "Trigger width."),
    prop("margin", "{horizontal, vertical}", Some("0"), "Space around the trigger."),
    prop("on_open", "fn() -> A", None, "Action for opening the drop."),
    prop("on_close", "fn() -> A", None, "Action for closing the drop."),
    prop(
        "on_change",
        "fn(ChangeEvent) -> A",
        None,
        "Action for a chosen value. Receives target, option, index, value and selected.",
    ),
    prop(
        "on_search",
        "fn(String) -> A",
        None,
        "Adds a search row to the drop. Receives the query after every edit; the host filters the options.",
    ),
];

pub fn props() -> &'static [PropDoc] {
    SELECT_PROPS
}

/// Look up one prop by name
pub fn prop_doc(name: &str) -> Option<&'static PropDoc> {
    SELECT_PROPS.iter().find(|doc| doc.name == name)
}

/// The prop table as a JSON array
pub fn to_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(SELECT_PROPS)
}
