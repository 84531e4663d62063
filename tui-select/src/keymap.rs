//! Key contexts and commands understood by the select widget

use tui_select_core::{BindingContext, Keybindings};

/// Where a key press lands: the closed trigger or the open drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectContext {
    Trigger,
    Drop,
}

impl BindingContext for SelectContext {
    fn name(&self) -> &'static str {
        match self {
            SelectContext::Trigger => "trigger",
            SelectContext::Drop => "drop",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "trigger" => Some(SelectContext::Trigger),
            "drop" => Some(SelectContext::Drop),
            _ => None,
        }
    }
}

/// Commands bound in [`SelectContext`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectCommand {
    Open,
    Next,
    Previous,
    First,
    Last,
    Choose,
    Close,
}

impl SelectCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SelectCommand::Open => "open",
            SelectCommand::Next => "next",
            SelectCommand::Previous => "previous",
            SelectCommand::First => "first",
            SelectCommand::Last => "last",
            SelectCommand::Choose => "choose",
            SelectCommand::Close => "close",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "open" => Some(SelectCommand::Open),
            "next" => Some(SelectCommand::Next),
            "previous" => Some(SelectCommand::Previous),
            "first" => Some(SelectCommand::First),
            "last" => Some(SelectCommand::Last),
            "choose" => Some(SelectCommand::Choose),
            "close" => Some(SelectCommand::Close),
            _ => None,
        }
    }
}

/// Resolve a key press to a command in the given context
pub fn command_for(
    keybindings: &Keybindings<SelectContext>,
    key: crossterm::event::KeyEvent,
    context: SelectContext,
) -> Option<SelectCommand> {
    keybindings
        .get_command(key, context)
        .and_then(SelectCommand::from_name)
}

/// Bindings used when the config does not override them
pub fn default_keybindings() -> Keybindings<SelectContext> {
    let trigger = SelectContext::Trigger;
    let drop = SelectContext::Drop;

    Keybindings::new()
        .with(trigger, SelectCommand::Open.name(), &["down", "up", "enter"])
        .with(drop, SelectCommand::Next.name(), &["down", "j"])
        .with(drop, SelectCommand::Previous.name(), &["up", "k"])
        .with(drop, SelectCommand::First.name(), &["home", "g"])
        .with(drop, SelectCommand::Last.name(), &["end", "G"])
        .with(drop, SelectCommand::Choose.name(), &["enter", "space"])
        .with(drop, SelectCommand::Close.name(), &["esc", "tab"])
}
