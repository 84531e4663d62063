//! The dropdown select component

use ratatui::{layout::Rect, style::Color, text::Line, Frame};
use tui_select_core::{point_in_rect, Component, ComponentId, EventKind};

use crate::change::{ChangeEvent, InputRef};
use crate::config::SelectConfig;
use crate::container::{SelectContainer, SelectContainerProps};
use crate::drop::{drop_area, render_drop_background};
use crate::input::{SelectInput, SelectInputProps};
use crate::keymap::{command_for, SelectCommand, SelectContext};
use crate::selection::Selection;
use crate::value::{Displayed, Item, LabelKey, SelectValue, Selected};

/// Props for Select
///
/// Build with [`SelectProps::new`] and the `with_*` setters. Everything is
/// borrowed from the host's state, so props are cheap to rebuild for every
/// render and event.
pub struct SelectProps<'a, A> {
    pub options: &'a [Item],
    /// Current value
    pub value: Option<&'a SelectValue>,
    /// Shown verbatim instead of anything derived from `value` or `selected`
    pub value_label: Option<&'a Line<'static>>,
    /// Legacy selection by index into `options`
    pub selected: Option<&'a Selected>,
    /// Projects labels out of object values and options
    pub label_key: Option<&'a LabelKey>,
    pub config: &'a SelectConfig,
    /// Anchor the drop to this area instead of the trigger
    pub drop_target: Option<Rect>,
    /// Fill behind the drop's options
    pub drop_background: Option<Color>,
    pub is_focused: bool,
    pub on_open: Option<fn() -> A>,
    pub on_close: Option<fn() -> A>,
    pub on_change: Option<fn(ChangeEvent) -> A>,
    /// Makes the drop searchable; called with the query after every edit
    pub on_search: Option<fn(String) -> A>,
}

impl<A> Clone for SelectProps<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for SelectProps<'_, A> {}

impl<'a, A> SelectProps<'a, A> {
    pub fn new(options: &'a [Item], config: &'a SelectConfig) -> Self {
        Self {
            options,
            value: None,
            value_label: None,
            selected: None,
            label_key: None,
            config,
            drop_target: None,
            drop_background: None,
            is_focused: false,
            on_open: None,
            on_close: None,
            on_change: None,
            on_search: None,
        }
    }

    pub fn with_value(mut self, value: Option<&'a SelectValue>) -> Self {
        self.value = value;
        self
    }

    pub fn with_value_label(mut self, label: &'a Line<'static>) -> Self {
        self.value_label = Some(label);
        self
    }

    pub fn with_selected(mut self, selected: Option<&'a Selected>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_label_key(mut self, label_key: &'a LabelKey) -> Self {
        self.label_key = Some(label_key);
        self
    }

    pub fn with_drop_target(mut self, area: Rect) -> Self {
        self.drop_target = Some(area);
        self
    }

    pub fn with_drop_background(mut self, color: Color) -> Self {
        self.drop_background = Some(color);
        self
    }

    pub fn focused(mut self, is_focused: bool) -> Self {
        self.is_focused = is_focused;
        self
    }

    pub fn on_open(mut self, f: fn() -> A) -> Self {
        self.on_open = Some(f);
        self
    }

    pub fn on_close(mut self, f: fn() -> A) -> Self {
        self.on_close = Some(f);
        self
    }

    pub fn on_change(mut self, f: fn(ChangeEvent) -> A) -> Self {
        self.on_change = Some(f);
        self
    }

    pub fn on_search(mut self, f: fn(String) -> A) -> Self {
        self.on_search = Some(f);
        self
    }
}

/// What the drop reports back to the select
#[derive(Debug, Clone)]
enum DropMsg {
    Change(ChangeEvent),
    Close,
    Search(String),
}

/// A dropdown select: a read-only trigger plus a drop of options
///
/// The select owns whether its drop is open. Value, selection and options are
/// the host's; choosing an option only returns an `on_change` action built
/// from the props' callback.
///
/// Opening and closing commit the new state before their action is returned,
/// and actions come back in emission order, so a choice with
/// `close_on_change` yields `[on_close, on_change]`.
#[derive(Default)]
pub struct Select {
    open: bool,
    input: SelectInput,
    container: SelectContainer,
    /// Where the drop was last rendered, if open
    drop_area: Option<Rect>,
}

impl Select {
    /// Create a select whose trigger input is tagged with `id`
    pub fn new(id: ComponentId) -> Self {
        Self {
            input: SelectInput::new(id),
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The trigger input, as last rendered
    pub fn input_ref(&self) -> InputRef {
        self.input.input_ref()
    }

    /// What the trigger shows for these props
    pub fn display<A>(&self, props: &SelectProps<'_, A>) -> Displayed {
        Selection::classify(props.value_label, props.value, props.selected, props.label_key)
            .display(props.options, &props.config.messages.multiple)
    }

    /// Open the drop, then report it through `on_open`
    ///
    /// Does nothing when already open.
    pub fn open<A>(&mut self, props: SelectProps<'_, A>) -> Option<A> {
        if self.open {
            return None;
        }
        self.open = true;
        self.container
            .reset(props.options, props.value, props.selected, props.config);
        tracing::debug!(input = self.input_ref().id.0, "Select opened");
        props.on_open.map(|f| f())
    }

    /// Close the drop, then report it through `on_close`
    ///
    /// Does nothing when already closed.
    pub fn close<A>(&mut self, props: SelectProps<'_, A>) -> Option<A> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.drop_area = None;
        tracing::debug!(input = self.input_ref().id.0, "Select closed");
        props.on_close.map(|f| f())
    }

    fn container_props<'a, A>(
        props: SelectProps<'a, A>,
    ) -> SelectContainerProps<'a, DropMsg> {
        SelectContainerProps {
            options: props.options,
            value: props.value,
            selected: props.selected,
            label_key: props.label_key,
            config: props.config,
            is_focused: props.is_focused,
            on_change: DropMsg::Change,
            on_close: || DropMsg::Close,
            on_search: props
                .on_search
                .map(|_| DropMsg::Search as fn(String) -> DropMsg),
        }
    }

    fn forward_to_drop<A>(&mut self, event: &EventKind, props: SelectProps<'_, A>) -> Vec<A> {
        let msgs: Vec<DropMsg> =
            <SelectContainer as Component<DropMsg>>::handle_event(
                &mut self.container,
                event,
                Self::container_props(props),
            )
            .into_iter()
            .collect();

        let mut actions = Vec::new();
        for msg in msgs {
            match msg {
                DropMsg::Change(change) => {
                    if props.config.close_on_change {
                        actions.extend(self.close(props));
                    }
                    let change = change.with_target(self.input_ref());
                    tracing::debug!(
                        input = self.input_ref().id.0,
                        index = change.index,
                        "Select changed"
                    );
                    actions.extend(props.on_change.map(|f| f(change)));
                }
                DropMsg::Close => actions.extend(self.close(props)),
                DropMsg::Search(query) => actions.extend(props.on_search.map(|f| f(query))),
            }
        }
        actions
    }

    fn on_click<A>(&mut self, event: &EventKind, x: u16, y: u16, props: SelectProps<'_, A>) -> Vec<A> {
        let in_drop = self.drop_area.is_some_and(|area| point_in_rect(area, x, y));
        let in_trigger = point_in_rect(self.input.area(), x, y);

        if self.open && in_drop {
            self.forward_to_drop(event, props)
        } else if in_trigger && !self.open {
            self.open(props).into_iter().collect()
        } else {
            self.close(props).into_iter().collect()
        }
    }

    fn on_event<A>(&mut self, event: &EventKind, props: SelectProps<'_, A>) -> Vec<A> {
        if props.config.disabled {
            if self.open {
                tracing::debug!(input = self.input_ref().id.0, "Select disabled while open");
                return self.close(props).into_iter().collect();
            }
            tracing::trace!(input = self.input_ref().id.0, "Select disabled, ignoring event");
            return Vec::new();
        }

        if let Some((x, y)) = event.left_click() {
            return self.on_click(event, x, y, props);
        }

        if self.open {
            return self.forward_to_drop(event, props);
        }

        match event {
            EventKind::Key(key) if props.is_focused => {
                match command_for(&props.config.keybindings, *key, SelectContext::Trigger) {
                    Some(SelectCommand::Open) => self.open(props).into_iter().collect(),
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    fn render_drop<A>(&mut self, frame: &mut Frame, props: SelectProps<'_, A>) {
        let anchor = props.drop_target.unwrap_or(self.input.area());
        let height = props
            .config
            .drop_rows(props.options.len(), props.on_search.is_some());
        let area = drop_area(anchor, frame.area(), &props.config.drop_align, height);

        render_drop_background(frame, area, props.drop_background);
        <SelectContainer as Component<DropMsg>>::render(
            &mut self.container,
            frame,
            area,
            Self::container_props(props),
        );
        self.drop_area = Some(area);
    }
}

impl<A> Component<A> for Select {
    type Props<'a> = SelectProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        self.on_event(event, props)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let displayed = self.display(&props);
        let config = props.config;

        <SelectInput as Component<A>>::render(
            &mut self.input,
            frame,
            config.trigger_area(area),
            SelectInputProps {
                displayed: &displayed,
                placeholder: config.placeholder.as_deref(),
                icon: &config.icon,
                plain: config.plain,
                is_focused: props.is_focused,
                disabled: config.disabled,
            },
        );

        if self.open && !config.disabled {
            self.render_drop(frame, props);
        } else {
            self.drop_area = None;
        }
    }
}
