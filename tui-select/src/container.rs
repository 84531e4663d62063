//! Option list shown inside the drop

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_select_core::{point_in_rect, Component, EventKind};

use crate::change::ChangeEvent;
use crate::config::SelectConfig;
use crate::keymap::{command_for, SelectCommand, SelectContext};
use crate::value::{Item, LabelKey, SelectValue, Selected};

/// Props for SelectContainer
pub struct SelectContainerProps<'a, A> {
    pub options: &'a [Item],
    pub value: Option<&'a SelectValue>,
    pub selected: Option<&'a Selected>,
    pub label_key: Option<&'a LabelKey>,
    pub config: &'a SelectConfig,
    /// Whether key events reach the list
    pub is_focused: bool,
    /// Called with the computed change when an option is chosen
    pub on_change: fn(ChangeEvent) -> A,
    /// Called when the user dismisses the drop
    pub on_close: fn() -> A,
    /// Called with the whole query after every edit; also turns the search row on
    pub on_search: Option<fn(String) -> A>,
}

/// Scrollable option list with an active-row cursor
///
/// Moves the cursor with next/previous/first/last, chooses with `choose`
/// or a click, and asks to close with `close`. Options marked through
/// `disabled_key` are skipped and cannot be chosen. Chosen changes are
/// emitted with no target; the owning select fills it in.
///
/// With `on_search` set, a query row sits above the list. Printable keys edit
/// the query instead of running commands, and the host filters the options.
#[derive(Default)]
pub struct SelectContainer {
    active: usize,
    scroll_offset: usize,
    query: String,
    /// Inner list area from the last render, for click hit-testing
    list_area: Rect,
}

impl SelectContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row under the cursor
    pub fn active(&self) -> usize {
        self.active
    }

    /// Current search text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Start over at the first selected option, or the first one enabled
    pub fn reset(
        &mut self,
        options: &[Item],
        value: Option<&SelectValue>,
        selected: Option<&Selected>,
        config: &SelectConfig,
    ) {
        let value_key = config.value_key.as_deref();
        self.active = selected_indices(options, value, selected, value_key)
            .first()
            .copied()
            .or_else(|| enabled(options, config).next())
            .unwrap_or(0);
        self.scroll_offset = 0;
        self.query.clear();
    }

    fn ensure_visible(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        if self.active < self.scroll_offset {
            self.scroll_offset = self.active;
        } else if self.active >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.active.saturating_sub(viewport_height - 1);
        }
    }

    fn move_to(&mut self, index: usize, len: usize) {
        self.active = index.min(len.saturating_sub(1));
    }

    /// Move to the nearest enabled option in one direction; stay put if there is none
    fn step(&mut self, options: &[Item], config: &SelectConfig, forward: bool) {
        let next = if forward {
            enabled(options, config).find(|&i| i > self.active)
        } else {
            enabled(options, config).rev().find(|&i| i < self.active)
        };
        if let Some(index) = next {
            self.active = index;
        }
    }

    fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        point_in_rect(self.list_area, x, y)
            .then(|| self.scroll_offset + (y - self.list_area.y) as usize)
    }

    /// Apply a key to the query, returning the new query if it changed
    fn edit_query(&mut self, key: &KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.query.push(c)
            }
            KeyCode::Backspace if !self.query.is_empty() => {
                self.query.pop();
            }
            _ => return None,
        }
        self.active = 0;
        self.scroll_offset = 0;
        Some(self.query.clone())
    }
}

/// Indices of options not marked through `disabled_key`
fn enabled<'a>(
    options: &'a [Item],
    config: &'a SelectConfig,
) -> impl DoubleEndedIterator<Item = usize> + 'a {
    let disabled_key = config.disabled_key.as_deref();
    options
        .iter()
        .enumerate()
        .filter(move |(_, option)| !option.is_disabled(disabled_key))
        .map(|(i, _)| i)
}

/// Whether a value item stands for `option`, either whole or through `value_key`
fn holds(option: &Item, item: &Item, value_key: Option<&str>) -> bool {
    option == item || (value_key.is_some() && option.value_of(value_key) == *item)
}

/// Indices of the options currently selected
///
/// Taken from `selected` when given, otherwise by finding each value item in
/// the options.
pub fn selected_indices(
    options: &[Item],
    value: Option<&SelectValue>,
    selected: Option<&Selected>,
    value_key: Option<&str>,
) -> Vec<usize> {
    match (selected, value) {
        (Some(selected), _) => selected.indices().to_vec(),
        (None, Some(value)) => value
            .items()
            .iter()
            .filter_map(|item| options.iter().position(|option| holds(option, item, value_key)))
            .collect(),
        (None, None) => Vec::new(),
    }
}

/// The change that choosing `index` produces
///
/// Single: the option becomes the value. Multiple: the option is toggled in
/// or out of the current selection, keeping the existing order. Value items
/// are projected through `value_key`; `option` stays the whole option.
/// Disabled options produce no change.
pub fn choose(
    options: &[Item],
    value: Option<&SelectValue>,
    selected: Option<&Selected>,
    config: &SelectConfig,
    index: usize,
) -> Option<ChangeEvent> {
    let option = options.get(index)?;
    if option.is_disabled(config.disabled_key.as_deref()) {
        return None;
    }
    let value_key = config.value_key.as_deref();

    let (value, selected) = if config.multiple {
        let current = selected_indices(options, value, selected, value_key);
        let removed = current.contains(&index);
        let mut next: Vec<usize> = current
            .into_iter()
            .filter(|&i| i != index && i < options.len())
            .collect();
        if !removed {
            next.push(index);
        }
        let items = next.iter().map(|&i| options[i].value_of(value_key)).collect();
        (SelectValue::Many(items), Selected::Indices(next))
    } else {
        (SelectValue::One(option.value_of(value_key)), Selected::Index(index))
    };

    Some(ChangeEvent {
        target: None,
        option: option.clone(),
        index,
        value,
        selected,
    })
}

impl SelectContainer {
    fn on_event<A>(&mut self, event: &EventKind, props: SelectContainerProps<'_, A>) -> Option<A> {
        let options = props.options;
        let config = props.config;
        let choose_at =
            |index: usize| choose(options, props.value, props.selected, config, index).map(props.on_change);

        match event {
            EventKind::Key(key) if props.is_focused => {
                if let Some(on_search) = props.on_search {
                    if let Some(query) = self.edit_query(key) {
                        tracing::trace!(query = %query, "Select search changed");
                        return Some(on_search(query));
                    }
                }

                let command = command_for(&config.keybindings, *key, SelectContext::Drop)?;
                match command {
                    SelectCommand::Next => self.step(options, config, true),
                    SelectCommand::Previous => self.step(options, config, false),
                    SelectCommand::First => {
                        if let Some(first) = enabled(options, config).next() {
                            self.active = first;
                        }
                    }
                    SelectCommand::Last => {
                        if let Some(last) = enabled(options, config).next_back() {
                            self.active = last;
                        }
                    }
                    SelectCommand::Choose => return choose_at(self.active),
                    SelectCommand::Close => return Some((props.on_close)()),
                    SelectCommand::Open => {}
                }
                None
            }
            EventKind::Scroll { column, row, delta } => {
                if point_in_rect(self.list_area, *column, *row) {
                    for _ in 0..delta.unsigned_abs() {
                        self.step(options, config, *delta > 0);
                    }
                }
                None
            }
            EventKind::Mouse(_) => {
                let (x, y) = event.left_click()?;
                let row = self.row_at(x, y)?;
                let action = choose_at(row)?;
                self.move_to(row, options.len());
                Some(action)
            }
            _ => None,
        }
    }

    fn render_search(&self, frame: &mut Frame, area: Rect, config: &SelectConfig, is_focused: bool) {
        let line = if self.query.is_empty() {
            Line::styled(
                config.search_placeholder.clone().unwrap_or_default(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Line::raw(self.query.clone())
        };
        frame.render_widget(Paragraph::new(line), area);

        if is_focused && area.width > 0 {
            let typed = Span::raw(self.query.as_str()).width() as u16;
            let x = area.x.saturating_add(typed).min(area.right() - 1);
            frame.set_cursor_position((x, area.y));
        }
    }
}

impl<A> Component<A> for SelectContainer {
    type Props<'a> = SelectContainerProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        self.on_event(event, props)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let search = props.on_search.is_some();
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(u16::from(search)), Constraint::Min(0)])
                .areas(inner);
        self.list_area = list_area;

        if search {
            self.render_search(frame, search_area, props.config, props.is_focused);
        }

        if props.options.is_empty() {
            let message = Line::styled(
                props.config.messages.empty_search.clone(),
                Style::default().fg(Color::DarkGray),
            );
            frame.render_widget(Paragraph::new(message), list_area);
            return;
        }

        self.move_to(self.active, props.options.len());
        self.ensure_visible(list_area.height as usize);

        let disabled_key = props.config.disabled_key.as_deref();
        let chosen = selected_indices(
            props.options,
            props.value,
            props.selected,
            props.config.value_key.as_deref(),
        );
        let items: Vec<ListItem> = props
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let is_chosen = chosen.contains(&i);
                let marker = if is_chosen { "✓ " } else { "  " };
                let mut line = option.label(props.label_key);
                line.spans.insert(0, Span::raw(marker));
                let style = if option.is_disabled(disabled_key) {
                    Style::default().fg(Color::DarkGray)
                } else if is_chosen {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default().with_selected(Some(self.active));
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, list_area, &mut state);
    }
}
