//! Read-only trigger input showing the current selection

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_select_core::{Component, ComponentId};

use crate::change::InputRef;
use crate::value::Displayed;

/// Props for SelectInput
pub struct SelectInputProps<'a> {
    /// What to show, already resolved
    pub displayed: &'a Displayed,
    /// Shown in gray when nothing is displayed
    pub placeholder: Option<&'a str>,
    /// Indicator drawn at the right edge
    pub icon: &'a str,
    /// Draw without a border
    pub plain: bool,
    pub is_focused: bool,
    pub disabled: bool,
}

/// The select's trigger
///
/// Never edits its text. Remembers where it was last drawn so change events
/// can refer back to it.
#[derive(Default)]
pub struct SelectInput {
    id: ComponentId,
    area: Rect,
}

impl SelectInput {
    pub fn new(id: ComponentId) -> Self {
        Self {
            id,
            area: Rect::default(),
        }
    }

    /// Handle to the input as last rendered
    pub fn input_ref(&self) -> InputRef {
        InputRef {
            id: self.id,
            area: self.area,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }
}

impl<A> Component<A> for SelectInput {
    type Props<'a> = SelectInputProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = area;

        let mut base = Style::default();
        if props.disabled {
            base = base.add_modifier(Modifier::DIM);
        }

        let inner = if props.plain {
            area
        } else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(if props.is_focused && !props.disabled {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                });
            let inner = block.inner(area);
            frame.render_widget(block, area);
            inner
        };

        let icon = Span::styled(props.icon, base);
        let [text_area, _, icon_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(icon.width() as u16),
        ])
        .areas(inner);

        let line = match (props.displayed.is_empty(), props.placeholder) {
            (true, Some(placeholder)) => {
                Line::styled(placeholder.to_string(), base.fg(Color::DarkGray))
            }
            _ => props.displayed.to_line().patch_style(base),
        };

        frame.render_widget(Paragraph::new(line), text_area);
        frame.render_widget(Paragraph::new(Line::from(icon)), icon_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_select_core::testing::RenderHarness;

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {}

    fn props(displayed: &Displayed) -> SelectInputProps<'_> {
        SelectInputProps {
            displayed,
            placeholder: Some("Pick a size"),
            icon: "▾",
            plain: false,
            is_focused: false,
            disabled: false,
        }
    }

    fn render(input: &mut SelectInput, props: SelectInputProps<'_>, width: u16) -> String {
        let mut render = RenderHarness::new(width, 3);
        render.render_to_string_plain(|frame| {
            <SelectInput as Component<TestAction>>::render(input, frame, frame.area(), props)
        })
    }

    #[test]
    fn test_renders_text_and_icon() {
        let mut input = SelectInput::default();
        let displayed = Displayed::Text("medium".into());
        let output = render(&mut input, props(&displayed), 20);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("│medium"));
        assert!(lines[1].ends_with("▾│"));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut input = SelectInput::default();
        let displayed = Displayed::empty();
        let output = render(&mut input, props(&displayed), 20);
        assert!(output.contains("Pick a size"));
    }

    #[test]
    fn test_no_placeholder_when_text_shown() {
        let mut input = SelectInput::default();
        let displayed = Displayed::Text("large".into());
        let output = render(&mut input, props(&displayed), 20);
        assert!(!output.contains("Pick a size"));
    }

    #[test]
    fn test_plain_has_no_border() {
        let mut input = SelectInput::default();
        let displayed = Displayed::Text("large".into());
        let mut p = props(&displayed);
        p.plain = true;

        let mut render = RenderHarness::new(12, 1);
        let output = render.render_to_string_plain(|frame| {
            <SelectInput as Component<TestAction>>::render(&mut input, frame, frame.area(), p)
        });
        assert!(output.starts_with("large"));
        assert!(output.ends_with("▾"));
    }

    #[test]
    fn test_input_ref_tracks_area() {
        let mut input = SelectInput::new(ComponentId(7));
        let displayed = Displayed::empty();
        render(&mut input, props(&displayed), 20);

        assert_eq!(
            input.input_ref(),
            InputRef {
                id: ComponentId(7),
                area: Rect::new(0, 0, 20, 3),
            }
        );
    }
}
