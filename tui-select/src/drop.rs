//! Drop placement and background for the option overlay
//!
//! The drop is anchored to a rectangle (the trigger, or an explicit drop
//! target) and aligned edge-to-edge with it, then kept inside the frame.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::{Clear, Widget},
    Frame,
};
use serde::{Deserialize, Serialize};

/// Vertical edge of the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalEdge {
    Top,
    Bottom,
}

/// Horizontal edge of the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalEdge {
    Left,
    Right,
}

/// Which drop edge lines up with which anchor edge
///
/// `top: Some(Bottom)` puts the drop's top on the anchor's bottom edge and
/// `bottom: Some(Top)` opens upwards. When both `top` and `bottom` are set,
/// `top` wins; likewise `left` over `right`. Unset axes open downwards and
/// line up left edges.
///
/// In config files: `{ "top": "bottom", "left": "left" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DropAlign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<VerticalEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<VerticalEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<HorizontalEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<HorizontalEdge>,
}

impl DropAlign {
    /// Open upwards, drop bottom on the anchor's top edge
    pub fn above() -> Self {
        Self {
            bottom: Some(VerticalEdge::Top),
            ..Default::default()
        }
    }

    fn y(&self, anchor: Rect, height: u16) -> i32 {
        let edge = |e: VerticalEdge| match e {
            VerticalEdge::Top => anchor.y as i32,
            VerticalEdge::Bottom => anchor.bottom() as i32,
        };
        match (self.top, self.bottom) {
            (Some(e), _) => edge(e),
            (None, Some(e)) => edge(e) - height as i32,
            (None, None) => anchor.bottom() as i32,
        }
    }

    fn x(&self, anchor: Rect, width: u16) -> i32 {
        let edge = |e: HorizontalEdge| match e {
            HorizontalEdge::Left => anchor.x as i32,
            HorizontalEdge::Right => anchor.right() as i32,
        };
        match (self.left, self.right) {
            (Some(e), _) => edge(e),
            (None, Some(e)) => edge(e) - width as i32,
            (None, None) => anchor.x as i32,
        }
    }
}

/// Compute the drop rectangle
///
/// The drop is as wide as the anchor and `height` rows tall, aligned per
/// `align`, then shifted (and if needed shrunk) to stay inside `bounds`.
pub fn drop_area(anchor: Rect, bounds: Rect, align: &DropAlign, height: u16) -> Rect {
    let width = anchor.width.min(bounds.width);
    let height = height.min(bounds.height);

    let clamp = |pos: i32, len: u16, lo: u16, extent: u16| -> u16 {
        let max = lo as i32 + extent as i32 - len as i32;
        pos.clamp(lo as i32, max) as u16
    };

    let x = clamp(align.x(anchor, width), width, bounds.x, bounds.width);
    let y = clamp(align.y(anchor, height), height, bounds.y, bounds.height);
    Rect::new(x, y, width, height)
}

/// Clear the drop area and fill it with an optional background
pub fn render_drop_background(frame: &mut Frame, area: Rect, bg: Option<Color>) {
    frame.render_widget(Clear, area);
    if let Some(bg) = bg {
        frame.render_widget(BgFill(bg), area);
    }
}

/// Simple widget that fills an area with a background color
struct BgFill(Color);

impl Widget for BgFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_bg(self.0);
                buf[(x, y)].set_symbol(" ");
            }
        }
    }
}
