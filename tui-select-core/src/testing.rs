//! Test utilities for components built on tui-select-core
//!
//! - [`key`]: build a `KeyEvent` from a key string (`key("down")`)
//! - [`click`]: build a left-button press at a cell
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - [`TestHarness`]: state plus an action channel
//! - `assert_emitted!` and friends for checking returned actions
//!
//! # Example
//!
//! ```ignore
//! use tui_select_core::testing::{key, RenderHarness};
//!
//! let actions: Vec<_> = select
//!     .handle_event(&EventKind::Key(key("down")), props)
//!     .into_iter()
//!     .collect();
//! assert_emitted!(actions, Action::Opened);
//!
//! let mut render = RenderHarness::new(30, 10);
//! let output = render.render_to_string_plain(|frame| select.render(frame, frame.area(), props));
//! assert!(output.contains("small"));
//! ```

use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::keybindings::parse_key_string;
use crate::Action;

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use tui_select_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("down");
/// assert_eq!(k.code, KeyCode::Down);
///
/// let k = key("ctrl+p");
/// assert_eq!(k.code, KeyCode::Char('p'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create an [`EventKind::Key`] from a key string.
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Create [`EventKind::Key`] events from a space-separated key list.
///
/// ```
/// use tui_select_core::testing::keys;
///
/// assert_eq!(keys("down down enter").len(), 3);
/// ```
pub fn keys(s: &str) -> Vec<EventKind> {
    s.split_whitespace().map(key_event).collect()
}

/// Create a left-button press at `(column, row)`.
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Render components into an in-memory terminal.
///
/// ```
/// use ratatui::widgets::Paragraph;
/// use tui_select_core::testing::RenderHarness;
///
/// let mut render = RenderHarness::new(20, 3);
/// let output = render.render_to_string_plain(|frame| {
///     frame.render_widget(Paragraph::new("hello"), frame.area());
/// });
/// assert!(output.starts_with("hello"));
/// ```
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("Failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Render one frame and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("Failed to draw test frame: {e}"));
        self.terminal.backend().buffer()
    }

    /// Render one frame and return its text, one line per row.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Convert a buffer to plain text, one line per row with trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Convert part of a buffer to plain text.
pub fn buffer_rect_to_string_plain(buffer: &Buffer, area: Rect) -> String {
    let area = area.intersection(buffer.area);
    (area.y..area.y + area.height)
        .map(|y| {
            let line: String = (area.x..area.x + area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Test harness with state and an action channel.
///
/// ```ignore
/// let mut harness = TestHarness::<FormState, FormAction>::new(FormState::default());
/// for action in select.handle_event(&event, props) {
///     harness.emit(action);
/// }
/// let actions = harness.drain_emitted();
/// ```
pub struct TestHarness<S, A: Action> {
    /// The state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Get a clone of the action sender.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action.
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit every action returned by a component, in order.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count actions matching a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
