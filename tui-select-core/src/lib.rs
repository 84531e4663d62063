//! Core traits and types for tui-select
//!
//! The widgets in `tui-select` are plain components: they own their UI state
//! (is the drop open, which row is active), read everything else from props,
//! and report user intent by returning actions built from the props'
//! callbacks. This crate holds the pieces those components and their hosts
//! share.
//!
//! # Core Concepts
//!
//! - **Action**: values returned by components for the host to dispatch
//! - **Component**: `handle_event` + `render` over a props type
//! - **StoreWithMiddleware**: state container with a reducer and a middleware hook
//! - **Keybindings**: context-aware key mapping loaded from config
//!
//! # Host loop
//!
//! ```ignore
//! use tui_select_core::prelude::*;
//!
//! let mut store = StoreWithMiddleware::new(FormState::default(), reducer, LoggingMiddleware::new());
//!
//! loop {
//!     terminal.draw(|frame| {
//!         select.render(frame, area, props_from(store.state()));
//!     })?;
//!
//!     if let Some(raw) = event_rx.recv().await {
//!         let event = process_raw_event(raw);
//!         let actions = select.handle_event(&event, props_from(store.state()));
//!         store.dispatch_all(actions);
//!     }
//! }
//! ```

pub mod action;
pub mod bus;
pub mod component;
pub mod event;
pub mod keybindings;
pub mod store;
pub mod testing;

pub use action::Action;
pub use component::Component;

pub use bus::{process_raw_event, spawn_event_poller, RawEvent};
pub use event::{point_in_rect, ComponentId, EventKind};

pub use keybindings::{parse_key_string, BindingContext, Keybindings};

pub use store::{LoggingMiddleware, Middleware, Reducer, StoreWithMiddleware};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

pub use testing::{
    buffer_rect_to_string_plain, buffer_to_string_plain, click, key, key_event, keys,
    RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
    pub use crate::component::Component;
    pub use crate::event::{ComponentId, EventKind};
    pub use crate::keybindings::{parse_key_string, BindingContext, Keybindings};
    pub use crate::store::{LoggingMiddleware, Middleware, Reducer, StoreWithMiddleware};

    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
