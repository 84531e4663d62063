//! Action trait for values emitted by components

use std::fmt::Debug;

/// Marker trait for actions produced by component callbacks
///
/// Components never mutate application state directly. They call the
/// callbacks passed through their props and return the resulting actions,
/// which the host then dispatches to a [`StoreWithMiddleware`](crate::StoreWithMiddleware).
///
/// - Clone: actions may be logged and then dispatched
/// - Debug: for logging and test assertions
/// - Send + 'static: actions travel over the host's action channel
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging
    fn name(&self) -> &'static str;
}
