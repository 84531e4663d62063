//! State store with reducer pattern
//!
//! Hosts keep the data a select widget displays (current value, selected
//! indices, options) in a store and feed the actions returned by the widget
//! back through [`StoreWithMiddleware::dispatch_all`].

use crate::Action;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// State container with a Redux-like reducer and a middleware hook
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct FormState {
///     size: Option<SelectValue>,
/// }
///
/// fn reducer(state: &mut FormState, action: FormAction) -> bool {
///     match action {
///         FormAction::SizeChanged(event) => {
///             state.size = Some(event.value);
///             true
///         }
///         FormAction::SizeOpened | FormAction::SizeClosed => false,
///     }
/// }
///
/// let mut store = StoreWithMiddleware::new(FormState::default(), reducer, LoggingMiddleware::new());
/// store.dispatch_all(select.handle_event(&event, props));
/// ```
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    state: S,
    reducer: Reducer<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with initial state, reducer and middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
        }
    }

    /// Dispatch an action through middleware and reducer, returning `true` if the state changed
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Dispatch actions in order, returning `true` if any changed the state
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) || changed)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }
}

/// Hook around every dispatched action
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Log before dispatch
    pub log_before: bool,
    /// Log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}
