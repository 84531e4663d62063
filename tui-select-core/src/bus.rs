//! Terminal event polling and conversion into [`EventKind`]

use crate::event::EventKind;
use crossterm::event::{self, MouseEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

impl RawEvent {
    fn from_crossterm(evt: event::Event) -> Option<Self> {
        match evt {
            event::Event::Key(key) => Some(RawEvent::Key(key)),
            event::Event::Mouse(mouse) => Some(RawEvent::Mouse(mouse)),
            event::Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawn the event polling task with cancellation support
///
/// Polls crossterm and forwards events through `tx` until the token is
/// cancelled or the receiver is dropped.
///
/// # Arguments
/// * `tx` - Channel to send raw events
/// * `poll_timeout` - Timeout for each poll operation
/// * `loop_sleep` - Sleep duration between poll cycles
/// * `cancel_token` - Token to cancel the polling task
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut batch = 0;
                    while batch < MAX_EVENTS_PER_BATCH && event::poll(poll_timeout).unwrap_or(false) {
                        batch += 1;
                        let Some(raw) = event::read().ok().and_then(RawEvent::from_crossterm) else {
                            continue;
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: if mouse.kind == MouseEventKind::ScrollDown { 1 } else { -1 },
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent};

    fn mouse(kind: MouseEventKind) -> RawEvent {
        RawEvent::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 20,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_process_raw_event_key() {
        let kind = process_raw_event(RawEvent::Key(crate::testing::key("down")));
        assert!(matches!(kind, EventKind::Key(_)));
    }

    #[test]
    fn test_process_raw_event_scroll() {
        match process_raw_event(mouse(MouseEventKind::ScrollDown)) {
            EventKind::Scroll { column, row, delta } => {
                assert_eq!((column, row, delta), (10, 20, 1));
            }
            other => panic!("Expected Scroll event, got {other:?}"),
        }
        assert!(matches!(
            process_raw_event(mouse(MouseEventKind::ScrollUp)),
            EventKind::Scroll { delta: -1, .. }
        ));
    }

    #[test]
    fn test_process_raw_event_click_passes_through() {
        let kind = process_raw_event(mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(kind.left_click(), Some((10, 20)));
    }

    #[test]
    fn test_process_raw_event_resize() {
        let kind = process_raw_event(RawEvent::Resize(80, 24));
        assert!(matches!(kind, EventKind::Resize(80, 24)));
    }
}
