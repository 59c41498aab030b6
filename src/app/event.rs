//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum.  Input is read on a blocking
//! task and frame ticks come from a separate interval, so a steady stream of
//! mouse motion never starves the animation clock.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// How long the reader blocks before checking whether the app went away.
const READ_POLL: Duration = Duration::from_millis(250);

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal lost focus: the pointer has left the page.
    FocusLost,
    /// Frame tick, stamped when it fired.
    Tick(Instant),
}

fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        CtEvent::FocusLost => Some(AppEvent::FocusLost),
        _ => None,
    }
}

/// Spawns the input reader and the frame ticker; both feed the returned
/// channel until it is dropped.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    let input_tx = tx.clone();
    tokio::task::spawn_blocking(move || {
        while !input_tx.is_closed() {
            if !event::poll(READ_POLL).unwrap_or(false) {
                continue;
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            if let Some(app_event) = translate(ev) {
                if input_tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick(Instant::now())).is_err() {
                break;
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_translate_keeps_relevant_events() {
        let key = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert!(matches!(translate(CtEvent::Key(key)), Some(AppEvent::Key(k)) if k == key));
        assert!(matches!(translate(CtEvent::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
        assert!(matches!(translate(CtEvent::FocusLost), Some(AppEvent::FocusLost)));
        assert!(translate(CtEvent::FocusGained).is_none());
    }
}
