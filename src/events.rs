use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How long to wait for input before checking whether the dashboard stopped.
pub const INPUT_POLL: Duration = Duration::from_millis(250);

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Whether an event asks the dashboard to close (q, Esc or Ctrl-C).
pub fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

/// Block until the user quits or `finished` reports that the scheduler ended.
pub fn wait_for_quit(mut finished: impl FnMut() -> bool) -> Result<()> {
    while !finished() {
        if let Some(event) = poll_event(INPUT_POLL)? {
            if is_quit(&event) {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_other_input_ignored() {
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!is_quit(&Event::FocusGained));
        assert!(!is_quit(&Event::Resize(80, 24)));
    }

    #[test]
    fn test_wait_returns_once_finished() {
        assert!(wait_for_quit(|| true).is_ok());
    }
}
