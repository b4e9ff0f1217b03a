use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Input the app reacts to; everything else crossterm reports is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Click { column: u16, row: u16 },
    Resize,
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Wait up to `timeout` for the next relevant input.
///
/// Dropped events (mouse motion, releases) don't extend the wait.
pub fn next_input(timeout: Duration) -> color_eyre::Result<Option<InputEvent>> {
    let deadline = Instant::now() + timeout;
    while let Some(wait) = remaining(deadline, Instant::now()) {
        let Some(ev) = poll_event(wait)? else {
            return Ok(None);
        };
        if let Some(input) = translate(ev) {
            return Ok(Some(input));
        }
    }
    Ok(None)
}

/// Time left before `deadline`, or `None` once it has passed.
fn remaining(deadline: Instant, now: Instant) -> Option<Duration> {
    let left = deadline.saturating_duration_since(now);
    (!left.is_zero()).then_some(left)
}

fn translate(ev: Event) -> Option<InputEvent> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key(key)),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(InputEvent::Click {
                column: mouse.column,
                row: mouse.row,
            })
        }
        Event::Resize(_, _) => Some(InputEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent};

    #[test]
    fn only_presses_and_left_clicks_pass() {
        let press = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        assert_eq!(translate(Event::Key(press)), Some(InputEvent::Key(press)));

        let mut release = press;
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            translate(Event::Mouse(click)),
            Some(InputEvent::Click { column: 4, row: 7 })
        );

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..click
        };
        assert_eq!(translate(Event::Mouse(scroll)), None);
    }

    #[test]
    fn remaining_time_shrinks_to_nothing() {
        let start = Instant::now();
        let deadline = start + Duration::from_millis(250);

        assert_eq!(remaining(deadline, start), Some(Duration::from_millis(250)));
        assert_eq!(
            remaining(deadline, start + Duration::from_millis(200)),
            Some(Duration::from_millis(50))
        );
        assert_eq!(remaining(deadline, deadline), None);
        assert_eq!(remaining(deadline, deadline + Duration::from_secs(1)), None);
    }
}
