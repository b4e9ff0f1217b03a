use chrono::{NaiveTime, Timelike};

/// Debounce guard for the daily prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    Idle,
    /// A prompt was raised during the current matching minute.
    ShownThisWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    None,
    Prompt,
}

/// The in-memory reminder state: the daily target and the debounce guard.
///
/// Fed by periodic ticks. The prompt fires for the first tick that lands in
/// the target minute, and not again until a tick outside that minute has
/// re-armed the guard.
#[derive(Debug, Clone)]
pub struct ReminderClock {
    target: NaiveTime,
    state: ClockState,
}

impl ReminderClock {
    pub fn new(target: NaiveTime) -> Self {
        Self {
            target: truncate_to_minute(target),
            state: ClockState::Idle,
        }
    }

    pub fn target(&self) -> NaiveTime {
        self.target
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn set_target(&mut self, target: NaiveTime) {
        self.target = truncate_to_minute(target);
        self.state = ClockState::Idle;
    }

    pub fn matches(&self, now: NaiveTime) -> bool {
        now.hour() == self.target.hour() && now.minute() == self.target.minute()
    }

    pub fn on_tick(&mut self, now: NaiveTime, taken_today: bool) -> ClockAction {
        if !self.matches(now) {
            self.state = ClockState::Idle;
            return ClockAction::None;
        }
        if taken_today {
            return ClockAction::None;
        }
        match self.state {
            ClockState::Idle => {
                self.state = ClockState::ShownThisWindow;
                ClockAction::Prompt
            }
            ClockState::ShownThisWindow => ClockAction::None,
        }
    }
}

pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn prompts_once_per_matching_minute() {
        let mut clock = ReminderClock::new(at(9, 0, 0));

        assert_eq!(clock.on_tick(at(9, 0, 30), false), ClockAction::Prompt);
        assert_eq!(clock.state(), ClockState::ShownThisWindow);

        assert_eq!(clock.on_tick(at(9, 0, 45), false), ClockAction::None);
        assert_eq!(clock.state(), ClockState::ShownThisWindow);

        assert_eq!(clock.on_tick(at(9, 1, 0), false), ClockAction::None);
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn taken_today_suppresses_prompt() {
        let mut clock = ReminderClock::new(at(9, 0, 0));
        assert_eq!(clock.on_tick(at(9, 0, 5), true), ClockAction::None);
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn non_matching_minutes_never_prompt() {
        let mut clock = ReminderClock::new(at(21, 30, 0));
        for (h, m) in [(9, 30), (21, 29), (21, 31), (22, 30)] {
            assert_eq!(clock.on_tick(at(h, m, 0), false), ClockAction::None);
        }
    }

    #[test]
    fn rearms_on_next_day() {
        let mut clock = ReminderClock::new(at(7, 45, 0));
        assert_eq!(clock.on_tick(at(7, 45, 10), false), ClockAction::Prompt);
        clock.on_tick(at(12, 0, 0), false);
        assert_eq!(clock.on_tick(at(7, 45, 20), false), ClockAction::Prompt);
    }

    #[test]
    fn seconds_in_target_are_ignored() {
        let mut clock = ReminderClock::new(at(9, 0, 59));
        assert_eq!(clock.target(), at(9, 0, 0));
        assert_eq!(clock.on_tick(at(9, 0, 1), false), ClockAction::Prompt);
    }

    #[test]
    fn changing_target_resets_guard() {
        let mut clock = ReminderClock::new(at(9, 0, 0));
        clock.on_tick(at(9, 0, 10), false);
        assert_eq!(clock.state(), ClockState::ShownThisWindow);

        clock.set_target(at(9, 0, 0));
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.on_tick(at(9, 0, 20), false), ClockAction::Prompt);
    }
}
