pub mod clock;
pub mod ticker;

pub use clock::{ClockAction, ClockState, ReminderClock};
pub use ticker::Ticker;
