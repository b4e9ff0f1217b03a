pub mod error;
pub mod record;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use record::{ReminderSetting, TakenRecord};
pub use store::Store;
