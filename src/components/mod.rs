pub mod confirm_dialog;
pub mod month_view;
pub mod reminder_panel;
pub mod status_bar;
pub mod tray_view;

pub use confirm_dialog::ConfirmDialog;
pub use month_view::MonthView;
pub use reminder_panel::ReminderPanel;
pub use status_bar::StatusBar;
pub use tray_view::TrayView;
