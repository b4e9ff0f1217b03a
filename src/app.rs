use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::components::confirm_dialog::{Answer, Prompt, PromptQueue};
use crate::components::month_view::{CalendarView, MonthView};
use crate::components::reminder_panel::{PanelFocus, ReminderPanel, TimeEditState};
use crate::components::tray_view::{TrayAction, TrayView};
use crate::config::Config;
use crate::reminder::clock::truncate_to_minute;
use crate::reminder::{ClockAction, ReminderClock};
use crate::store::record::format_reminder_time;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Hidden,
    Exit,
}

/// Window/tray shell. With a tray, closing the window only hides it.
#[derive(Debug, Clone)]
pub struct Shell {
    pub visibility: Visibility,
    pub tray_enabled: bool,
    pub tray_selected: usize,
}

impl Shell {
    pub fn new(tray_enabled: bool, start_hidden: bool) -> Self {
        let visibility = if tray_enabled && start_hidden {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        Self {
            visibility,
            tray_enabled,
            tray_selected: 0,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    pub fn request_close(&mut self) -> CloseOutcome {
        if self.tray_enabled {
            self.visibility = Visibility::Hidden;
            self.tray_selected = 0;
            CloseOutcome::Hidden
        } else {
            CloseOutcome::Exit
        }
    }

    pub fn show(&mut self) {
        self.visibility = Visibility::Visible;
    }

    pub fn tray_next(&mut self) {
        self.tray_selected = (self.tray_selected + 1) % TrayAction::ALL.len();
    }

    pub fn tray_prev(&mut self) {
        self.tray_selected = (self.tray_selected + TrayAction::ALL.len() - 1) % TrayAction::ALL.len();
    }

    pub fn tray_selection(&self) -> TrayAction {
        TrayAction::ALL[self.tray_selected % TrayAction::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    Panel(PanelFocus),
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Calendar => Focus::Panel(PanelFocus::Time),
            Focus::Panel(PanelFocus::Time) => Focus::Panel(PanelFocus::SetButton),
            Focus::Panel(PanelFocus::SetButton) => Focus::Panel(PanelFocus::TakeButton),
            Focus::Panel(PanelFocus::TakeButton) => Focus::Calendar,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::Calendar => Focus::Panel(PanelFocus::TakeButton),
            Focus::Panel(PanelFocus::Time) => Focus::Calendar,
            Focus::Panel(PanelFocus::SetButton) => Focus::Panel(PanelFocus::Time),
            Focus::Panel(PanelFocus::TakeButton) => Focus::Panel(PanelFocus::SetButton),
        }
    }

    pub fn panel(&self) -> Option<PanelFocus> {
        match self {
            Focus::Calendar => None,
            Focus::Panel(p) => Some(*p),
        }
    }
}

/// Screen regions from the last draw, used to route mouse clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub screen: Rect,
    pub calendar: Rect,
    pub panel: Rect,
}

pub struct App {
    pub running: bool,
    pub shell: Shell,
    pub focus: Focus,
    pub calendar: CalendarView,
    pub time_edit: TimeEditState,
    pub clock: ReminderClock,
    pub prompts: PromptQueue,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub hit_areas: HitAreas,
    store: Store,
}

impl App {
    /// `now` is the local wall-clock time at startup.
    pub fn new(store: Store, config: &Config, now: NaiveDateTime) -> Self {
        store.ensure_schema();

        let reminder_time = store
            .load_reminder_time()
            .unwrap_or_else(|| truncate_to_minute(now.time()));
        info!(time = %format_reminder_time(reminder_time), "daily reminder armed");

        let mut app = Self {
            running: true,
            shell: Shell::new(config.tray, config.start_hidden),
            focus: Focus::Calendar,
            calendar: CalendarView::new(now.date()),
            time_edit: TimeEditState::new(reminder_time),
            clock: ReminderClock::new(reminder_time),
            prompts: PromptQueue::default(),
            status_message: None,
            show_help: false,
            hit_areas: HitAreas::default(),
            store,
        };
        app.refresh_calendar();
        app
    }

    pub fn today(&self) -> NaiveDate {
        self.calendar.today
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn reminder_time(&self) -> NaiveTime {
        self.clock.target()
    }

    pub fn taken_today(&self) -> bool {
        self.store.is_taken(self.today())
    }

    /// Re-derive the highlighted dates from the store, from scratch.
    pub fn refresh_calendar(&mut self) {
        let dates = self.store.list_taken_dates();
        debug!(count = dates.len(), "calendar highlight refreshed");
        self.calendar.highlight(dates);
    }

    /// Periodic wake-up from the ticker.
    pub fn on_tick(&mut self, now: NaiveDateTime) {
        let date = now.date();
        if date != self.calendar.today {
            info!(%date, "day changed");
            self.calendar.today = date;
            self.refresh_calendar();
        }

        let taken_today = self.taken_today();
        if self.clock.on_tick(now.time(), taken_today) == ClockAction::Prompt {
            info!(%date, "daily reminder due");
            self.prompts.push(Prompt::daily(date));
        }
    }

    /// "Take Medication": ask about today unless it is already recorded.
    pub fn take_medication(&mut self) {
        if self.taken_today() {
            debug!("medication already taken for today, skipping reminder");
            self.status_message = Some("Medication already taken for today".to_string());
            return;
        }
        let today = self.today();
        self.prompts.push(Prompt::daily(today));
    }

    pub fn date_clicked(&mut self, date: NaiveDate) {
        self.calendar.selected_date = date;
        self.prompts.push(Prompt::manual(date));
    }

    pub fn click_selected_date(&mut self) {
        self.date_clicked(self.calendar.selected_date);
    }

    /// Answer the prompt at the front of the queue.
    pub fn answer_prompt(&mut self, answer: Answer) {
        let Some(prompt) = self.prompts.pop() else {
            return;
        };
        match answer {
            Answer::Yes => {
                self.store.mark_taken(prompt.date);
                self.refresh_calendar();
                self.status_message = Some(format!(
                    "Marked {} as taken",
                    prompt.date.format("%b %d, %Y")
                ));
            }
            Answer::No => debug!(date = %prompt.date, "prompt declined"),
        }
    }

    pub fn confirm_selected_answer(&mut self) {
        if let Some(answer) = self.prompts.active().map(|p| p.selected) {
            self.answer_prompt(answer);
        }
    }

    pub fn toggle_prompt_selection(&mut self) {
        if let Some(prompt) = self.prompts.active_mut() {
            prompt.selected = prompt.selected.toggled();
        }
    }

    /// "Set Reminder": arm the clock with the picker's time and persist it.
    pub fn set_reminder(&mut self) {
        let time = self.time_edit.time();
        self.clock.set_target(time);
        self.store.save_reminder_time(time);
        self.status_message = Some(format!("Reminder set for {}", format_reminder_time(time)));
    }

    pub fn activate_focused(&mut self) {
        match self.focus {
            Focus::Calendar => self.click_selected_date(),
            Focus::Panel(PanelFocus::Time) | Focus::Panel(PanelFocus::SetButton) => self.set_reminder(),
            Focus::Panel(PanelFocus::TakeButton) => self.take_medication(),
        }
    }

    pub fn request_close(&mut self) {
        match self.shell.request_close() {
            CloseOutcome::Hidden => info!("window hidden to tray"),
            CloseOutcome::Exit => self.quit(),
        }
    }

    pub fn show_window(&mut self) {
        self.shell.show();
    }

    /// Ends the process regardless of the tray.
    pub fn quit(&mut self) {
        info!("quitting");
        self.running = false;
    }

    pub fn tray_action(&mut self, action: TrayAction) {
        match action {
            TrayAction::ShowWindow => self.show_window(),
            TrayAction::Quit => self.quit(),
        }
    }

    /// Route a left click using the regions from the last draw.
    pub fn click(&mut self, column: u16, row: u16) {
        if self.shell.is_hidden() {
            if let Some(action) = TrayView::hit(self.hit_areas.screen, column, row) {
                self.tray_action(action);
            }
            return;
        }

        let areas = self.hit_areas;
        if let Some(date) = MonthView::date_at(areas.calendar, self.calendar.selected_date, column, row) {
            self.focus = Focus::Calendar;
            self.date_clicked(date);
        } else if let Some(target) = ReminderPanel::hit(areas.panel, column, row) {
            self.focus = Focus::Panel(target);
            match target {
                PanelFocus::Time => {}
                PanelFocus::SetButton => self.set_reminder(),
                PanelFocus::TakeButton => self.take_medication(),
            }
        }
    }
}
