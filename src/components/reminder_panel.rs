use chrono::{NaiveTime, Timelike};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::store::record::format_reminder_time;
use crate::theme;

pub const SET_REMINDER_LABEL: &str = "[ Set Reminder ]";
pub const TAKE_MEDICATION_LABEL: &str = "[ Take Medication ]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSegment {
    Hour,
    Minute,
    Meridiem,
}

impl TimeSegment {
    pub fn next(&self) -> Self {
        match self {
            TimeSegment::Hour => TimeSegment::Minute,
            TimeSegment::Minute => TimeSegment::Meridiem,
            TimeSegment::Meridiem => TimeSegment::Hour,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            TimeSegment::Hour => TimeSegment::Meridiem,
            TimeSegment::Minute => TimeSegment::Hour,
            TimeSegment::Meridiem => TimeSegment::Minute,
        }
    }
}

/// The `hh:mm AP` time picker. Edits stay local until "Set Reminder".
#[derive(Debug, Clone)]
pub struct TimeEditState {
    time: NaiveTime,
    pub segment: TimeSegment,
}

impl TimeEditState {
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time: NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time),
            segment: TimeSegment::Hour,
        }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        *self = Self {
            segment: self.segment,
            ..Self::new(time)
        };
    }

    pub fn increment(&mut self) {
        self.step(1);
    }

    pub fn decrement(&mut self) {
        self.step(-1);
    }

    /// Hours wrap around the day, minutes wrap within the hour.
    fn step(&mut self, delta: i32) {
        let (h, m) = (self.time.hour() as i32, self.time.minute() as i32);
        let (h, m) = match self.segment {
            TimeSegment::Hour => ((h + delta).rem_euclid(24), m),
            TimeSegment::Minute => (h, (m + delta).rem_euclid(60)),
            TimeSegment::Meridiem => ((h + 12).rem_euclid(24), m),
        };
        if let Some(t) = NaiveTime::from_hms_opt(h as u32, m as u32, 0) {
            self.time = t;
        }
    }

    pub fn display(&self) -> String {
        format_reminder_time(self.time)
    }
}

/// Where the panel's clickable pieces land for a given area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub time: Rect,
    pub set_button: Rect,
    pub take_button: Rect,
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Time,
    SetButton,
    TakeButton,
}

pub struct PanelInfo<'a> {
    pub edit: &'a TimeEditState,
    pub active_reminder: NaiveTime,
    pub taken_today: bool,
    pub focus: Option<PanelFocus>,
    pub store_connected: bool,
}

pub struct ReminderPanel;

impl ReminderPanel {
    fn block() -> Block<'static> {
        Block::default()
            .title(" Reminder ")
            .borders(Borders::ALL)
    }

    pub fn layout(area: Rect) -> PanelLayout {
        let inner = Self::block().inner(area);
        let rows = Layout::vertical([
            Constraint::Length(1), // time picker
            Constraint::Length(1),
            Constraint::Length(1), // set reminder
            Constraint::Length(1), // take medication
            Constraint::Length(1),
            Constraint::Min(0), // status
        ])
        .split(inner);

        let button = |row: Rect, label: &str| Rect {
            width: (label.chars().count() as u16).min(row.width),
            ..row
        };

        PanelLayout {
            time: rows[0],
            set_button: button(rows[2], SET_REMINDER_LABEL),
            take_button: button(rows[3], TAKE_MEDICATION_LABEL),
            status: rows[5],
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, info: &PanelInfo) {
        let t = theme::current();
        let block = Self::block()
            .title_style(t.header)
            .border_style(if info.focus.is_some() { t.focus_border } else { t.border });
        frame.render_widget(block, area);

        let layout = Self::layout(area);

        frame.render_widget(
            Paragraph::new(time_picker_line(info.edit, info.focus == Some(PanelFocus::Time))),
            layout.time,
        );

        let button_style = |focus: PanelFocus| {
            if info.focus == Some(focus) {
                t.button_focused
            } else {
                t.button
            }
        };
        frame.render_widget(
            Paragraph::new(Span::styled(SET_REMINDER_LABEL, button_style(PanelFocus::SetButton))),
            layout.set_button,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                TAKE_MEDICATION_LABEL,
                button_style(PanelFocus::TakeButton),
            )),
            layout.take_button,
        );

        let (today_text, today_style) = if info.taken_today {
            ("taken", t.taken)
        } else {
            ("not taken yet", Style::default().add_modifier(Modifier::BOLD))
        };
        let mut status = vec![
            Line::from(vec![
                Span::styled("Daily at ", t.dim),
                Span::raw(format_reminder_time(info.active_reminder)),
            ]),
            Line::from(vec![
                Span::styled("Today    ", t.dim),
                Span::styled(today_text, today_style),
            ]),
        ];
        if !info.store_connected {
            status.push(Line::from(Span::styled(
                "Database unavailable; changes are not saved",
                Style::default().fg(ratatui::style::Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(status), layout.status);
    }

    pub fn hit(area: Rect, column: u16, row: u16) -> Option<PanelFocus> {
        let layout = Self::layout(area);
        let pos = Position::new(column, row);
        if layout.set_button.contains(pos) {
            Some(PanelFocus::SetButton)
        } else if layout.take_button.contains(pos) {
            Some(PanelFocus::TakeButton)
        } else if layout.time.contains(pos) {
            Some(PanelFocus::Time)
        } else {
            None
        }
    }
}

fn time_picker_line(edit: &TimeEditState, focused: bool) -> Line<'static> {
    let t = theme::current();
    let text = edit.display();
    // "hh:mm AP"
    let (hour, rest) = text.split_at(2);
    let minute = &rest[1..3];
    let meridiem = &rest[4..];

    let seg = |value: &str, segment: TimeSegment| {
        let style = if focused && edit.segment == segment {
            t.selected
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Span::styled(value.to_string(), style)
    };

    Line::from(vec![
        Span::styled("Time  ", t.dim),
        seg(hour, TimeSegment::Hour),
        Span::raw(":"),
        seg(minute, TimeSegment::Minute),
        Span::raw(" "),
        seg(meridiem, TimeSegment::Meridiem),
    ])
}
