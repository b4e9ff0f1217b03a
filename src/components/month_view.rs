use std::collections::BTreeSet;

use chrono::{Datelike, Months, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: u16 = 5;

/// Month grid state: the cursor, today, and the dates painted as taken.
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    highlighted: BTreeSet<NaiveDate>,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            today,
            highlighted: BTreeSet::new(),
        }
    }

    /// Replace the highlighted set. Dates not in `dates` lose their highlight.
    pub fn highlight(&mut self, dates: impl IntoIterator<Item = NaiveDate>) {
        self.highlighted = dates.into_iter().collect();
    }

    pub fn highlighted(&self) -> &BTreeSet<NaiveDate> {
        &self.highlighted
    }

    pub fn is_highlighted(&self, date: NaiveDate) -> bool {
        self.highlighted.contains(&date)
    }

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
    }

    pub fn next_week(&mut self) {
        self.selected_date += chrono::Duration::weeks(1);
    }

    pub fn prev_week(&mut self) {
        self.selected_date -= chrono::Duration::weeks(1);
    }

    /// Keeps the day of month where possible, clamping to the month's end.
    pub fn next_month(&mut self) {
        self.selected_date = self
            .selected_date
            .checked_add_months(Months::new(1))
            .unwrap_or(self.selected_date);
    }

    pub fn prev_month(&mut self) {
        self.selected_date = self
            .selected_date
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.selected_date);
    }

    pub fn go_to_today(&mut self) {
        self.selected_date = self.today;
    }
}

pub struct MonthView;

impl MonthView {
    pub fn render(frame: &mut Frame, area: Rect, view: &CalendarView, focused: bool) {
        let t = theme::current();
        let year = view.selected_date.year();
        let month = view.selected_date.month();

        let title = format!(" {} {} ", month_name(month), year);

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(
                format!(" {} days taken ", taken_in_month(view, year, month)),
                t.dim,
            )))
            .borders(Borders::ALL)
            .border_style(if focused { t.focus_border } else { t.border });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Header row
        let header_cells: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| Span::styled(format!("{:^5}", d), t.header))
            .collect();
        let header = Line::from(header_cells);

        let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return;
        };
        let first_weekday = first_day.weekday().num_days_from_sunday() as i32;
        let days = days_in_month(year, month) as i32;

        // Build weeks
        let mut weeks: Vec<Line> = Vec::new();
        let mut current_day: i32 = 1 - first_weekday;

        while current_day <= days {
            let mut cells: Vec<Span> = Vec::new();
            for _ in 0..7 {
                match NaiveDate::from_ymd_opt(year, month, current_day.max(0) as u32) {
                    Some(date) if current_day >= 1 => cells.push(day_cell(view, date)),
                    _ => cells.push(Span::raw("     ")),
                }
                current_day += 1;
            }
            weeks.push(Line::from(cells));
        }

        // Layout: header + weeks
        let mut constraints = vec![Constraint::Length(1)];
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }

    /// The date drawn at terminal cell (`column`, `row`) when the month of
    /// `shown` was rendered into `area`.
    pub fn date_at(area: Rect, shown: NaiveDate, column: u16, row: u16) -> Option<NaiveDate> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if column < inner.x || row <= inner.y {
            return None;
        }
        let col = (column - inner.x) / CELL_WIDTH;
        if col >= 7 || column >= inner.x + inner.width || row >= inner.y + inner.height {
            return None;
        }
        let week = (row - inner.y - 1) as i32;

        let first_day = NaiveDate::from_ymd_opt(shown.year(), shown.month(), 1)?;
        let first_weekday = first_day.weekday().num_days_from_sunday() as i32;
        let day = week * 7 + col as i32 + 1 - first_weekday;
        if day < 1 || day > days_in_month(shown.year(), shown.month()) as i32 {
            return None;
        }
        NaiveDate::from_ymd_opt(shown.year(), shown.month(), day as u32)
    }
}

fn day_cell(view: &CalendarView, date: NaiveDate) -> Span<'static> {
    let t = theme::current();
    let taken = view.is_highlighted(date);
    let marker = if taken { '\u{2713}' } else { ' ' };
    let text = format!(" {:>2}{} ", date.day(), marker);

    let style = if date == view.today && date == view.selected_date {
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(ratatui::style::Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if date == view.selected_date {
        t.selected
    } else if date == view.today {
        t.today
    } else if taken {
        t.taken
    } else {
        Style::default()
    };

    Span::styled(text, style)
}

fn taken_in_month(view: &CalendarView, year: i32, month: u32) -> usize {
    view.highlighted()
        .iter()
        .filter(|d| d.year() == year && d.month() == month)
        .count()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
