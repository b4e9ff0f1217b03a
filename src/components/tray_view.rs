use chrono::NaiveTime;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::store::record::format_reminder_time;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    ShowWindow,
    Quit,
}

impl TrayAction {
    pub const ALL: [TrayAction; 2] = [TrayAction::ShowWindow, TrayAction::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            TrayAction::ShowWindow => "Show Window",
            TrayAction::Quit => "Quit",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            TrayAction::ShowWindow => 's',
            TrayAction::Quit => 'q',
        }
    }
}

/// Compact stand-in for the main window while it is hidden.
pub struct TrayView;

impl TrayView {
    pub fn area(screen: Rect) -> Rect {
        let w = screen.width.min(36);
        let h = screen.height.min(6);
        Rect::new(
            screen.x + screen.width.saturating_sub(w),
            screen.y + screen.height.saturating_sub(h),
            w,
            h,
        )
    }

    pub fn render(frame: &mut Frame, screen: Rect, selected: usize, reminder: NaiveTime) {
        let t = theme::current();
        let area = Self::area(screen);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Medication Reminder ")
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(
                format!(" next: {} ", format_reminder_time(reminder)),
                t.dim,
            )))
            .borders(Borders::ALL)
            .border_style(t.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(Span::styled("Running in the tray", t.dim))];
        for (i, action) in TrayAction::ALL.iter().enumerate() {
            let style = if i == selected {
                t.selected
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", action.label()), style),
                Span::styled(
                    format!(" {}", action.shortcut()),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Menu item under (`column`, `row`), if any.
    pub fn hit(screen: Rect, column: u16, row: u16) -> Option<TrayAction> {
        let inner = Block::default().borders(Borders::ALL).inner(Self::area(screen));
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        // First line is the caption.
        let index = row.checked_sub(inner.y + 1)? as usize;
        TrayAction::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tray_sits_in_bottom_right_corner() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(TrayView::area(screen), Rect::new(44, 18, 36, 6));
    }

    #[test]
    fn menu_items_are_clickable() {
        let screen = Rect::new(0, 0, 80, 24);
        // Inner area starts at (45, 19); caption on row 19.
        assert_eq!(TrayView::hit(screen, 46, 19), None);
        assert_eq!(TrayView::hit(screen, 46, 20), Some(TrayAction::ShowWindow));
        assert_eq!(TrayView::hit(screen, 46, 21), Some(TrayAction::Quit));
        assert_eq!(TrayView::hit(screen, 10, 20), None);
    }
}
