use std::collections::VecDeque;

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

pub const DIALOG_TITLE: &str = "Medication Reminder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Raised by the reminder clock or the "Take Medication" button.
    Daily,
    /// Raised by clicking a date on the calendar.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn toggled(self) -> Self {
        match self {
            Answer::Yes => Answer::No,
            Answer::No => Answer::Yes,
        }
    }
}

/// A yes/no question about one date. The date is fixed when the prompt is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub date: NaiveDate,
    pub selected: Answer,
}

impl Prompt {
    pub fn daily(date: NaiveDate) -> Self {
        Self {
            kind: PromptKind::Daily,
            date,
            selected: Answer::Yes,
        }
    }

    pub fn manual(date: NaiveDate) -> Self {
        Self {
            kind: PromptKind::Manual,
            date,
            selected: Answer::Yes,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.kind {
            PromptKind::Daily => "Did you take your medication?",
            PromptKind::Manual => "Would you like to take medication for this day?",
        }
    }
}

/// Outstanding prompts. The front one is shown and holds input focus.
#[derive(Debug, Default)]
pub struct PromptQueue {
    pending: VecDeque<Prompt>,
}

impl PromptQueue {
    /// Returns false if an identical prompt is already waiting.
    pub fn push(&mut self, prompt: Prompt) -> bool {
        let duplicate = self
            .pending
            .iter()
            .any(|p| p.kind == prompt.kind && p.date == prompt.date);
        if duplicate {
            return false;
        }
        self.pending.push_back(prompt);
        true
    }

    pub fn active(&self) -> Option<&Prompt> {
        self.pending.front()
    }

    pub fn active_mut(&mut self) -> Option<&mut Prompt> {
        self.pending.front_mut()
    }

    pub fn pop(&mut self) -> Option<Prompt> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

pub struct ConfirmDialog;

impl ConfirmDialog {
    pub fn render(frame: &mut Frame, area: Rect, prompt: &Prompt, waiting: usize) {
        let t = theme::current();

        let popup_w = area.width.min(54).max(30);
        let popup_h = area.height.min(9).max(7);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let mut block = Block::default()
            .title(format!(" {} ", DIALOG_TITLE))
            .title_style(t.dialog.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(t.dialog);
        if waiting > 0 {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" +{} more ", waiting),
                t.dim,
            )));
        }

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // date
            Constraint::Min(1),    // question
            Constraint::Length(1), // buttons
            Constraint::Length(1), // help
        ])
        .split(inner);

        let date_line = Line::from(Span::styled(
            prompt.date.format("%A, %B %d, %Y").to_string(),
            t.dim,
        ));
        frame.render_widget(Paragraph::new(date_line).alignment(Alignment::Center), rows[0]);

        let question = Paragraph::new(prompt.message())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(question, rows[1]);

        let button = |label: &'static str, answer: Answer| {
            let style = if prompt.selected == answer {
                t.button_focused
            } else {
                t.button
            };
            Span::styled(label, style)
        };
        let buttons = Line::from(vec![
            button("  Yes  ", Answer::Yes),
            Span::raw("   "),
            button("  No  ", Answer::No),
        ]);
        frame.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), rows[2]);

        let help = Line::from(vec![
            Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Yes ", t.dim),
            Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":No ", t.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Confirm", t.dim),
        ]);
        frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), rows[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn identical_prompts_are_not_queued_twice() {
        let mut queue = PromptQueue::default();
        assert!(queue.push(Prompt::daily(date(1))));
        assert!(!queue.push(Prompt::daily(date(1))));
        assert!(queue.push(Prompt::manual(date(1))));
        assert!(queue.push(Prompt::daily(date(2))));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn prompts_are_answered_in_order() {
        let mut queue = PromptQueue::default();
        queue.push(Prompt::manual(date(5)));
        queue.push(Prompt::daily(date(6)));

        assert_eq!(queue.active().map(|p| p.date), Some(date(5)));
        assert_eq!(queue.pop().map(|p| p.kind), Some(PromptKind::Manual));
        assert_eq!(queue.active().map(|p| p.kind), Some(PromptKind::Daily));
        queue.pop();
        assert!(queue.is_empty());
    }

    #[test]
    fn messages_depend_on_origin() {
        assert_eq!(Prompt::daily(date(1)).message(), "Did you take your medication?");
        assert_eq!(
            Prompt::manual(date(1)).message(),
            "Would you like to take medication for this day?"
        );
        assert_eq!(Answer::Yes.toggled(), Answer::No);
    }
}
