use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::Focus;
use crate::components::reminder_panel::PanelFocus;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, focus: Focus, message: Option<&str>) {
        let t = theme::current();
        let w = area.width as usize;

        let focus_str = match focus {
            Focus::Calendar => "[Calendar]",
            Focus::Panel(PanelFocus::Time) => "[Time]",
            Focus::Panel(PanelFocus::SetButton) => "[Set Reminder]",
            Focus::Panel(PanelFocus::TakeButton) => "[Take Medication]",
        };

        // Show status message if present, otherwise show context-aware hints
        let right_text = if let Some(msg) = message {
            format!(" {} ", msg)
        } else {
            match focus {
                Focus::Calendar if w >= 80 => {
                    " hjkl:Nav [/]:Mon t:Today Enter:Mark Tab:Focus s:Set m:Take ?:Help q:Hide".to_string()
                }
                Focus::Panel(PanelFocus::Time) if w >= 60 => {
                    " \u{2190}\u{2192}:Field \u{2191}\u{2193}:Adjust Enter:Set Tab:Focus q:Hide".to_string()
                }
                _ if w >= 40 => " Tab:Focus Enter:Select ?:Help q:Hide".to_string(),
                _ => " ?:Help".to_string(),
            }
        };

        let left = format!(" {} ", focus_str);
        let padding = " ".repeat(w.saturating_sub(left.len() + right_text.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, t.status),
            Span::styled(padding, t.status),
            Span::styled(right_text, t.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(t.status), area);
    }
}
