use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus};
use crate::components::confirm_dialog::Answer;
use crate::components::reminder_panel::PanelFocus;
use crate::components::tray_view::TrayAction;
use crate::event::InputEvent;

/// Route one input event. An open prompt swallows everything, then help,
/// then the tray, then the main window.
pub fn handle_input(app: &mut App, input: InputEvent) {
    match input {
        InputEvent::Resize => {}
        InputEvent::Click { column, row } => {
            // The dialog and help overlay are modal.
            if app.prompts.is_empty() && !app.show_help {
                app.click(column, row);
            }
        }
        InputEvent::Key(key) => handle_key(app, key),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear status message on any key
    app.status_message = None;

    if !app.prompts.is_empty() {
        handle_prompt_input(app, key.code);
        return;
    }

    if app.show_help {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            app.show_help = false;
        }
        return;
    }

    if app.shell.is_hidden() {
        handle_tray_input(app, key.code, key.modifiers);
    } else {
        handle_normal_input(app, key.code, key.modifiers);
    }
}

fn handle_prompt_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_prompt(Answer::Yes),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_prompt(Answer::No),
        KeyCode::Left
        | KeyCode::Right
        | KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Char('h')
        | KeyCode::Char('l') => app.toggle_prompt_selection(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm_selected_answer(),
        _ => {}
    }
}

fn handle_tray_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.quit(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.shell.tray_prev(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.shell.tray_next(),
        (KeyCode::Enter, _) => {
            let action = app.shell.tray_selection();
            app.tray_action(action);
        }
        (KeyCode::Char(c), _) => {
            if let Some(action) = TrayAction::ALL.iter().find(|a| a.shortcut() == c) {
                app.tray_action(*action);
            }
        }
        _ => {}
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.request_close();
            return;
        }
        (KeyCode::Tab, _) => {
            app.focus = app.focus.next();
            return;
        }
        (KeyCode::BackTab, _) => {
            app.focus = app.focus.prev();
            return;
        }
        (KeyCode::Char('?'), _) => {
            app.show_help = true;
            return;
        }
        (KeyCode::Char('s'), _) => {
            app.set_reminder();
            return;
        }
        (KeyCode::Char('m'), _) => {
            app.take_medication();
            return;
        }
        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => {
            app.activate_focused();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Calendar => handle_calendar_input(app, code),
        Focus::Panel(PanelFocus::Time) => handle_time_input(app, code),
        Focus::Panel(_) => {}
    }
}

fn handle_calendar_input(app: &mut App, code: KeyCode) {
    let calendar = &mut app.calendar;
    match code {
        KeyCode::Left | KeyCode::Char('h') => calendar.prev_day(),
        KeyCode::Right | KeyCode::Char('l') => calendar.next_day(),
        KeyCode::Up | KeyCode::Char('k') => calendar.prev_week(),
        KeyCode::Down | KeyCode::Char('j') => calendar.next_week(),
        KeyCode::Char('[') => calendar.prev_month(),
        KeyCode::Char(']') => calendar.next_month(),
        KeyCode::Char('t') => calendar.go_to_today(),
        _ => {}
    }
}

fn handle_time_input(app: &mut App, code: KeyCode) {
    let edit = &mut app.time_edit;
    match code {
        KeyCode::Left | KeyCode::Char('h') => edit.segment = edit.segment.prev(),
        KeyCode::Right | KeyCode::Char('l') => edit.segment = edit.segment.next(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('+') => edit.increment(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('-') => edit.decrement(),
        _ => {}
    }
}
