use std::time::{Duration, Instant};

use chrono::Local;
use color_eyre::Result;
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::{info, warn};

use medication_reminder::app::{App, Focus, HitAreas};
use medication_reminder::components::{self, reminder_panel::PanelInfo};
use medication_reminder::config::Config;
use medication_reminder::event;
use medication_reminder::input::handle_input;
use medication_reminder::reminder::Ticker;
use medication_reminder::store::Store;
use medication_reminder::{logging, theme, tui};

/// Upper bound on how long the loop sleeps waiting for input.
const FRAME_TIMEOUT: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, config_error) = Config::load();
    logging::init(&config);
    if let Some(e) = config_error {
        warn!(error = %e, "using default config");
    }
    theme::init(&config.theme);

    info!(database = %config.database.display(), "starting medication reminder");
    let store = Store::open(&config.database);
    let mut app = App::new(store, &config, Local::now().naive_local());

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, &config);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App, config: &Config) -> Result<()> {
    let mut ticker = Ticker::new(config.check_interval_secs, Instant::now());
    info!(interval = ?ticker.interval(), "reminder clock started");

    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        let timeout = ticker.until_next(Instant::now()).min(FRAME_TIMEOUT);
        if let Some(input) = event::next_input(timeout)? {
            handle_input(app, input);
        }

        if ticker.poll(Instant::now()) {
            app.on_tick(Local::now().naive_local());
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    app.hit_areas.screen = area;

    if app.shell.is_hidden() {
        components::TrayView::render(frame, area, app.shell.tray_selected, app.reminder_time());
    } else {
        // Main layout: content + status bar
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let (calendar_area, panel_area) = split_content(layout[0]);

        components::MonthView::render(
            frame,
            calendar_area,
            &app.calendar,
            app.focus == Focus::Calendar,
        );
        components::ReminderPanel::render(
            frame,
            panel_area,
            &PanelInfo {
                edit: &app.time_edit,
                active_reminder: app.reminder_time(),
                taken_today: app.calendar.is_highlighted(app.today()),
                focus: app.focus.panel(),
                store_connected: app.store().is_connected(),
            },
        );
        app.hit_areas = HitAreas {
            screen: area,
            calendar: calendar_area,
            panel: panel_area,
        };

        components::StatusBar::render(frame, layout[1], app.focus, app.status_message.as_deref());

        if app.show_help {
            render_help(frame, area);
        }
    }

    // The dialog sits above everything, including the tray view.
    if let Some(prompt) = app.prompts.active() {
        components::ConfirmDialog::render(frame, area, prompt, app.prompts.len() - 1);
    }
}

/// Calendar beside the reminder panel when wide enough, stacked otherwise.
fn split_content(area: Rect) -> (Rect, Rect) {
    // 7 cells of 5 columns plus borders
    const GRID_W: u16 = 37;
    const GRID_H: u16 = 9;

    if area.width >= GRID_W + 30 {
        let cols = Layout::horizontal([Constraint::Length(GRID_W), Constraint::Min(30)]).split(area);
        (cols[0], cols[1])
    } else {
        let rows = Layout::vertical([Constraint::Length(GRID_H), Constraint::Min(8)]).split(area);
        (rows[0], rows[1])
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let t = theme::current();
    let popup_w = area.width.min(52).max(30);
    let popup_h = area.height.min(21).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(t.dialog.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(t.dialog);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme::KEY_STYLE;
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Calendar", section_style)),
        entry("h/l", "Previous/next day"),
        entry("j/k", "Next/previous week"),
        entry("[/]", "Previous/next month"),
        entry("t", "Jump to today"),
        entry("Enter", "Mark medication for a day"),
        Line::from(""),
        Line::from(Span::styled("Reminder", section_style)),
        entry("Tab", "Move focus"),
        entry("\u{2190}/\u{2192}", "Pick hour, minute or AM/PM"),
        entry("\u{2191}/\u{2193}", "Adjust the time"),
        entry("s", "Set reminder"),
        entry("m", "Take medication now"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("Esc     ", key_style),
            Span::styled("Hide to tray", desc_style),
        ]),
        Line::from(Span::styled(
            "  In the tray: s shows the window, q quits",
            theme::DIM_STYLE,
        )),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
