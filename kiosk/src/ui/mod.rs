//! Terminal front end
//!
//! `App` owns the session state and maps keys to flow operations,
//! `screens` draws it. `run` takes over the terminal until the customer
//! quits.

pub mod app;
pub mod screens;

pub use app::{App, Command};

use crate::core::KioskResult;
use crate::flow::OrderSubmitter;
use brasa_link::LinkOpener;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Run the kiosk until the customer quits
pub async fn run<O: LinkOpener>(app: &mut App, submitter: &OrderSubmitter<O>) -> KioskResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, submitter).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<O: LinkOpener>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    submitter: &OrderSubmitter<O>,
) -> KioskResult<()> {
    loop {
        terminal.draw(|f| screens::render(f, app))?;

        if app.tick(Instant::now()) {
            continue;
        }

        let timeout = Duration::from_millis(100);
        if !event::poll(timeout)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            continue;
        }

        match app.handle_key(key) {
            Command::None => {}
            Command::Quit => return Ok(()),
            Command::Submit => {
                let Some(form) = app.form.clone() else {
                    continue;
                };
                app.sending = true;
                terminal.draw(|f| screens::render(f, app))?;

                let result = submitter.submit(&form, app.flow.cart()).await;
                app.on_submitted(result);
            }
        }
    }
}
