//! Live terminal UI: a 20ms frame loop reading from a dedicated input
//! thread, driving the incremental query engine, and rendering the
//! three editable fields plus a streaming result list.

mod app;
mod input_thread;
mod render;

use std::io;

use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use anagram_live::dictionary::Dictionary;
use anagram_live::error::Result;

pub use app::App;

/// Step budget spent on the search per frame before rendering. Chosen to
/// keep the UI responsive at a 20ms tick on typical hardware; not
/// user-configurable.
const STEP_BUDGET_PER_FRAME: usize = 20_000;
const FRAME_PERIOD_MS: u64 = 20;

pub fn run(dict: Dictionary) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::event::EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = input_thread::spawn();
    let mut app = App::new(dict);

    let result = (|| -> Result<()> {
        loop {
            {
                let mut queue = events.lock().unwrap();
                for event in queue.drain(..) {
                    app.handle_event(event);
                }
            }
            if app.should_quit {
                break;
            }
            app.tick(STEP_BUDGET_PER_FRAME);
            terminal.draw(|frame| render::draw(frame, &app))?;
            std::thread::sleep(std::time::Duration::from_millis(FRAME_PERIOD_MS));
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;

    result
}
