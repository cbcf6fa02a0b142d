mod app;
mod cli;
mod logging;
mod models;
mod prefs;
mod store;
mod theme;
mod ui;
mod utils;

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{error, info};
use ratatui::prelude::*;

use app::App;
use cli::{CliCommand, CliConfig};
use prefs::Preferences;
use store::EntryStore;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let config = match cli::parse_args() {
        Ok(CliCommand::Run(config)) => config,
        Ok(CliCommand::Help) => {
            cli::print_usage();
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("mood-tui {}", cli::VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            cli::print_usage();
            std::process::exit(2);
        }
    };

    // Keep the handle alive until exit so buffered records are flushed
    let _logger = match logging::init_logging(&config.log_level, &config.log_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let app = open_app(&config)?;

    install_terminal_restore_hook();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, app);

    // Restore terminal
    restore_terminal()?;

    let app = result?;
    app.shutdown().map_err(|e| {
        error!("event=app_stop module=main status=error error={}", e);
        io::Error::other(e)
    })?;
    info!("event=app_stop module=main status=ok");
    Ok(())
}

/// Open the database and preferences named by `config`
fn open_app(config: &CliConfig) -> io::Result<App> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let store = EntryStore::open(&config.db_path).map_err(|e| {
        eprintln!(
            "Error: cannot open database {}: {}",
            config.db_path.display(),
            e
        );
        io::Error::other(e)
    })?;
    let prefs = Preferences::load_or_default(&config.config_path);

    // An unknown width falls back to the default wrap width
    let width = crossterm::terminal::size()
        .map(|(cols, _)| ui::list_viewport_width(cols))
        .unwrap_or(0);

    Ok(App::new(
        store,
        prefs,
        Some(config.config_path.clone()),
        width,
    ))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Leave raw mode before the default hook prints the panic message
fn install_terminal_restore_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        previous_hook(panic_info);
    }));
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> io::Result<App> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(cols, _) => {
                    app.note_resize(ui::list_viewport_width(cols), Instant::now());
                }
                Event::Paste(text) => app.paste(&text),
                _ => {}
            }
        }

        app.apply_pending_resize(Instant::now());

        if app.should_quit {
            return Ok(app);
        }
    }
}
