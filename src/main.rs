use sandtail::cli::{init_config, run_command, Cli};
use sandtail::config::Config;
use sandtail::event_handler::EventHandler;
use sandtail::ui::{self, App};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let config_path = &cli.config;

    // Handle --init flag
    if cli.init {
        return init_config(config_path);
    }

    // Load config
    let mut config = Config::from_file(config_path)?;
    config.config_path = Some(std::path::PathBuf::from(config_path));
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }

    // One-shot subcommands run without the TUI
    if let Some(command) = &cli.command {
        return run_command(command, &config);
    }

    // Create app state and load the container list before entering the
    // alternate screen, so the picker is populated on the first draw.
    // A failed refresh lands in the status bar, same as pressing r
    let mut app = App::new();
    EventHandler::new(&mut app, &config).refresh_containers();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // TUI event loop
    let result = run_app(&mut terminal, &mut app, &config).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    config: &Config,
) -> anyhow::Result<()> {
    loop {
        // Drain pending stream events into the live session
        app.pump();

        // Draw UI
        terminal.draw(|f| {
            ui::draw(f, app);
        })?;

        if app.should_quit {
            break;
        }

        // Handle input with short timeout
        // Note: In raw mode, Ctrl+C is captured as a keyboard event, not a signal,
        // so we handle it in the event handler instead of using tokio::signal::ctrl_c()
        tokio::select! {
            _ = tokio::time::sleep(tokio::time::Duration::from_millis(100)) => {
                // Check for keyboard input
                if event::poll(std::time::Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        let mut event_handler = EventHandler::new(app, config);
                        if event_handler.handle_key_event(key)? {
                            break; // Quit was requested
                        }
                    }
                }
            }
        }

        // Small delay to prevent busy-looping
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    Ok(())
}
