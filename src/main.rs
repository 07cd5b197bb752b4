use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use testme::credential::{CredentialStore, MemoryCredentialStore, SqliteCredentialStore};
use testme::db::init_db;
use testme::{logger, ui, App, AppConfig, QuizSession};

fn open_store(config: &AppConfig) -> Box<dyn CredentialStore> {
    match init_db(&config.db_path()) {
        Ok(conn) => Box::new(SqliteCredentialStore::new(conn)),
        Err(e) => {
            logger::log(&format!(
                "Failed to open database at {}: {}. Credential will not be saved.",
                config.db_path().display(),
                e
            ));
            Box::new(MemoryCredentialStore::default())
        }
    }
}

fn build_app() -> App {
    let config = AppConfig::from_env();
    logger::init(&config.log_file);
    logger::log("TestMe starting");

    let store = open_store(&config);
    let session = QuizSession::load(store.as_ref()).unwrap_or_else(|e| {
        logger::log(&format!("Failed to load stored credential: {}", e));
        QuizSession::new()
    });

    let mut app = App::new(session, store, config);
    app.ensure_worker();
    app
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        app.poll_ai_responses();

        if app.should_quit {
            logger::log("TestMe exiting");
            return Ok(());
        }
    }
}

fn main() -> io::Result<()> {
    let mut app = build_app();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
