use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crudlab::app::{App, ScreenKind, open_screen};
use crudlab::config;

#[derive(Parser, Debug)]
#[command(
    name = "crudlab",
    about = "Terminal CRUD and lookup exercises",
    version
)]
struct Cli {
    /// Read configuration from FILE instead of ~/.config/crudlab/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep the persistent student list in DIR.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Registration form with a live username availability check.
    Register {
        /// JSON array of taken usernames.
        path: Option<PathBuf>,
    },
    /// Search the product catalog as you type.
    Products {
        /// JSON array of products.
        path: Option<PathBuf>,
    },
    /// Current weather for a supported city.
    Weather,
    /// Student list saved between runs.
    Students,
    /// Student roster with grades.
    Roster {
        /// JSON array of students.
        path: Option<PathBuf>,
    },
    /// Library books with issue and return.
    Books {
        /// JSON array of books.
        path: Option<PathBuf>,
    },
    /// Employee directory.
    Employees {
        /// JSON array of employees.
        path: Option<PathBuf>,
    },
    /// Inventory with stock levels and a category filter.
    Inventory {
        /// JSON array of products.
        path: Option<PathBuf>,
    },
}

impl Command {
    fn into_screen(self) -> (ScreenKind, Option<PathBuf>) {
        match self {
            Command::Register { path } => (ScreenKind::Register, path),
            Command::Products { path } => (ScreenKind::Products, path),
            Command::Weather => (ScreenKind::Weather, None),
            Command::Students => (ScreenKind::Students, None),
            Command::Roster { path } => (ScreenKind::Roster, path),
            Command::Books { path } => (ScreenKind::Books, path),
            Command::Employees { path } => (ScreenKind::Employees, path),
            Command::Inventory { path } => (ScreenKind::Inventory, path),
        }
    }
}

/// Send log output to `crudlab.log` in the cache directory
///
/// Logging is skipped when the file cannot be created; the terminal is never
/// written to.
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("crudlab")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("crudlab.log")) else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging();

    let loaded = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    let mut config = loaded.config;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    // Open before taking over the terminal so load errors print normally
    let (kind, path) = cli.command.into_screen();
    let screen = open_screen(kind, path, &config)
        .wrap_err_with(|| format!("Failed to open the {:?} screen", kind))?;
    log::info!("Opened {:?} screen", kind);

    let mut app = App::new(screen, &config);
    if let Some(warning) = loaded.warning {
        app.notification.show_error(&warning);
    }

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(terminal, app);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| app.render(frame))?;

        let timeout = app.poll_timeout(Instant::now());
        app.handle_events(timeout)?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
