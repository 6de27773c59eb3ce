mod app;
mod domain;
mod input;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::TaskStore;
use persistence::{ensure_data_dir, init_local_dir, log_file, FileStorage, MemoryStorage, Storage};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dolist")]
#[command(about = "A terminal task list with status grouping and an interval timer", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the saved documents
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .dolist directory in the current directory
    Init,
    /// Add tasks without opening the interface; each argument is one task
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the tasks in display order
    List,
    /// Set the status of the task at a listed position
    Status {
        /// Position as printed by `list`, starting at 1
        number: usize,
        /// One of doing, later, done, cancelled
        status: String,
    },
    /// Delete every task
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_tracing(cli.verbose, None)?;
            let data_dir = init_local_dir()?;
            println!("Initialized dolist directory: {}", data_dir.display());
            println!();
            println!("dolist will now use this local directory for its tasks and timer settings.");
            Ok(())
        }
        Some(Commands::Add { text }) => {
            init_tracing(cli.verbose, None)?;
            let mut store = TaskStore::load(open_storage(cli.data_dir.as_deref(), cli.ephemeral)?);
            let ids = store.add_tasks(&text.join("\n"))?;
            println!("Added {} task(s)", ids.len());
            Ok(())
        }
        Some(Commands::List) => {
            init_tracing(cli.verbose, None)?;
            let store = TaskStore::load(open_storage(cli.data_dir.as_deref(), cli.ephemeral)?);
            for (idx, task) in store.tasks().iter().enumerate() {
                println!("{:>3}. [{:<9}] {}", idx + 1, task.status.label(), task.text());
            }
            if store.is_empty() {
                println!("No tasks.");
            }
            Ok(())
        }
        Some(Commands::Status { number, status }) => {
            init_tracing(cli.verbose, None)?;
            let mut store = TaskStore::load(open_storage(cli.data_dir.as_deref(), cli.ephemeral)?);
            let id = number
                .checked_sub(1)
                .and_then(|idx| store.tasks().get(idx))
                .map(|t| t.id())
                .ok_or_else(|| anyhow!("no task at position {number}"))?;
            if !store.set_status_tag(id, &status)? {
                return Err(anyhow!(
                    "unknown status {status:?}; expected doing, later, done or cancelled"
                ));
            }
            println!("Task {} is now {}", number, status.trim().to_lowercase());
            Ok(())
        }
        Some(Commands::Clear { yes }) => {
            init_tracing(cli.verbose, None)?;
            if !yes {
                return Err(anyhow!("refusing to delete every task without --yes"));
            }
            let mut store = TaskStore::load(open_storage(cli.data_dir.as_deref(), cli.ephemeral)?);
            let count = store.len();
            store.clear_all()?;
            println!("Deleted {} task(s)", count);
            Ok(())
        }
        None => run_tui(cli.verbose, cli.data_dir.as_deref(), cli.ephemeral),
    }
}

/// Log to stderr, or to `log_path` while the terminal UI owns the screen
fn init_tracing(verbose: u8, log_path: Option<&Path>) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true);

    let init_result = match log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
            .try_init(),
    };

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

fn open_storage(data_dir: Option<&Path>, ephemeral: bool) -> Result<Rc<dyn Storage>> {
    if ephemeral {
        return Ok(Rc::new(MemoryStorage::new()));
    }
    let dir = ensure_data_dir(data_dir)?;
    Ok(Rc::new(FileStorage::new(dir)))
}

fn run_tui(verbose: u8, data_dir: Option<&Path>, ephemeral: bool) -> Result<()> {
    let storage = if ephemeral {
        init_tracing(verbose, None)?;
        open_storage(None, true)?
    } else {
        let storage = FileStorage::new(ensure_data_dir(data_dir)?);
        eprintln!("Using dolist directory: {}", storage.dir().display());
        init_tracing(verbose, Some(&log_file(storage.dir())))?;
        Rc::new(storage) as Rc<dyn Storage>
    };

    let mut app = AppState::new(storage);
    info!(tasks = app.store.len(), "starting interface");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!("interface closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
}
