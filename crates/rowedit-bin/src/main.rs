//! rowedit entrypoint.
//!
//! A headless front end for the editing core: it opens a file, feeds it an
//! edit script and/or a sequence of decoded key events, then optionally saves
//! the buffer and dumps every row with its highlight classes.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Action, QuitGuard, dispatch, find_prompt_step, open_file, parse_script, translate_key};
use core_config::{Config, ConfigContext, load_from};
use core_events::{Event, InputEvent, KeyCode, KeyEvent, KeyModifiers};
use core_state::{EditorState, FindStep, StatusKind};
use core_text::{Highlight, TextBuffer};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::{info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

const STATUS_ROWS: u16 = 2;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "rowedit", version, about = "rowedit editing core driver")]
struct Args {
    /// File to open. A missing file starts an empty buffer bound to that name.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `rowedit.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Edit script to replay before any keys (`-` reads stdin).
    #[arg(long)]
    pub script: Option<PathBuf>,
    /// Whitespace separated keys, e.g. "a b C-z S-Left Enter".
    #[arg(long)]
    pub keys: Option<String>,
    /// Screen size as COLSxROWS.
    #[arg(long, default_value = "80x24", value_parser = parse_size)]
    pub size: (u16, u16),
    /// Write the buffer back to its file after replay.
    #[arg(long)]
    pub save: bool,
    /// Print each row and its highlight classes to stdout.
    #[arg(long)]
    pub dump: bool,
}

fn parse_size(s: &str) -> Result<(u16, u16), String> {
    let (cols, rows) = s
        .split_once('x')
        .ok_or_else(|| format!("expected COLSxROWS, got `{s}`"))?;
    let cols = cols.parse().map_err(|e| format!("columns: {e}"))?;
    let rows = rows.parse().map_err(|e| format!("rows: {e}"))?;
    Ok((cols, rows))
}

/// One editing session plus the bits of front-end state that live outside
/// the core: the quit guard and the find prompt.
struct Session {
    state: EditorState,
    guard: QuitGuard,
    config: Config,
    find_query: Option<String>,
    quit: bool,
}

impl Session {
    /// Start a session with the key help on the status line.
    fn new(mut state: EditorState, config: Config) -> Self {
        state.set_status(StatusKind::Help);
        Self {
            state,
            guard: QuitGuard::new(),
            config,
            find_query: None,
            quit: false,
        }
    }

    fn apply(&mut self, action: Action) {
        if self.quit {
            return;
        }
        let res = dispatch(action, &mut self.state, &mut self.guard, &self.config);
        self.quit |= res.quit;
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Input(InputEvent::Key(key)) => self.handle_key(key),
            Event::Input(InputEvent::Resize(cols, rows)) => {
                let ctx = ConfigContext::new(cols, rows, STATUS_ROWS);
                self.state
                    .set_viewport_size(ctx.text_rows().into(), ctx.text_cols().into());
                trace!(target: "runtime", cols, rows, "resize");
            }
            Event::Tick => {
                self.state
                    .tick_status(self.config.message_timeout(), Instant::now());
            }
            Event::Shutdown => self.quit = true,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(mut query) = self.find_query.take() {
            let plain = !key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT);
            let step = match key.code {
                KeyCode::Backspace | KeyCode::Delete => {
                    query.pop();
                    FindStep::Edit
                }
                KeyCode::Char(c) if plain => {
                    query.push(c);
                    FindStep::Edit
                }
                _ => find_prompt_step(&key),
            };
            self.apply(Action::Find {
                query: query.clone(),
                step,
            });
            if !matches!(step, FindStep::Accept | FindStep::Cancel) {
                self.find_query = Some(query);
            }
            return;
        }
        if key == KeyEvent::ctrl('f') {
            self.find_query = Some(String::new());
            return;
        }
        match translate_key(&key) {
            Some(action) => self.apply(action),
            None => trace!(target: "runtime", %key, "key_unbound"),
        }
    }
}

fn hl_code(hl: Highlight) -> char {
    match hl {
        Highlight::Normal => '.',
        Highlight::Comment => 'c',
        Highlight::Keyword1 => 'k',
        Highlight::Keyword2 => 't',
        Highlight::String => 's',
        Highlight::Number => 'n',
        Highlight::Match => 'm',
    }
}

fn dump_rows(state: &EditorState, out: &mut impl Write) -> io::Result<()> {
    for row in state.buffer().rows() {
        let classes: String = row.highlight().iter().copied().map(hl_code).collect();
        writeln!(out, "{:>4} | {}", row.idx() + 1, row.render())?;
        writeln!(out, "     | {classes}")?;
    }
    Ok(())
}

/// Write the buffer back to the file it was opened from.
fn save(session: &mut Session) -> Result<()> {
    match core_actions::write_file(&mut session.state, None)? {
        core_actions::WriteFileResult::Written { path, bytes } => {
            info!(target: "runtime", path = %path.display(), bytes, "saved");
            Ok(())
        }
        core_actions::WriteFileResult::NoFilename => {
            warn!(target: "runtime", "save_without_filename");
            anyhow::bail!("--save needs a file path")
        }
    }
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut src = String::new();
        io::stdin()
            .read_to_string(&mut src)
            .context("reading script from stdin")?;
        return Ok(src);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("rowedit.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "rowedit.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; drop guard so the writer shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let state = match args.path.as_deref() {
        Some(path) => {
            open_file(path, &config).with_context(|| format!("opening {}", path.display()))?
        }
        None => EditorState::with_undo_capacity(TextBuffer::new(), config.effective_undo_capacity()),
    };
    let path_str = args.path.as_ref().map(|p| p.to_string_lossy().to_string());
    info!(
        target: "runtime",
        path = path_str.as_deref(),
        rows = state.buffer().row_count(),
        syntax = state.buffer().syntax().map(|s| s.file_type),
        "bootstrap_complete"
    );

    let mut session = Session::new(state, config);
    let (cols, rows) = args.size;
    session.handle_event(Event::Input(InputEvent::Resize(cols, rows)));

    if let Some(path) = args.script.as_deref() {
        let src = read_script(path)?;
        let actions = parse_script(&src).with_context(|| format!("parsing {}", path.display()))?;
        info!(target: "runtime", actions = actions.len(), "script_loaded");
        for action in actions {
            session.apply(action);
        }
    }
    if let Some(keys) = args.keys.as_deref() {
        for token in keys.split_whitespace() {
            let key: KeyEvent = token.parse()?;
            session.handle_event(Event::Input(InputEvent::Key(key)));
        }
    }
    session.handle_event(Event::Tick);

    if args.save {
        save(&mut session)?;
    }
    if args.dump {
        let stdout = io::stdout();
        dump_rows(&session.state, &mut stdout.lock())?;
    }
    if let Some(msg) = session.state.status() {
        eprintln!("{msg}");
    }
    session.handle_event(Event::Shutdown);
    info!(
        target: "runtime",
        dirty = session.state.is_dirty(),
        undo_depth = session.state.undo_depth(),
        redo_depth = session.state.redo_depth(),
        "shutdown"
    );
    Ok(())
}
