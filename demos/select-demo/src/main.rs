//! Select demo - one dropdown driven by a store
//!
//! The host owns the value; the select reports opens, closes and changes as
//! actions, and the reducer applies them.
//!
//! Keys: Down/Up/Enter = open, j/k = move, Enter/Space = choose,
//! Esc/Tab = close, q = quit (while closed). With `--search`, typing in the
//! open drop filters the sizes and arrows move.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Terminal,
};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tui_select::{ChangeEvent, Item, LabelKey, Select, SelectConfig, SelectProps, SelectValue};
use tui_select_core::{
    process_raw_event, spawn_event_poller, Action, Component, ComponentId, EventKind,
    LoggingMiddleware, RawEvent, StoreWithMiddleware,
};

#[derive(Parser, Debug)]
#[command(name = "select-demo")]
#[command(about = "A dropdown select in the terminal")]
struct Args {
    /// JSON select config to load
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Toggle several sizes instead of picking one
    #[arg(long, short)]
    multiple: bool,

    /// Keep the drop open after choosing
    #[arg(long)]
    keep_open: bool,

    /// Filter sizes by typing in the open drop
    #[arg(long, short)]
    search: bool,

    /// Write debug logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

// ============================================================================
// State and actions
// ============================================================================

struct DemoState {
    all_sizes: Vec<Item>,
    /// Sizes matching the current search
    sizes: Vec<Item>,
    search: bool,
    label_key: LabelKey,
    size: Option<SelectValue>,
    config: SelectConfig,
    last_change: Option<String>,
    open: bool,
}

impl DemoState {
    fn new(config: SelectConfig, search: bool) -> Self {
        let all_sizes: Vec<Item> = ["Small", "Medium", "Large", "Extra large"]
            .iter()
            .zip([36, 40, 44, 48])
            .map(|(name, eu)| {
                Item::data(json!({ "name": name, "eu": eu, "sold_out": eu == 48 }))
            })
            .collect();

        Self {
            sizes: all_sizes.clone(),
            all_sizes,
            search,
            label_key: LabelKey::from("name"),
            size: None,
            config,
            last_change: None,
            open: false,
        }
    }

    fn select_props(&self) -> SelectProps<'_, DemoAction> {
        let props = SelectProps::new(&self.sizes, &self.config)
            .with_value(self.size.as_ref())
            .with_label_key(&self.label_key)
            .with_drop_background(Color::Rgb(24, 24, 32))
            .focused(true)
            .on_open(|| DemoAction::SelectOpen)
            .on_close(|| DemoAction::SelectClose)
            .on_change(DemoAction::SizeChange);
        if self.search {
            props.on_search(DemoAction::SizeSearch)
        } else {
            props
        }
    }

    fn filter_sizes(&mut self, query: &str) {
        let query = query.to_lowercase();
        self.sizes = self
            .all_sizes
            .iter()
            .filter(|size| {
                size.label(Some(&self.label_key))
                    .to_string()
                    .to_lowercase()
                    .contains(&query)
            })
            .cloned()
            .collect();
    }
}

#[derive(Clone, Debug)]
enum DemoAction {
    SelectOpen,
    SelectClose,
    SizeChange(ChangeEvent),
    SizeSearch(String),
    Quit,
}

impl Action for DemoAction {
    fn name(&self) -> &'static str {
        match self {
            DemoAction::SelectOpen => "SelectOpen",
            DemoAction::SelectClose => "SelectClose",
            DemoAction::SizeChange(_) => "SizeChange",
            DemoAction::SizeSearch(_) => "SizeSearch",
            DemoAction::Quit => "Quit",
        }
    }
}

fn reducer(state: &mut DemoState, action: DemoAction) -> bool {
    match action {
        DemoAction::SelectOpen => {
            state.open = true;
            true
        }
        DemoAction::SelectClose => {
            state.open = false;
            state.filter_sizes("");
            true
        }
        DemoAction::SizeChange(change) => {
            state.last_change = Some(format!(
                "chose #{} {}",
                change.index,
                change.option.label(Some(&state.label_key))
            ));
            state.size = Some(change.value);
            true
        }
        DemoAction::SizeSearch(query) => {
            state.filter_sizes(&query);
            true
        }
        DemoAction::Quit => false, // handled in main loop
    }
}

// ============================================================================
// Main
// ============================================================================

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> io::Result<SelectConfig> {
    let config = match &args.config {
        Some(path) => SelectConfig::load(path).map_err(io::Error::other)?,
        None => SelectConfig::default()
            .with_placeholder("Pick a size")
            .with_search_placeholder("Type to filter")
            .with_disabled_key("sold_out"),
    };

    let config = if args.multiple {
        config.with_multiple(true)
    } else {
        config
    };
    Ok(if args.keep_open {
        config.with_close_on_change(false)
    } else {
        config
    })
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, args.search).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: SelectConfig,
    search: bool,
) -> io::Result<()> {
    let mut store = StoreWithMiddleware::new(
        DemoState::new(config, search),
        reducer,
        LoggingMiddleware::new(),
    );
    let mut select = Select::new(ComponentId(1));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| {
                let state = store.state();
                let [title_area, select_area, _, status_area, help_area] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Fill(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .areas(frame.area());

                frame.render_widget(
                    Paragraph::new("Shirt size").style(Style::default().add_modifier(Modifier::BOLD)),
                    title_area,
                );

                let status = state
                    .last_change
                    .as_deref()
                    .unwrap_or("nothing chosen yet");
                frame.render_widget(
                    Paragraph::new(Line::from(format!(
                        "{status} | drop {}",
                        if state.open { "open" } else { "closed" }
                    ))),
                    status_area,
                );
                frame.render_widget(
                    Paragraph::new("Down: open  j/k: move  Enter: choose  Esc: close  q: quit")
                        .style(Style::default().fg(Color::DarkGray)),
                    help_area,
                );

                // drawn last so the drop overlays the rows below
                select.render(frame, select_area, state.select_props());
            })?;
            should_render = false;
        }

        let Some(raw_event) = event_rx.recv().await else {
            break;
        };
        let event = process_raw_event(raw_event);

        if let EventKind::Key(key) = &event {
            let quit_key = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
            if event.is_global() || (quit_key && !select.is_open()) {
                store.dispatch(DemoAction::Quit);
                break;
            }
        }

        let actions: Vec<DemoAction> = select
            .handle_event(&event, store.state().select_props())
            .into_iter()
            .collect();
        store.dispatch_all(actions);
        should_render = !matches!(event, EventKind::Tick);
    }

    cancel_token.cancel();
    Ok(())
}
