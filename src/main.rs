mod app;
mod audio;
mod catalog;
mod config;
mod content;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::widgets::Block;

use app::{App, AppScreen};
use config::Config;
use engine::facts::RoundMode;
use event::{AppEvent, EventHandler};
use session::fast_multiply::FastPhase;
use session::play::PlayPhase;
use store::kv::{FileStore, KeyValueStore, MemoryStore};
use store::session_store::SessionStore;

#[derive(Parser)]
#[command(name = "floe", version, about = "Arctic-themed terminal math game with adaptive difficulty")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Store session data under this directory")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Keep session data in memory only")]
    ephemeral: bool,

    #[arg(short, long, help = "Learner name shown on screen")]
    name: Option<String>,

    #[arg(long, help = "Wipe the saved session and start fresh")]
    reset: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let kv: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else if let Some(dir) = cli.data_dir {
        Box::new(FileStore::with_base_dir(dir)?)
    } else {
        Box::new(FileStore::new()?)
    };
    let mut store = SessionStore::new(kv);
    if cli.reset {
        store.reset()?;
    }
    if let Some(name) = cli.name {
        store.set_user_name(&name)?;
    }

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, store, events.sender());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::ProblemReady { seq, result } => app.on_problem_ready(seq, result),
            AppEvent::ExplanationReady { seq, result } => app.on_explanation_ready(seq, result),
            AppEvent::NarrationReady { batch, step, path } => {
                app.on_narration_ready(batch, step, path)
            }
            AppEvent::ClipFinished(id) => app.on_clip_finished(id),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Home => handle_home_key(app, key),
        AppScreen::Play => handle_play_key(app, key),
        AppScreen::FastMultiply => handle_fast_key(app, key),
        AppScreen::Shop => handle_shop_key(app, key),
        AppScreen::Explore => handle_explore_key(app, key),
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.home_selected = app.home_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.home_selected = (app.home_selected + 1).min(app.home_entry_count() - 1);
        }
        KeyCode::Enter => app.open_home_entry(),
        _ => {}
    }
}

fn handle_play_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go_home();
        return;
    }
    let Some(phase) = app.play.as_ref().map(|p| p.phase()) else {
        return;
    };
    match phase {
        PlayPhase::Answering => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => app.play_push_digit(c),
            KeyCode::Backspace => app.play_backspace(),
            KeyCode::Enter => app.play_submit(),
            _ => {}
        },
        PlayPhase::Correct => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.play_advance();
            }
        }
        PlayPhase::FirstWrong => {
            if key.code == KeyCode::Enter {
                app.play_try_again();
            }
        }
        PlayPhase::Wrong => match key.code {
            KeyCode::Enter => app.play_advance(),
            KeyCode::Char('r') => app.read_aloud(),
            KeyCode::Char('s') => app.stop_narration(),
            _ => {}
        },
        PlayPhase::Loading => {}
    }
}

fn handle_fast_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.leave_fast();
        return;
    }
    match app.fast.phase() {
        FastPhase::ModeSelect => match key.code {
            KeyCode::Char(c) if ('2'..='9').contains(&c) => {
                let table = c as u8 - b'0';
                app.fast_select_mode(RoundMode::Single { table });
            }
            KeyCode::Char('m') => app.fast_select_mode(RoundMode::Mixed),
            KeyCode::Char('b') => app.fast_select_mode(RoundMode::Boss),
            _ => {}
        },
        FastPhase::Playing | FastPhase::MissDrill => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => app.fast_push_digit(c),
            KeyCode::Backspace => app.fast_backspace(),
            KeyCode::Enter => app.fast_submit(),
            _ => {}
        },
        FastPhase::RoundEnd | FastPhase::DrillEnd => {
            if key.code == KeyCode::Enter {
                app.fast_continue();
            }
        }
        FastPhase::Countdown => {}
    }
}

fn handle_shop_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_home(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.shop_selected = app.shop_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.shop_selected = (app.shop_selected + 1).min(catalog::SHOP_ITEMS.len() - 1);
        }
        KeyCode::Enter => app.shop_activate(),
        _ => {}
    }
}

fn handle_explore_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_home(),
        KeyCode::Left | KeyCode::Char('h') => {
            app.explore_selected = app.explore_selected.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.explore_selected =
                (app.explore_selected + 1).min(catalog::ARCTIC_ANIMALS.len() - 1);
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let bg = Block::default().style(Style::default().bg(app.theme.colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Home => ui::screens::home::render(frame, app),
        AppScreen::Play => ui::screens::play::render(frame, app),
        AppScreen::FastMultiply => ui::screens::fast_multiply::render(frame, app),
        AppScreen::Shop => ui::screens::shop::render(frame, app),
        AppScreen::Explore => ui::screens::explore::render(frame, app),
    }
}
