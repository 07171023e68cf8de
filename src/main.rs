mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use times_table_quest::core::constants::{STAGE_COUNT, TIMER_REFRESH_MS};
use times_table_quest::utils::build_info;
use times_table_quest::utils::persistence::{data_dir, FileStore};
use times_table_quest::{Cue, EffectSink, GameController, GameError, Screen};
use tracing_subscriber::EnvFilter;
use ui::pacing::UiState;

const LOG_FILE: &str = "times-table-quest.log";
const LOG_ENV: &str = "TIMES_TABLE_QUEST_LOG";

/// Rings the terminal bell on the big moments.
struct TerminalBell;

impl EffectSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if matches!(cue, Cue::LevelUp | Cue::Victory) {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }
}

/// Logs go to a file because the terminal belongs to the UI.
fn init_logging() {
    let Ok(dir) = data_dir() else {
        return;
    };
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "reset" => {
                init_logging();
                let mut game = GameController::with_store(Box::new(FileStore::open()?));
                game.erase_saved_data();
                println!("Saved progress and best time erased.");
                std::process::exit(0);
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Times Table Quest - multiplication drills with an RPG hero\n");
                println!("Usage: times-table-quest [command]\n");
                println!("Commands:");
                println!("  reset      Erase saved progress and the best time");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                println!("\nSet {} (e.g. debug) to change log verbosity.", LOG_ENV);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'times-table-quest --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();
    tracing::info!(version = %build_info::version_line(), "starting");

    let store = FileStore::open()?;
    let mut game = GameController::with_store(Box::new(store)).with_effects(Box::new(TerminalBell));
    let mut ui_state = UiState::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game, &mut ui_state);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut GameController,
    ui_state: &mut UiState,
) -> io::Result<()> {
    loop {
        ui_state.tick(Instant::now());
        terminal.draw(|frame| ui::draw(frame, game, ui_state))?;

        if !event::poll(Duration::from_millis(TIMER_REFRESH_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(());
        }
        // Keys wait until the last answer has played out
        if ui_state.is_revealing() {
            continue;
        }
        if !handle_key(game, ui_state, key) {
            return Ok(());
        }
    }
}

/// Applies one key press. Returns false to quit.
fn handle_key(game: &mut GameController, ui_state: &mut UiState, key: KeyEvent) -> bool {
    ui_state.notice = None;
    let result = match game.screen() {
        Screen::Start => match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                game.start_new_game();
                ui_state.stage_cursor = 1;
                Ok(())
            }
            KeyCode::Char('c') | KeyCode::Char('C') => game.continue_run(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
            _ => Ok(()),
        },

        Screen::StageSelect => match key.code {
            KeyCode::Left => move_cursor(ui_state, -1),
            KeyCode::Right => move_cursor(ui_state, 1),
            KeyCode::Up => move_cursor(ui_state, -3),
            KeyCode::Down => move_cursor(ui_state, 3),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let stage_number = c.to_digit(10).unwrap_or(0);
                enter_stage(game, ui_state, stage_number)
            }
            KeyCode::Enter => {
                let stage_number = ui_state.stage_cursor;
                enter_stage(game, ui_state, stage_number)
            }
            KeyCode::Esc => game.return_to_start(),
            _ => Ok(()),
        },

        Screen::InStage => match key.code {
            KeyCode::Char(c) => {
                ui_state.push_digit(c);
                Ok(())
            }
            KeyCode::Backspace => {
                ui_state.backspace();
                Ok(())
            }
            KeyCode::Enter => {
                let input = ui_state.input.clone();
                game.submit_answer(&input)
                    .map(|events| ui_state.schedule(Instant::now(), events))
            }
            KeyCode::Esc => game.exit_to_stage_select(),
            _ => Ok(()),
        },

        Screen::LevelUpPause => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => game.dismiss_level_up(),
            _ => Ok(()),
        },

        Screen::VictoryStage => match key.code {
            KeyCode::Enter => game.advance_to_next_stage().map(|_| sync_stage(game, ui_state)),
            KeyCode::Esc => game.exit_to_stage_select(),
            _ => Ok(()),
        },

        Screen::DefeatRun => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                game.retry_stage().map(|_| sync_stage(game, ui_state))
            }
            KeyCode::Char('n') | KeyCode::Char('N') => game.restart_run(),
            _ => Ok(()),
        },

        Screen::UltimateVictory => match key.code {
            KeyCode::Enter | KeyCode::Esc => game.return_to_start(),
            _ => Ok(()),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "action rejected");
        ui_state.notice = Some(e.to_string());
    }
    true
}

fn move_cursor(ui_state: &mut UiState, delta: i32) -> Result<(), GameError> {
    let next = ui_state.stage_cursor as i32 + delta;
    if (1..=STAGE_COUNT as i32).contains(&next) {
        ui_state.stage_cursor = next as u32;
    }
    Ok(())
}

fn enter_stage(
    game: &mut GameController,
    ui_state: &mut UiState,
    stage_number: u32,
) -> Result<(), GameError> {
    game.enter_stage(stage_number)?;
    ui_state.stage_cursor = stage_number;
    sync_stage(game, ui_state);
    Ok(())
}

/// Shows the first question of a freshly entered stage.
fn sync_stage(game: &GameController, ui_state: &mut UiState) {
    if game.screen() == Screen::InStage {
        ui_state.begin_stage(game.stage().map(|s| *s.current_question()));
    }
}
