//! Replay command implementation.

use super::output::JsonBattle;
use super::{load_report, select_battle, CliError, ReplayFormat};
use battleview::replay::{render_ascii, render_llm, PhaseCursor, PlaybackConfig};
use battleview::{Battle, PlanetLookup};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the battle cannot be loaded or the replay fails.
pub(crate) fn execute(
    file: &Path,
    battle: Option<u32>,
    format: ReplayFormat,
    phase: Option<usize>,
    player: Option<u32>,
    speed: u64,
) -> Result<(), CliError> {
    let mut report = load_report(file)?;
    let record = select_battle(&mut report, battle)?;
    let battle = Battle::new(record)?;
    info!(battle = battle.num(), phases = battle.phase_count(), "replaying battle");

    let config = PlaybackConfig {
        phase_delay_ms: speed,
        start_phase: phase.unwrap_or(0),
        player,
    };
    let cursor = PhaseCursor::at_phase(battle, config.start_phase)?;

    match format {
        ReplayFormat::Tui => run_replay_tui(cursor, &report, config),
        ReplayFormat::Text => {
            print_text_replay(cursor, &report, config.player);
            Ok(())
        }
        ReplayFormat::Llm => {
            print_llm_replay(cursor, &report);
            Ok(())
        }
        ReplayFormat::Json => {
            let json = JsonBattle::from_battle(cursor.battle(), &report, cursor.phase());
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
    }
}

/// TUI state.
struct ReplayApp {
    cursor: PhaseCursor,
    location: String,
    config: PlaybackConfig,
    paused: bool,
    last_step: Instant,
}

impl ReplayApp {
    fn step_forward(&mut self) {
        if self.cursor.step_forward().is_err() {
            self.paused = true;
        }
        self.last_step = Instant::now();
    }

    fn step_backward(&mut self) {
        let _ = self.cursor.step_backward();
        self.last_step = Instant::now();
    }

    fn toggle_player(&mut self, num: u32) {
        self.config.player = if self.config.player == Some(num) {
            None
        } else {
            Some(num)
        };
    }

    fn should_autostep(&self) -> bool {
        !self.paused
            && self.last_step.elapsed() >= Duration::from_millis(self.config.phase_delay_ms)
    }
}

fn run_replay_tui(
    cursor: PhaseCursor,
    planets: &impl PlanetLookup,
    config: PlaybackConfig,
) -> Result<(), CliError> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout},
        style::{Color, Modifier, Style},
        widgets::{Block, Borders, Paragraph, Wrap},
        Terminal,
    };
    use std::io::stdout;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = ReplayApp {
        location: cursor.battle().location_label(planets),
        cursor,
        config,
        paused: true,
        last_step: Instant::now(),
    };

    loop {
        terminal
            .draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(10),
                        Constraint::Length(3),
                    ])
                    .split(f.area());

                // Header
                let status = if app.cursor.is_finished() {
                    "END"
                } else if app.paused {
                    "PAUSED"
                } else {
                    "PLAYING"
                };
                let title = format!(
                    " Battle #{} at {} | Phase {}/{} | {} ",
                    app.cursor.battle().num(),
                    app.location,
                    app.cursor.phase(),
                    app.cursor.last_phase(),
                    status
                );
                let header = Paragraph::new(title)
                    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(header, chunks[0]);

                // Board
                let ascii = render_ascii(app.cursor.battle(), app.cursor.phase(), app.config.player);
                let board = Paragraph::new(ascii)
                    .block(Block::default().borders(Borders::ALL).title(" Board "))
                    .wrap(Wrap { trim: false });
                f.render_widget(board, chunks[1]);

                // Footer
                let controls = " [q] Quit  [space] Play/Pause  [←/→] Step  [Home/End] Jump  [1-8] Player view ";
                let footer = Paragraph::new(controls)
                    .style(Style::default().fg(Color::Gray))
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(footer, chunks[2]);
            })
            .map_err(|e| CliError::new(e.to_string()))?;

        // Handle input
        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))? {
            if let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') => app.paused = !app.paused,
                        KeyCode::Right | KeyCode::Char('l') => app.step_forward(),
                        KeyCode::Left | KeyCode::Char('h') => app.step_backward(),
                        KeyCode::Home => app.cursor.rewind(),
                        KeyCode::End => {
                            let last = app.cursor.last_phase();
                            let _ = app.cursor.goto_phase(last);
                        }
                        KeyCode::Char(c @ '1'..='8') => {
                            if let Some(num) = c.to_digit(10) {
                                app.toggle_player(num);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_autostep() {
            app.step_forward();
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn print_text_replay(mut cursor: PhaseCursor, planets: &impl PlanetLookup, player: Option<u32>) {
    println!(
        "Replay of battle #{} at {}",
        cursor.battle().num(),
        cursor.battle().location_label(planets)
    );
    println!(
        "Rounds: {}  Phases: {}",
        cursor.battle().total_rounds(),
        cursor.battle().phase_count()
    );
    println!();

    loop {
        println!("=== Phase {} ===", cursor.phase());
        println!("{}", cursor.render_ascii(player));
        println!();

        if cursor.step_forward().is_err() {
            println!("=== END OF BATTLE ===");
            break;
        }
    }
}

fn print_llm_replay(mut cursor: PhaseCursor, planets: &impl PlanetLookup) {
    println!("# Battle Replay");
    println!("Battle: {}", cursor.battle().num());
    println!("Location: {}", cursor.battle().location_label(planets));
    println!();

    loop {
        println!("{}", render_llm(cursor.battle(), cursor.phase()));
        println!("---");
        println!();

        if cursor.step_forward().is_err() {
            println!("# END OF BATTLE");
            break;
        }
    }
}
