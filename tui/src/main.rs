mod config;
mod input;
mod render;
mod screens;

use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event},
    terminal,
};

use snake_engine::config::load_yaml_config;
use snake_engine::settings::BoardSettings;
use snake_engine::{Buttons, GameRng, GameState, MapSize, log, logger};

use config::AppConfig;
use screens::{GameOverOutcome, MenuOutcome};

/// How long the final frame stays up after the snake dies.
const DEATH_HOLD: Duration = Duration::from_millis(1500);

#[derive(Parser)]
#[command(name = "snake_tui")]
struct Args {
    /// Path to the YAML config file.
    #[arg(long, default_value = "snake.yaml")]
    config: String,

    /// Override the configured map size.
    #[arg(long, value_enum)]
    map_size: Option<MapSizeArg>,

    /// Fixed seed for session randomness (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Log game events to stderr; pipe 2> somewhere, the alternate
    /// screen owns stdout during play.
    #[arg(long)]
    log: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MapSizeArg {
    Small,
    Large,
}

impl From<MapSizeArg> for MapSize {
    fn from(arg: MapSizeArg) -> MapSize {
        match arg {
            MapSizeArg::Small => MapSize::Small,
            MapSizeArg::Large => MapSize::Large,
        }
    }
}

enum RoundOutcome {
    Finished(u32),
    Abandoned,
    Quit,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let app_config: AppConfig = match load_yaml_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if args.log {
        logger::init_logger(None);
    }

    let map_size = args.map_size.map(MapSize::from).unwrap_or(app_config.map_size);
    let seed = args.seed.or(app_config.seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // A dedicated thread does the blocking event reads so the game loop
    // never waits on terminal I/O directly.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, map_size, seed, &app_config);

    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut map_size: MapSize,
    seed: Option<u64>,
    app_config: &AppConfig,
) -> std::io::Result<()> {
    let mut high_score: u32 = 0;

    screens::splash(out)?;

    loop {
        match screens::menu(out, rx, &mut map_size, high_score)? {
            MenuOutcome::Quit => return Ok(()),
            MenuOutcome::Start => {}
        }

        let board = BoardSettings::for_map_size(map_size);
        if !terminal_fits(&board)? {
            screens::too_small(out, rx, board.width, board.height + 1)?;
            continue;
        }

        match play_round(out, rx, board, seed, app_config)? {
            RoundOutcome::Quit => return Ok(()),
            RoundOutcome::Abandoned => {}
            RoundOutcome::Finished(score) => {
                high_score = high_score.max(score);
                match screens::game_over(out, rx, score, high_score)? {
                    GameOverOutcome::Quit => return Ok(()),
                    GameOverOutcome::Menu => {}
                }
            }
        }
    }
}

fn play_round<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    board: BoardSettings,
    seed: Option<u64>,
    app_config: &AppConfig,
) -> std::io::Result<RoundOutcome> {
    let mut rng = match seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_random(),
    };
    log!("round started, seed {}", rng.seed());

    let mut game = GameState::new(board);
    let tick = Duration::from_millis(app_config.tick_interval_ms);
    let mut previous = Buttons::empty();

    loop {
        let tick_input = input::collect_tick_input(rx, tick);
        if tick_input.quit {
            return Ok(RoundOutcome::Quit);
        }

        // Shell buttons are edge-triggered against the previous cycle.
        if tick_input.keys.contains(Buttons::SELECT) && !previous.contains(Buttons::SELECT) {
            log!("round abandoned on cycle {}", game.current_cycle);
            return Ok(RoundOutcome::Abandoned);
        }
        if tick_input.keys.contains(Buttons::START) && !previous.contains(Buttons::START) {
            game.toggle_pause();
        }
        previous = tick_input.keys;

        game.process(tick_input.keys, &mut rng);
        render::render_game(out, &game, app_config.debug_overlay)?;

        if game.snake.dead {
            render::render_death_banner(out, &game)?;
            thread::sleep(DEATH_HOLD);
            log!("round over, score {}", game.score);
            return Ok(RoundOutcome::Finished(game.score));
        }
    }
}

/// The board plus its score bar must fit the current terminal.
fn terminal_fits(board: &BoardSettings) -> std::io::Result<bool> {
    let (cols, rows) = terminal::size()?;
    Ok(cols as usize >= board.width && rows as usize >= board.height + 1)
}
