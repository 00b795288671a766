use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use alien_invasion::compute::{init_state, key_down, key_up, scene, start_game, tick};
use alien_invasion::display::{self, PlayButton, Viewport};
use alien_invasion::entities::GameState;
use alien_invasion::highscore;
use alien_invasion::input::{Action, InputEvent, InputTranslator};
use alien_invasion::settings::Settings;

/// On terminals without key-release events, a movement key counts as held
/// while its last press/repeat is younger than this.  OS key-repeat runs at
/// ≥ 15 Hz, so a held key always refreshes it in time.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

#[derive(Parser)]
#[command(name = "alien_invasion")]
#[command(about = "Shoot down the descending alien fleet before it lands")]
struct Args {
    /// TOML settings file (missing fields keep their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where the high score is stored
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Log output file (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

/// How the frame loop ended.
enum Exit {
    Quit,
    SaveAndQuit,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Settings {
    let settings = match path {
        Some(path) => {
            let (settings, err) = Settings::load_or_default(path);
            if let Some(err) = err {
                warn!(error = %err, "using default settings");
            }
            settings
        }
        None => Settings::default(),
    };
    for warning in settings.validate() {
        warn!(%warning, "suspicious setting");
    }
    settings
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// One iteration per frame, in strict order: drain input, advance the
/// simulation (ship, bullets, fleet), render.
fn frame_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    translator: &mut InputTranslator,
    frame_time: Duration,
) -> anyhow::Result<Exit> {
    let button = PlayButton::centered(state.settings.screen.width, state.settings.screen.height);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (columns, rows) = terminal::size()?;
        let viewport = Viewport::new(
            columns,
            rows,
            state.settings.screen.width,
            state.settings.screen.height,
        );

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut events: Vec<InputEvent> = Vec::new();
        while let Ok(raw) = rx.try_recv() {
            events.extend(translator.translate(&raw, frame));
        }
        events.extend(translator.expired(frame));

        for ev in events {
            match ev {
                InputEvent::Quit => return Ok(Exit::Quit),
                InputEvent::KeyDown(Action::QuitAndSave) => return Ok(Exit::SaveAndQuit),
                InputEvent::KeyDown(action) => *state = key_down(state, action, frame_start),
                InputEvent::KeyUp(action) => *state = key_up(state, action),
                InputEvent::Click { column, row } => {
                    if button.clicked(&viewport, column, row) {
                        *state = start_game(state);
                    }
                }
            }
        }

        *state = tick(state, frame_start);

        display::render(out, &scene(state, frame_start), &viewport)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("alien_invasion.log"));
    init_logging(&log_path)?;

    let settings = load_settings(args.config.as_deref());
    let score_path = args
        .high_score_file
        .clone()
        .unwrap_or_else(highscore::default_path);
    let high_score = highscore::load(&score_path);

    let fps = args.fps.max(1);
    let frame_time = Duration::from_secs(1) / fps;
    let hold_frames = (HOLD_WINDOW.as_millis() as u64 * fps as u64 / 1000).max(1);
    info!(fps, high_score, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!(keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut state = init_state(settings, high_score);
    let mut translator = InputTranslator::new(keyboard_enhanced, hold_frames);
    let result = frame_loop(&mut out, &mut state, &rx, &mut translator, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result? {
        Exit::SaveAndQuit => {
            if let Err(e) = highscore::save(&score_path, state.stats.high_score) {
                error!(error = %format!("{e:#}"), "high score not saved");
                eprintln!("high score not saved: {e:#}");
            }
        }
        Exit::Quit => info!("quit without saving"),
    }
    Ok(())
}
