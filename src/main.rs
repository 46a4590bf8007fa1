mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use endgame::{
    celebration::{Confetti, Mood},
    config::{Config, ConfigStore, FileConfigStore},
    error::AppError,
    game::{Game, Notice},
    input::{letter_at, map_key, move_cursor, Command},
    language::{load_languages, FixedWord, RandomFarewell, RandomWord, WordProvider},
    logging::setup_logging,
    reducer::Rules,
    countdown::PendingTick,
    runtime::{CrosstermEventSource, InputEvent, InputEventSource, Runner, TickRate},
    status::Outcome,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use tracing::info;

/// word-guessing terminal game: save the programming languages before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the secret word one letter at a time. Every wrong guess costs a programming language, and the clock keeps ticking."
)]
pub struct Cli {
    /// seconds on the clock for each word
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// play this word instead of a random one
    #[clap(short = 'w', long)]
    word: Option<String>,

    /// skip the end-of-game confetti
    #[clap(long)]
    no_confetti: bool,

    /// config file to read settings from
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// log file (defaults to the state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.seconds {
            config.starting_secs = secs;
        }
        if self.no_confetti {
            config.confetti.enabled = false;
        }
        config
    }

    fn word_provider(&self) -> Result<Box<dyn WordProvider>, AppError> {
        Ok(match &self.word {
            Some(word) => Box::new(FixedWord::new(word)?),
            None => Box::new(RandomWord::new()?),
        })
    }
}

/// Which control receives Enter/Space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Keyboard(usize),
    NewGame,
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub confetti: Confetti,
    pub confetti_enabled: bool,
    pub focus: Focus,
    pub should_quit: bool,
}

impl App {
    pub fn new(game: Game, config: &Config) -> Self {
        Self {
            game,
            confetti: Confetti::from_config(&config.confetti),
            confetti_enabled: config.confetti.enabled,
            focus: Focus::Keyboard(0),
            should_quit: false,
        }
    }

    pub fn handle_command(&mut self, command: Command, now: Instant, size: (u16, u16)) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::NewGame => self.game.start_new_session(now),
            Command::Guess(letter) => {
                self.game.submit_guess(letter, now);
            }
            Command::Move(direction) => {
                if let Focus::Keyboard(index) = self.focus {
                    self.focus = Focus::Keyboard(move_cursor(index, direction));
                }
            }
            Command::Press => match self.focus {
                Focus::Keyboard(index) => {
                    if let Some(letter) = letter_at(index) {
                        self.game.submit_guess(letter, now);
                    }
                }
                Focus::NewGame => self.game.start_new_session(now),
            },
            Command::Ignore => {}
        }
        self.process_notices(size);
    }

    pub fn on_countdown(&mut self, tick: PendingTick, now: Instant, size: (u16, u16)) {
        self.game.on_tick(tick, now);
        self.process_notices(size);
    }

    /// Quiet tick: advance the confetti animation one frame
    pub fn on_frame(&mut self) {
        self.confetti.update();
    }

    pub fn process_notices(&mut self, (width, height): (u16, u16)) {
        for notice in self.game.drain_notices() {
            match notice {
                Notice::SessionStarted { .. } => {
                    self.focus = Focus::Keyboard(0);
                    self.confetti.stop();
                }
                Notice::Ended(outcome) => {
                    self.focus = Focus::NewGame;
                    if self.confetti_enabled {
                        let mood = if outcome == Outcome::Won {
                            Mood::Celebratory
                        } else {
                            Mood::Somber
                        };
                        self.confetti.start(mood, width, height);
                    }
                }
                Notice::Guessed { .. } | Notice::TimeTick { .. } => {}
            }
        }
    }
}

fn build_game(cli: &Cli, config: &Config, now: Instant) -> Result<Game, AppError> {
    let rules = Rules::new(load_languages()?, Box::new(RandomFarewell));
    Ok(Game::new(rules, cli.word_provider()?, config.starting_secs, now))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let (log_path, _guard) = setup_logging(cli.log_file.as_deref())?;

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }
    info!(log = %log_path.display(), ?config, "starting");

    let game = build_game(&cli, &config, Instant::now())?;
    let mut app = App::new(game, &config);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        TickRate::from_millis(config.tick_rate_ms),
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.game.shutdown();
    info!("bye");
    result
}

fn start_tui<B: Backend, E: InputEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        let size = terminal.size()?;
        let size = (size.width, size.height);

        match runner.step(app.game.countdown().pending()) {
            InputEvent::Key(key) => app.handle_command(map_key(key), Instant::now(), size),
            InputEvent::Countdown(tick) => app.on_countdown(tick, Instant::now(), size),
            InputEvent::Tick => app.on_frame(),
            InputEvent::Resize => {}
            InputEvent::Closed => app.should_quit = true,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
