use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use notegrid::terminal::{self, Tui};
use notegrid::{App, Config, NotesState, input, logging, note::now_millis, render};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
    }
}

fn run() -> Result<()> {
    let config = Config::from_env().context("reading configuration")?;
    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }
    info!("starting notegrid (tick {:?}, seed {})", config.tick_rate, config.seed);

    let res = terminal::with_terminal(|tui| run_app(tui, &config));

    info!("notegrid exited");
    res
}

fn run_app(terminal: &mut Tui, config: &Config) -> Result<()> {
    let store = if config.seed {
        NotesState::seeded(now_millis())
    } else {
        NotesState::empty()
    };
    let mut app = App::new(store);
    let tick_rate = config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| render::draw(frame, &mut app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(&mut app, key)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}
