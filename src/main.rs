mod error;
mod food;
mod game;
mod grid;
mod input;
mod snake;
mod term;
mod timer;

use std::fs::File;
use std::time::{Duration, Instant};

use log::{info, LevelFilter};
use rand::Rng;
use simplelog::{Config, WriteLogger};

use crate::error::Result;
use crate::game::{Game, GameState};
use crate::grid::Grid;
use crate::input::{intent_for, Intent};
use crate::term::{with_session, Frame, TermManager};
use crate::timer::TickTimer;

pub type TermInt = u16;
pub type Coords = (u16, u16);

const TICK_INTERVAL: Duration = Duration::from_millis(250);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const LOG_FILE: &str = "snake.log";

fn main() -> Result<()> {
    // The terminal is in raw mode while playing, so logs go to a file
    let level = match std::env::var("SNAKE_LOG").as_deref() {
        Ok("debug") => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    WriteLogger::init(level, Config::default(), File::create(LOG_FILE)?)?;
    info!("Starting the game...");

    let grid = Grid::default();
    let mut term = TermManager::new(grid)?;
    let mut game = Game::new(grid, rand::thread_rng());

    let res = with_session(&mut term, |term| run(term, &mut game));

    if let Err(e) = &res {
        log::error!("{}", e);
    }
    info!("Exiting, final score {}", game.score());
    res
}

fn run<R: Rng>(term: &mut TermManager, game: &mut Game<R>) -> Result<()> {
    term.draw_chrome()?;

    let start = Instant::now();
    let mut timer = TickTimer::new(TICK_INTERVAL);

    loop {
        if timer.should_tick(start.elapsed()) {
            for event in game.update() {
                term.play(event)?;
            }
        }

        for key_ev in term.read_key_events(FRAME_INTERVAL)? {
            match intent_for(&key_ev) {
                Some(Intent::Quit) => return Ok(()),
                Some(intent) => {
                    game.handle(intent);
                }
                None => {}
            }
        }

        term.render(&Frame {
            body: game.snake().body(),
            head_char: game.snake().head_char(),
            food: game.food(),
            score: game.score(),
            running: game.state() == GameState::Running,
        })?;
    }
}
