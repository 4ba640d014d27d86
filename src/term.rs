use crate::error::{Error, Result};
use crate::game::GameEvent;
use crate::grid::{Cell, Grid};
use crate::{Coords, TermInt};
use std::collections::VecDeque;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

const TITLE: &str = "Snake Game 2.0";
const SNAKE_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const BELL: char = '\x07';

/// Terminal modes that have to be undone before the process exits.
pub trait Session {
    fn setup(&mut self) -> Result<()>;

    /// Must cope with a `setup` that failed halfway.
    fn restore(&mut self) -> Result<()>;
}

/// Runs `f` between `setup` and `restore`. `restore` runs even when `setup`
/// or `f` fails, and the earlier error wins over a restore error.
pub fn with_session<S, F>(session: &mut S, f: F) -> Result<()>
where
    S: Session,
    F: FnOnce(&mut S) -> Result<()>,
{
    let res = session.setup().and_then(|_| f(session));
    let restored = session.restore();
    res.and(restored)
}

/// What the game shows on a frame.
pub struct Frame<'a> {
    pub body: &'a VecDeque<Cell>,
    pub head_char: char,
    pub food: Cell,
    pub score: u32,
    pub running: bool,
}

/// Owns the terminal while the game runs. Keeps a copy of what is on screen
/// so unchanged characters are not rewritten and so the area under the
/// game-over message can be put back.
pub struct TermManager {
    grid: Grid,
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new(grid: Grid) -> Result<Self> {
        let (width, height) = grid.screen_size();
        let actual = terminal::size()?;
        if actual.0 < width || actual.1 < height {
            return Err(Error::TerminalTooSmall { needed: (width, height), actual });
        }

        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { grid, width, height, stdout: stdout(), screen, current_msg: None })
    }

    /// Key presses that arrived since the last call, waiting at most `timeout`
    /// for the first one.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            wait = Duration::ZERO;
        }

        Ok(events)
    }

    pub fn draw_chrome(&mut self) -> Result<()> {
        let offset = self.grid.offset();
        let (board_w, board_h) = self.board_size();
        let (left, top) = (offset - 1, offset - 1);
        let (right, bottom) = (offset + board_w, offset + board_h);

        for x in left..=right {
            let ch = if x == left || x == right { '+' } else { '-' };
            self.print_at((x, top), ch)?;
            self.print_at((x, bottom), ch)?;
        }
        for y in offset..bottom {
            self.print_at((left, y), '|')?;
            self.print_at((right, y), '|')?;
        }

        self.print_str_at((offset, 0), TITLE)?;
        self.flush()
    }

    pub fn render(&mut self, frame: &Frame) -> Result<()> {
        let count = self.grid.cell_count();
        for y in 0..count {
            for x in 0..count {
                let cell = Cell::new(x, y);
                let ch = match frame.running {
                    true if frame.body.front() == Some(&cell) => frame.head_char,
                    true if frame.body.contains(&cell) => SNAKE_CHAR,
                    true if frame.food == cell => APPLE_CHAR,
                    _ => ' ',
                };
                self.fill_cell(cell, ch)?;
            }
        }

        let score_row = self.grid.offset() + self.board_size().1 + 1;
        let score_line = format!("Score: {:<6}", frame.score);
        self.print_str_at((self.grid.offset(), score_row), &score_line)?;

        if frame.running {
            self.hide_message()?;
        } else if !self.has_message() {
            let score = format!("Score: {}", frame.score);
            self.show_message(&[
                &score,
                "",
                "GAME OVER!",
                "",
                "Press ENTER to restart",
                "Press Esc to exit",
            ])?;
        }

        self.flush()
    }

    /// Both signals ring the terminal bell.
    pub fn play(&mut self, event: GameEvent) -> Result<()> {
        log::debug!("sound: {:?}", event);
        queue!(self.stdout, style::Print(BELL))?;
        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let (board_w, board_h) = self.board_size();
        let offset = self.grid.offset();
        let center = (offset + board_w / 2, offset + board_h / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Blank rows above and below the text
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        Ok(())
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(ch) = self.buffered(pos) {
                    self.print_at_no_save(pos, ch)?;
                }
            }
        }

        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn board_size(&self) -> Coords {
        let count = self.grid.cell_count() as TermInt;
        (count * self.grid.cell_size(), count)
    }

    fn fill_cell(&mut self, cell: Cell, ch: char) -> Result<()> {
        let (x, y) = self.grid.to_screen(cell);
        for dx in 0..self.grid.cell_size() {
            self.print_at((x + dx, y), ch)?;
        }
        Ok(())
    }

    fn print_str_at(&mut self, pos: Coords, s: &str) -> Result<()> {
        for (i, ch) in s.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch)?;
        }
        Ok(())
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn buffered(&self, pos: Coords) -> Option<char> {
        self.index(pos).map(|i| self.screen[i])
    }

    /// Skips characters that are already on screen. Anything under the
    /// message box is only recorded, and shows up when the box is hidden.
    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        let i = match self.index(pos) {
            Some(i) => i,
            None => return Ok(()),
        };
        if self.screen[i] == ch {
            return Ok(());
        }
        self.screen[i] = ch;

        let covered = self.current_msg.as_ref().map_or(false, |m| m.covers(pos));
        if !covered {
            self.print_at_no_save(pos, ch)?;
        }
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}

impl Session for TermManager {
    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Every step is attempted and the first failure is returned.
    fn restore(&mut self) -> Result<()> {
        let raw = terminal::disable_raw_mode();
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        raw?;
        Ok(())
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }

    fn covers(&self, pos: Coords) -> bool {
        let (x0, y0) = self.top_left;
        pos.0 >= x0 && pos.0 < x0 + self.width && pos.1 >= y0 && pos.1 < y0 + self.height
    }
}
