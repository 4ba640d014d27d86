use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    Restart,
    Quit,
}

/// Arrow keys or WASD steer, Enter restarts, Esc / q / CTRL+C quit.
pub fn intent_for(ev: &KeyEvent) -> Option<Intent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Intent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Intent::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Intent::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Intent::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Intent::Steer(Right)),
        KeyCode::Enter => Some(Intent::Restart),
        KeyCode::Esc | KeyCode::Char('q') => Some(Intent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
