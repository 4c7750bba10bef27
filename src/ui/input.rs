/// Terminal input translator.
///
/// Drains every pending crossterm event once per frame and turns it into
/// game `Command`s:
///   - Arrows / WASD         →  Steer
///   - Space                 →  Pause (running/paused), Confirm (game over)
///   - Enter                 →  Confirm
///   - Left mouse button     →  Pointer, in surface pixels
///   - Esc / q / Ctrl+C      →  Quit
///
/// Release events are ignored; key repeat steers again, which the
/// reversal guard makes harmless.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEventKind,
};

use crate::domain::grid::Direction;
use crate::sim::control::Command;

pub struct InputState {
    /// Commands collected during the most recent drain, in arrival order.
    pub commands: Vec<Command>,
    pub quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            commands: Vec::with_capacity(8),
            quit: false,
        }
    }

    /// Drain all pending terminal events without blocking.
    /// `to_surface` maps a clicked terminal cell to surface pixels.
    pub fn drain_events<F>(&mut self, to_surface: F)
    where
        F: Fn(u16, u16) -> Option<(f32, f32)>,
    {
        self.commands.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => self.on_key(key),
                Ok(Event::Mouse(m)) => {
                    if let MouseEventKind::Down(MouseButton::Left) = m.kind {
                        if let Some((x, y)) = to_surface(m.column, m.row) {
                            self.commands.push(Command::Pointer { x, y });
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if is_quit(&key) {
            self.quit = true;
            return;
        }
        self.commands.extend_from_slice(key_commands(key.code));
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Space carries both meanings; `control::apply` ignores whichever does
/// not fit the current phase.
fn key_commands(code: KeyCode) -> &'static [Command] {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => &[Command::Steer(Direction::Up)],
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => &[Command::Steer(Direction::Down)],
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => &[Command::Steer(Direction::Left)],
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => &[Command::Steer(Direction::Right)],
        KeyCode::Char(' ') => &[Command::Pause, Command::Confirm],
        KeyCode::Enter => &[Command::Confirm],
        _ => &[],
    }
}
