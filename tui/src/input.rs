use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use snake_engine::Buttons;

/// Everything the shell learned about input during one tick window.
pub struct TickInput {
    pub keys: Buttons,
    pub quit: bool,
}

/// Terminal keys standing in for the handheld's buttons.
pub fn button_for_key(code: KeyCode) -> Option<Buttons> {
    match code {
        KeyCode::Up => Some(Buttons::UP),
        KeyCode::Down => Some(Buttons::DOWN),
        KeyCode::Left => Some(Buttons::LEFT),
        KeyCode::Right => Some(Buttons::RIGHT),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Buttons::A),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Buttons::START),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Buttons::SELECT),
        KeyCode::Tab => Some(Buttons::L),
        _ => None,
    }
}

/// Keys that quit the program outright, at any screen.
pub fn is_quit_key(event: &KeyEvent) -> bool {
    matches!(event.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (event.code == KeyCode::Char('c')
            && event.modifiers.contains(KeyModifiers::CONTROL))
}

/// Blocks for one tick window, merging every key seen down into a single
/// button mask — brief presses between cycles are kept, the way the
/// handheld's key-sampling delay loop kept them.
pub fn collect_tick_input(rx: &mpsc::Receiver<Event>, window: Duration) -> TickInput {
    let deadline = Instant::now() + window;
    let mut keys = Buttons::empty();
    let mut quit = false;

    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        match rx.recv_timeout(deadline - now) {
            Ok(Event::Key(event)) if event.kind != KeyEventKind::Release => {
                if is_quit_key(&event) {
                    quit = true;
                } else if let Some(button) = button_for_key(event.code) {
                    keys |= button;
                }
            }
            Ok(_) => {}
            Err(mpsc::RecvTimeoutError::Timeout) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                quit = true;
                break;
            }
        }
    }

    TickInput { keys, quit }
}
