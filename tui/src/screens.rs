//! The non-gameplay screens: splash card, map-size menu, game-over
//! summary, and the too-small-terminal notice.

use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    QueueableCommand, cursor,
    event::{Event, KeyCode, KeyEventKind},
    style::{self, Color, Print},
    terminal,
};

use snake_engine::MapSize;

use crate::input::is_quit_key;

const SPLASH_HOLD: Duration = Duration::from_millis(1500);

pub enum MenuOutcome {
    Start,
    Quit,
}

pub enum GameOverOutcome {
    Menu,
    Quit,
}

pub fn splash<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (cx, cy) = center()?;

    print_centered(out, cx, cy.saturating_sub(1), Color::Green, "~  S N A K E  ~")?;
    print_centered(out, cx, cy + 1, Color::DarkGrey, "an arcade classic for your terminal")?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    std::thread::sleep(SPLASH_HOLD);
    Ok(())
}

pub fn menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    map_size: &mut MapSize,
    high_score: u32,
) -> std::io::Result<MenuOutcome> {
    draw_menu(out, *map_size, high_score)?;

    loop {
        let Ok(event) = rx.recv() else {
            return Ok(MenuOutcome::Quit);
        };
        let Event::Key(key) = event else { continue };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if is_quit_key(&key) {
            return Ok(MenuOutcome::Quit);
        }
        match key.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                *map_size = match *map_size {
                    MapSize::Small => MapSize::Large,
                    MapSize::Large => MapSize::Small,
                };
                draw_menu(out, *map_size, high_score)?;
            }
            KeyCode::Enter => return Ok(MenuOutcome::Start),
            _ => {}
        }
    }
}

pub fn game_over<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: u32,
    high_score: u32,
) -> std::io::Result<GameOverOutcome> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (cx, cy) = center()?;

    print_centered(out, cx, cy.saturating_sub(3), Color::Red, "Game over :(")?;
    print_centered(out, cx, cy.saturating_sub(1), Color::White, &format!("Your score: {}", score))?;
    print_centered(out, cx, cy, Color::White, &format!("High score: {}", high_score))?;
    print_centered(out, cx, cy + 2, Color::DarkGrey, "Enter to play again   Q to quit")?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        let Ok(event) = rx.recv() else {
            return Ok(GameOverOutcome::Quit);
        };
        let Event::Key(key) = event else { continue };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if is_quit_key(&key) {
            return Ok(GameOverOutcome::Quit);
        }
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')) {
            return Ok(GameOverOutcome::Menu);
        }
    }
}

pub fn too_small<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    need_cols: usize,
    need_rows: usize,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (cols, rows) = terminal::size()?;
    let (cx, cy) = center()?;

    print_centered(
        out,
        cx,
        cy,
        Color::Red,
        &format!(
            "Terminal too small: this map needs {}x{}, you have {}x{}",
            need_cols, need_rows, cols, rows
        ),
    )?;
    print_centered(out, cx, cy + 2, Color::DarkGrey, "press any key to go back")?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        match rx.recv() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => return Ok(()),
            Ok(_) => {}
            Err(_) => return Ok(()),
        }
    }
}

fn draw_menu<W: Write>(out: &mut W, map_size: MapSize, high_score: u32) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (cx, cy) = center()?;

    print_centered(out, cx, cy.saturating_sub(6), Color::Green, "~  S N A K E  ~")?;
    if high_score > 0 {
        print_centered(out, cx, cy.saturating_sub(4), Color::Yellow, &format!("High score: {}", high_score))?;
    }

    print_centered(out, cx, cy.saturating_sub(2), Color::White, "Current map size:")?;

    let (small, large) = match map_size {
        MapSize::Small => ("▶ SMALL ◀", "  LARGE  "),
        MapSize::Large => ("  SMALL  ", "▶ LARGE ◀"),
    };
    out.queue(cursor::MoveTo(cx.saturating_sub(11), cy.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(selected_color(map_size == MapSize::Small)))?;
    out.queue(Print(small))?;
    out.queue(Print("   "))?;
    out.queue(style::SetForegroundColor(selected_color(map_size == MapSize::Large)))?;
    out.queue(Print(large))?;

    print_centered(out, cx, cy + 1, Color::White, "Tab to change map size")?;
    print_centered(out, cx, cy + 2, Color::Green, "Enter to start game")?;

    print_centered(out, cx, cy + 4, Color::DarkGrey, "Arrows to turn the snake")?;
    print_centered(out, cx, cy + 5, Color::DarkGrey, "P to play/pause   R to reset")?;
    print_centered(out, cx, cy + 6, Color::DarkGrey, "Q to quit")?;

    out.queue(style::ResetColor)?;
    out.flush()
}

fn selected_color(selected: bool) -> Color {
    if selected { Color::Yellow } else { Color::DarkGrey }
}

fn center() -> std::io::Result<(u16, u16)> {
    let (width, height) = terminal::size()?;
    Ok((width / 2, height / 2))
}

fn print_centered<W: Write>(
    out: &mut W,
    cx: u16,
    y: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(
        cx.saturating_sub(text.chars().count() as u16 / 2),
        y,
    ))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
