//! Frame drawing. Translates the game's public state into terminal
//! commands; no game logic lives here.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use snake_engine::{GameState, Point};

const C_WALL: Color = Color::Red;
const C_SNAKE: Color = Color::Green;
const C_FOOD: Color = Color::White;
const C_SCORE: Color = Color::Yellow;
const C_BANNER: Color = Color::Red;

const CELL: char = '█';
const FOOD_CELL: char = '•';

/// Renders one complete frame from the game's public state.
pub fn render_game<W: Write>(
    out: &mut W,
    game: &GameState,
    debug_overlay: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_walls(out, game)?;
    draw_snake(out, game)?;
    for food in game.foods() {
        draw_cell(out, food.location, FOOD_CELL, C_FOOD)?;
    }
    draw_score_bar(out, game, debug_overlay)?;

    out.queue(style::ResetColor)?;
    out.flush()
}

/// Overlays the death banner on an already rendered frame.
pub fn render_death_banner<W: Write>(out: &mut W, game: &GameState) -> std::io::Result<()> {
    let banner = "  G A M E   O V E R  ";
    let x = (game.board.width.saturating_sub(banner.chars().count()) / 2) as u16;
    let y = (game.board.height / 2) as u16;

    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(C_BANNER))?;
    out.queue(Print(banner))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

fn draw_cell<W: Write>(out: &mut W, p: Point, ch: char, color: Color) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(p.x as u16, p.y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(ch))?;
    Ok(())
}

/// Draws a horizontal or vertical run of cells between two points, in
/// either endpoint order.
fn draw_line<W: Write>(
    out: &mut W,
    from: Point,
    to: Point,
    ch: char,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    if from.y == to.y {
        let (min_x, max_x) = (from.x.min(to.x), from.x.max(to.x));
        out.queue(cursor::MoveTo(min_x as u16, from.y as u16))?;
        for _ in min_x..=max_x {
            out.queue(Print(ch))?;
        }
    } else {
        let (min_y, max_y) = (from.y.min(to.y), from.y.max(to.y));
        for y in min_y..=max_y {
            out.queue(cursor::MoveTo(from.x as u16, y as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

fn draw_walls<W: Write>(out: &mut W, game: &GameState) -> std::io::Result<()> {
    let right = game.board.width - 1;
    let bottom = game.board.height - 1;
    draw_line(out, Point::new(0, 0), Point::new(right, 0), CELL, C_WALL)?;
    draw_line(out, Point::new(0, bottom), Point::new(right, bottom), CELL, C_WALL)?;
    draw_line(out, Point::new(0, 0), Point::new(0, bottom), CELL, C_WALL)?;
    draw_line(out, Point::new(right, 0), Point::new(right, bottom), CELL, C_WALL)?;
    Ok(())
}

fn draw_snake<W: Write>(out: &mut W, game: &GameState) -> std::io::Result<()> {
    for (from, to) in game.snake.segments(&game.board) {
        draw_line(out, from, to, CELL, C_SNAKE)?;
    }
    Ok(())
}

fn draw_score_bar<W: Write>(
    out: &mut W,
    game: &GameState,
    debug_overlay: bool,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, game.board.height as u16))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(format!("Score: {}", game.score)))?;
    if game.paused {
        out.queue(Print("   PAUSED"))?;
    }
    if debug_overlay {
        out.queue(Print(format!("   cycle {}", game.current_cycle)))?;
    }
    Ok(())
}
