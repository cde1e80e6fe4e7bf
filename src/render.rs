use macroquad::prelude::*;

use crate::game::{Direction, Game};

const BACKGROUND: Color = Color::new(0.11, 0.145, 0.149, 1.0);
const WATERMARK: Color = Color::new(0.0, 1.0, 1.0, 1.0);
const DECOR: Color = Color::new(0.298, 0.686, 0.314, 1.0);
const SNAKE: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const APPLE_BODY: Color = Color::new(0.8, 0.0, 0.0, 1.0);
const APPLE_SHINE: Color = Color::new(1.0, 0.4, 0.4, 1.0);
const APPLE_STEM: Color = Color::new(0.4, 0.2, 0.0, 1.0);
const APPLE_LEAF: Color = Color::new(0.2, 0.6, 0.2, 1.0);
const HUD: Color = Color::new(1.0, 0.843, 0.0, 1.0);

pub const POPUP_LIFETIME: f64 = 1.0;

/// Transient "+10" label left behind at an eaten food's position.
pub struct ScorePopup {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub spawned: f64,
}

fn draw_background(width: f32, height: f32) {
    clear_background(BACKGROUND);
    let tag = "HongAnh Snake";
    let m = measure_text(tag, None, 12, 1.0);
    draw_text(tag, width - 30.0 - m.width, height - 10.0, 12.0, WATERMARK);
}

fn draw_decorations(width: f32, height: f32) {
    for (x, y) in [
        (10.0, 10.0),
        (width - 10.0, 10.0),
        (10.0, height - 10.0),
        (width - 10.0, height - 10.0),
    ] {
        draw_circle(x, y, 5.0, DECOR);
    }
}

// Semi-transparent centered watermark; skipped while the texture never
// loaded.
fn draw_logo(logo: Option<&Texture2D>, width: f32, height: f32) {
    let Some(logo) = logo else { return };
    let (w, h) = (600.0, 300.0);
    draw_texture_ex(
        logo,
        (width - w) / 2.0,
        (height - h) / 2.0,
        Color::new(1.0, 1.0, 1.0, 0.5),
        DrawTextureParams {
            dest_size: Some(vec2(w, h)),
            ..Default::default()
        },
    );
}

fn draw_apple(cx: f32, cy: f32, grid: f32) {
    draw_circle(cx, cy, grid / 2.0 - 2.0, APPLE_BODY);
    draw_circle(cx - 3.0, cy - 3.0, grid / 5.0, APPLE_SHINE);
    draw_rectangle(cx - 2.0, cy - grid / 2.0 - 2.0, 4.0, 6.0, APPLE_STEM);
    draw_ellipse(cx + 3.0, cy - grid / 2.0 + 2.0, 4.0, 2.0, 45.0, APPLE_LEAF);
}

fn draw_snake(game: &Game) {
    let g = game.rules.grid_size;
    for (i, seg) in game.snake.iter().enumerate() {
        let (cx, cy) = (seg.x + g / 2.0, seg.y + g / 2.0);
        draw_circle(cx, cy, g / 2.0 - 1.0, SNAKE);
        if i == 0 && !game.direction.is_still() {
            draw_eyes(cx, cy, g, game.direction);
        }
    }
}

// Eye placement follows the direction of travel: forward along the axis
// of motion, spread across it.
fn draw_eyes(cx: f32, cy: f32, g: f32, dir: Direction) {
    let (ox, oy) = match (dir.dx, dir.dy) {
        (1, _) => (g * 0.3, g * 0.2),
        (-1, _) => (-g * 0.3, g * 0.2),
        (_, 1) => (g * 0.2, g * 0.3),
        _ => (g * 0.2, -g * 0.3),
    };
    for ey in [-oy, oy] {
        draw_circle(cx + ox, cy + ey, 3.0, WHITE);
        draw_circle(cx + ox + 1.0, cy + ey, 1.0, BLACK);
    }
}

fn draw_score(score: u32) {
    draw_text(&format!("Score: {}", score), 10.0, 20.0, 16.0, HUD);
}

fn draw_centered(text: &str, y: f32, width: f32) {
    let m = measure_text(text, None, 24, 1.0);
    draw_text(text, (width - m.width) / 2.0, y, 24.0, HUD);
}

pub fn draw_popups(popups: &[ScorePopup], now: f64) {
    for popup in popups {
        let age = ((now - popup.spawned) / POPUP_LIFETIME).clamp(0.0, 1.0) as f32;
        let color = Color::new(HUD.r, HUD.g, HUD.b, 1.0 - age);
        // Drifts upward as it fades.
        draw_text(&popup.text, popup.x, popup.y - age * 20.0, 16.0, color);
    }
}

/// One live-game frame: pure read of the game state.
pub fn draw_game(game: &Game, logo: Option<&Texture2D>) {
    let (w, h) = (game.rules.width, game.rules.height);
    let g = game.rules.grid_size;
    draw_background(w, h);
    draw_logo(logo, w, h);
    draw_snake(game);
    draw_apple(game.food.x + g / 2.0, game.food.y + g / 2.0, g);
    draw_decorations(w, h);
    draw_score(game.score);
}

pub fn draw_intro(width: f32, height: f32, logo: Option<&Texture2D>) {
    draw_background(width, height);
    draw_decorations(width, height);
    draw_logo(logo, width, height);
    draw_centered("HongAnh Snake", height / 2.0 - 40.0, width);
    draw_centered("Press Enter to start", height / 2.0, width);
}

/// Final frame with the game-over overlay in place of the live HUD.
pub fn draw_game_over(game: &Game, logo: Option<&Texture2D>) {
    let (w, h) = (game.rules.width, game.rules.height);
    let g = game.rules.grid_size;
    draw_background(w, h);
    draw_logo(logo, w, h);
    draw_snake(game);
    draw_apple(game.food.x + g / 2.0, game.food.y + g / 2.0, g);
    draw_decorations(w, h);
    draw_centered("Game Over!", h / 2.0, w);
    draw_centered(&format!("Score: {}", game.score), h / 2.0 + 40.0, w);
    draw_centered("Press Enter to play again", h / 2.0 + 80.0, w);
}
