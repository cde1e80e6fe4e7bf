use macroquad::prelude::*;
use ::rand::SeedableRng;
use ::rand::rngs::SmallRng;

mod audio;
mod config;
mod game;
mod render;

use audio::SoundBank;
use config::Config;
use game::{Direction, Game, RunState, StepOutcome};
use render::{POPUP_LIFETIME, ScorePopup};

const SCREEN_WIDTH: i32 = 800;
const SCREEN_HEIGHT: i32 = 600;

fn window_conf() -> Conf {
    Conf {
        window_title: "HongAnh Snake".to_owned(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let cfg = Config::load("snake_config.json");

    let sounds = SoundBank::load(cfg.volume).await;
    // Missing logo is fine, the watermark is just skipped.
    let logo = match load_texture(&cfg.logo_path).await {
        Ok(texture) => Some(texture),
        Err(e) => {
            warn!("logo {} not loaded: {}", cfg.logo_path, e);
            None
        }
    };

    let mut game = Game::new(cfg.rules(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32));
    let mut rng = SmallRng::from_entropy();
    let mut popups: Vec<ScorePopup> = Vec::new();

    loop {
        let now = get_time();

        match game.state {
            RunState::Idle | RunState::GameOver => {
                if is_key_pressed(KeyCode::Enter) {
                    game.start();
                    popups.clear();
                    render::draw_game(&game, logo.as_ref());
                } else if game.state == RunState::Idle {
                    render::draw_intro(game.rules.width, game.rules.height, logo.as_ref());
                } else {
                    render::draw_game_over(&game, logo.as_ref());
                }
            }
            RunState::Running => {
                if is_key_pressed(KeyCode::Up) {
                    game.steer(Direction::UP);
                } else if is_key_pressed(KeyCode::Down) {
                    game.steer(Direction::DOWN);
                } else if is_key_pressed(KeyCode::Left) {
                    game.steer(Direction::LEFT);
                } else if is_key_pressed(KeyCode::Right) {
                    game.steer(Direction::RIGHT);
                }

                match game.step(&mut rng) {
                    StepOutcome::Pickup { at } => {
                        if let Some(sounds) = &sounds {
                            sounds.play_pickup();
                        }
                        let g = game.rules.grid_size;
                        popups.push(ScorePopup {
                            text: format!("+{}", game.rules.food_reward),
                            x: at.x + g / 2.0,
                            y: at.y + g / 2.0,
                            spawned: now,
                        });
                    }
                    StepOutcome::Died => {
                        if let Some(sounds) = &sounds {
                            sounds.play_game_over();
                        }
                    }
                    StepOutcome::Idle | StepOutcome::Advanced => {}
                }

                if game.state == RunState::GameOver {
                    render::draw_game_over(&game, logo.as_ref());
                } else {
                    render::draw_game(&game, logo.as_ref());
                    render::draw_popups(&popups, now);
                }
            }
        }

        popups.retain(|p| now - p.spawned < POPUP_LIFETIME);

        next_frame().await;
    }
}
