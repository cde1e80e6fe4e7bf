use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::game::Rules;

/// Optional tuning read from `snake_config.json` next to the binary.
/// Every field defaults, so a partial or missing file just means stock
/// behavior; a malformed file is ignored with a warning.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub grid_size: f32,
    pub extra_grow: usize,
    pub start_speed: f32,
    pub speed_increase: f32,
    pub food_reward: u32,
    pub volume: f32,
    pub logo_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            extra_grow: 3,
            start_speed: 2.0,
            speed_increase: 0.1,
            food_reward: 10,
            volume: 1.0,
            logo_path: "assets/logo.png".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Self {
        if !Path::new(path).exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                macroquad::prelude::warn!("ignoring malformed {}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn rules(&self, width: f32, height: f32) -> Rules {
        Rules {
            grid_size: self.grid_size,
            width,
            height,
            extra_grow: self.extra_grow,
            start_speed: self.start_speed,
            speed_increase: self.speed_increase,
            food_reward: self.food_reward,
        }
    }
}
