use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "ammo_snake.yaml";

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct StartPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    pub board_size: usize,
    pub fight_rows: usize,
    pub fight_cols: usize,
    pub tick_interval_ms: u64,
    pub initial_items: usize,
    pub snake_length: usize,
    pub snake_head: StartPosition,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            board_size: 20,
            fight_rows: 20,
            fight_cols: 30,
            tick_interval_ms: 100,
            initial_items: 3,
            snake_length: 14,
            snake_head: StartPosition { x: 5, y: 5 },
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), String> {
        if !(5..=100).contains(&self.board_size) {
            return Err("board_size must be between 5 and 100".to_string());
        }
        if self.fight_rows < self.board_size || self.fight_cols < self.board_size {
            return Err("fight mode dimensions must not be smaller than board_size".to_string());
        }
        if self.fight_rows > 100 || self.fight_cols > 100 {
            return Err("fight mode dimensions must not exceed 100".to_string());
        }
        if !(10..=5000).contains(&self.tick_interval_ms) {
            return Err("tick_interval_ms must be between 10 and 5000".to_string());
        }

        let fit_error = || format!(
            "a {}-segment snake with its head at ({}, {}) does not fit on a {}x{} board",
            self.snake_length, self.snake_head.x, self.snake_head.y, self.board_size, self.board_size
        );

        if self.snake_length == 0 {
            return Err("snake_length must be at least 1".to_string());
        }
        // The snake starts vertical, so it can be no longer than the board.
        if self.snake_length > self.board_size {
            return Err(fit_error());
        }

        // Both are at most 100 here.
        let size = i32::try_from(self.board_size).map_err(|_| fit_error())?;
        let length = i32::try_from(self.snake_length).map_err(|_| fit_error())?;

        let head = self.snake_head;
        if head.x < 0 || head.y < 0 || head.x >= size || head.y >= size {
            return Err(fit_error());
        }
        let tail_y = head.y.checked_add(length - 1).ok_or_else(fit_error)?;
        if tail_y >= size {
            return Err(fit_error());
        }

        let free_cells = (self.board_size * self.board_size).saturating_sub(self.snake_length);
        if self.initial_items > free_cells {
            return Err("initial_items does not fit next to the snake".to_string());
        }
        Ok(())
    }
}

impl Settings {
    /// Reads settings from a YAML file without validating them, so callers
    /// can apply overrides first. A missing file yields the defaults.
    pub fn read(path: &Path) -> Result<Settings, String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(err) => return Err(format!("Failed to read config file: {}", err)),
        };

        serde_yaml_ng::from_str(&content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }

    pub fn load(path: &Path) -> Result<Settings, String> {
        let settings = Settings::read(path)?;
        settings.validate().map_err(|e| format!("Config validation error: {}", e))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        self.validate().map_err(|e| format!("Config validation error: {}", e))?;

        let content = serde_yaml_ng::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_ammo_snake_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = get_temp_file_path();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = get_temp_file_path();
        let settings = Settings { tick_interval_ms: 150, fight_cols: 40, ..Settings::default() };

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let path = get_temp_file_path();
        std::fs::write(&path, "tick_interval_ms: 250\n").unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.tick_interval_ms, 250);
        assert_eq!(loaded.board_size, 20);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = get_temp_file_path();
        std::fs::write(&path, "board_size: 3\n").unwrap();
        let result = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(result.unwrap_err().contains("board_size"));
    }

    #[test]
    fn test_snake_must_fit_on_board() {
        let settings = Settings { snake_length: 16, ..Settings::default() };
        assert!(settings.validate().is_err());

        let settings = Settings { snake_length: 15, ..Settings::default() };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_huge_snake_length_is_rejected() {
        let path = get_temp_file_path();
        std::fs::write(&path, "snake_length: 4294967296\n").unwrap();
        let result = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(result.unwrap_err().contains("does not fit"));
    }

    #[test]
    fn test_extreme_snake_head_is_rejected() {
        let settings = Settings { snake_head: StartPosition { x: 5, y: i32::MAX }, ..Settings::default() };
        assert!(settings.validate().is_err());

        let settings = Settings { snake_head: StartPosition { x: i32::MIN, y: 5 }, ..Settings::default() };
        assert!(settings.validate().is_err());

        let settings = Settings { snake_length: usize::MAX, ..Settings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_read_defers_validation_to_the_caller() {
        let path = get_temp_file_path();
        std::fs::write(&path, "tick_interval_ms: 1\n").unwrap();
        let loaded = Settings::load(&path);
        let mut read = Settings::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(loaded.is_err());
        assert!(read.validate().is_err());
        read.tick_interval_ms = 120;
        assert!(read.validate().is_ok());
    }

    #[test]
    fn test_fight_mode_cannot_be_smaller_than_board() {
        let settings = Settings { fight_cols: 10, ..Settings::default() };
        assert!(settings.validate().is_err());
    }
}
