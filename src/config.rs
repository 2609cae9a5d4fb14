use crate::constants::*;
use log::warn;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub field_width: f64,
    pub field_height: f64,
    pub starting_lives: u32,
    pub starting_level: u32,
    /// Probability that destroying an asteroid drops a power-up.
    pub powerup_chance: f64,
    pub powerup_duration: u32,
    pub respawn_delay: u32,
    pub invincibility_ticks: u32,
    pub bullet_lifetime: u32,
    pub bullet_speed: f64,
    pub bullet_cooldown: u32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            starting_lives: STARTING_LIVES,
            starting_level: STARTING_LEVEL,
            powerup_chance: POWERUP_SPAWN_CHANCE,
            powerup_duration: POWERUP_DURATION,
            respawn_delay: RESPAWN_DELAY,
            invincibility_ticks: INVINCIBILITY_TICKS,
            bullet_lifetime: BULLET_LIFETIME,
            bullet_speed: BULLET_SPEED,
            bullet_cooldown: BULLET_COOLDOWN,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces values the simulation cannot run with by their defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.field_width.is_finite() && self.field_width > 0.0) {
            warn!("Invalid field width {}, using {}", self.field_width, FIELD_WIDTH);
            self.field_width = FIELD_WIDTH;
        }
        if !(self.field_height.is_finite() && self.field_height > 0.0) {
            warn!("Invalid field height {}, using {}", self.field_height, FIELD_HEIGHT);
            self.field_height = FIELD_HEIGHT;
        }
        if self.powerup_chance.is_nan() {
            warn!("Power-up chance is NaN, disabling drops");
            self.powerup_chance = 0.0;
        }
        self.powerup_chance = self.powerup_chance.clamp(0.0, 1.0);
        self
    }

    pub fn center(&self) -> (f64, f64) {
        (self.field_width / 2.0, self.field_height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let config = GameConfig {
            field_width: 0.0,
            field_height: f64::NAN,
            powerup_chance: f64::NAN,
            ..GameConfig::default()
        }
        .sanitized();
        assert_eq!(config.field_width, FIELD_WIDTH);
        assert_eq!(config.field_height, FIELD_HEIGHT);
        assert_eq!(config.powerup_chance, 0.0);

        let config = GameConfig { field_width: -5.0, powerup_chance: 3.0, ..GameConfig::default() }.sanitized();
        assert_eq!(config.field_width, FIELD_WIDTH);
        assert_eq!(config.powerup_chance, 1.0);
    }

    #[test]
    fn test_sanitized_keeps_good_values() {
        let config = GameConfig { field_width: 320.0, powerup_chance: 0.5, ..GameConfig::default() }.with_seed(4);
        assert_eq!(config.clone().sanitized(), config);
    }
}
