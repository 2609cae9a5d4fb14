use crate::types::Vector2D;
use crate::upgrades::PowerUpKind;

/// HUD scalars for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub lives: u32,
    pub level: u32,
    /// Remaining share of the timed power-up, in `(0, 1]`, if one is running.
    pub powerup_fraction: Option<f64>,
    pub shield_active: bool,
    pub paused: bool,
    pub game_over: bool,
}

pub trait Canvas {
    /// Closed outline, points in field coordinates.
    fn polygon(&mut self, points: &[Vector2D]);
    fn ship(&mut self, position: Vector2D, heading: f64, size: f64, invincible: bool, shielded: bool);
    fn bullet(&mut self, position: Vector2D);
    fn power_up(&mut self, position: Vector2D, radius: f64, kind: PowerUpKind);
    fn hud(&mut self, hud: &Hud);
}
