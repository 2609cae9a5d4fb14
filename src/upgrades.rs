use crate::constants::POWERUP_RADIUS;
use crate::types::Vector2D;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    // Three-way spread shot for a limited time
    TriShot,
    // Absorbs one asteroid hit
    Shield,
}

impl PowerUpKind {
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..2) {
            0 => PowerUpKind::TriShot,
            _ => PowerUpKind::Shield,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::TriShot => "trishot",
            PowerUpKind::Shield => "shield",
        }
    }
}

/// A floating pickup. Power-ups never move and never expire; they only pulse.
#[derive(Clone, Debug)]
pub struct PowerUp {
    pub position: Vector2D,
    pub radius: f64,
    pub kind: PowerUpKind,
    pub pulse: u32,
}

impl PowerUp {
    pub fn new(position: Vector2D, kind: PowerUpKind) -> Self {
        PowerUp { position, radius: POWERUP_RADIUS, kind, pulse: 0 }
    }

    pub fn update(&mut self) {
        self.pulse = self.pulse.wrapping_add(1);
    }

    /// Animation scale in `[0.8, 1.2]`, for hosts that want the pickup to breathe.
    pub fn pulse_scale(&self) -> f64 {
        1.0 + 0.2 * (self.pulse as f64 * 0.1).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_powerup_stays_put() {
        let mut powerup = PowerUp::new(Vector2D::new(50.0, 60.0), PowerUpKind::TriShot);
        for _ in 0..1000 {
            powerup.update();
            let scale = powerup.pulse_scale();
            assert!((0.8..=1.2).contains(&scale));
        }
        assert_eq!(powerup.position, Vector2D::new(50.0, 60.0));
        assert_eq!(powerup.radius, POWERUP_RADIUS);
    }

    #[test]
    fn test_random_kind_covers_both() {
        let mut rng = StdRng::seed_from_u64(1);
        let kinds: Vec<PowerUpKind> = (0..64).map(|_| PowerUpKind::random(&mut rng)).collect();
        assert!(kinds.contains(&PowerUpKind::TriShot));
        assert!(kinds.contains(&PowerUpKind::Shield));
    }
}
