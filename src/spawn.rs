use crate::constants::*;
use crate::entities::Asteroid;
use crate::types::Vector2D;
use crate::upgrades::{PowerUp, PowerUpKind};
use rand::Rng;

// --- Split, power-up drop and level escalation rules ---
pub fn can_split(size: u32) -> bool {
    size >= ASTEROID_SPLIT_MIN_SIZE
}

/// Fragments left behind by a destroyed asteroid.
///
/// Asteroids of at least `ASTEROID_SPLIT_MIN_SIZE` break into
/// `ASTEROID_SPLIT_COUNT` pieces of `size / ASTEROID_SPLIT_DIVISOR`, each with
/// its own outline, heading and speed. Anything smaller is simply gone.
pub fn split_asteroid(parent: &Asteroid, rng: &mut impl Rng) -> Vec<Asteroid> {
    if !can_split(parent.size) {
        return Vec::new();
    }
    let child_size = parent.size / ASTEROID_SPLIT_DIVISOR;
    (0..ASTEROID_SPLIT_COUNT)
        .map(|_| Asteroid::new(parent.position.x, parent.position.y, child_size, rng))
        .collect()
}

/// Rolls for a power-up drop. Nothing drops while one is already out.
pub fn roll_powerup(position: Vector2D, existing: usize, chance: f64, rng: &mut impl Rng) -> Option<PowerUp> {
    if existing > 0 {
        return None;
    }
    // gen_bool panics outside [0, 1]
    if chance.is_nan() || chance <= 0.0 {
        return None;
    }
    if !rng.gen_bool(chance.min(1.0)) {
        return None;
    }
    Some(PowerUp::new(position, PowerUpKind::random(rng)))
}

/// Asteroid count for a freshly reached level.
pub fn asteroids_for_level(level: u32) -> usize {
    LEVEL_BASE_ASTEROIDS + level as usize * LEVEL_ASTEROIDS_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_large_asteroid_splits_in_two() {
        let mut rng = StdRng::seed_from_u64(21);
        let parent = Asteroid::new(200.0, 150.0, 80, &mut rng);
        let children = split_asteroid(&parent, &mut rng);
        assert_eq!(children.len(), ASTEROID_SPLIT_COUNT);
        for child in &children {
            assert_eq!(child.size, 40);
            assert_eq!(child.position, parent.position);
            assert_eq!(child.shape.len(), child.sides);
        }
    }

    #[test]
    fn test_split_threshold() {
        let mut rng = StdRng::seed_from_u64(22);
        let at_threshold = Asteroid::new(0.0, 0.0, ASTEROID_SPLIT_MIN_SIZE, &mut rng);
        assert_eq!(split_asteroid(&at_threshold, &mut rng).len(), 2);

        let below = Asteroid::new(0.0, 0.0, ASTEROID_SPLIT_MIN_SIZE - 1, &mut rng);
        assert!(split_asteroid(&below, &mut rng).is_empty());
    }

    #[test]
    fn test_split_chain_terminates() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut generation = vec![Asteroid::new(0.0, 0.0, ASTEROID_MAX_SIZE, &mut rng)];
        let mut rounds = 0;
        while !generation.is_empty() {
            generation = generation.iter().flat_map(|a| split_asteroid(a, &mut rng)).collect();
            rounds += 1;
            assert!(rounds < 10);
        }
        // 80 -> 40 -> 20 -> gone
        assert_eq!(rounds, 3);
    }

    #[test]
    fn test_powerup_roll_respects_existing() {
        let mut rng = StdRng::seed_from_u64(24);
        let at = Vector2D::new(10.0, 10.0);
        assert!(roll_powerup(at, 1, 1.0, &mut rng).is_none());
        let dropped = roll_powerup(at, 0, 1.0, &mut rng).expect("certain drop");
        assert_eq!(dropped.position, at);
        assert!(roll_powerup(at, 0, 0.0, &mut rng).is_none());
        assert!(roll_powerup(at, 0, f64::NAN, &mut rng).is_none());
        assert!(roll_powerup(at, 0, -1.0, &mut rng).is_none());
        assert!(roll_powerup(at, 0, 7.5, &mut rng).is_some());
    }

    #[test]
    fn test_powerup_roll_rate() {
        let mut rng = StdRng::seed_from_u64(25);
        let at = Vector2D::new(0.0, 0.0);
        let drops = (0..10_000).filter(|_| roll_powerup(at, 0, POWERUP_SPAWN_CHANCE, &mut rng).is_some()).count();
        assert!((1700..2300).contains(&drops), "{} drops", drops);
    }

    #[test]
    fn test_level_asteroid_count() {
        assert_eq!(asteroids_for_level(1), 7);
        assert_eq!(asteroids_for_level(2), 9);
        assert_eq!(asteroids_for_level(10), 25);
    }
}
