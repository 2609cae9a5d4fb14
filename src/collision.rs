use crate::entities::{Asteroid, Bullet, Player};
use crate::types::Vector2D;
use crate::upgrades::PowerUp;

// --- Distance-based collision tests; removals are applied by the caller ---
pub trait Collider {
    fn center(&self) -> Vector2D;
    fn radius(&self) -> f64;
}

impl Collider for Asteroid {
    fn center(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        self.size as f64
    }
}

// Bullets are points.
impl Collider for Bullet {
    fn center(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        0.0
    }
}

impl Collider for Player {
    fn center(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        self.size
    }
}

impl Collider for PowerUp {
    fn center(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

pub fn collision_distance(a: &impl Collider, b: &impl Collider) -> f64 {
    a.center().distance(b.center())
}

pub fn collides(a: &impl Collider, b: &impl Collider) -> bool {
    collision_distance(a, b) < a.radius() + b.radius()
}

/// Outcome of one collision pass, as indices into the tick's collections.
#[derive(Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// `(bullet, asteroid)` pairs, in bullet order.
    pub bullet_hits: Vec<(usize, usize)>,
    pub player_hit: Option<usize>,
    pub powerup_hit: Option<usize>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.bullet_hits.is_empty() && self.player_hit.is_none() && self.powerup_hit.is_none()
    }

    pub fn destroyed_asteroids(&self) -> impl Iterator<Item = usize> + '_ {
        self.bullet_hits.iter().map(|&(_, asteroid)| asteroid)
    }
}

/// Pairs each bullet with the first asteroid it touches, in iteration order.
///
/// A bullet registers at most one hit, and an asteroid already claimed by an
/// earlier bullet is not available to later ones.
pub fn bullet_asteroid_hits(bullets: &[Bullet], asteroids: &[Asteroid]) -> Vec<(usize, usize)> {
    let mut claimed = vec![false; asteroids.len()];
    let mut hits = Vec::new();
    for (bullet_index, bullet) in bullets.iter().enumerate() {
        let target = asteroids
            .iter()
            .enumerate()
            .find(|(asteroid_index, asteroid)| !claimed[*asteroid_index] && collides(bullet, *asteroid));
        if let Some((asteroid_index, _)) = target {
            claimed[asteroid_index] = true;
            hits.push((bullet_index, asteroid_index));
        }
    }
    hits
}

/// First asteroid touching the player, skipping asteroids in `destroyed`.
pub fn player_asteroid_hit(player: &Player, asteroids: &[Asteroid], destroyed: &[usize]) -> Option<usize> {
    asteroids
        .iter()
        .enumerate()
        .filter(|(index, _)| !destroyed.contains(index))
        .find(|(_, asteroid)| collides(player, *asteroid))
        .map(|(index, _)| index)
}

pub fn player_powerup_hit(player: &Player, powerups: &[PowerUp]) -> Option<usize> {
    powerups.iter().position(|powerup| collides(player, powerup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrades::PowerUpKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn asteroid_at(x: f64, y: f64, size: u32) -> Asteroid {
        let mut rng = StdRng::seed_from_u64(0);
        Asteroid::new(x, y, size, &mut rng)
    }

    fn bullet_at(x: f64, y: f64) -> Bullet {
        Bullet::new(Vector2D::new(x, y), 0.0, 0.0, 10)
    }

    #[test]
    fn test_collides_is_strict() {
        let asteroid = asteroid_at(100.0, 100.0, 30);
        assert!(collides(&bullet_at(129.9, 100.0), &asteroid));
        assert!(!collides(&bullet_at(130.0, 100.0), &asteroid));
    }

    #[test]
    fn test_bullet_hits_first_asteroid_only() {
        let asteroids = vec![asteroid_at(100.0, 100.0, 40), asteroid_at(110.0, 100.0, 40)];
        let bullets = vec![bullet_at(105.0, 100.0)];
        assert_eq!(bullet_asteroid_hits(&bullets, &asteroids), vec![(0, 0)]);
    }

    #[test]
    fn test_claimed_asteroid_passes_to_next() {
        let asteroids = vec![asteroid_at(100.0, 100.0, 40), asteroid_at(110.0, 100.0, 40)];
        let bullets = vec![bullet_at(105.0, 100.0), bullet_at(106.0, 100.0), bullet_at(107.0, 100.0)];
        assert_eq!(bullet_asteroid_hits(&bullets, &asteroids), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_player_hit_skips_destroyed() {
        let player = Player::new(100.0, 100.0);
        let asteroids = vec![asteroid_at(100.0, 120.0, 30), asteroid_at(500.0, 500.0, 30)];
        assert_eq!(player_asteroid_hit(&player, &asteroids, &[]), Some(0));
        assert_eq!(player_asteroid_hit(&player, &asteroids, &[0]), None);
    }

    #[test]
    fn test_player_collects_powerup_within_sum_of_radii() {
        let player = Player::new(100.0, 100.0);
        let near = PowerUp::new(Vector2D::new(100.0 + player.size + 11.0, 100.0), PowerUpKind::TriShot);
        let far = PowerUp::new(Vector2D::new(100.0 + player.size + 12.0, 100.0), PowerUpKind::TriShot);
        assert_eq!(player_powerup_hit(&player, &[far.clone()]), None);
        assert_eq!(player_powerup_hit(&player, &[far, near]), Some(1));
    }

    #[test]
    fn test_empty_report() {
        let report = CollisionReport::default();
        assert!(report.is_empty());
        assert_eq!(report.destroyed_asteroids().count(), 0);
    }
}
