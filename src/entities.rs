use crate::constants::*;
use crate::game::InputState;
use crate::types::Vector2D;
use crate::upgrades::PowerUpKind;
use rand::Rng;

/// Builds a jagged, roughly circular outline around `center`.
///
/// Point `i` sits at angle `2π·i/sides` with radius `size + jitter`, where the
/// jitter is an integer drawn uniformly from `[-size/3, size/3]`.
pub fn generate_jagged_shape(center: Vector2D, size: u32, sides: usize, rng: &mut impl Rng) -> Vec<Vector2D> {
    let jitter_amount = (size / 3) as i64;
    (0..sides)
        .map(|i| {
            let angle = (i as f64 / sides as f64) * std::f64::consts::TAU;
            let jitter = rng.gen_range(-jitter_amount..=jitter_amount);
            let radius = size as f64 + jitter as f64;
            Vector2D::new(center.x + angle.cos() * radius, center.y + angle.sin() * radius)
        })
        .collect()
}

// --- Asteroid ---
#[derive(Clone, Debug)]
pub struct Asteroid {
    pub position: Vector2D,
    pub size: u32,
    pub sides: usize,
    pub shape: Vec<Vector2D>, // Absolute points, one per side
    pub angle: f64,           // Degrees
    pub speed: f64,
}

impl Asteroid {
    /// A full-sized asteroid somewhere on the field.
    pub fn random(width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let size = rng.gen_range(ASTEROID_MIN_SIZE..=ASTEROID_MAX_SIZE);
        Asteroid::new(x, y, size, rng)
    }

    /// An asteroid of a given size with random sides, heading and speed.
    pub fn new(x: f64, y: f64, size: u32, rng: &mut impl Rng) -> Self {
        let sides = rng.gen_range(ASTEROID_MIN_SIDES..=ASTEROID_MAX_SIDES);
        let angle = rng.gen_range(0.0..360.0);
        let speed = rng.gen_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
        let position = Vector2D::new(x, y);
        let shape = generate_jagged_shape(position, size, sides, rng);
        Asteroid { position, size, sides, shape, angle, speed }
    }

    pub fn velocity(&self) -> Vector2D {
        Vector2D::from_heading(self.angle).scale(self.speed)
    }

    pub fn update(&mut self, width: f64, height: f64) {
        let previous = self.position;
        self.position = self.position.add(self.velocity()).wrapped(width, height);

        // Shift the outline by the same displacement as the center, wrap jump
        // included, so it never drifts away from the body.
        let delta = self.position.sub(previous);
        for point in &mut self.shape {
            *point = point.add(delta);
        }
        debug_assert_eq!(self.shape.len(), self.sides);
    }
}

// --- Bullet ---
#[derive(Clone, Debug)]
pub struct Bullet {
    pub position: Vector2D,
    pub angle: f64, // Degrees
    pub speed: f64,
    pub lifetime: u32,
}

impl Bullet {
    pub fn new(position: Vector2D, angle: f64, speed: f64, lifetime: u32) -> Self {
        Bullet { position, angle, speed, lifetime }
    }

    pub fn update(&mut self, width: f64, height: f64) {
        let delta = Vector2D::from_heading(self.angle).scale(self.speed);
        self.position = self.position.add(delta).wrapped(width, height);
        debug_assert!(self.lifetime > 0, "expired bullet survived a prune pass");
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }
}

// --- Player ship ---
#[derive(Clone, Debug)]
pub struct Player {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub angle: f64, // Degrees
    pub size: f64,
    pub invincible: bool,
    pub invincibility_timer: u32,
    pub shield_active: bool,
    pub active_powerup: Option<PowerUpKind>,
    pub powerup_timer: u32,
    pub fire_cooldown: u32,
}

impl Player {
    pub fn new(x: f64, y: f64) -> Self {
        Player {
            position: Vector2D::new(x, y),
            velocity: Vector2D::default(),
            angle: -90.0, // Facing upwards initially
            size: SHIP_SIZE,
            invincible: false,
            invincibility_timer: 0,
            shield_active: false,
            active_powerup: None,
            powerup_timer: 0,
            fire_cooldown: 0,
        }
    }

    pub fn update(&mut self, input: &InputState, width: f64, height: f64) {
        if input.rotate_left {
            self.angle -= SHIP_ROTATION_SPEED;
        }
        if input.rotate_right {
            self.angle += SHIP_ROTATION_SPEED;
        }
        self.angle = self.angle.rem_euclid(360.0);

        if input.thrust {
            let thrust_vector = Vector2D::from_heading(self.angle).scale(SHIP_THRUST_POWER);
            self.velocity = self.velocity.add(thrust_vector);
            let speed = self.velocity.length();
            if speed > SHIP_MAX_SPEED {
                self.velocity = self.velocity.scale(SHIP_MAX_SPEED / speed);
            }
        }
        self.position = self.position.add(self.velocity).wrapped(width, height);
        self.velocity = self.velocity.scale(SHIP_FRICTION);

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.tick_timers();
    }

    fn tick_timers(&mut self) {
        if self.invincibility_timer > 0 {
            self.invincibility_timer -= 1;
            if self.invincibility_timer == 0 {
                self.invincible = false;
            }
        }
        if self.powerup_timer > 0 {
            self.powerup_timer -= 1;
            if self.powerup_timer == 0 {
                self.active_powerup = None;
            }
        }
    }

    pub fn reset_position(&mut self, x: f64, y: f64) {
        self.position = Vector2D::new(x, y);
        self.velocity = Vector2D::default();
        self.angle = -90.0;
    }

    pub fn set_invincibility(&mut self, ticks: u32) {
        self.invincible = true;
        self.invincibility_timer = ticks;
    }

    pub fn enable_trishot(&mut self, ticks: u32) {
        self.active_powerup = Some(PowerUpKind::TriShot);
        self.powerup_timer = ticks;
    }

    pub fn enable_shield(&mut self) {
        self.shield_active = true;
    }

    /// Spends the shield on an incoming hit.
    pub fn take_damage(&mut self) {
        debug_assert!(self.shield_active);
        self.shield_active = false;
    }

    pub fn has_trishot(&self) -> bool {
        self.active_powerup == Some(PowerUpKind::TriShot) && self.powerup_timer > 0
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown == 0
    }

    /// Headings of the bullets a single trigger pull produces.
    pub fn firing_angles(&self) -> Vec<f64> {
        if self.has_trishot() {
            vec![self.angle - TRISHOT_SPREAD, self.angle, self.angle + TRISHOT_SPREAD]
        } else {
            vec![self.angle]
        }
    }

    pub fn nose(&self) -> Vector2D {
        self.position.add(Vector2D::from_heading(self.angle).scale(self.size))
    }
}
