// --- Game Constants ---
pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;

pub const STARTING_LIVES: u32 = 3;
pub const STARTING_LEVEL: u32 = 1;
pub const INITIAL_ASTEROID_COUNT: usize = 5;

pub const ASTEROID_MIN_SIZE: u32 = 30;
pub const ASTEROID_MAX_SIZE: u32 = 80;
pub const ASTEROID_MIN_SIDES: usize = 7;
pub const ASTEROID_MAX_SIDES: usize = 12;
pub const ASTEROID_MIN_SPEED: f64 = 1.0;
pub const ASTEROID_MAX_SPEED: f64 = 3.0;

// Asteroids at or above this size break apart instead of vanishing.
pub const ASTEROID_SPLIT_MIN_SIZE: u32 = 30;
pub const ASTEROID_SPLIT_COUNT: usize = 2;
pub const ASTEROID_SPLIT_DIVISOR: u32 = 2;

pub const LEVEL_BASE_ASTEROIDS: usize = 5;
pub const LEVEL_ASTEROIDS_PER_LEVEL: usize = 2;

pub const SHIP_SIZE: f64 = 12.0;
pub const SHIP_ROTATION_SPEED: f64 = 5.0; // Degrees per tick
pub const SHIP_THRUST_POWER: f64 = 0.25;
pub const SHIP_FRICTION: f64 = 0.98;
pub const SHIP_MAX_SPEED: f64 = 8.0;

pub const BULLET_SPEED: f64 = 8.0;
pub const BULLET_LIFETIME: u32 = 40; // Ticks
pub const BULLET_COOLDOWN: u32 = 8; // Ticks between shots
pub const TRISHOT_SPREAD: f64 = 15.0; // Degrees

pub const POWERUP_RADIUS: f64 = 12.0;
pub const POWERUP_SPAWN_CHANCE: f64 = 0.2;
pub const POWERUP_DURATION: u32 = 300; // Ticks

pub const RESPAWN_DELAY: u32 = 90; // Ticks
pub const INVINCIBILITY_TICKS: u32 = 60 * 2; // 2 seconds of invincibility
