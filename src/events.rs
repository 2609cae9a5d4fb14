use crate::types::Vector2D;
use crate::upgrades::PowerUpKind;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    AsteroidDestroyed { position: Vector2D, size: u32 },
    AsteroidSplit { position: Vector2D, fragments: usize },
    PowerUpSpawned { position: Vector2D, kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    ShieldAbsorbed,
    PlayerDied { position: Vector2D, lives_left: u32 },
    PlayerRespawned,
    LevelCleared { level: u32, asteroids: usize },
    GameOver { level: u32 },
}
