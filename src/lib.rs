pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod events;
pub mod game;
pub mod spawn;
pub mod types;
pub mod upgrades;
pub mod view;

pub use config::GameConfig;
pub use entities::{Asteroid, Bullet, Player, generate_jagged_shape};
pub use events::GameEvent;
pub use game::{GameState, InputState, PlayerStatus};
pub use types::{Vector2D, wrap_coordinate};
pub use upgrades::{PowerUp, PowerUpKind};
pub use view::{Canvas, Hud};
