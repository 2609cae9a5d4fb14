use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::{self, CollisionReport};
use crate::config::GameConfig;
use crate::entities::{Asteroid, Bullet, Player};
use crate::events::GameEvent;
use crate::spawn;
use crate::upgrades::{PowerUp, PowerUpKind};
use crate::view::{Canvas, Hud};

/// Player intents for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Where the player stands in the death/respawn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Alive,
    /// Alive with a shield that will soak the next hit.
    Shielded,
    /// Alive and immune to asteroids until the window runs out.
    Invincible,
    /// Ship destroyed; waiting out the respawn countdown.
    Respawning,
    GameOver,
}

pub struct GameState<R: Rng = StdRng> {
    pub config: GameConfig,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub powerups: Vec<PowerUp>,
    pub lives: u32,
    pub level: u32,
    pub respawn_timer: u32,
    pub tick_count: u64,
    paused: bool,
    game_over: bool,
    events: Vec<GameEvent>,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates an empty field. Seeds from `config.seed` when set, otherwise from entropy.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameState::with_rng(config, rng)
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let config = config.sanitized();
        let (center_x, center_y) = config.center();
        GameState {
            player: Player::new(center_x, center_y),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            powerups: Vec::new(),
            lives: config.starting_lives,
            level: config.starting_level,
            respawn_timer: 0,
            tick_count: 0,
            paused: false,
            game_over: config.starting_lives == 0,
            events: Vec::new(),
            rng,
            config,
        }
    }

    pub fn spawn_asteroids(&mut self, count: usize) {
        for _ in 0..count {
            let asteroid = Asteroid::random(self.config.field_width, self.config.field_height, &mut self.rng);
            self.asteroids.push(asteroid);
        }
        debug!("Spawned {} asteroids, {} on the field", count, self.asteroids.len());
    }

    /// Advances the simulation by one tick. Does nothing while paused or after game over.
    pub fn update(&mut self, input: &InputState) {
        if self.paused || self.game_over {
            return;
        }
        self.tick_count += 1;
        let (width, height) = (self.config.field_width, self.config.field_height);

        if self.respawn_timer > 0 {
            self.respawn_timer -= 1;
            if self.respawn_timer == 0 {
                self.respawn_player();
            }
        } else {
            self.player.update(input, width, height);
            if input.fire {
                self.fire();
            }
        }

        for bullet in &mut self.bullets {
            bullet.update(width, height);
        }
        self.bullets.retain(|bullet| !bullet.is_expired());

        for asteroid in &mut self.asteroids {
            asteroid.update(width, height);
        }
        for powerup in &mut self.powerups {
            powerup.update();
        }

        self.check_collisions();
        self.debug_check_invariants();
    }

    fn fire(&mut self) {
        // Zero-lifetime bullets would be dead on arrival
        if !self.player.can_fire() || self.config.bullet_lifetime == 0 {
            return;
        }
        let nose = self.player.nose();
        for angle in self.player.firing_angles() {
            self.bullets.push(Bullet::new(nose, angle, self.config.bullet_speed, self.config.bullet_lifetime));
        }
        self.player.fire_cooldown = self.config.bullet_cooldown;
    }

    /// Runs one collision pass and applies its consequences.
    ///
    /// Hits are found against the collections as they stand at the start of
    /// the pass; removals and new entities are applied once all tests are done.
    pub fn check_collisions(&mut self) -> CollisionReport {
        if self.game_over {
            return CollisionReport::default();
        }
        let had_asteroids = !self.asteroids.is_empty();
        let mut report = CollisionReport {
            bullet_hits: collision::bullet_asteroid_hits(&self.bullets, &self.asteroids),
            ..Default::default()
        };

        // Bullet vs asteroid
        let mut new_asteroids = Vec::new();
        let mut new_powerup = None;
        for &(_, asteroid_index) in &report.bullet_hits {
            let asteroid = &self.asteroids[asteroid_index];
            let (position, size) = (asteroid.position, asteroid.size);
            let fragments = spawn::split_asteroid(asteroid, &mut self.rng);
            self.emit(GameEvent::AsteroidDestroyed { position, size });
            if !fragments.is_empty() {
                self.emit(GameEvent::AsteroidSplit { position, fragments: fragments.len() });
            }
            new_asteroids.extend(fragments);

            let existing = self.powerups.len() + usize::from(new_powerup.is_some());
            if let Some(powerup) = spawn::roll_powerup(position, existing, self.config.powerup_chance, &mut self.rng) {
                self.emit(GameEvent::PowerUpSpawned { position, kind: powerup.kind });
                new_powerup = Some(powerup);
            }
        }
        let destroyed: Vec<usize> = report.destroyed_asteroids().collect();

        // Player vs asteroid
        if self.respawn_timer == 0 {
            report.player_hit = collision::player_asteroid_hit(&self.player, &self.asteroids, &destroyed);
            if report.player_hit.is_some() {
                self.handle_player_death();
            }
        }

        // Player vs power-up
        if self.respawn_timer == 0 && !self.game_over {
            report.powerup_hit = collision::player_powerup_hit(&self.player, &self.powerups);
            if let Some(index) = report.powerup_hit {
                let kind = self.powerups[index].kind;
                info!("Player collected {} powerup", kind.label());
                self.apply_powerup(kind);
                self.emit(GameEvent::PowerUpCollected { kind });
            }
        }

        // Safely remove bullets, asteroids and the collected power-up
        let spent: Vec<usize> = report.bullet_hits.iter().map(|&(bullet, _)| bullet).collect();
        retain_unmarked(&mut self.bullets, &spent);
        retain_unmarked(&mut self.asteroids, &destroyed);
        if let Some(index) = report.powerup_hit {
            self.powerups.remove(index);
        }

        self.asteroids.extend(new_asteroids);
        self.powerups.extend(new_powerup);

        if had_asteroids && !self.game_over {
            self.check_for_clear_map();
        }
        report
    }

    fn check_for_clear_map(&mut self) {
        if !self.asteroids.is_empty() {
            return;
        }
        self.level += 1;
        let count = spawn::asteroids_for_level(self.level);
        self.spawn_asteroids(count);
        self.player.set_invincibility(self.config.invincibility_ticks);
        info!("Field cleared, starting level {} with {} asteroids", self.level, count);
        self.emit(GameEvent::LevelCleared { level: self.level, asteroids: count });
    }

    fn apply_powerup(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::TriShot => self.player.enable_trishot(self.config.powerup_duration),
            PowerUpKind::Shield => self.player.enable_shield(),
        }
    }

    fn handle_player_death(&mut self) {
        if self.player.invincible {
            return;
        }
        if self.player.shield_active {
            self.player.take_damage();
            debug!("Shield absorbed a hit");
            self.emit(GameEvent::ShieldAbsorbed);
            return;
        }

        debug_assert!(self.lives > 0, "dead player still in play");
        self.lives = self.lives.saturating_sub(1);
        let position = self.player.position;
        info!("Player destroyed at ({:.1}, {:.1}), {} lives left", position.x, position.y, self.lives);
        self.emit(GameEvent::PlayerDied { position, lives_left: self.lives });

        if self.lives == 0 {
            self.game_over();
        } else if self.config.respawn_delay == 0 {
            self.respawn_player();
        } else {
            self.respawn_timer = self.config.respawn_delay;
        }
    }

    fn respawn_player(&mut self) {
        debug_assert_eq!(self.respawn_timer, 0);
        let (center_x, center_y) = self.config.center();
        self.player.reset_position(center_x, center_y);
        self.player.set_invincibility(self.config.invincibility_ticks);
        info!("Respawning player");
        self.emit(GameEvent::PlayerRespawned);
    }

    fn game_over(&mut self) {
        self.game_over = true;
        info!("Game over on level {}", self.level);
        self.emit(GameEvent::GameOver { level: self.level });
    }

    fn emit(&mut self, event: GameEvent) {
        debug!("{:?}", event);
        self.events.push(event);
    }

    fn debug_check_invariants(&self) {
        debug_assert!(self.bullets.iter().all(|bullet| !bullet.is_expired()));
        debug_assert!(self.asteroids.iter().all(|asteroid| asteroid.shape.len() == asteroid.sides));
        debug_assert!(self.powerups.len() <= 1);
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn_timer > 0
    }

    pub fn status(&self) -> PlayerStatus {
        if self.game_over {
            PlayerStatus::GameOver
        } else if self.respawn_timer > 0 {
            PlayerStatus::Respawning
        } else if self.player.invincible {
            PlayerStatus::Invincible
        } else if self.player.shield_active {
            PlayerStatus::Shielded
        } else {
            PlayerStatus::Alive
        }
    }

    pub fn hud(&self) -> Hud {
        let powerup_fraction = if self.player.has_trishot() && self.config.powerup_duration > 0 {
            Some(self.player.powerup_timer as f64 / self.config.powerup_duration as f64)
        } else {
            None
        };
        Hud {
            lives: self.lives,
            level: self.level,
            powerup_fraction,
            shield_active: self.player.shield_active,
            paused: self.paused,
            game_over: self.game_over,
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        if self.respawn_timer == 0 && !self.game_over {
            let player = &self.player;
            canvas.ship(player.position, player.angle, player.size, player.invincible, player.shield_active);
        }
        for bullet in &self.bullets {
            canvas.bullet(bullet.position);
        }
        for asteroid in &self.asteroids {
            canvas.polygon(&asteroid.shape);
        }
        for powerup in &self.powerups {
            canvas.power_up(powerup.position, powerup.radius * powerup.pulse_scale(), powerup.kind);
        }
        canvas.hud(&self.hud());
    }
}

/// Drops every element whose index appears in `marked`, keeping order.
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[usize]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !marked.contains(&index);
        index += 1;
        keep
    });
}
