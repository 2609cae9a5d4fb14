use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};
use retro_asteroids::constants::POWERUP_RADIUS;
use retro_asteroids::{Canvas, Hud, PowerUpKind, Vector2D};

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                let s = String::from_utf8_lossy(buf);
                sb.write_str(&s);
                Ok(buf.len())
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

pub const WRECK_FRAMES: u64 = 20;

// --- GameGrid: character canvas scaled from field units ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    field_width: f64,
    field_height: f64,
}

impl GameGrid {
    pub fn new(width: u16, height: u16, field_width: f64, field_height: f64) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            field_width,
            field_height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn write_text(&mut self, x: u16, y: u16, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    /// Maps a field position to a cell, or `None` when it falls off the grid.
    fn to_cell(&self, point: Vector2D) -> Option<(u16, u16)> {
        let x = (point.x / self.field_width * self.width as f64).floor();
        let y = (point.y / self.field_height * self.height as f64).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return None;
        }
        Some((x as u16, y as u16))
    }

    fn plot(&mut self, point: Vector2D, c: char) {
        if let Some((x, y)) = self.to_cell(point) {
            self.set_char(x, y, c);
        }
    }

    fn line(&mut self, from: Vector2D, to: Vector2D, c: char) {
        let cells_x = (to.x - from.x).abs() / self.field_width * self.width as f64;
        let cells_y = (to.y - from.y).abs() / self.field_height * self.height as f64;
        let steps = cells_x.max(cells_y).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.plot(from.add(to.sub(from).scale(t)), c);
        }
    }

    /// Debris ring expanding from where the ship blew up, `age` frames ago.
    pub fn wreck(&mut self, position: Vector2D, age: u64) {
        let spread = 6.0 + age as f64 * 3.0;
        let c = if age < WRECK_FRAMES / 2 { '*' } else { '.' };
        for i in 0..8 {
            let offset = Vector2D::from_heading(i as f64 * 45.0).scale(spread);
            self.plot(position.add(offset), c);
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

/// Arrow glyph for a heading in degrees (0 = right, 90 = down).
pub fn heading_char(heading: f64) -> char {
    match heading.rem_euclid(360.0) {
        h if !(45.0..315.0).contains(&h) => '>',
        h if h < 135.0 => 'v',
        h if h < 225.0 => '<',
        _ => '^',
    }
}

impl Canvas for GameGrid {
    fn polygon(&mut self, points: &[Vector2D]) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.line(from, to, '#');
        }
    }

    fn ship(&mut self, position: Vector2D, heading: f64, size: f64, invincible: bool, shielded: bool) {
        let nose = position.add(Vector2D::from_heading(heading).scale(size));
        self.plot(nose, '.');
        self.plot(position, if invincible { '@' } else { heading_char(heading) });
        if shielded {
            if let Some((x, y)) = self.to_cell(position) {
                self.set_char(x.wrapping_sub(1), y, '(');
                self.set_char(x.saturating_add(1), y, ')');
            }
        }
    }

    fn bullet(&mut self, position: Vector2D) {
        self.plot(position, '*');
    }

    fn power_up(&mut self, position: Vector2D, radius: f64, kind: PowerUpKind) {
        // Pulses between capital and small letter as the radius breathes
        let swollen = radius >= POWERUP_RADIUS;
        let c = match (kind, swollen) {
            (PowerUpKind::TriShot, true) => 'T',
            (PowerUpKind::TriShot, false) => 't',
            (PowerUpKind::Shield, true) => 'S',
            (PowerUpKind::Shield, false) => 's',
        };
        self.plot(position, c);
    }

    fn hud(&mut self, hud: &Hud) {
        let mut status = format!("Lives: {}  Level: {}", hud.lives, hud.level);
        if hud.shield_active {
            status.push_str("  [SHIELD]");
        }
        self.write_text(0, 0, &status);

        if let Some(fraction) = hud.powerup_fraction {
            let bar_width = 20;
            let filled = (fraction * bar_width as f64).round() as usize;
            let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width - filled.min(bar_width)));
            let x = (self.width / 2).saturating_sub(bar.len() as u16 / 2);
            self.write_text(x, self.height.saturating_sub(1), &bar);
        }

        if hud.game_over {
            let msg = "GAME OVER";
            let x = (self.width / 2).saturating_sub(msg.len() as u16 / 2);
            self.write_text(x, self.height / 2, msg);
        } else if hud.paused {
            let msg = "PAUSED - press p to resume";
            let x = (self.width / 2).saturating_sub(msg.len() as u16 / 2);
            self.write_text(x, self.height / 2, msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_scales_to_grid() {
        let mut grid = GameGrid::new(80, 24, 800.0, 600.0);
        grid.bullet(Vector2D::new(400.0, 300.0));
        assert_eq!(grid.grid[12][40], '*');
        grid.bullet(Vector2D::new(-5.0, 1000.0));
    }

    #[test]
    fn test_polygon_is_closed() {
        let mut grid = GameGrid::new(80, 24, 800.0, 600.0);
        let square = [
            Vector2D::new(100.0, 100.0),
            Vector2D::new(200.0, 100.0),
            Vector2D::new(200.0, 200.0),
            Vector2D::new(100.0, 200.0),
        ];
        grid.polygon(&square);
        assert_eq!(grid.grid[4][10], '#');
        assert_eq!(grid.grid[4][20], '#');
        assert_eq!(grid.grid[8][10], '#');
        assert_eq!(grid.grid[6][10], '#');
    }

    #[test]
    fn test_heading_char() {
        assert_eq!(heading_char(0.0), '>');
        assert_eq!(heading_char(90.0), 'v');
        assert_eq!(heading_char(180.0), '<');
        assert_eq!(heading_char(-90.0), '^');
        assert_eq!(heading_char(350.0), '>');
    }

    #[test]
    fn test_hud_text() {
        let mut grid = GameGrid::new(80, 24, 800.0, 600.0);
        grid.hud(&Hud {
            lives: 2,
            level: 3,
            powerup_fraction: Some(0.5),
            shield_active: false,
            paused: false,
            game_over: false,
        });
        let top: String = grid.grid[0].iter().collect();
        assert!(top.starts_with("Lives: 2  Level: 3"));
        let bottom: String = grid.grid[23].iter().collect();
        assert!(bottom.contains("[==========          ]"));
    }

    #[test]
    fn test_power_up_pulses() {
        let mut grid = GameGrid::new(80, 24, 800.0, 600.0);
        grid.power_up(Vector2D::new(400.0, 300.0), POWERUP_RADIUS * 1.1, PowerUpKind::Shield);
        assert_eq!(grid.grid[12][40], 'S');
        grid.power_up(Vector2D::new(400.0, 300.0), POWERUP_RADIUS * 0.9, PowerUpKind::Shield);
        assert_eq!(grid.grid[12][40], 's');
    }

    #[test]
    fn test_hud_game_over() {
        let mut grid = GameGrid::new(80, 24, 800.0, 600.0);
        grid.hud(&Hud {
            lives: 0,
            level: 2,
            powerup_fraction: None,
            shield_active: false,
            paused: true,
            game_over: true,
        });
        let middle: String = grid.grid[12].iter().collect();
        assert!(middle.contains("GAME OVER"));
        assert!(!middle.contains("PAUSED"));
    }

    #[test]
    fn test_wreck_expands() {
        let mut grid = GameGrid::new(80, 24, 800.0, 600.0);
        let center = Vector2D::new(400.0, 300.0);
        grid.wreck(center, 0);
        assert_eq!(grid.grid[12][40], '*');
        grid.clear();
        grid.wreck(center, 10);
        assert_eq!(grid.grid[12][43], '.');
        assert_eq!(grid.grid[12][40], ' ');
    }

    #[test]
    fn test_screen_buffer_write() {
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(10, 2));
        target.execute_move_to(MoveTo(2, 1)).unwrap();
        write!(target, "hi").unwrap();
        if let OutputTarget::ScreenBuffer(sb) = &target {
            assert_eq!(sb.buffer[1][2], 'h');
            assert_eq!(sb.buffer[1][3], 'i');
        }
    }
}
