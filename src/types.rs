#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Unit vector pointing along `degrees`, measured clockwise from +x in screen space.
    pub fn from_heading(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Vector2D::new(radians.cos(), radians.sin())
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vector2D) -> f64 {
        self.sub(other).length()
    }

    /// Wraps both coordinates onto a `width` x `height` torus.
    pub fn wrapped(&self, width: f64, height: f64) -> Self {
        Vector2D::new(wrap_coordinate(self.x, width), wrap_coordinate(self.y, height))
    }
}

pub fn wrap_coordinate(value: f64, max: f64) -> f64 {
    let wrapped = value % max;
    if wrapped < 0.0 {
        // -0.0001 % max + max can round up to max itself
        let shifted = wrapped + max;
        if shifted >= max { 0.0 } else { shifted }
    } else {
        wrapped
    }
}
