use core::fmt;

/// Integer pixel coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Signed offset `other - self` as `(dx, dy)`.
    pub fn offset_to(self, other: Coordinate) -> (isize, isize) {
        (
            other.x as isize - self.x as isize,
            other.y as isize - self.y as isize,
        )
    }

    /// True when `other` is one of the 8 Moore neighbors of `self`.
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        let (dx, dy) = self.offset_to(other);
        (dx, dy) != (0, 0) && dx.abs() <= 1 && dy.abs() <= 1
    }

    pub fn to_point(self) -> Point2f {
        Point2f {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub fn distance(self, other: Point2f) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline2f {
    pub points: Vec<Point2f>,
    pub closed: bool,
}

impl Polyline2f {
    /// Arc length, including the closing segment when `closed`.
    pub fn length(&self) -> f32 {
        if self.points.len() < 2 {
            return 0.0;
        }

        let mut len: f32 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        if self.closed {
            len += self.points[self.points.len() - 1].distance(self.points[0]);
        }
        len
    }
}
