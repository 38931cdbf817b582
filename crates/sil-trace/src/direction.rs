use sil_core::Coordinate;

const DX: [isize; 8] = [0, 1, 1, 1, 0, -1, -1, -1];
const DY: [isize; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// 8-connected compass direction. `y` grows downward, so `N` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const CLOCKWISE: [Direction; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    #[inline]
    pub fn delta(self) -> (isize, isize) {
        let i = self as usize;
        (DX[i], DY[i])
    }

    #[inline]
    pub fn next_clockwise(self) -> Self {
        Self::CLOCKWISE[(self as usize + 1) & 7]
    }

    pub fn from_delta(dx: isize, dy: isize) -> Option<Self> {
        Self::CLOCKWISE.into_iter().find(|d| d.delta() == (dx, dy))
    }

    /// Heading from `from` to `to`. `None` unless the two are 8-adjacent.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Self> {
        let (dx, dy) = from.offset_to(to);
        Self::from_delta(dx, dy)
    }
}

/// Steps `p` one pixel toward `dir`; `None` when the result leaves
/// `[0, width) x [0, height)`.
#[inline]
pub fn neighbor(p: Coordinate, dir: Direction, width: usize, height: usize) -> Option<Coordinate> {
    let (dx, dy) = dir.delta();
    let nx = p.x.checked_add_signed(dx)?;
    let ny = p.y.checked_add_signed(dy)?;
    if nx >= width || ny >= height {
        return None;
    }
    Some(Coordinate::new(nx, ny))
}

#[cfg(test)]
mod tests {
    use sil_core::Coordinate;

    use super::{Direction, neighbor};

    #[test]
    fn clockwise_cycle_returns_after_eight_steps() {
        let mut d = Direction::N;
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(d);
            d = d.next_clockwise();
        }
        assert_eq!(d, Direction::N);
        assert_eq!(seen, Direction::CLOCKWISE);
        assert_eq!(Direction::NW.next_clockwise(), Direction::N);
    }

    #[test]
    fn deltas_match_compass_with_y_down() {
        assert_eq!(Direction::N.delta(), (0, -1));
        assert_eq!(Direction::NE.delta(), (1, -1));
        assert_eq!(Direction::SE.delta(), (1, 1));
        assert_eq!(Direction::W.delta(), (-1, 0));
        for d in Direction::CLOCKWISE {
            let (dx, dy) = d.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(d));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn heading_between_adjacent_points_only() {
        let c = Coordinate::new(5, 5);
        assert_eq!(
            Direction::between(c, Coordinate::new(6, 4)),
            Some(Direction::NE)
        );
        assert_eq!(
            Direction::between(c, Coordinate::new(4, 5)),
            Some(Direction::W)
        );
        assert_eq!(Direction::between(c, c), None);
        assert_eq!(Direction::between(c, Coordinate::new(7, 5)), None);
    }

    #[test]
    fn neighbor_stays_inside_bounds() {
        let corner = Coordinate::new(0, 0);
        assert_eq!(neighbor(corner, Direction::W, 3, 3), None);
        assert_eq!(neighbor(corner, Direction::N, 3, 3), None);
        assert_eq!(
            neighbor(corner, Direction::SE, 3, 3),
            Some(Coordinate::new(1, 1))
        );

        let far = Coordinate::new(2, 2);
        assert_eq!(neighbor(far, Direction::E, 3, 3), None);
        assert_eq!(neighbor(far, Direction::S, 3, 3), None);
        assert_eq!(
            neighbor(far, Direction::NW, 3, 3),
            Some(Coordinate::new(1, 1))
        );
    }
}
