use super::Bounds;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction.  In borderless
    /// mode, stepping off an edge wraps around to the opposite edge; otherwise
    /// it returns `None`, meaning the snake has hit a wall.
    pub(super) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = decrement_in_bounds(y, bounds.size, bounds.wrap)?,
            Direction::Down => y = increment_in_bounds(y, bounds.size, bounds.wrap)?,
            Direction::Left => x = decrement_in_bounds(x, bounds.size, bounds.wrap)?,
            Direction::Right => x = increment_in_bounds(x, bounds.size, bounds.wrap)?,
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

fn decrement_in_bounds(v: u16, max: u16, wrap: bool) -> Option<u16> {
    match v.checked_sub(1) {
        Some(v2) => Some(v2),
        None if wrap => Some(max - 1),
        None => None,
    }
}

fn increment_in_bounds(v: u16, max: u16, wrap: bool) -> Option<u16> {
    match v.checked_add(1).filter(|&v2| v2 < max) {
        Some(v2) => Some(v2),
        None if wrap => Some(0),
        None => None,
    }
}
