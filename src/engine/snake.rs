use ratatui::layout::Position;
use std::collections::VecDeque;

/// The cells occupied by the snake, head first.  Never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    pub(super) segments: VecDeque<Position>,
}

impl Snake {
    /// Create a one-cell snake at `head`
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            segments: VecDeque::from([head]),
        }
    }

    pub(super) fn head(&self) -> Position {
        self.segments[0]
    }

    pub(super) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Move the head to `pos`.  The tail stays put until
    /// [`drop_tail()`][Snake::drop_tail] is called, so not calling it grows
    /// the snake by one cell.
    pub(super) fn push_head(&mut self, pos: Position) {
        self.segments.push_front(pos);
    }

    pub(super) fn drop_tail(&mut self) {
        if self.segments.len() > 1 {
            let _ = self.segments.pop_back();
        }
    }
}
