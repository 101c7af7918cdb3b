use super::Bounds;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

/// Pick a random cell within `bounds` for which `occupied` returns `false`.
///
/// Random cells are tried first, which is fast while the board is mostly
/// empty.  After a bounded number of misses, the free cells are enumerated and
/// one is chosen uniformly.  Returns `None` only if every cell is occupied.
pub(super) fn place<R, F>(rng: &mut R, bounds: Bounds, occupied: F) -> Option<Position>
where
    R: Rng,
    F: Fn(Position) -> bool,
{
    let cells = usize::from(bounds.size) * usize::from(bounds.size);
    for _ in 0..cells.saturating_mul(consts::PLACEMENT_ATTEMPTS_PER_CELL) {
        let pos = Position::new(
            rng.random_range(0..bounds.size),
            rng.random_range(0..bounds.size),
        );
        if !occupied(pos) {
            return Some(pos);
        }
    }
    bounds.positions().filter(|&p| !occupied(p)).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const BOUNDS: Bounds = Bounds {
        size: 4,
        wrap: false,
    };

    #[test]
    fn empty_board() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        for _ in 0..100 {
            let pos = place(&mut rng, BOUNDS, |_| false).unwrap();
            assert!(pos.x < 4 && pos.y < 4, "{pos:?} is off the board");
        }
    }

    #[test]
    fn single_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        let free = Position::new(3, 1);
        for _ in 0..20 {
            assert_eq!(place(&mut rng, BOUNDS, |p| p != free), Some(free));
        }
    }

    #[test]
    fn full_board() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        assert_eq!(place(&mut rng, BOUNDS, |_| true), None);
    }
}
