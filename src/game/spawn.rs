//! Fruit placement on free cells

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::state::{Board, Position};

/// Pick a free cell uniformly at random.
///
/// Every cell of `board` not listed in `occupied` is a candidate. Returns
/// `None` when the board is full, which callers treat as a win condition.
pub fn spawn<R, I>(board: Board, occupied: I, rng: &mut R) -> Option<Position>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = Position>,
{
    let occupied: HashSet<Position> = occupied.into_iter().collect();
    board
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .choose(rng)
}
