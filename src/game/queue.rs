//! Buffered turn requests
//!
//! Players can press keys faster than the snake ticks. Each accepted press is
//! queued and applied one per tick, so a quick right-up-left chain plays out in
//! order instead of the last key winning.

use std::collections::VecDeque;

use super::direction::Direction;

/// Maximum number of turns waiting to be applied
pub const MAX_PENDING_TURNS: usize = 4;

/// The committed heading of a snake plus the turns queued behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionQueue {
    current: Direction,
    pending: VecDeque<Direction>,
    started: bool,
}

impl DirectionQueue {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            pending: VecDeque::with_capacity(MAX_PENDING_TURNS),
            started: false,
        }
    }

    /// Direction used for the next head computation
    pub fn current(&self) -> Direction {
        self.current
    }

    /// Whether the first turn has been accepted
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn pending(&self) -> impl Iterator<Item = Direction> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Request a turn, returning whether it was accepted.
    ///
    /// The very first request commits immediately unless it reverses the
    /// initial heading. Later requests are checked against the most recent
    /// queued turn, or the committed heading when nothing is queued, and are
    /// dropped if they repeat or reverse it.
    pub fn request(&mut self, direction: Direction) -> bool {
        if !self.started {
            if direction.is_opposite(self.current) {
                return false;
            }
            self.current = direction;
            self.started = true;
            return true;
        }

        let guard = self.pending.back().copied().unwrap_or(self.current);
        if direction == guard || direction.is_opposite(guard) {
            return false;
        }
        if self.pending.len() >= MAX_PENDING_TURNS {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    /// Pop the oldest queued turn into the committed heading.
    pub fn commit_next(&mut self) -> Option<Direction> {
        let next = self.pending.pop_front()?;
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(initial: Direction) -> DirectionQueue {
        let mut queue = DirectionQueue::new(initial);
        assert!(queue.request(initial));
        queue
    }

    #[test]
    fn test_first_request_commits_immediately() {
        let mut queue = DirectionQueue::new(Direction::Right);
        assert!(!queue.is_started());

        assert!(queue.request(Direction::Up));
        assert!(queue.is_started());
        assert_eq!(queue.current(), Direction::Up);
        assert_eq!(queue.pending_len(), 0);
    }

    #[test]
    fn test_first_request_same_as_initial_starts_moving() {
        let mut queue = DirectionQueue::new(Direction::Right);
        assert!(queue.request(Direction::Right));
        assert!(queue.is_started());
        assert_eq!(queue.current(), Direction::Right);
    }

    #[test]
    fn test_first_request_cannot_reverse() {
        let mut queue = DirectionQueue::new(Direction::Right);
        assert!(!queue.request(Direction::Left));
        assert!(!queue.is_started());
        assert_eq!(queue.current(), Direction::Right);
    }

    #[test]
    fn test_rejects_repeat_and_reverse_of_current() {
        let mut queue = started(Direction::Right);
        let before = queue.clone();

        assert!(!queue.request(Direction::Right));
        assert!(!queue.request(Direction::Left));
        assert_eq!(queue, before);
    }

    #[test]
    fn test_guard_is_last_queued_turn() {
        let mut queue = started(Direction::Right);
        assert!(queue.request(Direction::Up));

        // Down reverses the queued Up even though it is legal against Right
        assert!(!queue.request(Direction::Down));
        assert!(!queue.request(Direction::Up));
        // Left reverses the committed Right but follows Up legally
        assert!(queue.request(Direction::Left));

        let pending: Vec<_> = queue.pending().collect();
        assert_eq!(pending, vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn test_commit_applies_in_fifo_order() {
        let mut queue = started(Direction::Right);
        assert!(queue.request(Direction::Up));
        assert!(queue.request(Direction::Left));
        assert!(queue.request(Direction::Down));

        assert_eq!(queue.commit_next(), Some(Direction::Up));
        assert_eq!(queue.current(), Direction::Up);
        assert_eq!(queue.commit_next(), Some(Direction::Left));
        assert_eq!(queue.commit_next(), Some(Direction::Down));
        assert_eq!(queue.commit_next(), None);
        assert_eq!(queue.current(), Direction::Down);
    }

    #[test]
    fn test_full_queue_drops_requests() {
        let mut queue = started(Direction::Right);
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for turn in turns {
            assert!(queue.request(turn));
        }
        assert_eq!(queue.pending_len(), MAX_PENDING_TURNS);

        assert!(!queue.request(Direction::Up));
        assert_eq!(queue.pending_len(), MAX_PENDING_TURNS);
    }
}
