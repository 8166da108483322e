//! Player move transactions and the stamina they cost
//!
//! A committed path becomes a [`PendingMove`] that waits for the next tick.
//! Until then it can be cancelled for free.

use serde::Serialize;

use crate::core::types::Cell;
use crate::pathfinding::path_cost;

/// The single outstanding player move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingMove {
    pub path: Vec<Cell>,
    pub cost: u32,
    pub destination: Cell,
}

impl PendingMove {
    /// `None` for an empty path
    pub fn from_path(path: Vec<Cell>) -> Option<Self> {
        let destination = *path.last()?;
        Some(Self {
            cost: path_cost(&path),
            path,
            destination,
        })
    }
}

/// Result of a commit request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitOutcome {
    Accepted,
    /// Another move is waiting for the next tick
    AlreadyPending,
    EmptyPath,
    PlayerDead,
}

impl CommitOutcome {
    pub fn is_accepted(self) -> bool {
        self == CommitOutcome::Accepted
    }
}

/// Player stamina counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stamina {
    pub current: u32,
    pub max: u32,
}

impl Stamina {
    /// Starts full
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Pay for a move, bottoming out at zero. Returns the amount actually
    /// deducted.
    pub fn deduct(&mut self, cost: u32) -> u32 {
        let paid = cost.min(self.current);
        self.current -= paid;
        paid
    }

    /// Regain up to `amount`, capped at `max`. Returns the amount gained.
    pub fn recharge(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max - self.current.min(self.max));
        self.current += gained;
        gained
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_move_from_path() {
        let path = vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1)];
        let pending = PendingMove::from_path(path.clone()).unwrap();
        assert_eq!(pending.cost, 3);
        assert_eq!(pending.destination, Cell::new(2, 1));
        assert_eq!(pending.path, path);
    }

    #[test]
    fn test_empty_path_is_not_a_move() {
        assert!(PendingMove::from_path(Vec::new()).is_none());
    }

    #[test]
    fn test_stamina_saturates() {
        let mut stamina = Stamina::new(10);
        assert_eq!(stamina.deduct(4), 4);
        assert_eq!(stamina.current, 6);
        assert_eq!(stamina.deduct(20), 6);
        assert_eq!(stamina.current, 0);

        assert_eq!(stamina.recharge(3), 3);
        assert_eq!(stamina.recharge(100), 7);
        assert!(stamina.is_full());
        assert_eq!(stamina.recharge(1), 0);
    }
}
