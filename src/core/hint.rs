//! Bounded hint budget.

use crate::core::common::PuzzleError;
use crate::core::config::HINT_LIMIT;
use crate::core::grid::Cell;

/// Hints spent so far in a playthrough, capped at [`HINT_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct HintBudget {
    used: u32,
}

impl HintBudget {
    /// Fresh budget: nothing used, [`HINT_LIMIT`] remaining.
    pub fn new() -> Self {
        Self { used: 0 }
    }

    /// Budget restored from a saved hint count.
    pub fn with_used(used: u32) -> Self {
        Self { used }
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        HINT_LIMIT.saturating_sub(self.used)
    }

    /// Spend one hint on `cell` and return its solution.
    ///
    /// Fails without spending when the budget is exhausted or the cell is blocked.
    pub fn request(&mut self, cell: &Cell, row: usize, col: usize) -> Result<char, PuzzleError> {
        if self.remaining() == 0 {
            return Err(PuzzleError::BudgetExhausted);
        }
        let solution = cell
            .solution()
            .ok_or(PuzzleError::BlockedCellWrite { row, col })?;
        self.used += 1;
        Ok(solution)
    }

    /// Back to a full budget.
    pub fn reset(&mut self) {
        self.used = 0;
    }
}

impl Default for HintBudget {
    fn default() -> Self {
        Self::new()
    }
}
