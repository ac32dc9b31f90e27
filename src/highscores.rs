//! Session score and high score
//!
//! Kept in memory only; the high score resets when the process exits.

use serde::{Deserialize, Serialize};

/// Current session score plus the best score seen this process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScore {
    /// Pipe pairs passed in the current (or most recent) session
    pub current: u32,
    /// Best session score so far
    pub high: u32,
}

impl SessionScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one passed pipe pair
    pub fn increment(&mut self) {
        self.current += 1;
    }

    /// Fold the current score into the high score.
    /// Returns true if the high score changed.
    pub fn fold_into_high(&mut self) -> bool {
        if self.current > self.high {
            self.high = self.current;
            true
        } else {
            false
        }
    }

    /// Start a new session: fold, then zero the current score
    pub fn reset_current(&mut self) {
        self.fold_into_high();
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_keeps_maximum() {
        let mut score = SessionScore::new();
        score.current = 5;
        assert!(score.fold_into_high());
        assert_eq!(score.high, 5);

        score.current = 3;
        assert!(!score.fold_into_high());
        assert_eq!(score.high, 5);
    }

    #[test]
    fn test_reset_folds_before_zeroing() {
        let mut score = SessionScore { current: 7, high: 2 };
        score.reset_current();
        assert_eq!(score, SessionScore { current: 0, high: 7 });
    }

    #[test]
    fn test_equal_score_is_not_a_new_high() {
        let mut score = SessionScore { current: 4, high: 4 };
        assert!(!score.fold_into_high());
    }
}
