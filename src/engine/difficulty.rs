use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

const PROMOTE_THRESHOLD: u32 = 5;
const DEMOTE_THRESHOLD: u32 = 3;

/// Per-section progression state. At most one of the two streak counters is
/// ever non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub level: u8,
    pub consecutive_correct: u32,
    pub consecutive_wrong: u32,
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self {
            level: MIN_LEVEL,
            consecutive_correct: 0,
            consecutive_wrong: 0,
        }
    }
}

pub fn update_difficulty(state: DifficultyState, is_correct: bool) -> DifficultyState {
    if is_correct {
        let correct = state.consecutive_correct + 1;
        let promote = correct >= PROMOTE_THRESHOLD && state.level < MAX_LEVEL;

        DifficultyState {
            level: if promote { state.level + 1 } else { state.level },
            consecutive_correct: if promote { 0 } else { correct },
            consecutive_wrong: 0,
        }
    } else {
        let wrong = state.consecutive_wrong + 1;
        let demote = wrong >= DEMOTE_THRESHOLD && state.level > MIN_LEVEL;

        DifficultyState {
            level: if demote { state.level - 1 } else { state.level },
            consecutive_correct: 0,
            consecutive_wrong: if demote { 0 } else { wrong },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(level: u8, correct: u32, wrong: u32) -> DifficultyState {
        DifficultyState {
            level,
            consecutive_correct: correct,
            consecutive_wrong: wrong,
        }
    }

    #[test]
    fn fifth_correct_promotes_and_spends_streak() {
        let next = update_difficulty(state(1, 4, 0), true);
        assert_eq!(next, state(2, 0, 0));
    }

    #[test]
    fn third_wrong_demotes_and_spends_streak() {
        let next = update_difficulty(state(3, 0, 2), false);
        assert_eq!(next, state(2, 0, 0));
    }

    #[test]
    fn correct_resets_wrong_streak() {
        let next = update_difficulty(state(2, 0, 2), true);
        assert_eq!(next, state(2, 1, 0));
    }

    #[test]
    fn wrong_resets_correct_streak() {
        let next = update_difficulty(state(2, 4, 0), false);
        assert_eq!(next, state(2, 0, 1));
    }

    #[test]
    fn promotion_capped_at_max_level() {
        let next = update_difficulty(state(MAX_LEVEL, 4, 0), true);
        assert_eq!(next.level, MAX_LEVEL);
        assert_eq!(next.consecutive_correct, 5);
    }

    #[test]
    fn demotion_floored_at_min_level() {
        // Streak keeps incrementing at the floor; level holds.
        let next = update_difficulty(state(MIN_LEVEL, 0, 2), false);
        assert_eq!(next, state(MIN_LEVEL, 0, 3));
    }

    #[test]
    fn five_in_a_row_from_fresh_state_reaches_level_two() {
        let mut st = DifficultyState::default();
        for _ in 0..5 {
            st = update_difficulty(st, true);
        }
        assert_eq!(st, state(2, 0, 0));
    }

    #[test]
    fn counters_never_both_positive() {
        let mut st = DifficultyState::default();
        for i in 0..40 {
            st = update_difficulty(st, i % 3 != 0);
            assert!(st.consecutive_correct == 0 || st.consecutive_wrong == 0);
        }
    }
}
