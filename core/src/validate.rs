//! Player invariant validation.
//!
//! Extractors build players incrementally; these checks run on the finished
//! set before it is rendered.
//!
//! # Examples
//!
//! ```
//! use crosstable_core::*;
//!
//! let mut player = Player::new("Dwyer,Daniel");
//! player.record(RoundResult::new(1, Outcome::Win, Colour::White, "Smith,John"));
//! assert!(validate_player(&player).is_empty());
//!
//! player.score = 3.0;
//! assert!(matches!(
//!     validate_player(&player).as_slice(),
//!     [ValidationError::ScoreMismatch { .. }]
//! ));
//! ```

use thiserror::Error;

use crate::Player;

/// Player validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A result is stored under a round other than its own.
    #[error("{player}: result for round {actual} stored under round {key}")]
    RoundKeyMismatch { player: String, key: u32, actual: u32 },
    /// Score differs from the sum of the results.
    #[error("{player}: score {score} does not match result total {total}")]
    ScoreMismatch { player: String, score: f64, total: f64 },
}

/// Validates one player.
pub fn validate_player(player: &Player) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (key, result) in &player.results {
        if *key != result.round {
            errors.push(ValidationError::RoundKeyMismatch {
                player: player.name.clone(),
                key: *key,
                actual: result.round,
            });
        }
    }

    let total = player.result_total();
    if (total - player.score).abs() > f64::EPSILON {
        errors.push(ValidationError::ScoreMismatch {
            player: player.name.clone(),
            score: player.score,
            total,
        });
    }

    errors
}

/// Validates every player, concatenating the errors.
pub fn validate_players(players: &[Player]) -> Vec<ValidationError> {
    players.iter().flat_map(validate_player).collect()
}

#[cfg(test)]
mod tests {
    use crate::{Colour, Outcome, RoundResult};

    use super::*;

    #[test]
    fn test_valid_player_passes() {
        let mut player = Player::new("Smith,John");
        player.record(RoundResult::new(2, Outcome::Draw, Colour::Black, "A,B"));
        assert!(validate_player(&player).is_empty());
    }

    #[test]
    fn test_nameless_player_is_still_consistent() {
        let mut player = Player::new(",");
        player.record(RoundResult::new(1, Outcome::Win, Colour::White, "A,B"));
        assert!(validate_player(&player).is_empty());
    }

    #[test]
    fn test_round_key_mismatch_detected() {
        let mut player = Player::new("Smith,John");
        player
            .results
            .insert(4, RoundResult::new(3, Outcome::Loss, Colour::White, "A,B"));
        let errors = validate_player(&player);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::RoundKeyMismatch { key: 4, actual: 3, .. }
        )));
    }

    #[test]
    fn test_validate_players_collects_all() {
        let mut bad = Player::new("Smith,John");
        bad.score = 1.0;
        let mut worse = Player::new("Jones,Ann");
        worse.score = 2.0;
        let errors = validate_players(&[Player::new("Ok,Fine"), bad, worse]);
        assert_eq!(errors.len(), 2);
    }
}
