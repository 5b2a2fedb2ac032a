//! Cross-round player merging.
//!
//! League sites publish one page per round, so each fetch yields players
//! holding a single result. [`merge_players`] folds those partial lists into
//! one player per name.
//!
//! # Example
//!
//! ```
//! use crosstable_core::*;
//!
//! let mut round1 = Player::new("Smith,John");
//! round1.record(RoundResult::new(1, Outcome::Win, Colour::White, "Jessel,Stephen"));
//! let mut round2 = Player::new("Smith,John");
//! round2.record(RoundResult::new(2, Outcome::Draw, Colour::Black, "Dunne,John P."));
//!
//! let merged = merge_players(vec![round1], vec![round2]);
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].score, 1.5);
//! ```

use crate::Player;

/// Merges `from` into `into` and returns the accumulated list.
///
/// Players are matched by exact name. A match receives the other player's
/// results (a round seen twice keeps the later result); unmatched players
/// are appended in their original order.
pub fn merge_players(mut into: Vec<Player>, from: Vec<Player>) -> Vec<Player> {
    for player in from {
        match into.iter_mut().find(|existing| existing.name == player.name) {
            Some(existing) => existing.absorb(player),
            None => into.push(player),
        }
    }
    into
}

#[cfg(test)]
mod tests {
    use crate::{Colour, Outcome, RoundResult};

    use super::*;

    fn player_with(name: &str, round: u32, outcome: Outcome) -> Player {
        let mut player = Player::new(name);
        player.record(RoundResult::new(round, outcome, Colour::White, "Opponent,Some"));
        player
    }

    #[test]
    fn test_merge_same_name_unions_rounds() {
        let merged = merge_players(
            vec![player_with("Smith,John", 1, Outcome::Win)],
            vec![player_with("Smith,John", 2, Outcome::Draw)],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].results.keys().copied().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(merged[0].score, 1.5);
    }

    #[test]
    fn test_merge_new_name_is_appended() {
        let merged = merge_players(
            vec![player_with("Smith,John", 1, Outcome::Win)],
            vec![player_with("Smyth,John", 1, Outcome::Loss)],
        );
        let names: Vec<_> = merged.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Smith,John", "Smyth,John"]);
    }

    #[test]
    fn test_merge_into_empty_keeps_order() {
        let merged = merge_players(
            Vec::new(),
            vec![
                player_with("B,B", 4, Outcome::Win),
                player_with("A,A", 4, Outcome::Loss),
            ],
        );
        assert_eq!(merged[0].name, "B,B");
        assert_eq!(merged[1].name, "A,A");
    }

    #[test]
    fn test_merge_is_exact_on_names() {
        let merged = merge_players(
            vec![player_with("Smith,John", 1, Outcome::Win)],
            vec![player_with("Smith, John", 2, Outcome::Win)],
        );
        assert_eq!(merged.len(), 2);
    }
}
