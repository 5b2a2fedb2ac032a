//! Event-level containers.

use serde::{Deserialize, Serialize};

use crate::Player;
use crate::error::{ReportError, Result};

/// Everything extracted from one source.
///
/// # Examples
///
/// ```
/// use crosstable_core::*;
///
/// let mut player = Player::new("Dwyer,Daniel");
/// player.record(RoundResult::new(5, Outcome::Win, Colour::White, "Kenny,William"));
/// let event = Tournament::new("4NCL Rounds 5-5", "http://example.org/", vec![player]);
///
/// let context = event.context().unwrap();
/// assert_eq!((context.first_round, context.last_round), (5, 5));
/// assert_eq!(context.round_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub event: String,
    /// URL or file path the results were read from.
    pub source: String,
    pub players: Vec<Player>,
}

impl Tournament {
    pub fn new(event: impl Into<String>, source: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            event: event.into(),
            source: source.into(),
            players,
        }
    }

    /// Computes the round span over all players.
    pub fn context(&self) -> Result<TournamentContext> {
        TournamentContext::from_players(&self.event, &self.source, &self.players)
    }
}

/// Round span and naming for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentContext {
    pub event: String,
    pub source: String,
    pub first_round: u32,
    pub last_round: u32,
}

impl TournamentContext {
    /// Builds the context from the completed player set.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoResults`] when no player holds a result.
    pub fn from_players(event: &str, source: &str, players: &[Player]) -> Result<Self> {
        let spans: Vec<(u32, u32)> = players.iter().filter_map(Player::round_span).collect();
        let first_round = spans.iter().map(|(first, _)| *first).min();
        let last_round = spans.iter().map(|(_, last)| *last).max();
        match (first_round, last_round) {
            (Some(first_round), Some(last_round)) => Ok(Self {
                event: event.to_string(),
                source: source.to_string(),
                first_round,
                last_round,
            }),
            _ => Err(ReportError::NoResults),
        }
    }

    /// Number of report rounds, counting rounds nobody played.
    pub fn round_count(&self) -> u32 {
        self.last_round - self.first_round + 1
    }

    /// Maps a tournament round onto the 1-based report numbering.
    pub fn report_round(&self, round: u32) -> u32 {
        round - self.first_round + 1
    }

    pub fn rounds(&self) -> std::ops::RangeInclusive<u32> {
        self.first_round..=self.last_round
    }
}
