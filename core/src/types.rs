//! Player and round-result type definitions.
//!
//! Results arrive as loosely formatted strings from each source. They are
//! mapped onto the closed enums here at the extraction boundary and only
//! turned back into the narrow report codes by the renderer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Identifier emitted for every player until it is filled in by hand.
pub const UNKNOWN_PLAYER_ID: &str = "????";

/// Outcome of one game from the recorded player's point of view.
///
/// # Examples
///
/// ```
/// use crosstable_core::Outcome;
///
/// assert_eq!(Outcome::from_code('1'), Outcome::Win);
/// assert_eq!(Outcome::from_code('0'), Outcome::Loss);
/// assert_eq!(Outcome::from_code('½'), Outcome::Draw);
/// assert_eq!(Outcome::Draw.value(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Maps a result character: `1` wins, `0` loses, anything else draws.
    pub fn from_code(code: char) -> Self {
        match code {
            '1' => Self::Win,
            '0' => Self::Loss,
            _ => Self::Draw,
        }
    }

    /// Report code for the outcome.
    pub fn code(self) -> char {
        match self {
            Self::Win => '1',
            Self::Loss => '0',
            Self::Draw => '=',
        }
    }

    /// Points contributed to the player's score.
    pub fn value(self) -> f64 {
        match self {
            Self::Win => 1.0,
            Self::Loss => 0.0,
            Self::Draw => 0.5,
        }
    }
}

/// Colour played in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Colour {
    White,
    Black,
    /// Byes and pairings whose colour the source does not show.
    #[default]
    Unknown,
}

impl Colour {
    /// Returns the opposite colour.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ReverseUnknownColour`] for [`Colour::Unknown`];
    /// the colour of the opposing side cannot be inferred from nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_core::Colour;
    ///
    /// assert_eq!(Colour::White.reversed().unwrap(), Colour::Black);
    /// assert!(Colour::Unknown.reversed().is_err());
    /// ```
    pub fn reversed(self) -> Result<Self> {
        match self {
            Self::White => Ok(Self::Black),
            Self::Black => Ok(Self::White),
            Self::Unknown => Err(ReportError::ReverseUnknownColour(format!("{self:?}"))),
        }
    }

    /// Report code for the colour (`W`, `B` or `-`).
    pub fn code(self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
            Self::Unknown => '-',
        }
    }
}

/// Titles the rating software accepts.
///
/// Anything else seen in a source (arbiter or national titles) is dropped
/// before it reaches a [`RoundResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Title {
    GM,
    IM,
    FM,
    CM,
    WGM,
    WIM,
    WFM,
    WCM,
}

impl Title {
    pub const ALL: [Title; 8] = [
        Title::GM,
        Title::IM,
        Title::FM,
        Title::CM,
        Title::WGM,
        Title::WIM,
        Title::WFM,
        Title::WCM,
    ];

    /// Parses an exact title abbreviation, returning `None` for anything
    /// outside the recognized set.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_core::Title;
    ///
    /// assert_eq!(Title::parse("WFM"), Some(Title::WFM));
    /// assert_eq!(Title::parse("AIM"), None);
    /// assert_eq!(Title::parse(""), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|title| title.as_str() == text)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GM => "GM",
            Self::IM => "IM",
            Self::FM => "FM",
            Self::CM => "CM",
            Self::WGM => "WGM",
            Self::WIM => "WIM",
            Self::WFM => "WFM",
            Self::WCM => "WCM",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's result in one round.
///
/// The owning [`Player`] holds results keyed by round, so the result does
/// not point back at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number as numbered by the tournament (not necessarily 1-based).
    pub round: u32,
    pub outcome: Outcome,
    pub colour: Colour,
    /// Opponent display name, normally in `Surname,Given` form.
    pub opponent: String,
    /// Opponent rating; `None` when the source shows zero or nothing.
    pub opponent_rating: Option<u32>,
    pub opponent_title: Option<Title>,
    /// Opponent federation code (e.g. `IRL`).
    pub opponent_federation: String,
}

impl RoundResult {
    /// Creates a result with no opponent rating, title or federation.
    pub fn new(round: u32, outcome: Outcome, colour: Colour, opponent: impl Into<String>) -> Self {
        Self {
            round,
            outcome,
            colour,
            opponent: opponent.into(),
            opponent_rating: None,
            opponent_title: None,
            opponent_federation: String::new(),
        }
    }

    /// Sets the opponent rating, treating zero as unrated.
    pub fn with_rating(mut self, rating: Option<u32>) -> Self {
        self.opponent_rating = rating.filter(|r| *r != 0);
        self
    }

    pub fn with_title(mut self, title: Option<Title>) -> Self {
        self.opponent_title = title;
        self
    }

    pub fn with_federation(mut self, federation: impl Into<String>) -> Self {
        self.opponent_federation = federation.into();
        self
    }
}

/// A player and every result recorded for them in one event.
///
/// # Invariants
///
/// - At most one result per round (enforced by the map key).
/// - `score` equals the sum of the results' [`Outcome::value`]s as long as
///   results are added through [`Player::record`] or [`Player::absorb`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Normalized `Surname,Given` name; merge identity.
    pub name: String,
    /// Federation identifier, [`UNKNOWN_PLAYER_ID`] unless set.
    pub id: String,
    pub score: f64,
    pub results: BTreeMap<u32, RoundResult>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: UNKNOWN_PLAYER_ID.to_string(),
            score: 0.0,
            results: BTreeMap::new(),
        }
    }

    /// `false` when the name is blank apart from the separator comma, as
    /// for a heading that starts with a title.
    pub fn has_name(&self) -> bool {
        self.name.chars().any(|c| c != ',' && !c.is_whitespace())
    }

    /// Records a result, keeping the score in step.
    ///
    /// A second result for a round already present replaces the first and
    /// its points.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_core::*;
    ///
    /// let mut player = Player::new("Smith,John");
    /// player.record(RoundResult::new(3, Outcome::Win, Colour::Black, "Kenny,William"));
    /// player.record(RoundResult::new(3, Outcome::Draw, Colour::Black, "Kenny,William"));
    /// assert_eq!(player.results.len(), 1);
    /// assert_eq!(player.score, 0.5);
    /// ```
    pub fn record(&mut self, result: RoundResult) {
        self.score += result.outcome.value();
        if let Some(previous) = self.results.insert(result.round, result) {
            self.score -= previous.outcome.value();
        }
    }

    /// Moves every result of `other` into this player.
    pub fn absorb(&mut self, other: Player) {
        for result in other.results.into_values() {
            self.record(result);
        }
    }

    /// Lowest and highest round numbers with a recorded result.
    pub fn round_span(&self) -> Option<(u32, u32)> {
        let first = *self.results.keys().next()?;
        let last = *self.results.keys().next_back()?;
        Some((first, last))
    }

    /// Sum of the recorded results' values.
    pub fn result_total(&self) -> f64 {
        self.results.values().map(|r| r.outcome.value()).sum()
    }
}
