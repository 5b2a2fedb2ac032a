//! Result token decoding for the supported result sites.
//!
//! Two encodings are in use:
//!
//! - the results-site encoding, `"w 1"`, `"b ½"`, `"s 0"`, `"- 1K"`: the last
//!   character is the result, the first the colour, and a trailing
//!   [`WALKOVER_MARKER`] flags a game that was not played;
//! - the league-site encoding, `"1 - 0"`: the first character is the result
//!   for the home side and colour comes from the board, not the token.

use crate::error::{ReportError, Result};
use crate::{Colour, Outcome};

/// Suffix marking a forfeit or otherwise unplayed game.
pub const WALKOVER_MARKER: char = 'K';

/// Returns `true` when the token ends in the walkover marker.
pub fn is_walkover(token: &str) -> bool {
    token.trim().ends_with(WALKOVER_MARKER)
}

/// Trims the token and drops one trailing walkover marker.
pub fn strip_walkover(token: &str) -> &str {
    let token = token.trim();
    token.strip_suffix(WALKOVER_MARKER).unwrap_or(token)
}

/// Colour from the first character of a token: `w` is white, `b` or `s`
/// (German *schwarz*) black, anything else unknown. Case-insensitive.
///
/// # Examples
///
/// ```
/// use crosstable_core::{Colour, colour_from_token};
///
/// assert_eq!(colour_from_token("w 1"), Colour::White);
/// assert_eq!(colour_from_token("S 0"), Colour::Black);
/// assert_eq!(colour_from_token("- 1K"), Colour::Unknown);
/// ```
pub fn colour_from_token(token: &str) -> Colour {
    match token.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('w') => Colour::White,
        Some('b' | 's') => Colour::Black,
        _ => Colour::Unknown,
    }
}

/// Site-specific result token encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultEncoding {
    /// `"<colour> <result>[K]"`, result in the last character.
    ResultsSite,
    /// `"<home> - <away>"`, result in the first character.
    LeagueSite,
}

impl ResultEncoding {
    /// Decodes the outcome encoded in `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EmptyResultToken`] when nothing is left to read
    /// after trimming (and, for the results site, stripping the walkover
    /// marker).
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_core::{Outcome, ResultEncoding};
    ///
    /// assert_eq!(ResultEncoding::ResultsSite.outcome("w 1").unwrap(), Outcome::Win);
    /// assert_eq!(ResultEncoding::ResultsSite.outcome("b 0K").unwrap(), Outcome::Loss);
    /// assert_eq!(ResultEncoding::LeagueSite.outcome("= - =").unwrap(), Outcome::Draw);
    /// ```
    pub fn outcome(self, token: &str) -> Result<Outcome> {
        let code = match self {
            Self::ResultsSite => strip_walkover(token).chars().next_back(),
            Self::LeagueSite => token.trim().chars().next(),
        };
        code.map(Outcome::from_code)
            .ok_or(ReportError::EmptyResultToken)
    }

    /// Colour carried by the token itself, if the encoding has one.
    pub fn colour(self, token: &str) -> Colour {
        match self {
            Self::ResultsSite => colour_from_token(token),
            Self::LeagueSite => Colour::Unknown,
        }
    }
}

/// Rewrites a league-site result from the away side's point of view.
///
/// # Examples
///
/// ```
/// use crosstable_core::{Outcome, ResultEncoding, reverse_league_token};
///
/// let away = reverse_league_token("1 - 0");
/// assert_eq!(away, "0 - 1");
/// assert_eq!(ResultEncoding::LeagueSite.outcome(&away).unwrap(), Outcome::Loss);
/// ```
pub fn reverse_league_token(token: &str) -> String {
    token.trim().chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_site_outcomes() {
        let cases = [
            ("w 1", Outcome::Win),
            ("b 0", Outcome::Loss),
            ("w =", Outcome::Draw),
            ("s ½", Outcome::Draw),
            ("w 1K", Outcome::Win),
            ("- 0K", Outcome::Loss),
            (" b 1 ", Outcome::Win),
        ];
        for (token, expected) in cases {
            assert_eq!(ResultEncoding::ResultsSite.outcome(token).unwrap(), expected, "{token}");
        }
    }

    #[test]
    fn test_league_site_outcomes() {
        let cases = [
            ("1 - 0", Outcome::Win),
            ("0 - 1", Outcome::Loss),
            ("= - =", Outcome::Draw),
            ("½ - ½", Outcome::Draw),
        ];
        for (token, expected) in cases {
            assert_eq!(ResultEncoding::LeagueSite.outcome(token).unwrap(), expected, "{token}");
        }
    }

    #[test]
    fn test_token_values_sum_to_score() {
        let tokens = [
            (ResultEncoding::ResultsSite, "w 1"),
            (ResultEncoding::ResultsSite, "b 0"),
            (ResultEncoding::ResultsSite, "w ="),
            (ResultEncoding::LeagueSite, "1 - 0"),
            (ResultEncoding::LeagueSite, "0 - 1"),
            (ResultEncoding::LeagueSite, "= - ="),
        ];
        let total: f64 = tokens
            .iter()
            .map(|(encoding, token)| encoding.outcome(token).unwrap().value())
            .sum();
        assert_eq!(total, 3.0);
    }

    #[test]
    fn test_empty_tokens_are_errors() {
        assert!(ResultEncoding::ResultsSite.outcome("  ").is_err());
        assert!(ResultEncoding::ResultsSite.outcome("K").is_err());
        assert!(ResultEncoding::LeagueSite.outcome("").is_err());
    }

    #[test]
    fn test_colour_only_from_results_site() {
        assert_eq!(ResultEncoding::ResultsSite.colour("B 1"), Colour::Black);
        assert_eq!(ResultEncoding::LeagueSite.colour("1 - 0"), Colour::Unknown);
    }

    #[test]
    fn test_reverse_league_token() {
        assert_eq!(reverse_league_token("1 - 0"), "0 - 1");
        assert_eq!(reverse_league_token(" ½ - ½"), "½ - ½");
    }

    #[test]
    fn test_walkover_detection() {
        assert!(is_walkover("w 1K"));
        assert!(!is_walkover("w 1"));
        assert_eq!(strip_walkover(" - 1K "), "- 1");
    }
}
