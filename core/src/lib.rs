//! Core result model and report primitives for tournament crosstables.
//!
//! This crate defines the types that every source extractor produces and the
//! pure transformations applied to them afterwards:
//!
//! - [`Player`]: one player's normalized name, placeholder identifier,
//!   running score and per-round [`RoundResult`]s.
//! - [`Outcome`], [`Colour`] and [`Title`]: closed sets replacing the
//!   narrow string codes used by the result sites.
//! - [`commaize`] and [`collapse_commas`]: canonical `Surname,Given` names.
//! - [`ResultEncoding`]: decoding of site-specific result tokens.
//! - [`merge_players`]: union of per-round player lists.
//! - [`render_report`]: the fixed line-oriented rating report.
//!
//! # Example
//!
//! ```
//! use crosstable_core::*;
//!
//! let mut player = Player::new(commaize("Dwyer Daniel"));
//! player.record(RoundResult::new(1, Outcome::Win, Colour::White, "Smith,John"));
//! player.record(RoundResult::new(2, Outcome::Draw, Colour::Black, "Kenny,William"));
//!
//! assert_eq!(player.name, "Dwyer,Daniel");
//! assert_eq!(player.score, 1.5);
//!
//! let report = render_report("Club Championship", &[player], "local.html").unwrap();
//! assert!(report.contains("Player,????,Dwyer,Daniel"));
//! assert!(report.ends_with("Total,1.5\n"));
//! ```

mod codec;
mod error;
mod merge;
mod names;
mod report;
mod tournament;
mod types;
mod validate;

pub use codec::{
    ResultEncoding, WALKOVER_MARKER, colour_from_token, is_walkover, reverse_league_token,
    strip_walkover,
};
pub use error::{ReportError, Result};
pub use merge::merge_players;
pub use names::{NameTitlePolicy, collapse_commas, commaize, name_from_heading, report_name};
pub use report::{render_json, render_report};
pub use tournament::{Tournament, TournamentContext};
pub use types::*;
pub use validate::{ValidationError, validate_player, validate_players};
