//! Result extraction from tournament-results sources.
//!
//! A source reference (URL or file path) is classified by
//! [`SourceKind::classify`], fetched through a [`Fetch`] implementation and
//! handed to the matching extractor:
//!
//! - results-site pages, individual or team view ([`parse_page`]);
//! - results-site spreadsheet exports ([`extractors::spreadsheet`]);
//! - league-site round pages, one fetch per round, merged
//!   ([`extractors::league`]).
//!
//! The players come back validated and ready to render with
//! [`crosstable_core::render_report`].
//!
//! # Example
//!
//! ```
//! use crosstable_extract::{ExtractConfig, Fetch, Result, parse_source};
//!
//! struct Saved;
//!
//! impl Fetch for Saved {
//!     fn fetch(&self, _reference: &str) -> Result<Vec<u8>> {
//!         Ok(br#"<html><head><title>Server - Spring Open - Info</title></head><body>
//!             <div class="defaultDialog"><h2>Player info</h2>
//!             <table><tr><td>Name</td><td>Dwyer Daniel</td></tr></table>
//!             <table>
//!             <tr class="CRg1b"><td>Rd.</td><td></td><td>Name</td><td>Rtg</td><td>FED</td><td>Res.</td></tr>
//!             <tr class="CRg1"><td>1</td><td>FM</td><td>Quinn Mark</td><td>2200</td><td>IRL</td><td>w 1</td></tr>
//!             </table></div></body></html>"#
//!             .to_vec())
//!     }
//! }
//!
//! let tournament = parse_source("player.html", None, &ExtractConfig::default(), &Saved).unwrap();
//! assert_eq!(tournament.event, "Spring Open");
//! assert_eq!(tournament.players[0].name, "Dwyer,Daniel");
//! assert_eq!(tournament.players[0].score, 1.0);
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod layout;
pub mod ratings;
pub mod source;
pub mod workbook;

pub use config::ExtractConfig;
pub use error::{ExtractError, Result};
pub use extractors::league::league_title;
pub use extractors::{is_team_page, parse_page};
pub use fetch::{DefaultFetcher, Fetch, FileFetcher, HttpFetcher, is_url};
pub use layout::{ColumnMap, Layout, PairingFields, RowShape};
pub use ratings::{FederationStats, RatedPlayer, RatingList};
pub use source::{RoundToken, RoundsSpec, SourceKind, league_round_url};
pub use workbook::{Cell, GridWorkbook, Workbook, XlsxWorkbook, parse_address};

use crosstable_core::{ReportError, Tournament, validate_players};
use tracing::{info, warn};

/// Fetches and extracts one source.
///
/// `rounds` is required for league sources and ignored otherwise.
///
/// # Errors
///
/// - [`ExtractError::MissingRounds`] for a league source without rounds.
/// - [`ExtractError::NoPlayers`] when the source yields nobody.
/// - [`ExtractError::Core`] wrapping [`ReportError::Invariant`] when the
///   extracted players are inconsistent.
/// - Any fetch or extractor error.
pub fn parse_source(
    reference: &str,
    rounds: Option<&str>,
    config: &ExtractConfig,
    fetcher: &dyn Fetch,
) -> Result<Tournament> {
    let kind = SourceKind::classify(reference);
    info!(source = reference, kind = kind.label(), "Extracting");

    let (event, mut players) = match kind {
        SourceKind::ResultsSpreadsheet => {
            let book = XlsxWorkbook::from_bytes(fetcher.fetch(reference)?)?;
            extractors::spreadsheet::extract(&book)?
        }
        SourceKind::ResultsPage | SourceKind::LocalPage => {
            let bytes = fetcher.fetch(reference)?;
            parse_page(&String::from_utf8_lossy(&bytes))?
        }
        SourceKind::LeagueSite => {
            let spec = RoundsSpec::parse(rounds.ok_or(ExtractError::MissingRounds)?)?;
            extractors::league::extract(reference, &spec, config, fetcher)?
        }
    };

    if players.is_empty() {
        return Err(ExtractError::NoPlayers(reference.to_string()));
    }
    let problems = validate_players(&players);
    if !problems.is_empty() {
        let message = problems.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        return Err(ReportError::Invariant(message).into());
    }
    for player in &mut players {
        if !player.has_name() {
            warn!(rounds = player.results.len(), "Player heading gave no name");
        }
        player.id.clone_from(&config.player_id_placeholder);
    }

    info!(event = %event, players = players.len(), "Extracted");
    Ok(Tournament::new(event, reference, players))
}
