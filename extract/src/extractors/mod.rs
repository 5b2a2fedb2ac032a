//! Per-source extractors.
//!
//! Each extractor turns one parsed source into a list of players in source
//! order. Names are normalized and result tokens decoded while the players
//! are built, so the output is ready for merging and rendering.

pub mod individual;
pub mod league;
pub mod spreadsheet;
pub mod team;

use crosstable_core::{Player, ResultEncoding, RoundResult, commaize};
use scraper::Html;
use tracing::{debug, info};

use crate::dom;
use crate::error::Result;
use crate::layout::{PairingFields, parse_rating, parse_title};

/// Text markers identifying a results-site team page.
pub const TEAM_PAGE_MARKERS: [&str; 2] = ["Team composition", "Player overview for"];

/// Returns `true` for results-site team pages.
pub fn is_team_page(html: &str) -> bool {
    TEAM_PAGE_MARKERS.iter().any(|marker| html.contains(marker))
}

/// Extracts the event name and players from a results-site page, choosing
/// the team or individual extractor from the page text.
///
/// # Errors
///
/// Propagates the selected extractor's errors.
pub fn parse_page(html: &str) -> Result<(String, Vec<Player>)> {
    let document = Html::parse_document(html);
    let event = dom::page_title(&document)
        .map(|title| dom::event_from_title(&title))
        .unwrap_or_default();

    let players = if is_team_page(html) {
        info!(event = %event, "Parsing team page");
        team::extract(&document)?
    } else {
        info!(event = %event, "Parsing individual page");
        vec![individual::extract(&document)?]
    };
    debug!(players = players.len(), "Parsed page");
    Ok((event, players))
}

/// Builds a result from a results-site pairing row.
///
/// Returns `Ok(None)` when the round cell is not a number, which marks a
/// row that carries no pairing.
pub(crate) fn results_site_pairing(fields: &PairingFields<'_>) -> Result<Option<RoundResult>> {
    let Ok(round) = fields.round.trim().parse::<u32>() else {
        debug!(round = fields.round, "Skipping row without a round number");
        return Ok(None);
    };
    let encoding = ResultEncoding::ResultsSite;
    let result = RoundResult::new(
        round,
        encoding.outcome(fields.result)?,
        encoding.colour(fields.result),
        commaize(fields.name),
    )
    .with_rating(parse_rating(fields.rating))
    .with_title(parse_title(fields.title))
    .with_federation(fields.federation.trim());
    Ok(Some(result))
}
