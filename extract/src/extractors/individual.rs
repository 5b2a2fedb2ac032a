//! Results-site individual page.
//!
//! The page holds one `Player info` dialog: a details table giving the
//! player's name, then a results table whose `CRg1b` header row labels the
//! columns.

use std::sync::LazyLock;

use crosstable_core::{Player, commaize};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::dom;
use crate::error::{ExtractError, Result};
use crate::layout::{ColumnMap, Layout, RowShape};

use super::results_site_pairing;

pub const DIALOG_HEADING: &str = "Player info";
pub const HEADER_ROW_CLASS: &str = "CRg1b";
const ROW_CLASS_PREFIXES: [&str; 2] = ["CRg", "CRng"];

// SAFETY: These selectors are compile-time constants and are validated by tests.
static DIALOG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.defaultDialog").expect("static selector must parse"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("static selector must parse"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector must parse"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector must parse"));

fn player_dialog(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&DIALOG).find(|div| {
        div.select(&HEADING)
            .next()
            .is_some_and(|h2| dom::text_of(h2) == DIALOG_HEADING)
    })
}

/// Text of the cell after the first `Name` cell.
fn player_name(dialog: ElementRef<'_>) -> Option<String> {
    let label = dialog.select(&CELL).find(|td| dom::text_of(*td) == "Name")?;
    label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .map(dom::text_of)
}

fn is_data_row(row: ElementRef<'_>) -> bool {
    !dom::has_class(row, HEADER_ROW_CLASS)
        && row
            .value()
            .classes()
            .any(|class| ROW_CLASS_PREFIXES.iter().any(|prefix| class.starts_with(prefix)))
}

/// Extracts the single player on an individual page.
///
/// # Errors
///
/// - [`ExtractError::MissingAnchor`] without a `Player info` dialog, a
///   `Name` cell or a header row.
/// - [`ExtractError::MissingHeader`] when a required column is not labelled.
pub fn extract(document: &Html) -> Result<Player> {
    let dialog = player_dialog(document)
        .ok_or_else(|| ExtractError::MissingAnchor(format!("'{DIALOG_HEADING}' dialog")))?;
    let name = player_name(dialog)
        .ok_or_else(|| ExtractError::MissingAnchor("player name cell".to_string()))?;
    let mut player = Player::new(commaize(&name));

    let header = dialog
        .select(&ROW)
        .find(|row| dom::has_class(*row, HEADER_ROW_CLASS))
        .ok_or_else(|| ExtractError::MissingAnchor(format!("'{HEADER_ROW_CLASS}' header row")))?;
    let layout = Layout::Header(ColumnMap::from_labels(&dom::cell_texts(header))?);

    for row in dialog.select(&ROW).filter(|row| is_data_row(*row)) {
        let texts = dom::cell_texts(row);
        let RowShape::Pairing(columns) = layout.classify(texts.len()) else {
            debug!(cells = texts.len(), "Skipping short row");
            continue;
        };
        let Some(fields) = columns.fields(&texts) else {
            continue;
        };
        if let Some(result) = results_site_pairing(&fields)? {
            player.record(result);
        }
    }
    debug!(player = %player.name, rounds = player.results.len(), "Parsed individual");
    Ok(player)
}

#[cfg(test)]
mod tests {
    use crosstable_core::{Colour, Outcome, Title};

    use super::*;

    const PAGE: &str = r#"
        <html><head><title>Chess-Results Server - Spring Open - Player info</title></head><body>
        <div class="defaultDialog"><h2>Tournament selection</h2></div>
        <div class="defaultDialog">
          <h2>Player info</h2>
          <table>
            <tr><td class="CR">Name</td><td class="CR">Dwyer Daniel</td></tr>
            <tr><td class="CR">Rating</td><td class="CR">1740</td></tr>
          </table>
          <table>
            <tr class="CRg1b"><th>Rd.</th><th>Bo.</th><th>SNo</th><th></th><th>Name</th><th>Rtg</th><th>FED</th><th>Pts.</th><th>Res.</th></tr>
            <tr class="CRg1"><td>1</td><td>4</td><td>22</td><td>AIM</td><td>Quinn Mark</td><td>1810</td><td>IRL</td><td>3.5</td><td>w 1</td></tr>
            <tr class="CRg2"><td>2</td><td>3</td><td>7</td><td>FM</td><td>Van Der Sloot Pieter Jan</td><td>0</td><td>NED</td><td>5.0</td><td>s 0</td></tr>
            <tr class="CRng1"><td>3</td><td></td><td></td><td></td><td>bye</td><td></td><td></td><td></td><td>- 1K</td></tr>
            <tr class="CRg1"><td colspan="9">Total</td></tr>
          </table>
        </div></body></html>"#;

    #[test]
    fn test_static_selectors_parse() {
        LazyLock::force(&DIALOG);
        LazyLock::force(&HEADING);
        LazyLock::force(&CELL);
        LazyLock::force(&ROW);
    }

    #[test]
    fn test_extracts_player_and_rounds() {
        let player = extract(&Html::parse_document(PAGE)).unwrap();
        assert_eq!(player.name, "Dwyer,Daniel");
        assert_eq!(player.results.len(), 3);
        assert_eq!(player.score, 2.0);

        let first = &player.results[&1];
        assert_eq!(first.opponent, "Quinn,Mark");
        assert_eq!(first.opponent_title, None);
        assert_eq!(first.opponent_rating, Some(1810));
        assert_eq!(first.colour, Colour::White);

        let second = &player.results[&2];
        assert_eq!(second.opponent, "Van Der Sloot,Pieter Jan");
        assert_eq!(second.opponent_title, Some(Title::FM));
        assert_eq!(second.opponent_rating, None);
        assert_eq!(second.outcome, Outcome::Loss);

        assert_eq!(player.results[&3].colour, Colour::Unknown);
        assert_eq!(player.results[&3].outcome, Outcome::Win);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let page = PAGE.replace(
            r#"<tr class="CRg1"><td colspan="9">Total</td></tr>"#,
            r#"<tr class="CRg1"><td>4</td><td>1</td><td>FM</td><td>Kenny William</td></tr>"#,
        );
        let player = extract(&Html::parse_document(&page)).unwrap();
        assert_eq!(player.results.len(), 3);
        assert!(!player.results.contains_key(&4));
    }

    #[test]
    fn test_missing_dialog() {
        let err = extract(&Html::parse_document("<html><body></body></html>")).unwrap_err();
        assert!(matches!(err, ExtractError::MissingAnchor(_)));
    }

    #[test]
    fn test_header_without_result_column() {
        let page = PAGE.replace("<th>Res.</th>", "<th>Result</th>");
        let err = extract(&Html::parse_document(&page)).unwrap_err();
        assert!(matches!(err, ExtractError::MissingHeader(label) if label == "Res."));
    }
}
