//! Results-site team page.
//!
//! Team pages list every player as a one-cell heading row followed by that
//! player's pairing rows. The header row is unreliable here, so columns are
//! chosen per row from the cell count.

use crosstable_core::{NameTitlePolicy, Player, commaize, name_from_heading};
use scraper::Html;
use tracing::debug;

use crate::dom;
use crate::error::{ExtractError, Result};
use crate::layout::{Layout, RowShape};

use super::individual::HEADER_ROW_CLASS;
use super::results_site_pairing;

const ANCHOR_TEXT: &str = "Player info";
const ANCHOR_PREFIX: &str = "Player details for";

fn is_anchor(text: &str) -> bool {
    text == ANCHOR_TEXT || text.starts_with(ANCHOR_PREFIX)
}

/// Extracts every player on a team page, in page order.
///
/// # Errors
///
/// - [`ExtractError::MissingAnchor`] when the results section is not found.
/// - [`ExtractError::Layout`] when a pairing row precedes the first player
///   heading.
pub fn extract(document: &Html) -> Result<Vec<Player>> {
    let start = dom::row_after_text(document, is_anchor, HEADER_ROW_CLASS).ok_or_else(|| {
        ExtractError::MissingAnchor(format!("'{HEADER_ROW_CLASS}' row after '{ANCHOR_TEXT}'"))
    })?;

    let layout = Layout::Positional;
    let mut players: Vec<Player> = Vec::new();

    for row in dom::rows_from(start) {
        let texts = dom::cell_texts(row);
        if texts.first().is_some_and(|first| first.contains("Rd.")) {
            continue;
        }
        match layout.classify(texts.len()) {
            RowShape::PlayerHeading => {
                let name = commaize(&name_from_heading(&texts[0], NameTitlePolicy::Stop));
                debug!(player = %name, "Player block");
                players.push(Player::new(name));
            }
            RowShape::Pairing(columns) => {
                let Some(fields) = columns.fields(&texts) else {
                    continue;
                };
                let Some(result) = results_site_pairing(&fields)? else {
                    continue;
                };
                let player = players.last_mut().ok_or_else(|| {
                    ExtractError::Layout(format!(
                        "pairing for round {} before any player heading",
                        result.round
                    ))
                })?;
                player.record(result);
            }
            RowShape::Skip => {}
        }
    }
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <h2>Player details for IRL</h2>
        <table>
          <tr class="CRg1b"><td>Rd.</td><td>Bo.</td><td></td><td>Name</td><td>Rtg</td><td>FED</td><td>Club</td><td>Pts.</td><td>Res.</td></tr>
          <tr><td colspan="9">Kenny William 2105 IRL</td></tr>
          <tr class="CRg1"><td>1</td><td>2</td><td>IM</td><td>Berg Jan</td><td>2410</td><td>NED</td><td>HSG</td><td>4.0</td><td>w 0</td></tr>
          <tr class="CRg2"><td>2</td><td>2</td><td></td><td>Lopez Ana</td><td>1980</td><td>ESP</td><td>CA</td><td>2.0</td><td>2080</td><td>b 1</td></tr>
          <tr class="CRg1b"><td>Rd.</td><td>Bo.</td><td></td><td>Name</td><td>Rtg</td><td>FED</td><td>Club</td><td>Pts.</td><td>Res.</td></tr>
          <tr><td colspan="9">Dunne John P. FM 1990 IRL</td></tr>
          <tr class="CRg1"><td>1</td><td>4</td><td>ACM</td><td>Smith John</td><td>0</td><td>ENG</td><td>X</td><td>1.0</td><td>s ½</td></tr>
          <tr><td>spacer</td><td>row</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn test_extracts_players_in_page_order() {
        let players = extract(&Html::parse_document(PAGE)).unwrap();
        let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Kenny,William", "Dunne,John P."]);
        assert_eq!(players[0].score, 1.0);
        assert_eq!(players[1].score, 0.5);
    }

    #[test]
    fn test_ten_cell_rows_read_result_after_performance() {
        let players = extract(&Html::parse_document(PAGE)).unwrap();
        let second = &players[0].results[&2];
        assert_eq!(second.opponent, "Lopez,Ana");
        assert_eq!(second.opponent_rating, Some(1980));
    }

    #[test]
    fn test_unrecognized_titles_and_zero_ratings_blanked() {
        let players = extract(&Html::parse_document(PAGE)).unwrap();
        let result = &players[1].results[&1];
        assert_eq!(result.opponent_title, None);
        assert_eq!(result.opponent_rating, None);
    }

    #[test]
    fn test_pairing_before_heading_is_layout_error() {
        let page = PAGE.replace(r#"<tr><td colspan="9">Kenny William 2105 IRL</td></tr>"#, "");
        assert!(matches!(
            extract(&Html::parse_document(&page)),
            Err(ExtractError::Layout(_))
        ));
    }

    #[test]
    fn test_missing_anchor() {
        let page = "<html><body><table><tr class=\"CRg1b\"><td>Rd.</td></tr></table></body></html>";
        assert!(matches!(
            extract(&Html::parse_document(page)),
            Err(ExtractError::MissingAnchor(_))
        ));
    }
}
