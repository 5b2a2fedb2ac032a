//! League-site round pages.
//!
//! Each round is a separate page showing whole-team matches. The own team's
//! match is found by name; its heading row tells whether we are the home or
//! the away side, and the board rows below it give one result per player.

use crosstable_core::{
    Player, ResultEncoding, RoundResult, Title, colour_from_token, merge_players,
    reverse_league_token,
};
use scraper::Html;
use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::dom;
use crate::error::{ExtractError, Result};
use crate::fetch::Fetch;
use crate::layout::parse_rating;
use crate::source::{RoundsSpec, league_round_url};

/// Board rows have exactly this many cells.
const BOARD_CELLS: usize = 9;
const HOME_TEAM_CELL: usize = 1;
const AWAY_TEAM_CELL: usize = 4;

/// Which side of the match the own team played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    fn from_cell_index(index: usize) -> Option<Self> {
        match index {
            HOME_TEAM_CELL => Some(Self::Home),
            AWAY_TEAM_CELL => Some(Self::Away),
            _ => None,
        }
    }
}

/// Maps a league-site title code (`f`, `wi`, `jc`, ...) to a title.
///
/// Junior markers are ignored; blank, bare `w` and unknown codes give
/// `None`.
///
/// # Examples
///
/// ```
/// use crosstable_core::Title;
/// use crosstable_extract::league_title;
///
/// assert_eq!(league_title("g"), Some(Title::GM));
/// assert_eq!(league_title("jwf"), Some(Title::WFM));
/// assert_eq!(league_title("w"), None);
/// ```
pub fn league_title(code: &str) -> Option<Title> {
    match code.replace('j', "").trim() {
        "c" => Some(Title::CM),
        "f" => Some(Title::FM),
        "i" => Some(Title::IM),
        "g" => Some(Title::GM),
        "wc" => Some(Title::WCM),
        "wf" => Some(Title::WFM),
        "wi" => Some(Title::WIM),
        "wg" => Some(Title::WGM),
        _ => None,
    }
}

fn board_result(
    cells: &[String],
    side: Side,
    round: u32,
    config: &ExtractConfig,
) -> Result<(String, RoundResult)> {
    let board_colour = colour_from_token(&cells[1]);
    let (name, opponent, title, rating, colour, token) = match side {
        Side::Home => (
            &cells[2],
            &cells[6],
            &cells[7],
            &cells[8],
            board_colour,
            cells[5].trim().to_string(),
        ),
        Side::Away => (
            &cells[6],
            &cells[2],
            &cells[3],
            &cells[4],
            board_colour.reversed()?,
            reverse_league_token(&cells[5]),
        ),
    };
    let result = RoundResult::new(
        round,
        ResultEncoding::LeagueSite.outcome(&token)?,
        colour,
        opponent.as_str(),
    )
    .with_title(league_title(title))
    .with_rating(parse_rating(rating))
    .with_federation(config.default_opponent_federation.as_str());
    Ok((name.replace(", ", ","), result))
}

/// Extracts the own team's players from one round page.
///
/// # Errors
///
/// - [`ExtractError::MissingAnchor`] when the team name does not appear
///   twice.
/// - [`ExtractError::SideUndetermined`] when the team's match cell is at
///   neither the home nor the away position.
/// - [`ReportError::ReverseUnknownColour`](crosstable_core::ReportError) for
///   an away board without a colour.
pub fn extract_round(html: &str, round: u32, config: &ExtractConfig) -> Result<Vec<Player>> {
    let document = Html::parse_document(html);
    let team = config.team_name.as_str();

    let team_cells = dom::cells_with_text(&document, team);
    let anchor = team_cells
        .get(1)
        .copied()
        .ok_or_else(|| ExtractError::MissingAnchor(format!("match cell for team {team:?}")))?;
    let heading = dom::parent_row(anchor)
        .ok_or_else(|| ExtractError::Layout(format!("team cell for {team:?} outside a row")))?;
    let index = dom::cells(heading).iter().position(|cell| *cell == anchor);
    let side = index.and_then(Side::from_cell_index).ok_or_else(|| {
        ExtractError::SideUndetermined(format!("{team:?} found at cell {index:?}"))
    })?;
    debug!(round, ?side, "Located match");

    let mut players = Vec::new();
    for row in dom::following_rows(heading) {
        let cells = dom::cell_texts(row);
        if cells.len() != BOARD_CELLS {
            break;
        }
        let (name, result) = board_result(&cells, side, round, config)?;
        let mut player = Player::new(name);
        player.record(result);
        players.push(player);
    }
    Ok(players)
}

/// Fetches every round in `rounds` in order and merges the players.
///
/// # Errors
///
/// Fetch failures and the errors of [`extract_round`]; the first failure
/// stops the run.
pub fn extract(
    url: &str,
    rounds: &RoundsSpec,
    config: &ExtractConfig,
    fetcher: &dyn Fetch,
) -> Result<(String, Vec<Player>)> {
    let mut players = Vec::new();
    for token in &rounds.tokens {
        let round = token.number()?;
        let round_url = league_round_url(url, token)?;
        let bytes = fetcher.fetch(&round_url)?;
        let round_players = extract_round(&String::from_utf8_lossy(&bytes), round, config)?;
        info!(round, url = %round_url, players = round_players.len(), "Merged round");
        players = merge_players(players, round_players);
    }
    Ok((rounds.event_name(), players))
}
