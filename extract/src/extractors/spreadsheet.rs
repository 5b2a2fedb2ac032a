//! Results-site spreadsheet export.
//!
//! Exports come in two schemas, told apart by sheet name. Player names in
//! the result sheets carry no comma; when the export has a `PlayerPairings`
//! sheet, the commas are recovered from there, otherwise names are
//! commaized.

use std::collections::HashMap;

use crosstable_core::{
    NameTitlePolicy, Player, ResultEncoding, RoundResult, commaize, is_walkover, name_from_heading,
};
use tracing::{debug, info, warn};

use crate::error::{ExtractError, Result};
use crate::layout::{parse_rating, parse_title};
use crate::workbook::{Cell, Workbook};

const PAIRINGS_SHEET: &str = "PlayerPairings";
const PAIRINGS_FIRST_ROW: u32 = 4;
const EVENT_SHEETS: [&str; 2] = ["TeamComposition", "Sheet1"];
const COLOUR_SUFFIXES: [&str; 2] = ["(w)", "(b)"];

/// Layout of the sheet holding per-player results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSchema {
    PlayerInfo,
    PlayerDetails,
}

impl SheetSchema {
    /// Schema of `book`, preferring `PlayerInfo`.
    pub fn detect(book: &dyn Workbook) -> Option<Self> {
        [Self::PlayerInfo, Self::PlayerDetails]
            .into_iter()
            .find(|schema| book.has_sheet(schema.sheet()))
    }

    pub fn sheet(self) -> &'static str {
        match self {
            Self::PlayerInfo => "PlayerInfo",
            Self::PlayerDetails => "PlayerDetails",
        }
    }

    fn first_row(self) -> u32 {
        match self {
            Self::PlayerInfo => 2,
            Self::PlayerDetails => 3,
        }
    }

    fn result_column(self) -> &'static str {
        match self {
            Self::PlayerInfo => "I",
            Self::PlayerDetails => "H",
        }
    }

    fn title_policy(self) -> NameTitlePolicy {
        match self {
            Self::PlayerInfo => NameTitlePolicy::Stop,
            Self::PlayerDetails => NameTitlePolicy::Skip,
        }
    }

    /// `PlayerDetails` scores walkovers; `PlayerInfo` drops them.
    fn keeps_walkovers(self) -> bool {
        matches!(self, Self::PlayerDetails)
    }
}

fn rating_of(cell: &Cell) -> Option<u32> {
    match cell {
        Cell::Int(value) => u32::try_from(*value).ok().filter(|rating| *rating != 0),
        other => parse_rating(&other.to_text()),
    }
}

/// Reads the players of one schema, names as written in the sheet.
///
/// # Errors
///
/// [`ExtractError::Layout`] for a round row before any player heading, and
/// result decoding errors.
pub fn read_players(book: &dyn Workbook, schema: SheetSchema) -> Result<Vec<Player>> {
    let sheet = schema.sheet();
    let encoding = ResultEncoding::ResultsSite;
    let mut players: Vec<Player> = Vec::new();
    let mut row = schema.first_row();

    loop {
        let lead = book.cell(sheet, &format!("A{row}"))?;
        if lead.is_empty() {
            break;
        }
        match lead {
            Cell::Text(text) if !text.contains("Rd.") => {
                let name = name_from_heading(&text, schema.title_policy());
                debug!(player = %name, row, "Player block");
                players.push(Player::new(name));
            }
            Cell::Int(round) => {
                let at = |column: &str| book.cell(sheet, &format!("{column}{row}"));
                let token = at(schema.result_column())?.to_text();
                if is_walkover(&token) && !schema.keeps_walkovers() {
                    debug!(round, row, "Dropping unplayed game");
                } else {
                    let round = u32::try_from(round)
                        .map_err(|_| ExtractError::Layout(format!("round {round} in row {row}")))?;
                    let result = RoundResult::new(
                        round,
                        encoding.outcome(&token)?,
                        encoding.colour(&token),
                        at("D")?.to_text(),
                    )
                    .with_title(parse_title(&at("C")?.to_text()))
                    .with_rating(rating_of(&at("E")?))
                    .with_federation(at("F")?.to_text());
                    let player = players.last_mut().ok_or_else(|| {
                        ExtractError::Layout(format!("round row {row} before any player heading"))
                    })?;
                    player.record(result);
                }
            }
            _ => {}
        }
        row += 1;
    }
    Ok(players)
}

fn strip_colour_suffix(name: &str) -> &str {
    COLOUR_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(*suffix))
        .unwrap_or(name)
        .trim_end()
}

/// Map from comma-less name to comma name, built from `PlayerPairings`.
///
/// Returns `Ok(None)` when the export has no pairings sheet.
pub fn comma_map(book: &dyn Workbook) -> Result<Option<HashMap<String, String>>> {
    if !book.has_sheet(PAIRINGS_SHEET) {
        return Ok(None);
    }
    // Rating columns push the second name one column right.
    let second = if book.cell(PAIRINGS_SHEET, "D4")?.as_int().is_some() {
        "G"
    } else {
        "F"
    };

    let mut commas = HashMap::new();
    let mut row = PAIRINGS_FIRST_ROW;
    while !book.cell(PAIRINGS_SHEET, &format!("A{row}"))?.is_empty() {
        for column in ["C", second] {
            let text = book.cell(PAIRINGS_SHEET, &format!("{column}{row}"))?.to_text();
            if text.contains(',') {
                let name = strip_colour_suffix(&text);
                commas.insert(name.replace(',', ""), name.to_string());
            }
        }
        row += 1;
    }
    debug!(names = commas.len(), "Read comma map");
    Ok(Some(commas))
}

fn restore_commas(name: &str, commas: Option<&HashMap<String, String>>) -> String {
    let Some(commas) = commas else {
        return commaize(name);
    };
    match commas.get(&name.replace(',', "")) {
        Some(comma_name) => comma_name.clone(),
        None => {
            warn!(name, "No comma form in pairings sheet, guessing surname");
            commaize(name)
        }
    }
}

/// Rewrites player and opponent names into comma form.
pub fn apply_commas(players: &mut [Player], commas: Option<&HashMap<String, String>>) {
    for player in players {
        player.name = restore_commas(&player.name, commas);
        for result in player.results.values_mut() {
            result.opponent = restore_commas(&result.opponent, commas);
        }
    }
}

/// Event name from `TeamComposition!A2`, else `Sheet1!A2`, else empty.
pub fn event_name(book: &dyn Workbook) -> Result<String> {
    for sheet in EVENT_SHEETS {
        if book.has_sheet(sheet) {
            return Ok(book.cell(sheet, "A2")?.to_text());
        }
    }
    Ok(String::new())
}

/// Extracts the event name and players from a spreadsheet export.
///
/// # Errors
///
/// [`ExtractError::MissingAnchor`] when neither result sheet is present,
/// plus the errors of [`read_players`].
pub fn extract(book: &dyn Workbook) -> Result<(String, Vec<Player>)> {
    let schema = SheetSchema::detect(book)
        .ok_or_else(|| ExtractError::MissingAnchor("PlayerInfo or PlayerDetails sheet".into()))?;
    info!(sheet = schema.sheet(), "Parsing spreadsheet export");

    let mut players = read_players(book, schema)?;
    let commas = comma_map(book)?;
    apply_commas(&mut players, commas.as_ref());
    Ok((event_name(book)?, players))
}
