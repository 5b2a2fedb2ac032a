//! Column and row-shape resolution.
//!
//! Results tables come in two flavours. Pages with a header row are resolved
//! by label into a [`ColumnMap`]. Pages without a usable header are resolved
//! per row from the cell count. Either way extraction downstream reads one
//! [`ColumnMap`] and never inspects the table shape itself.

use crosstable_core::Title;
use tracing::debug;

use crate::error::{ExtractError, Result};

pub const ROUND_LABEL: &str = "Rd.";
pub const NAME_LABEL: &str = "Name";
pub const RATING_LABELS: [&str; 2] = ["Rtg", "Elo"];
pub const FEDERATION_LABEL: &str = "FED";
pub const RESULT_LABEL: &str = "Res.";
/// The title column has no header text.
pub const TITLE_LABEL: &str = "";

/// Cell index of every field of a pairing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub round: usize,
    pub title: usize,
    pub name: usize,
    pub rating: usize,
    pub federation: usize,
    pub result: usize,
}

impl ColumnMap {
    /// Rows without a performance column.
    pub const NINE_CELL: Self = Self {
        round: 0,
        title: 2,
        name: 3,
        rating: 4,
        federation: 5,
        result: 8,
    };

    /// Rows with a performance column in front of the result.
    pub const TEN_CELL: Self = Self {
        result: 9,
        ..Self::NINE_CELL
    };

    /// Resolves columns from header labels.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingHeader`] naming the first required
    /// label that is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_extract::ColumnMap;
    ///
    /// let labels = ["Rd.", "Bo.", "SNo", "", "Name", "Elo", "FED", "Pts.", "Res."];
    /// let map = ColumnMap::from_labels(&labels).unwrap();
    /// assert_eq!((map.title, map.name, map.rating, map.result), (3, 4, 5, 8));
    /// ```
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let find = |label: &str| {
            labels
                .iter()
                .position(|l| l.as_ref() == label)
                .ok_or_else(|| ExtractError::MissingHeader(label.to_string()))
        };
        let rating = RATING_LABELS
            .iter()
            .find_map(|label| find(label).ok())
            .ok_or_else(|| ExtractError::MissingHeader(RATING_LABELS.join("|")))?;

        let map = Self {
            round: find(ROUND_LABEL)?,
            title: find(TITLE_LABEL)?,
            name: find(NAME_LABEL)?,
            rating,
            federation: find(FEDERATION_LABEL)?,
            result: find(RESULT_LABEL)?,
        };
        debug!(?map, "Resolved columns from header");
        Ok(map)
    }

    fn widest(&self) -> usize {
        [
            self.round,
            self.title,
            self.name,
            self.rating,
            self.federation,
            self.result,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }

    /// Borrows the fields of one row, or `None` if the row is too short.
    pub fn fields<'a, S: AsRef<str>>(&self, cells: &'a [S]) -> Option<PairingFields<'a>> {
        if cells.len() <= self.widest() {
            return None;
        }
        let at = |index: usize| cells[index].as_ref();
        Some(PairingFields {
            round: at(self.round),
            title: at(self.title),
            name: at(self.name),
            rating: at(self.rating),
            federation: at(self.federation),
            result: at(self.result),
        })
    }
}

/// Raw cell text of one pairing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingFields<'a> {
    pub round: &'a str,
    pub title: &'a str,
    pub name: &'a str,
    pub rating: &'a str,
    pub federation: &'a str,
    pub result: &'a str,
}

/// Meaning of one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Single cell naming the player whose pairings follow.
    PlayerHeading,
    /// A pairing row read through the given columns.
    Pairing(ColumnMap),
    /// Anything else (spacers, sub-headers, totals).
    Skip,
}

/// How rows of a table are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Columns resolved once from the header row.
    Header(ColumnMap),
    /// Columns chosen per row from the cell count.
    Positional,
}

impl Layout {
    /// Classifies a row with `cell_count` cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_extract::{ColumnMap, Layout, RowShape};
    ///
    /// assert_eq!(Layout::Positional.classify(1), RowShape::PlayerHeading);
    /// assert_eq!(Layout::Positional.classify(10), RowShape::Pairing(ColumnMap::TEN_CELL));
    /// assert_eq!(Layout::Positional.classify(7), RowShape::Skip);
    /// ```
    pub fn classify(&self, cell_count: usize) -> RowShape {
        match self {
            Self::Header(map) if cell_count > map.widest() => RowShape::Pairing(*map),
            Self::Header(_) => RowShape::Skip,
            Self::Positional => match cell_count {
                1 => RowShape::PlayerHeading,
                9 => RowShape::Pairing(ColumnMap::NINE_CELL),
                10 => RowShape::Pairing(ColumnMap::TEN_CELL),
                _ => RowShape::Skip,
            },
        }
    }
}

/// Recognized title, or `None` for blank and unrecognized titles.
pub fn parse_title(text: &str) -> Option<Title> {
    let text = text.trim();
    let title = Title::parse(text);
    if title.is_none() && !text.is_empty() {
        debug!(title = text, "Dropping unrecognized title");
    }
    title
}

/// Rating cell as a number; `0`, blank and non-numeric cells are unrated.
pub fn parse_rating(text: &str) -> Option<u32> {
    let token = text.split_whitespace().next()?;
    match token.parse::<u32>() {
        Ok(0) => None,
        Ok(rating) => Some(rating),
        Err(_) => {
            debug!(rating = token, "Ignoring non-numeric rating");
            None
        }
    }
}
