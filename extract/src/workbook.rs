//! Spreadsheet access.
//!
//! The spreadsheet extractor only needs named sheets and single-cell lookup,
//! so it reads through the [`Workbook`] trait. [`XlsxWorkbook`] adapts
//! calamine; [`GridWorkbook`] is an in-memory grid for building sheets by
//! hand.

use std::collections::BTreeMap;
use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, XlsxError, open_workbook_from_rs};
use tracing::debug;

use crate::error::{ExtractError, Result};

/// Value of one spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    /// Numeric cell with a whole value becomes [`Cell::Int`].
    pub fn number(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            Self::Int(value as i64)
        } else {
            Self::Float(value)
        }
    }

    /// Blank text counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Int(_) | Self::Float(_) => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Cell rendered as trimmed text; empty cells give `""`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.trim().to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Self::Empty,
            Data::String(text) => Self::Text(text.clone()),
            Data::Int(value) => Self::Int(*value),
            Data::Float(value) => Self::number(*value),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Zero-based `(row, column)` of an `A1`-style address.
///
/// # Examples
///
/// ```
/// use crosstable_extract::parse_address;
///
/// assert_eq!(parse_address("A2"), Some((1, 0)));
/// assert_eq!(parse_address("AB10"), Some((9, 27)));
/// assert_eq!(parse_address("7"), None);
/// ```
pub fn parse_address(address: &str) -> Option<(u32, u32)> {
    let split = address.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = address.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let column = letters
        .chars()
        .try_fold(0u32, |acc, c| {
            let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })?
        .checked_sub(1)?;
    let row = digits.parse::<u32>().ok()?.checked_sub(1)?;
    Some((row, column))
}

/// Read access to a workbook's named sheets.
pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;

    /// Cell at zero-based `row` and `column`; missing sheets and cells are
    /// [`Cell::Empty`].
    fn value(&self, sheet: &str, row: u32, column: u32) -> Cell;

    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheet_names().iter().any(|name| name == sheet)
    }

    /// Cell at an `A1`-style address.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Spreadsheet`] for a malformed address.
    fn cell(&self, sheet: &str, address: &str) -> Result<Cell> {
        let (row, column) = parse_address(address)
            .ok_or_else(|| ExtractError::Spreadsheet(format!("bad cell address {address:?}")))?;
        Ok(self.value(sheet, row, column))
    }
}

/// Calamine-backed `.xlsx` workbook with every sheet loaded up front.
pub struct XlsxWorkbook {
    sheets: Vec<(String, Range<Data>)>,
}

impl XlsxWorkbook {
    /// Opens an `.xlsx` file held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Spreadsheet`] if the bytes are not a readable
    /// workbook or a sheet cannot be loaded.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e: XlsxError| ExtractError::Spreadsheet(e.to_string()))?;
        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e: XlsxError| ExtractError::Spreadsheet(format!("{name}: {e}")))?;
            debug!(sheet = %name, rows = range.height(), "Loaded sheet");
            sheets.push((name, range));
        }
        Ok(Self { sheets })
    }
}

impl Workbook for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn value(&self, sheet: &str, row: u32, column: u32) -> Cell {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .and_then(|(_, range)| range.get_value((row, column)))
            .map(Cell::from)
            .unwrap_or_default()
    }
}

/// In-memory workbook.
///
/// # Examples
///
/// ```
/// use crosstable_extract::{Cell, GridWorkbook, Workbook};
///
/// let mut book = GridWorkbook::new();
/// book.set("Sheet1", "A2", Cell::Text("Club Cup".into()));
/// assert_eq!(book.cell("Sheet1", "A2").unwrap().to_text(), "Club Cup");
/// assert!(book.cell("Sheet1", "B7").unwrap().is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct GridWorkbook {
    sheets: Vec<(String, BTreeMap<(u32, u32), Cell>)>,
}

impl GridWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    fn sheet_mut(&mut self, sheet: &str) -> &mut BTreeMap<(u32, u32), Cell> {
        let index = match self.sheets.iter().position(|(name, _)| name == sheet) {
            Some(index) => index,
            None => {
                self.sheets.push((sheet.to_string(), BTreeMap::new()));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[index].1
    }

    /// Sets one cell, creating the sheet if needed. Malformed addresses are
    /// ignored.
    pub fn set(&mut self, sheet: &str, address: &str, cell: Cell) -> &mut Self {
        if let Some(position) = parse_address(address) {
            self.sheet_mut(sheet).insert(position, cell);
        }
        self
    }

    /// Writes `cells` left to right starting at column A of the one-based
    /// `row`. Empty strings leave the cell empty; whole numbers become
    /// integers.
    pub fn set_row(&mut self, sheet: &str, row: u32, cells: &[&str]) -> &mut Self {
        let grid = self.sheet_mut(sheet);
        for (column, text) in cells.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let cell = match text.parse::<i64>() {
                Ok(value) => Cell::Int(value),
                Err(_) => Cell::Text((*text).to_string()),
            };
            grid.insert((row.saturating_sub(1), column as u32), cell);
        }
        self
    }
}

impl Workbook for GridWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn value(&self, sheet: &str, row: u32, column: u32) -> Cell {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .and_then(|(_, grid)| grid.get(&(row, column)))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_floats_become_ints() {
        assert_eq!(Cell::from(&Data::Float(3.0)), Cell::Int(3));
        assert_eq!(Cell::from(&Data::Float(2.5)), Cell::Float(2.5));
        assert_eq!(Cell::from(&Data::String("w 1".into())), Cell::Text("w 1".into()));
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(Cell::Text("  ".into()).is_empty());
        assert!(!Cell::Int(0).is_empty());
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        assert_eq!(parse_address("A0"), None);
        assert_eq!(parse_address(""), None);
        assert_eq!(parse_address("1A"), None);
        assert_eq!(parse_address("Z1"), Some((0, 25)));
    }

    #[test]
    fn test_grid_rows_and_sheets() {
        let mut book = GridWorkbook::new();
        book.set_row("PlayerInfo", 3, &["1", "", "FM", "Quinn, Mark"]);
        book.set("Sheet1", "A2", Cell::Text("Event".into()));
        assert_eq!(book.sheet_names(), ["PlayerInfo", "Sheet1"]);
        assert!(book.has_sheet("Sheet1"));
        assert_eq!(book.cell("PlayerInfo", "A3").unwrap(), Cell::Int(1));
        assert!(book.cell("PlayerInfo", "B3").unwrap().is_empty());
        assert_eq!(book.cell("PlayerInfo", "D3").unwrap().to_text(), "Quinn, Mark");
        assert!(book.cell("Missing", "A1").unwrap().is_empty());
        assert!(book.cell("PlayerInfo", "??").is_err());
    }

    #[test]
    fn test_xlsx_rejects_non_workbook_bytes() {
        let err = XlsxWorkbook::from_bytes(b"<html></html>".to_vec()).err().unwrap();
        assert!(matches!(err, ExtractError::Spreadsheet(_)));
    }
}
