//! Rating-list statistics.
//!
//! Reads the combined standard/rapid/blitz rating list published as XML
//! (`<playerslist>` of `<player>` records) and counts one federation's
//! players. The list is large, so it is streamed rather than parsed into a
//! tree.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, info};

use crate::error::{ExtractError, Result};

/// Flag letter marking an inactive player.
const INACTIVE_FLAG: char = 'i';
const HISTOGRAM_FLOOR: u32 = 700;
const HISTOGRAM_CEILING: u32 = 2700;
const HISTOGRAM_STEP: u32 = 100;

/// The fields of one rating-list record used for statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatedPlayer {
    pub country: String,
    pub flag: String,
    pub rating: Option<u32>,
    pub rapid_rating: Option<u32>,
    pub blitz_rating: Option<u32>,
}

impl RatedPlayer {
    pub fn is_active(&self) -> bool {
        !self.flag.contains(INACTIVE_FLAG)
    }

    pub fn has_standard(&self) -> bool {
        self.rating.is_some()
    }

    pub fn has_any(&self) -> bool {
        self.rating.is_some() || self.rapid_rating.is_some() || self.blitz_rating.is_some()
    }

    fn set(&mut self, field: &[u8], text: &str) {
        let text = text.trim();
        match field {
            b"country" => self.country = text.to_string(),
            b"flag" => self.flag = text.to_string(),
            b"rating" => self.rating = text.parse().ok(),
            b"rapid_rating" => self.rapid_rating = text.parse().ok(),
            b"blitz_rating" => self.blitz_rating = text.parse().ok(),
            _ => {}
        }
    }
}

/// A parsed rating list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingList {
    pub players: Vec<RatedPlayer>,
}

impl RatingList {
    /// Streams a rating list from XML.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Xml`] for malformed XML.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_extract::RatingList;
    ///
    /// let xml = "<playerslist><player><country>IRL</country><rating>1850</rating>\
    ///            <rapid_rating></rapid_rating><flag>i</flag></player></playerslist>";
    /// let list = RatingList::from_reader(xml.as_bytes()).unwrap();
    /// assert_eq!(list.players[0].rating, Some(1850));
    /// assert!(!list.players[0].is_active());
    /// ```
    pub fn from_reader<R: BufRead>(source: R) -> Result<Self> {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        let mut players = Vec::new();
        let mut current: Option<RatedPlayer> = None;
        let mut field: Option<Vec<u8>> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"player" => {
                    current = Some(RatedPlayer::default());
                }
                Ok(Event::Start(ref e)) if current.is_some() => {
                    field = Some(e.name().as_ref().to_vec());
                }
                Ok(Event::Text(ref e)) => {
                    if let (Some(player), Some(name)) = (current.as_mut(), field.as_deref()) {
                        player.set(name, &String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Ok(Event::End(ref e)) if e.name().as_ref() == b"player" => {
                    if let Some(player) = current.take() {
                        players.push(player);
                    }
                    field = None;
                }
                Ok(Event::End(_)) => field = None,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ExtractError::Xml(format!(
                        "at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
            }
            buf.clear();
        }

        debug!(players = players.len(), "Read rating list");
        Ok(Self { players })
    }

    /// Opens and streams a rating-list file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Reading rating list");
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

/// Counts for one federation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FederationStats {
    pub federation: String,
    pub total_players: usize,
    pub federation_players: usize,
    pub active: usize,
    pub standard: usize,
    pub active_standard: usize,
    pub active_blitz: usize,
    pub active_rapid: usize,
    pub active_any: usize,
    /// Active with a rapid or blitz rating but no standard rating.
    pub active_fast_only: usize,
    /// `(bucket floor, count)` of active standard ratings, 100-point
    /// buckets from 700 up to 2600.
    pub histogram: Vec<(u32, usize)>,
}

impl FederationStats {
    pub fn compute(list: &RatingList, federation: &str) -> Self {
        let members: Vec<&RatedPlayer> =
            list.players.iter().filter(|p| p.country == federation).collect();
        let active: Vec<&RatedPlayer> = members.iter().copied().filter(|p| p.is_active()).collect();
        let count = |test: fn(&RatedPlayer) -> bool| active.iter().filter(|p| test(p)).count();

        let mut histogram: Vec<(u32, usize)> = (HISTOGRAM_FLOOR..HISTOGRAM_CEILING)
            .step_by(HISTOGRAM_STEP as usize)
            .map(|floor| (floor, 0))
            .collect();
        for rating in active.iter().filter_map(|p| p.rating) {
            let floor = rating / HISTOGRAM_STEP * HISTOGRAM_STEP;
            if let Some(bucket) = histogram.iter_mut().find(|(f, _)| *f == floor) {
                bucket.1 += 1;
            }
        }

        Self {
            federation: federation.to_string(),
            total_players: list.players.len(),
            federation_players: members.len(),
            active: active.len(),
            standard: members.iter().filter(|p| p.has_standard()).count(),
            active_standard: count(RatedPlayer::has_standard),
            active_blitz: count(|p| p.blitz_rating.is_some()),
            active_rapid: count(|p| p.rapid_rating.is_some()),
            active_any: count(RatedPlayer::has_any),
            active_fast_only: count(|p| p.has_any() && !p.has_standard()),
            histogram,
        }
    }
}

impl fmt::Display for FederationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fed = &self.federation;
        writeln!(f, "Total players: {}", self.total_players)?;
        writeln!(f, "Total {fed} players: {}", self.federation_players)?;
        writeln!(f, "Total active {fed} players: {}", self.active)?;
        writeln!(f, "Total {fed} players with standard rating: {}", self.standard)?;
        writeln!(f, "Total active {fed} players with standard rating: {}", self.active_standard)?;
        writeln!(f, "Total active {fed} players with blitz rating: {}", self.active_blitz)?;
        writeln!(f, "Total active {fed} players with rapid rating: {}", self.active_rapid)?;
        writeln!(f, "Total active {fed} players with any rating: {}", self.active_any)?;
        writeln!(
            f,
            "Total active {fed} players with blitz or rapid but not standard: {}",
            self.active_fast_only
        )?;
        for (floor, count) in &self.histogram {
            writeln!(f, "{floor:4}\t{count:4}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <playerslist>
          <player><fideid>1</fideid><name>Quinn, Mark</name><country>IRL</country>
            <rating>2150</rating><rapid_rating>2100</rapid_rating><blitz_rating/><flag></flag></player>
          <player><fideid>2</fideid><country>IRL</country>
            <rating></rating><rapid_rating>1500</rapid_rating><blitz_rating>1490</blitz_rating><flag>w</flag></player>
          <player><fideid>3</fideid><country>IRL</country>
            <rating>1720</rating><rapid_rating/><blitz_rating/><flag>wi</flag></player>
          <player><fideid>4</fideid><country>ENG</country>
            <rating>2155</rating><flag/></player>
          <player><fideid>5</fideid><country>IRL</country>
            <rating>650</rating><flag/></player>
        </playerslist>"#;

    #[test]
    fn test_reads_every_player() {
        let list = RatingList::from_reader(LIST.as_bytes()).unwrap();
        assert_eq!(list.players.len(), 5);
        assert_eq!(list.players[0].country, "IRL");
        assert_eq!(list.players[0].blitz_rating, None);
        assert_eq!(list.players[1].rating, None);
        assert_eq!(list.players[2].flag, "wi");
    }

    #[test]
    fn test_federation_counts() {
        let list = RatingList::from_reader(LIST.as_bytes()).unwrap();
        let stats = FederationStats::compute(&list, "IRL");
        assert_eq!(stats.total_players, 5);
        assert_eq!(stats.federation_players, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.standard, 3);
        assert_eq!(stats.active_standard, 2);
        assert_eq!(stats.active_blitz, 1);
        assert_eq!(stats.active_rapid, 2);
        assert_eq!(stats.active_any, 3);
        assert_eq!(stats.active_fast_only, 1);
    }

    #[test]
    fn test_histogram_buckets() {
        let list = RatingList::from_reader(LIST.as_bytes()).unwrap();
        let stats = FederationStats::compute(&list, "IRL");
        assert_eq!(stats.histogram.len(), 20);
        assert_eq!(stats.histogram.first(), Some(&(700, 0)));
        assert_eq!(stats.histogram.last(), Some(&(2600, 0)));
        assert!(stats.histogram.contains(&(2100, 1)));
        assert_eq!(stats.histogram.iter().map(|(_, n)| n).sum::<usize>(), 1);
    }

    #[test]
    fn test_display_lists_histogram() {
        let list = RatingList::from_reader(LIST.as_bytes()).unwrap();
        let text = FederationStats::compute(&list, "IRL").to_string();
        assert!(text.contains("Total active IRL players: 3\n"));
        assert!(text.contains("2100\t   1\n"));
    }

    #[test]
    fn test_malformed_xml() {
        let err = RatingList::from_reader("<playerslist><player></country>".as_bytes()).unwrap_err();
        assert!(matches!(err, ExtractError::Xml(_)));
    }
}
