//! Source classification and league round addressing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{ExtractError, Result};

const RESULTS_SITE: &str = "chess-results.com";
const SPREADSHEET_MARKER: &str = "excel=";
const LEAGUE_SITE: &str = "4nclresults.co.uk";
/// Path segment after which the league site puts the round number.
const LEAGUE_ROUND_ANCHOR: &str = "4ncl";

/// Which extractor family handles a source reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Results-site page (individual or team view).
    ResultsPage,
    /// Results-site spreadsheet export.
    ResultsSpreadsheet,
    /// League site, one page per round.
    LeagueSite,
    /// Saved page on disk, parsed like [`SourceKind::ResultsPage`].
    LocalPage,
}

impl SourceKind {
    /// Classifies a URL or file path by substring.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_extract::SourceKind;
    ///
    /// assert_eq!(
    ///     SourceKind::classify("http://chess-results.com/tnr385901.aspx?art=25&excel=2010"),
    ///     SourceKind::ResultsSpreadsheet
    /// );
    /// assert_eq!(
    ///     SourceKind::classify("http://www.4nclresults.co.uk/2018-19/4ncl/1/2b/export/"),
    ///     SourceKind::LeagueSite
    /// );
    /// assert_eq!(SourceKind::classify("saved/player.html"), SourceKind::LocalPage);
    /// ```
    pub fn classify(reference: &str) -> Self {
        if reference.contains(RESULTS_SITE) && reference.contains(SPREADSHEET_MARKER) {
            Self::ResultsSpreadsheet
        } else if reference.contains(RESULTS_SITE) {
            Self::ResultsPage
        } else if reference.contains(LEAGUE_SITE) {
            Self::LeagueSite
        } else {
            Self::LocalPage
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ResultsPage => "results_page",
            Self::ResultsSpreadsheet => "results_spreadsheet",
            Self::LeagueSite => "league_site",
            Self::LocalPage => "local_page",
        }
    }
}

/// One round to fetch from a league site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundToken {
    /// Round as it appears in the URL.
    pub round: String,
    /// Division segment replacing the URL's own, when given.
    pub division: Option<String>,
}

impl RoundToken {
    pub fn number(&self) -> Result<u32> {
        self.round
            .parse()
            .map_err(|_| ExtractError::InvalidRounds(self.round.clone()))
    }
}

/// Parsed rounds specifier for league sources.
///
/// Short form: every character is a round (`"12"` → rounds 1 and 2).
/// Composite form, chosen when any comma-separated token is longer than
/// three characters: each token is a round followed by a division, with an
/// optional `:`, `/` or `-` between them (`"1:2b,2:2b"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundsSpec {
    pub tokens: Vec<RoundToken>,
}

impl RoundsSpec {
    /// Parses a rounds specifier.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingRounds`] for an empty specifier and
    /// [`ExtractError::InvalidRounds`] when a round is not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstable_extract::RoundsSpec;
    ///
    /// let short = RoundsSpec::parse("12").unwrap();
    /// assert_eq!(short.round_numbers().unwrap(), [1, 2]);
    ///
    /// let composite = RoundsSpec::parse("3:1a,4:1b").unwrap();
    /// assert_eq!(composite.tokens[1].division.as_deref(), Some("1b"));
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        // SAFETY: compile-time constant regex.
        static COMPOSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\d+)[:/-]?(.+)$").expect("static regex must compile")
        });

        let spec = spec.trim();
        if spec.is_empty() {
            return Err(ExtractError::MissingRounds);
        }

        let parts: Vec<&str> = spec.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
        let composite = parts.iter().any(|part| part.chars().count() > 3);

        let tokens = if composite {
            parts
                .iter()
                .map(|part| {
                    let caps = COMPOSITE_RE
                        .captures(part)
                        .ok_or_else(|| ExtractError::InvalidRounds(part.to_string()))?;
                    Ok(RoundToken {
                        round: caps[1].to_string(),
                        division: Some(caps[2].to_string()),
                    })
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            spec.chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .map(|c| RoundToken {
                    round: c.to_string(),
                    division: None,
                })
                .collect()
        };

        if tokens.is_empty() {
            return Err(ExtractError::MissingRounds);
        }
        for token in &tokens {
            token.number()?;
        }
        Ok(Self { tokens })
    }

    pub fn round_numbers(&self) -> Result<Vec<u32>> {
        self.tokens.iter().map(RoundToken::number).collect()
    }

    /// Event name used for league reports, e.g. `4NCL Rounds 1-2`.
    pub fn event_name(&self) -> String {
        let first = self.tokens.first().map(|t| t.round.as_str()).unwrap_or_default();
        let last = self.tokens.last().map(|t| t.round.as_str()).unwrap_or_default();
        format!("4NCL Rounds {first}-{last}")
    }
}

/// Rewrites a league URL to point at one round (and division).
///
/// # Errors
///
/// Returns [`ExtractError::InvalidRounds`] when the URL has no round segment
/// to replace.
///
/// # Examples
///
/// ```
/// use crosstable_extract::{RoundsSpec, league_round_url};
///
/// let spec = RoundsSpec::parse("2").unwrap();
/// let url = league_round_url("http://www.4nclresults.co.uk/2018-19/4ncl/1/2b/export/", &spec.tokens[0]).unwrap();
/// assert_eq!(url, "http://www.4nclresults.co.uk/2018-19/4ncl/2/2b/export/");
/// ```
pub fn league_round_url(url: &str, token: &RoundToken) -> Result<String> {
    let mut parts: Vec<&str> = url.split('/').collect();
    let anchor = parts
        .iter()
        .position(|part| *part == LEAGUE_ROUND_ANCHOR)
        .ok_or_else(|| {
            ExtractError::InvalidRounds(format!("no '{LEAGUE_ROUND_ANCHOR}' segment in {url}"))
        })?;
    let round_index = anchor + 1;
    if round_index >= parts.len() {
        return Err(ExtractError::InvalidRounds(format!("no round segment in {url}")));
    }
    parts[round_index] = token.round.as_str();
    if let Some(division) = &token.division {
        let division_index = round_index + 1;
        if division_index >= parts.len() {
            return Err(ExtractError::InvalidRounds(format!("no division segment in {url}")));
        }
        parts[division_index] = division.as_str();
    }
    Ok(parts.join("/"))
}
