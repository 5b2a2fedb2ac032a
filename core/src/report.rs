//! Line-oriented rating report rendering.
//!
//! ```text
//! Event,<name>
//! Start,??/??/20??
//! End,??/??/20??
//! Rounds,<n>
//! Website,<source>
//!
//! Player,<id>,<Surname,Given>
//! <round>,0,-
//! <round>,<1|0|=>,<W|B|->,<opponent>,<rating>,<title>,<federation>
//! Total,<score>
//! ```
//!
//! Rounds are renumbered so the lowest round anyone played is round 1, and
//! every round of the span gets a line for every player.

use std::fmt::Write as _;

use crate::error::Result;
use crate::names::report_name;
use crate::{Player, RoundResult, Tournament, TournamentContext};

const DATE_PLACEHOLDER: &str = "??/??/20??";

/// Renders players into the fixed report format.
///
/// # Errors
///
/// Returns [`ReportError::NoResults`](crate::ReportError::NoResults) when no
/// player has any result.
///
/// # Examples
///
/// ```
/// use crosstable_core::*;
///
/// let mut late = Player::new("Jessel,Stephen");
/// late.record(RoundResult::new(2, Outcome::Win, Colour::White, "Smith,John").with_rating(Some(2010)));
/// let mut early = Player::new("Smith,John");
/// early.record(RoundResult::new(1, Outcome::Loss, Colour::Black, "Dunne,John P."));
///
/// let report = render_report("League", &[late, early], "http://example.org").unwrap();
/// assert!(report.contains("Player,????,Jessel,Stephen\n1,0,-\n2,1,W,Smith,John,2010,,\nTotal,1.0"));
/// ```
pub fn render_report(event: &str, players: &[Player], source: &str) -> Result<String> {
    let context = TournamentContext::from_players(event, source, players)?;
    let mut out = String::new();

    push_line(&mut out, format_args!("Event,{}", context.event));
    push_line(&mut out, format_args!("Start,{DATE_PLACEHOLDER}"));
    push_line(&mut out, format_args!("End,{DATE_PLACEHOLDER}"));
    push_line(&mut out, format_args!("Rounds,{}", context.round_count()));
    push_line(&mut out, format_args!("Website,{}", context.source));

    for player in players {
        out.push('\n');
        push_line(
            &mut out,
            format_args!("Player,{},{}", player.id, report_name(&player.name)),
        );
        for round in context.rounds() {
            let number = context.report_round(round);
            match player.results.get(&round) {
                Some(result) => push_line(&mut out, format_args!("{number},{}", result_fields(result))),
                None => push_line(&mut out, format_args!("{number},0,-")),
            }
        }
        push_line(&mut out, format_args!("Total,{:3.1}", player.score));
    }

    Ok(out)
}

/// Renders an extracted event as pretty JSON.
pub fn render_json(tournament: &Tournament) -> Result<String> {
    Ok(serde_json::to_string_pretty(tournament)?)
}

fn result_fields(result: &RoundResult) -> String {
    let rating = result
        .opponent_rating
        .filter(|rating| *rating != 0)
        .map(|rating| rating.to_string())
        .unwrap_or_default();
    let title = result.opponent_title.map(|t| t.as_str()).unwrap_or_default();
    format!(
        "{},{},{},{},{},{}",
        result.outcome.code(),
        result.colour.code(),
        report_name(&result.opponent),
        rating,
        title,
        result.opponent_federation
    )
}

fn push_line(out: &mut String, line: std::fmt::Arguments<'_>) {
    // Writing to a String cannot fail.
    let _ = out.write_fmt(line);
    out.push('\n');
}
