//! Canonical `Surname,Given` name handling.

use crate::Title;

/// Two-word prefixes that start a three-word surname.
const COMPOUND_PREFIXES: &[&str] = &["van der", "van den", "mac an"];

/// Single-word particles that start a two-word surname.
const SURNAME_PARTICLES: &[&str] = &[
    "mc", "mac", "al", "de", "ui", "ni", "o", "ul", "vam", "van", "der", "den",
];

/// Two-word surnames without a particle.
const TWO_WORD_SURNAMES: &[&str] = &["Plaza Reino"];

/// Converts a space-separated full name into `Surname,Given Names`.
///
/// The surname is the first token unless a known prefix or a known two-word
/// surname says otherwise. A single token yields `Token,`.
///
/// # Examples
///
/// ```
/// use crosstable_core::commaize;
///
/// assert_eq!(commaize("Dwyer Daniel"), "Dwyer,Daniel");
/// assert_eq!(commaize("van der Berg Jan"), "van der Berg,Jan");
/// assert_eq!(commaize("Mac Cormaic Seamus"), "Mac Cormaic,Seamus");
/// assert_eq!(commaize("Plaza Reino Mercedes"), "Plaza Reino,Mercedes");
/// assert_eq!(commaize("Carlsen"), "Carlsen,");
/// ```
pub fn commaize(full_name: &str) -> String {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    let surnames = surname_token_count(&tokens);
    format!(
        "{},{}",
        tokens[..surnames].join(" "),
        tokens[surnames..].join(" ")
    )
}

fn surname_token_count(tokens: &[&str]) -> usize {
    if tokens.is_empty() {
        return 0;
    }
    let leading_pair = || tokens[..2].join(" ");
    if tokens.len() > 3 && COMPOUND_PREFIXES.contains(&leading_pair().to_lowercase().as_str()) {
        return 3;
    }
    if tokens.len() > 2 && SURNAME_PARTICLES.contains(&tokens[0].to_lowercase().as_str()) {
        return 2;
    }
    if tokens.len() > 2 && TWO_WORD_SURNAMES.contains(&leading_pair().as_str()) {
        return 2;
    }
    1
}

/// Keeps the first comma of `name` and turns every later one into a space.
///
/// # Examples
///
/// ```
/// use crosstable_core::collapse_commas;
///
/// assert_eq!(collapse_commas("Thoele, Wolfgang, Dr."), "Thoele, Wolfgang Dr.");
/// assert_eq!(collapse_commas("Heitz, Timo"), "Heitz, Timo");
/// ```
pub fn collapse_commas(name: &str) -> String {
    match name.split_once(',') {
        Some((surname, rest)) => {
            format!("{surname},{}", rest.replace(", ", " ").replace(',', " "))
        }
        None => name.to_string(),
    }
}

/// Name as written on report lines: a single comma with no space after it.
pub fn report_name(name: &str) -> String {
    collapse_commas(name).replacen(", ", ",", 1)
}

/// How a title token inside a player heading is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTitlePolicy {
    /// A title ends the name (titles follow the name).
    Stop,
    /// A title is dropped and scanning continues (titles precede the name).
    Skip,
}

/// Extracts the name from a player heading such as `Kenny William 1850 IRL`.
///
/// Tokens are taken left to right until the first numeric token; title
/// tokens either end the name or are skipped per `policy`.
///
/// # Examples
///
/// ```
/// use crosstable_core::{name_from_heading, NameTitlePolicy};
///
/// assert_eq!(name_from_heading("Kenny William 1850 IRL", NameTitlePolicy::Stop), "Kenny William");
/// assert_eq!(name_from_heading("FM Quinn Mark 2301", NameTitlePolicy::Skip), "Quinn Mark");
/// ```
pub fn name_from_heading(heading: &str, policy: NameTitlePolicy) -> String {
    let mut tokens = Vec::new();
    for token in heading.split_whitespace() {
        if is_numeric_token(token) {
            break;
        }
        if Title::parse(token).is_some() {
            match policy {
                NameTitlePolicy::Stop => break,
                NameTitlePolicy::Skip => continue,
            }
        }
        tokens.push(token);
    }
    tokens.join(" ")
}

fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}
