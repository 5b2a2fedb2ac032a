//! Navigation helpers over parsed HTML documents.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

// SAFETY: These selectors are compile-time constants and are validated by tests.
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector must parse"));

/// Collapses whitespace runs (including non-breaking spaces) and trims.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, whitespace-normalized.
pub fn text_of(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<String>())
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn is_row(element: &ElementRef<'_>) -> bool {
    element.value().name() == "tr"
}

/// Direct `td`/`th` children of a row.
pub fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

pub fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    cells(row).into_iter().map(text_of).collect()
}

/// `start` followed by its sibling rows, in document order.
pub fn rows_from(start: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    std::iter::once(start).chain(following_rows(start))
}

/// Sibling rows after `row`.
pub fn following_rows(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.next_siblings().filter_map(ElementRef::wrap).filter(is_row)
}

/// Row containing `cell`, if its parent is a `tr`.
pub fn parent_row(cell: ElementRef<'_>) -> Option<ElementRef<'_>> {
    cell.parent().and_then(ElementRef::wrap).filter(is_row)
}

/// First `tr` with `row_class` appearing after a text node accepted by
/// `is_anchor`.
pub fn row_after_text<'a>(
    document: &'a Html,
    is_anchor: impl Fn(&str) -> bool,
    row_class: &str,
) -> Option<ElementRef<'a>> {
    let mut nodes = document.tree.root().descendants();
    nodes.find(|node| node.value().as_text().is_some_and(|text| is_anchor(text.trim())))?;
    nodes
        .filter_map(ElementRef::wrap)
        .find(|element| is_row(element) && has_class(*element, row_class))
}

/// Text of every `td` in the document whose text equals `text`.
pub fn cells_with_text<'a>(document: &'a Html, text: &str) -> Vec<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "td" && text_of(*element) == text)
        .collect()
}

/// Page title, if present.
pub fn page_title(document: &Html) -> Option<String> {
    document.select(&TITLE).next().map(text_of)
}

/// Event name from a results-site title of the form `Site - Event - ...`.
pub fn event_from_title(title: &str) -> String {
    match title.split(" - ").nth(1) {
        Some(event) => event.trim().to_string(),
        None => title.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
        <html><head><title>Chess-Results Server - Club Cup 2019 - Player info</title></head>
        <body>
          <h2>Player info</h2>
          <table>
            <tr class="CRg1"><td>skip</td></tr>
            <tr class="CRg1b"><td>Rd.</td><td>&nbsp;</td><td>Name</td></tr>
            <tr class="CRg2"><td>1</td><td>FM</td><td>Quinn  Mark</td></tr>
          </table>
        </body></html>"#;

    #[test]
    fn test_static_selectors_parse() {
        LazyLock::force(&TITLE);
    }

    #[test]
    fn test_row_after_text_finds_header_row() {
        let document = Html::parse_document(TABLE);
        let row = row_after_text(&document, |t| t == "Player info", "CRg1b").unwrap();
        assert_eq!(cell_texts(row), ["Rd.", "", "Name"]);
    }

    #[test]
    fn test_rows_from_includes_start_and_siblings() {
        let document = Html::parse_document(TABLE);
        let row = row_after_text(&document, |t| t == "Player info", "CRg1b").unwrap();
        let texts: Vec<Vec<String>> = rows_from(row).map(cell_texts).collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[1], ["1", "FM", "Quinn Mark"]);
    }

    #[test]
    fn test_cells_with_text_and_parent_row() {
        let document = Html::parse_document(TABLE);
        let found = cells_with_text(&document, "FM");
        assert_eq!(found.len(), 1);
        let row = parent_row(found[0]).unwrap();
        assert!(has_class(row, "CRg2"));
    }

    #[test]
    fn test_event_from_title() {
        let document = Html::parse_document(TABLE);
        let title = page_title(&document).unwrap();
        assert_eq!(event_from_title(&title), "Club Cup 2019");
        assert_eq!(event_from_title("Standalone"), "Standalone");
    }
}
