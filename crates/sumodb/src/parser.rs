use scraper::{ElementRef, Html, Node};

use crate::fields::{FieldError, extract_field};
use crate::types::Rikishi;

const DETAIL_TABLE_CLASS: &str = "rikishidata";
const SUMMARY_TABLE_CLASS: &str = "rikishi";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Empty document: {0}")]
    EmptyDocument(String),
    #[error("No isolated 'rikishidata' table found in document")]
    TableNotFound,
    #[error("rikishi({id}): row '{label}': {source}")]
    Field {
        id: u32,
        label: String,
        #[source]
        source: FieldError,
    },
}

/// Tables of interest found in a rikishi page.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocatedTables<'a> {
    /// The nested profile table holding the label/value rows.
    pub detail: Option<ElementRef<'a>>,
    /// Basho history table. Located but not parsed.
    pub summary: Option<ElementRef<'a>>,
    pub detail_candidates: usize,
}

fn is_isolated(table: ElementRef) -> bool {
    table
        .prev_siblings()
        .chain(table.next_siblings())
        .all(|sibling| match sibling.value() {
            Node::Text(text) => text.trim().is_empty(),
            Node::Comment(_) => true,
            _ => false,
        })
}

/// Walks the whole document depth-first and records the marker tables.
///
/// The page carries two `rikishidata` tables: an outer layout one sitting
/// next to other elements, and the inner one that is the only thing in its
/// cell. Only the latter counts. When several isolated candidates exist the
/// last one visited wins.
pub fn locate_tables(document: &Html) -> LocatedTables<'_> {
    let mut located = LocatedTables::default();

    let tables = document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "table");

    for table in tables {
        // tables without a class are layout tables, not errors
        let has_class = |class: &str| table.value().classes().any(|c| c == class);

        if has_class(DETAIL_TABLE_CLASS) {
            if is_isolated(table) {
                located.detail_candidates += 1;
                located.detail = Some(table);
            } else {
                log::debug!("Skipping '{DETAIL_TABLE_CLASS}' table with siblings");
            }
        } else if has_class(SUMMARY_TABLE_CLASS) {
            located.summary = Some(table);
        }
    }

    if located.detail_candidates > 1 {
        log::warn!(
            "Found {} isolated '{DETAIL_TABLE_CLASS}' tables, using the last one",
            located.detail_candidates
        );
    }

    located
}

pub fn locate_detail_table(document: &Html) -> Result<ElementRef<'_>, ParseError> {
    let located = locate_tables(document);

    if located.summary.is_some() {
        log::debug!("'{SUMMARY_TABLE_CLASS}' table present, not parsed");
    }

    located.detail.ok_or(ParseError::TableNotFound)
}

fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|e| e.value().name() == "tr"),
            ),
            _ => {}
        }
    }

    rows
}

/// First non-blank text node of a cell, trimmed. `None` when the cell has no
/// text node at all.
fn cell_text<'a>(cell: ElementRef<'a>) -> Option<&'a str> {
    let mut has_text = false;

    for node in cell.descendants() {
        if let Some(text) = node.value().as_text() {
            has_text = true;
            let trimmed: &'a str = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }

    has_text.then_some("")
}

/// Reads the label (second cell) and value (third cell) of every row into a
/// fresh [`Rikishi`]. Rows missing either cell's text are skipped; the first
/// field that fails to parse aborts the walk.
pub fn walk_rows(table: ElementRef<'_>, id: u32) -> Result<Rikishi, ParseError> {
    let mut rikishi = Rikishi::default();

    for row in table_rows(table) {
        let cells: Vec<ElementRef> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|e| matches!(e.value().name(), "td" | "th"))
            .collect();

        let label = cells.get(1).copied().and_then(cell_text);
        let value = cells.get(2).copied().and_then(cell_text);

        let (Some(label), Some(value)) = (label, value) else {
            log::debug!("rikishi({id}): skipping row without label/value text");
            continue;
        };

        let update = extract_field(label, value).map_err(|source| ParseError::Field {
            id,
            label: label.to_string(),
            source,
        })?;

        match update {
            Some(update) => update.apply(&mut rikishi),
            None => log::trace!("rikishi({id}): ignoring row '{label}'"),
        }
    }

    Ok(rikishi)
}

/// Parses a saved or freshly fetched `Rikishi.aspx` page.
pub fn parse_rikishi_page(html: &str, id: u32) -> Result<Rikishi, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument(format!(
            "no content in response for rikishi({id})"
        )));
    }

    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        log::debug!(
            "rikishi({id}): html parser recovered from {} error(s)",
            document.errors.len()
        );
    }

    let table = locate_detail_table(&document)?;
    let mut rikishi = walk_rows(table, id)?;
    rikishi.id = id;

    Ok(rikishi)
}
