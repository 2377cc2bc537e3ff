//! Table widget: a scrollable UIkit table.
//!
//! ```text
//! div.uk-overflow-auto
//! └── table.uk-table
//!     ├── caption
//!     ├── thead > tr > th*   (th gets uk-width-<w> when a width is set)
//!     ├── tbody > tr* > td*
//!     └── tfoot > tr > td*
//! ```
//!
//! Cells are [`Content`]: text, numbers or nested widgets. Every setter that
//! touches a section rebuilds only that section of the live table.

use std::cmp::Ordering;
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::dom::{DomAdapter, DomHandle, NodeId, INNER_HTML};
use crate::error::Result;
use crate::widget::{Content, LiveCell, LiveRef, Widget};

const SORT_CONTEXT: &str = "table sort";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    #[default]
    Plain,
    Divider,
    Striped,
}

impl TableStyle {
    /// The UIkit modifier class, `None` for `Plain`.
    pub fn class(self) -> Option<&'static str> {
        match self {
            TableStyle::Plain => None,
            TableStyle::Divider => Some("uk-table-divider"),
            TableStyle::Striped => Some("uk-table-striped"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

// ---------------------------------------------------------------------------
// State / live record
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TableState {
    style: TableStyle,
    caption: Content,
    header: Vec<Content>,
    widths: Vec<String>,
    footer: Vec<Content>,
    rows: Vec<Vec<Content>>,
}

struct TableLive {
    dom: Weak<dyn DomAdapter>,
    wrapper: NodeId,
    table: NodeId,
    caption: NodeId,
    head: NodeId,
    body: NodeId,
    foot: NodeId,
}

impl LiveRef for TableLive {
    fn root(&self) -> NodeId {
        self.wrapper
    }
}

fn cleanup_style(s: &TableState, live: &mut TableLive) {
    if let (Some(dom), Some(class)) = (live.dom.upgrade(), s.style.class()) {
        dom.remove_class(live.table, class);
    }
}

fn apply_style(s: &TableState, live: &mut TableLive) {
    if let (Some(dom), Some(class)) = (live.dom.upgrade(), s.style.class()) {
        dom.add_class(live.table, class);
    }
}

fn apply_caption(s: &TableState, live: &mut TableLive) {
    if let Some(dom) = live.dom.upgrade() {
        s.caption.write_into(&dom, live.caption);
    }
}

fn apply_header(s: &TableState, live: &mut TableLive) {
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    dom.set_property(live.head, INNER_HTML, "");
    let tr = dom.create_node("tr");
    for (i, field) in s.header.iter().enumerate() {
        let th = dom.create_node("th");
        field.write_into(&dom, th);
        if let Some(width) = s.widths.get(i).filter(|w| !w.is_empty()) {
            dom.add_class(th, &format!("uk-width-{width}"));
        }
        dom.append_child(tr, th);
    }
    dom.append_child(live.head, tr);
}

fn write_row(dom: &DomHandle, section: NodeId, row: &[Content]) {
    let tr = dom.create_node("tr");
    for field in row {
        let td = dom.create_node("td");
        field.write_into(dom, td);
        dom.append_child(tr, td);
    }
    dom.append_child(section, tr);
}

fn apply_body(s: &TableState, live: &mut TableLive) {
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    dom.set_property(live.body, INNER_HTML, "");
    for row in &s.rows {
        write_row(&dom, live.body, row);
    }
}

/// Mount only the newest row.
fn apply_last_row(s: &TableState, live: &mut TableLive) {
    if let (Some(dom), Some(row)) = (live.dom.upgrade(), s.rows.last()) {
        write_row(&dom, live.body, row);
    }
}

fn apply_footer(s: &TableState, live: &mut TableLive) {
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    dom.set_property(live.foot, INNER_HTML, "");
    if !s.footer.is_empty() {
        write_row(&dom, live.foot, &s.footer);
    }
}

/// Sort `rows` by `column`. Leaves them untouched if any cell in the column
/// has no order.
fn sort_rows(rows: &mut [Vec<Content>], column: usize, order: SortOrder) -> Result<()> {
    for cell in rows.iter().filter_map(|row| row.get(column)) {
        cell.compare(&Content::Empty, SORT_CONTEXT)?;
    }
    rows.sort_by(|a, b| {
        let ordering = match (a.get(column), b.get(column)) {
            (Some(x), Some(y)) => x.compare(y, SORT_CONTEXT).unwrap_or(Ordering::Equal),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    Ok(())
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A UIkit table.
///
/// # Examples
///
/// ```ignore
/// let people = Arc::new(Table::new());
/// people.header(["Name", "Age"]).widths(["expand", "small"]);
/// people.append(vec![Content::from("Ada"), Content::from(36)]);
/// people.sort_by(1, SortOrder::Descending)?;
/// ```
#[derive(Default)]
pub struct Table {
    cell: LiveCell<TableState, TableLive>,
}

fn contents<C: Into<Content>>(fields: impl IntoIterator<Item = C>) -> Vec<Content> {
    fields.into_iter().map(Into::into).collect()
}

impl Table {
    /// Create an empty plain table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the style class.
    pub fn style(&self, style: TableStyle) -> &Self {
        self.cell.replace(cleanup_style, |s| s.style = style, apply_style);
        self
    }

    /// Set the caption.
    pub fn caption(&self, caption: impl Into<Content>) -> &Self {
        let caption = caption.into();
        self.cell.update(|s| s.caption = caption, apply_caption);
        self
    }

    /// Replace the header row.
    pub fn header<C: Into<Content>>(&self, fields: impl IntoIterator<Item = C>) -> &Self {
        let fields = contents(fields);
        self.cell.update(|s| s.header = fields, apply_header);
        self
    }

    /// UIkit width suffixes per header column (`"small"`, `"1-4"`, ...).
    /// Empty strings leave a column unsized.
    pub fn widths<W: Into<String>>(&self, widths: impl IntoIterator<Item = W>) -> &Self {
        let widths: Vec<String> = widths.into_iter().map(Into::into).collect();
        self.cell.update(|s| s.widths = widths, apply_header);
        self
    }

    /// Replace the footer row. An empty row removes it.
    pub fn footer<C: Into<Content>>(&self, fields: impl IntoIterator<Item = C>) -> &Self {
        let fields = contents(fields);
        self.cell.update(|s| s.footer = fields, apply_footer);
        self
    }

    /// Add a row at the bottom.
    pub fn append<C: Into<Content>>(&self, row: impl IntoIterator<Item = C>) -> &Self {
        let row = contents(row);
        self.cell.update(|s| s.rows.push(row), apply_last_row);
        self
    }

    /// Drop every row.
    pub fn clear(&self) -> &Self {
        self.cell.update(|s| s.rows.clear(), apply_body);
        self
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.cell.read(|s| s.rows.len())
    }

    /// Reorder rows by one column.
    ///
    /// Empty cells sort first, then numbers, then text. Rows shorter than
    /// `column` sort before all others. Fails with
    /// [`KitError::UnsupportedContent`](crate::error::KitError::UnsupportedContent)
    /// if the column holds a nested widget, in which case nothing moves.
    pub fn sort_by(&self, column: usize, order: SortOrder) -> Result<&Self> {
        let mut outcome = Ok(());
        self.cell.update(
            |s| outcome = sort_rows(&mut s.rows, column, order),
            apply_body,
        );
        if let Err(err) = &outcome {
            debug!(column, %err, "table not sorted");
        }
        outcome.map(|()| self)
    }
}

impl Widget for Table {
    fn widget_type(&self) -> &str {
        "Table"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        self.cell.render(
            |_| {
                let live = TableLive {
                    dom: Arc::downgrade(dom),
                    wrapper: dom.create_node("div"),
                    table: dom.create_node("table"),
                    caption: dom.create_node("caption"),
                    head: dom.create_node("thead"),
                    body: dom.create_node("tbody"),
                    foot: dom.create_node("tfoot"),
                };
                dom.add_class(live.wrapper, "uk-overflow-auto");
                dom.add_class(live.table, "uk-table");
                dom.append_child(live.wrapper, live.table);
                for section in [live.caption, live.head, live.body, live.foot] {
                    dom.append_child(live.table, section);
                }
                live
            },
            |s, live| {
                apply_style(s, live);
                apply_caption(s, live);
                apply_header(s, live);
                apply_body(s, live);
                apply_footer(s, live);
            },
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================
