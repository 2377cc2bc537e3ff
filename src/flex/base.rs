//! Document-wide stylesheets every flex layout relies on.

use tracing::debug;

use crate::dom::{DomHandle, INNER_HTML};

/// Full-viewport root, expand helpers and the `hidden` class.
pub const FLEX_CSS: &str = "
body > :first-child {
\theight: 100vh;
\twidth: 100vw;
}
body > :first-child > * {
\tflex-grow: 0;
\tflex-shrink: 0;
\tflex-basis: 0;
}
.expand-height {
\theight: 100%;
\toverflow-y: auto;
}
.expand-width {
\twidth: 100%;
\toverflow-x: auto;
}
.hidden {
\tdisplay:none;
}";

/// WebKit scrollbar theme.
pub const SCROLLBAR_CSS: &str = "
::-webkit-scrollbar-track{
\t-webkit-box-shadow: inset 0 0 6px rgba(0,0,0,0.3);
\tborder-radius: 10px;
\tbackground-color: #F5F5F5;
}
::-webkit-scrollbar {
\twidth: 12px;
}
::-webkit-scrollbar-thumb{
\tborder-radius: 10px;
\t-webkit-box-shadow: inset 0 0 6px rgba(0,0,0,.3);
\tbackground-color: #D62929;
}";

const STYLESHEETS: [(&str, &str); 2] = [("scrollbar.css", SCROLLBAR_CSS), ("flex.css", FLEX_CSS)];

/// Append the base stylesheets to `<head>` as named `<style>` nodes.
///
/// Sheets already present (matched by their `name` attribute) are skipped,
/// so calling this more than once per document is harmless. Returns how many
/// sheets were added.
pub fn install_base_styles(dom: &DomHandle) -> usize {
    let head = dom.head();
    let present: Vec<String> = dom
        .children(head)
        .into_iter()
        .filter_map(|node| dom.attribute(node, "name"))
        .collect();

    let mut added = 0;
    for (name, css) in STYLESHEETS {
        if present.iter().any(|p| p == name) {
            continue;
        }
        let style = dom.create_node("style");
        dom.set_property(style, INNER_HTML, css);
        dom.set_attribute(style, "name", name);
        dom.append_child(head, style);
        added += 1;
    }
    debug!(added, "installed base stylesheets");
    added
}
