//! Form widget: a stack of labelled fields.
//!
//! Each field becomes `div.uk-margin > (div.uk-form-label, <field>)`; the
//! label div is left out when the label is empty.

use std::sync::{Arc, Weak};

use crate::dom::{DomAdapter, DomHandle, NodeId, INNER_HTML};
use crate::widget::{Content, LiveCell, LiveRef, Widget};

use super::textbox::Textbox;

struct FormField {
    label: String,
    field: Content,
}

struct FormLive {
    dom: Weak<dyn DomAdapter>,
    form: NodeId,
}

impl LiveRef for FormLive {
    fn root(&self) -> NodeId {
        self.form
    }
}

fn mount_field(dom: &DomHandle, form: NodeId, field: &FormField) {
    let margin = dom.create_node("div");
    dom.add_class(margin, "uk-margin");
    if !field.label.is_empty() {
        let label = dom.create_node("div");
        dom.set_property(label, INNER_HTML, &field.label);
        dom.add_class(label, "uk-form-label");
        dom.append_child(margin, label);
    }
    let node = field.field.render(dom);
    dom.append_child(margin, node);
    dom.append_child(form, margin);
}

/// Mount the most recently added field.
fn apply_last(fields: &[FormField], live: &mut FormLive) {
    if let (Some(dom), Some(field)) = (live.dom.upgrade(), fields.last()) {
        mount_field(&dom, live.form, field);
    }
}

/// A UIkit form.
#[derive(Default)]
pub struct Form {
    cell: LiveCell<Vec<FormField>, FormLive>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labelled field. Appears at once if the form is rendered.
    pub fn add_field(&self, label: impl Into<String>, field: impl Into<Content>) -> &Self {
        let field = FormField {
            label: label.into(),
            field: field.into(),
        };
        self.cell
            .update(|fields| fields.push(field), |fields, live| apply_last(fields, live));
        self
    }

    /// Add a labelled textbox.
    pub fn add_textbox(&self, label: impl Into<String>, textbox: Arc<Textbox>) -> &Self {
        self.add_field(label, textbox)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.cell.read(Vec::len)
    }

    /// Whether the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Widget for Form {
    fn widget_type(&self) -> &str {
        "Form"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        self.cell.render(
            |_| FormLive {
                dom: Arc::downgrade(dom),
                form: dom.create_node("form"),
            },
            |fields, live| {
                for field in fields {
                    mount_field(dom, live.form, field);
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::widgets::IconType;

    #[test]
    fn labelled_and_unlabelled_fields() {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        let form = Form::new();
        form.add_textbox("User", Arc::new(Textbox::new()))
            .add_field("", "plain");
        let node = form.render(&dom);
        insta::assert_snapshot!(doc.to_html(node), @r#"<form><div class="uk-margin"><div class="uk-form-label">User</div><input class="uk-input"></input></div><div class="uk-margin"><div>plain</div></div></form>"#);
    }

    #[test]
    fn field_added_after_render_is_mounted() {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        let form = Form::new();
        let node = form.render(&dom);
        assert!(form.is_empty());

        let textbox = Arc::new(Textbox::new());
        textbox.icon(IconType::Lock);
        form.add_textbox("Password", textbox.clone());
        assert_eq!(form.len(), 1);
        let margin = dom.children(node)[0];
        assert_eq!(dom.children(margin)[1], textbox.wrapper_node().unwrap());
    }
}
