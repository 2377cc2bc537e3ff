//! Style serializer: attribute model to CSS text.
//!
//! Output shape, one rule per line:
//!
//! ```text
//! #abcdefgh {display:flex;flex-wrap:wrap;}
//! @media all and (min-width: 992px) { #abcdefgh {justify-content:space-between;}}
//! #ijklmnop {flex-grow:1;}
//! ```
//!
//! Values are opaque strings except for the closed enumerations; nothing is
//! validated or minified.

use super::attributes::{AttributeSet, Omit, Responsive};

/// How keys marked [`Omit::AtDefaultInBase`] are treated inside at-rules.
///
/// Under `Omit` an at-rule carries exactly the declarations written at that
/// breakpoint: a lone `justify_content_at(.., &[Large])` yields one at-rule
/// holding only `justify-content`, with no `flex-direction` or `flex-wrap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakpointDefaults {
    /// Omitted at their default, like every other key.
    #[default]
    Omit,
    /// Emitted even at their default: an override set existing at all is
    /// taken as intent. Reproduces stylesheets of the legacy generator.
    Keep,
}

/// Where a rule body is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Base,
    Breakpoint(BreakpointDefaults),
}

/// Serialize the declarations of one attribute set.
pub fn rule_body<A: AttributeSet>(attrs: &A, scope: Scope) -> String {
    let mut out = String::new();
    for &key in A::KEYS {
        let omit = match (A::omit(key), scope) {
            (Omit::AtDefaultInBase, Scope::Breakpoint(BreakpointDefaults::Keep)) => false,
            _ => attrs.is_default(key),
        };
        if omit {
            continue;
        }
        if let Some(declaration) = attrs.declaration(key) {
            out.push_str(&declaration);
        }
    }
    out
}

/// Serialize an entity's base rule followed by its breakpoint at-rules.
///
/// `prefix` is emitted at the start of the base rule body only (the
/// container's fixed `display:flex;`).
pub fn rule_set<A: AttributeSet>(
    id: &str,
    prefix: &str,
    attrs: &Responsive<A>,
    defaults: BreakpointDefaults,
) -> String {
    let mut out = String::new();
    out.push('#');
    out.push_str(id);
    out.push_str(" {");
    out.push_str(prefix);
    out.push_str(&rule_body(attrs.base(), Scope::Base));
    out.push_str("}\n");
    for (breakpoint, overrides) in attrs.overrides() {
        let Some(media) = breakpoint.media_query() else {
            continue;
        };
        out.push_str(&media);
        out.push_str(" { #");
        out.push_str(id);
        out.push_str(" {");
        out.push_str(&rule_body(overrides, Scope::Breakpoint(defaults)));
        out.push_str("}}\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flex::attributes::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_container_body_is_empty() {
        let attrs = ContainerAttributes::default();
        assert_eq!(rule_body(&attrs, Scope::Base), "");
    }

    #[test]
    fn default_item_body_is_empty_in_both_scopes() {
        let attrs = ItemAttributes::default();
        assert_eq!(rule_body(&attrs, Scope::Base), "");
        assert_eq!(
            rule_body(&attrs, Scope::Breakpoint(BreakpointDefaults::Keep)),
            ""
        );
    }

    #[test]
    fn breakpoint_defaults_omitted_unless_kept() {
        let attrs = ContainerAttributes::default();
        assert_eq!(
            rule_body(&attrs, Scope::Breakpoint(BreakpointDefaults::Omit)),
            ""
        );
        assert_eq!(
            rule_body(&attrs, Scope::Breakpoint(BreakpointDefaults::Keep)),
            "flex-direction:row;flex-wrap:nowrap;"
        );
    }

    #[test]
    fn container_emission_order() {
        let attrs = ContainerAttributes {
            background: "#fff".into(),
            border: "1px solid".into(),
            padding: "2px".into(),
            margin: "3px".into(),
            wrap: FlexWrap::WrapReverse,
            direction: FlexDirection::Column,
            justify_content: FlexAlignment::Center,
            align_items: FlexAlignment::Baseline,
            align_content: FlexAlignment::End,
        };
        assert_eq!(
            rule_body(&attrs, Scope::Base),
            "padding:2px;margin:3px;border:1px solid;background-color:#fff;\
             flex-direction:column;flex-wrap:wrap-reverse;justify-content:center;\
             align-content:flex-end;align-items:baseline;"
        );
    }

    #[test]
    fn item_emission_order() {
        let attrs = ItemAttributes {
            order: 2,
            grow: 1,
            shrink: 1,
            basis: "50%".into(),
            align_self: FlexAlignment::End,
            ..ItemAttributes::default()
        };
        assert_eq!(
            rule_body(&attrs, Scope::Base),
            "order:2;flex-grow:1;flex-shrink:1;flex-basis:50%;align-self:flex-end;"
        );
    }

    #[test]
    fn unsupported_alignment_is_dropped() {
        let attrs = ContainerAttributes {
            justify_content: FlexAlignment::Baseline,
            ..ContainerAttributes::default()
        };
        assert_eq!(rule_body(&attrs, Scope::Base), "");
    }

    #[test]
    fn rule_set_with_override() {
        let mut attrs: Responsive<ItemAttributes> = Responsive::new();
        attrs.set(&[], |a| a.grow = 1);
        attrs.set(&[Breakpoint::Small], |a| a.basis = "0".into());
        assert_eq!(
            rule_set("abc", "", &attrs, BreakpointDefaults::Omit),
            "#abc {flex-grow:1;}\n\
             @media all and (min-width: 600px) { #abc {flex-basis:0;}}\n"
        );
    }
}
