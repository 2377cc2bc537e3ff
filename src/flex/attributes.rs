//! Attribute model: flex keys, breakpoints, and per-breakpoint overrides.
//!
//! A Container or Item carries one base attribute set plus a lazily created
//! override set per breakpoint. Override sets start from the constructor
//! defaults, never from the current base, so each one only ever differs from
//! the defaults in the keys explicitly written at that breakpoint.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Breakpoint
// ---------------------------------------------------------------------------

/// Viewport-width threshold at which an override set applies.
///
/// Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    /// No media condition: writing here writes the base set.
    Base,
    Small,
    Medium,
    Large,
    XLarge,
}

impl Breakpoint {
    /// All breakpoints in ascending order.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Base,
        Breakpoint::Small,
        Breakpoint::Medium,
        Breakpoint::Large,
        Breakpoint::XLarge,
    ];

    /// Minimum viewport width in pixels, `None` for the base level.
    pub fn min_width(self) -> Option<u32> {
        match self {
            Breakpoint::Base => None,
            Breakpoint::Small => Some(600),
            Breakpoint::Medium => Some(768),
            Breakpoint::Large => Some(992),
            Breakpoint::XLarge => Some(1200),
        }
    }

    /// The at-rule prelude for this breakpoint, `None` for the base level.
    pub fn media_query(self) -> Option<String> {
        self.min_width()
            .map(|px| format!("@media all and (min-width: {px}px)"))
    }
}

// ---------------------------------------------------------------------------
// Closed value enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    Wrap,
    #[default]
    NoWrap,
    WrapReverse,
}

impl FlexWrap {
    pub fn declaration(self) -> &'static str {
        match self {
            FlexWrap::Wrap => "flex-wrap:wrap;",
            FlexWrap::NoWrap => "flex-wrap:nowrap;",
            FlexWrap::WrapReverse => "flex-wrap:wrap-reverse;",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn declaration(self) -> &'static str {
        match self {
            FlexDirection::Row => "flex-direction:row;",
            FlexDirection::RowReverse => "flex-direction:row-reverse;",
            FlexDirection::Column => "flex-direction:column;",
            FlexDirection::ColumnReverse => "flex-direction:column-reverse;",
        }
    }
}

/// Alignment keyword shared by the justify/align properties.
///
/// Each property accepts only a subset; a keyword outside that subset has no
/// CSS form for the property and is dropped from the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexAlignment {
    Auto,
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Baseline,
    Stretch,
}

impl FlexAlignment {
    /// The CSS keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            FlexAlignment::Auto => "auto",
            FlexAlignment::Start => "flex-start",
            FlexAlignment::End => "flex-end",
            FlexAlignment::Center => "center",
            FlexAlignment::SpaceBetween => "space-between",
            FlexAlignment::SpaceAround => "space-around",
            FlexAlignment::SpaceEvenly => "space-evenly",
            FlexAlignment::Baseline => "baseline",
            FlexAlignment::Stretch => "stretch",
        }
    }

    fn declaration(self, property: &str, accepted: &[FlexAlignment]) -> Option<String> {
        accepted
            .contains(&self)
            .then(|| format!("{property}:{};", self.keyword()))
    }

    pub fn justify_content(self) -> Option<String> {
        use FlexAlignment::*;
        self.declaration(
            "justify-content",
            &[Start, End, Center, SpaceBetween, SpaceAround, SpaceEvenly],
        )
    }

    pub fn align_items(self) -> Option<String> {
        use FlexAlignment::*;
        self.declaration("align-items", &[Stretch, Start, End, Center, Baseline])
    }

    pub fn align_content(self) -> Option<String> {
        use FlexAlignment::*;
        self.declaration(
            "align-content",
            &[Stretch, Start, End, Center, SpaceBetween, SpaceAround],
        )
    }

    pub fn align_self(self) -> Option<String> {
        use FlexAlignment::*;
        self.declaration("align-self", &[Auto, Start, End, Center, Baseline, Stretch])
    }
}

// ---------------------------------------------------------------------------
// AttributeSet
// ---------------------------------------------------------------------------

/// When a property is left out of a rule body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Omit {
    /// Omitted whenever the value equals its constructor default.
    AtDefault,
    /// Omitted at its default in the base rule; inside a breakpoint at-rule
    /// the serializer's `BreakpointDefaults` policy decides.
    AtDefaultInBase,
}

/// A fixed key set with one default value per key and a CSS form per key.
pub trait AttributeSet: Clone + Default {
    type Key: Copy + 'static;

    /// Every key, in emission order.
    const KEYS: &'static [Self::Key];

    /// Serialization policy for `key`.
    fn omit(key: Self::Key) -> Omit;

    /// Whether `key` currently holds its constructor default.
    fn is_default(&self, key: Self::Key) -> bool;

    /// The declaration for `key`, `None` if the value has no CSS form.
    fn declaration(&self, key: Self::Key) -> Option<String>;
}

fn text_declaration(property: &str, value: &str) -> String {
    format!("{property}:{value};")
}

// ---------------------------------------------------------------------------
// Container attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKey {
    Padding,
    Margin,
    Border,
    Background,
    Direction,
    Wrap,
    JustifyContent,
    AlignContent,
    AlignItems,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerAttributes {
    pub background: String,
    pub border: String,
    pub padding: String,
    pub margin: String,
    pub wrap: FlexWrap,
    pub direction: FlexDirection,
    pub justify_content: FlexAlignment,
    pub align_items: FlexAlignment,
    pub align_content: FlexAlignment,
}

impl Default for ContainerAttributes {
    fn default() -> Self {
        Self {
            background: String::new(),
            border: String::new(),
            padding: String::new(),
            margin: String::new(),
            wrap: FlexWrap::NoWrap,
            direction: FlexDirection::Row,
            justify_content: FlexAlignment::Start,
            align_items: FlexAlignment::Stretch,
            align_content: FlexAlignment::Stretch,
        }
    }
}

impl AttributeSet for ContainerAttributes {
    type Key = ContainerKey;

    const KEYS: &'static [ContainerKey] = &[
        ContainerKey::Padding,
        ContainerKey::Margin,
        ContainerKey::Border,
        ContainerKey::Background,
        ContainerKey::Direction,
        ContainerKey::Wrap,
        ContainerKey::JustifyContent,
        ContainerKey::AlignContent,
        ContainerKey::AlignItems,
    ];

    fn omit(key: ContainerKey) -> Omit {
        match key {
            ContainerKey::Direction | ContainerKey::Wrap => Omit::AtDefaultInBase,
            _ => Omit::AtDefault,
        }
    }

    fn is_default(&self, key: ContainerKey) -> bool {
        let d = Self::default();
        match key {
            ContainerKey::Padding => self.padding == d.padding,
            ContainerKey::Margin => self.margin == d.margin,
            ContainerKey::Border => self.border == d.border,
            ContainerKey::Background => self.background == d.background,
            ContainerKey::Direction => self.direction == d.direction,
            ContainerKey::Wrap => self.wrap == d.wrap,
            ContainerKey::JustifyContent => self.justify_content == d.justify_content,
            ContainerKey::AlignContent => self.align_content == d.align_content,
            ContainerKey::AlignItems => self.align_items == d.align_items,
        }
    }

    fn declaration(&self, key: ContainerKey) -> Option<String> {
        match key {
            ContainerKey::Padding => Some(text_declaration("padding", &self.padding)),
            ContainerKey::Margin => Some(text_declaration("margin", &self.margin)),
            ContainerKey::Border => Some(text_declaration("border", &self.border)),
            ContainerKey::Background => {
                Some(text_declaration("background-color", &self.background))
            }
            ContainerKey::Direction => Some(self.direction.declaration().to_owned()),
            ContainerKey::Wrap => Some(self.wrap.declaration().to_owned()),
            ContainerKey::JustifyContent => self.justify_content.justify_content(),
            ContainerKey::AlignContent => self.align_content.align_content(),
            ContainerKey::AlignItems => self.align_items.align_items(),
        }
    }
}

// ---------------------------------------------------------------------------
// Item attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKey {
    Padding,
    Margin,
    Border,
    Background,
    Order,
    Grow,
    Shrink,
    Basis,
    AlignSelf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAttributes {
    pub background: String,
    pub border: String,
    pub padding: String,
    pub margin: String,
    /// Zero means unset.
    pub order: i32,
    pub grow: u32,
    pub shrink: u32,
    pub basis: String,
    pub align_self: FlexAlignment,
}

impl Default for ItemAttributes {
    fn default() -> Self {
        Self {
            background: String::new(),
            border: String::new(),
            padding: String::new(),
            margin: String::new(),
            order: 0,
            grow: 0,
            shrink: 0,
            basis: "auto".to_owned(),
            align_self: FlexAlignment::Auto,
        }
    }
}

impl AttributeSet for ItemAttributes {
    type Key = ItemKey;

    const KEYS: &'static [ItemKey] = &[
        ItemKey::Padding,
        ItemKey::Margin,
        ItemKey::Border,
        ItemKey::Background,
        ItemKey::Order,
        ItemKey::Grow,
        ItemKey::Shrink,
        ItemKey::Basis,
        ItemKey::AlignSelf,
    ];

    fn omit(_key: ItemKey) -> Omit {
        Omit::AtDefault
    }

    fn is_default(&self, key: ItemKey) -> bool {
        let d = Self::default();
        match key {
            ItemKey::Padding => self.padding == d.padding,
            ItemKey::Margin => self.margin == d.margin,
            ItemKey::Border => self.border == d.border,
            ItemKey::Background => self.background == d.background,
            ItemKey::Order => self.order == d.order,
            ItemKey::Grow => self.grow == d.grow,
            ItemKey::Shrink => self.shrink == d.shrink,
            ItemKey::Basis => self.basis == d.basis,
            ItemKey::AlignSelf => self.align_self == d.align_self,
        }
    }

    fn declaration(&self, key: ItemKey) -> Option<String> {
        match key {
            ItemKey::Padding => Some(text_declaration("padding", &self.padding)),
            ItemKey::Margin => Some(text_declaration("margin", &self.margin)),
            ItemKey::Border => Some(text_declaration("border", &self.border)),
            ItemKey::Background => Some(text_declaration("background-color", &self.background)),
            ItemKey::Order => Some(format!("order:{};", self.order)),
            ItemKey::Grow => Some(format!("flex-grow:{};", self.grow)),
            ItemKey::Shrink => Some(format!("flex-shrink:{};", self.shrink)),
            ItemKey::Basis => Some(text_declaration("flex-basis", &self.basis)),
            ItemKey::AlignSelf => self.align_self.align_self(),
        }
    }
}

// ---------------------------------------------------------------------------
// Responsive
// ---------------------------------------------------------------------------

/// A base attribute set plus independent per-breakpoint overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Responsive<A> {
    base: A,
    overrides: BTreeMap<Breakpoint, A>,
}

impl<A: AttributeSet> Responsive<A> {
    pub fn new() -> Self {
        Self {
            base: A::default(),
            overrides: BTreeMap::new(),
        }
    }

    /// Write one key.
    ///
    /// An empty `at` writes the base set. Otherwise every listed breakpoint is
    /// written: [`Breakpoint::Base`] goes to the base set, anything else to
    /// its override set, created from the defaults on first write.
    pub fn set(&mut self, at: &[Breakpoint], write: impl Fn(&mut A)) {
        if at.is_empty() {
            write(&mut self.base);
            return;
        }
        for &breakpoint in at {
            match breakpoint {
                Breakpoint::Base => write(&mut self.base),
                _ => write(self.overrides.entry(breakpoint).or_default()),
            }
        }
    }

    pub fn base(&self) -> &A {
        &self.base
    }

    /// The override set at `breakpoint`, if one was ever written.
    pub fn at(&self, breakpoint: Breakpoint) -> Option<&A> {
        self.overrides.get(&breakpoint)
    }

    /// Existing override sets in ascending breakpoint order.
    pub fn overrides(&self) -> impl Iterator<Item = (Breakpoint, &A)> {
        self.overrides.iter().map(|(&bp, attrs)| (bp, attrs))
    }
}
