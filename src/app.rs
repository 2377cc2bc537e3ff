//! App: named views, a navigation stack, and document-level settings.
//!
//! [`App`] owns one [`Container`] per view and renders the active one into
//! the body. It never blocks: [`App::start`] mounts the first view and
//! returns, leaving the event loop to the host. Share it through `Arc` to
//! navigate from event handlers.

use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

use crate::dom::{DomHandle, NodeId, INNER_HTML};
use crate::error::{KitError, Result};
use crate::flex::{install_base_styles, Container};

const LIGHT_CLASS: &str = "uk-light";

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Page colour scheme, with an optional background colour.
///
/// `None`, an empty string, or `"default"` select the scheme's own colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    Light(Option<String>),
    Dark(Option<String>),
}

impl Theme {
    /// The effective background colour.
    pub fn background(&self) -> &str {
        let (custom, fallback) = match self {
            Theme::Light(custom) => (custom, "#f8f8f8"),
            Theme::Dark(custom) => (custom, "#222"),
        };
        match custom.as_deref() {
            None | Some("") | Some("default") => fallback,
            Some(colour) => colour,
        }
    }

    fn apply(&self, dom: &DomHandle) {
        let root = dom.document_element();
        dom.set_attribute(
            root,
            "style",
            &format!("background-color:{};", self.background()),
        );
        match self {
            Theme::Dark(_) => dom.add_class(dom.body(), LIGHT_CLASS),
            Theme::Light(_) => dom.remove_class(dom.body(), LIGHT_CLASS),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light(None)
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Document settings applied by [`App::start`].
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Document title.
    pub title: Option<String>,
    /// Colour scheme. Left untouched when `None`.
    pub theme: Option<Theme>,
    /// Favicon href, e.g. a `data:image/png;base64,...` URL.
    pub favicon: Option<String>,
}

impl AppConfig {
    /// Empty config: no title, theme or favicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the colour scheme (builder).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the favicon href (builder).
    pub fn with_favicon(mut self, href: impl Into<String>) -> Self {
        self.favicon = Some(href.into());
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

struct View {
    name: String,
    container: Container,
}

#[derive(Default)]
struct Navigator {
    views: Vec<View>,
    stack: Vec<String>,
    title: Option<NodeId>,
    favicon: Option<NodeId>,
}

impl Navigator {
    fn render(&mut self, dom: &DomHandle, name: &str) -> Result<()> {
        let view = self
            .views
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| KitError::UnknownView(name.to_owned()))?;
        view.container.render_to_body(dom);
        Ok(())
    }
}

/// A single-page application.
///
/// # Examples
///
/// ```ignore
/// let app = Arc::new(
///     App::new(dom, AppConfig::new().with_title("Demo"))
///         .view("home", home)
///         .view("settings", settings),
/// );
/// app.start("home")?;
/// let nav = Arc::clone(&app);
/// button.on_click(move || { let _ = nav.goto("settings"); });
/// ```
pub struct App {
    dom: DomHandle,
    config: AppConfig,
    nav: Mutex<Navigator>,
}

impl App {
    /// Create an app rendering into `dom`, with no views yet.
    pub fn new(dom: DomHandle, config: AppConfig) -> Self {
        Self {
            dom,
            config,
            nav: Mutex::new(Navigator::default()),
        }
    }

    /// The settings applied at start.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a view.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered.
    pub fn view(self, name: impl Into<String>, container: Container) -> Self {
        match self.try_view(name, container) {
            Ok(app) => app,
            Err(err) => panic!("{err}"),
        }
    }

    /// Register a view, reporting a duplicate name instead of panicking.
    pub fn try_view(self, name: impl Into<String>, container: Container) -> Result<Self> {
        let name = name.into();
        {
            let mut nav = self.nav.lock();
            if nav.views.iter().any(|v| v.name == name) {
                return Err(KitError::DuplicateView(name));
            }
            nav.views.push(View { name, container });
        }
        Ok(self)
    }

    /// Install base styles, apply the config, and mount `initial`.
    ///
    /// Returns once the view is in the body.
    pub fn start(&self, initial: &str) -> Result<()> {
        install_base_styles(&self.dom);
        if let Some(title) = &self.config.title {
            self.title(title);
        }
        if let Some(theme) = &self.config.theme {
            self.theme(theme);
        }
        if let Some(href) = &self.config.favicon {
            self.favicon(href);
        }

        let mut nav = self.nav.lock();
        nav.render(&self.dom, initial)?;
        nav.stack = vec![initial.to_owned()];
        debug!(view = initial, "app started");
        Ok(())
    }

    /// Push `name` onto the stack and render it.
    pub fn goto(&self, name: &str) -> Result<()> {
        let mut nav = self.nav.lock();
        nav.render(&self.dom, name)?;
        nav.stack.push(name.to_owned());
        debug!(view = name, depth = nav.stack.len(), "navigated");
        Ok(())
    }

    /// Pop the current view and render its parent. No-op at the root.
    pub fn back(&self) -> Result<()> {
        let mut nav = self.nav.lock();
        if nav.stack.len() <= 1 {
            return Ok(());
        }
        nav.stack.pop();
        let Some(parent) = nav.stack.last().cloned() else {
            return Ok(());
        };
        nav.render(&self.dom, &parent)?;
        debug!(view = %parent, "navigated back");
        Ok(())
    }

    /// Name of the view on top of the stack.
    pub fn current(&self) -> Option<String> {
        self.nav.lock().stack.last().cloned()
    }

    /// Names of every registered view, in registration order.
    pub fn views(&self) -> Vec<String> {
        self.nav.lock().views.iter().map(|v| v.name.clone()).collect()
    }

    /// Set the document title.
    pub fn title(&self, title: &str) -> &Self {
        let mut nav = self.nav.lock();
        let node = *nav.title.get_or_insert_with(|| {
            let node = self.dom.create_node("title");
            self.dom.append_child(self.dom.head(), node);
            node
        });
        self.dom.set_property(node, INNER_HTML, title);
        self
    }

    /// Set the favicon, replacing the previous one.
    pub fn favicon(&self, href: &str) -> &Self {
        let head = self.dom.head();
        let mut nav = self.nav.lock();
        if let Some(old) = nav.favicon.take() {
            self.dom.remove_node(old);
        }
        let link = self.dom.create_node("link");
        self.dom.set_attribute(link, "rel", "shortcut icon");
        self.dom.set_attribute(link, "href", href);
        match self.dom.children(head).first() {
            Some(&first) => self.dom.insert_before(head, link, first),
            None => self.dom.append_child(head, link),
        }
        nav.favicon = Some(link);
        self
    }

    /// Apply a colour scheme to the document.
    pub fn theme(&self, theme: &Theme) -> &Self {
        theme.apply(&self.dom);
        self
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("views", &self.views())
            .field("current", &self.current())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dom::{Document, DomAdapter};
    use crate::flex::IdAllocator;

    fn setup() -> (Arc<IdAllocator>, Arc<Document>, DomHandle) {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        (IdAllocator::new(), doc, dom)
    }

    fn mounted_id(dom: &DomHandle) -> Option<String> {
        let root = *dom.children(dom.body()).first()?;
        dom.attribute(root, "id")
    }

    // ── Theme / config ───────────────────────────────────────────────

    #[test]
    fn theme_backgrounds() {
        assert_eq!(Theme::Dark(None).background(), "#222");
        assert_eq!(Theme::Light(Some("default".into())).background(), "#f8f8f8");
        assert_eq!(Theme::Dark(Some("#000".into())).background(), "#000");
    }

    #[test]
    fn config_builder() {
        let config = AppConfig::new()
            .with_title("T")
            .with_theme(Theme::Dark(None))
            .with_favicon("data:,");
        assert_eq!(config.title.as_deref(), Some("T"));
        assert_eq!(config.theme, Some(Theme::Dark(None)));
        assert_eq!(config.favicon.as_deref(), Some("data:,"));
    }

    // ── Views ────────────────────────────────────────────────────────

    #[test]
    fn duplicate_view_is_an_error() {
        let (ids, _, dom) = setup();
        let app = App::new(dom, AppConfig::default()).view("a", Container::new(&ids));
        let err = app.try_view("a", Container::new(&ids)).err().unwrap();
        assert_eq!(err, KitError::DuplicateView("a".into()));
    }

    #[test]
    #[should_panic(expected = "view 'a' does already exist")]
    fn duplicate_view_panics() {
        let (ids, _, dom) = setup();
        let _ = App::new(dom, AppConfig::default())
            .view("a", Container::new(&ids))
            .view("a", Container::new(&ids));
    }

    #[test]
    fn start_unknown_view() {
        let (_, _, dom) = setup();
        let app = App::new(dom, AppConfig::default());
        assert_eq!(
            app.start("missing"),
            Err(KitError::UnknownView("missing".into()))
        );
        assert_eq!(app.current(), None);
    }

    // ── Navigation ───────────────────────────────────────────────────

    #[test]
    fn goto_and_back() {
        let (ids, _, dom) = setup();
        let home = Container::new(&ids);
        let settings = Container::new(&ids);
        let (home_id, settings_id) = (home.id().to_owned(), settings.id().to_owned());
        let app = App::new(dom.clone(), AppConfig::default())
            .view("home", home)
            .view("settings", settings);

        app.start("home").unwrap();
        assert_eq!(mounted_id(&dom), Some(home_id.clone()));

        app.goto("settings").unwrap();
        assert_eq!(app.current().as_deref(), Some("settings"));
        assert_eq!(mounted_id(&dom), Some(settings_id));
        assert_eq!(dom.children(dom.body()).len(), 1);

        app.back().unwrap();
        assert_eq!(app.current().as_deref(), Some("home"));
        assert_eq!(mounted_id(&dom), Some(home_id));

        app.back().unwrap();
        assert_eq!(app.current().as_deref(), Some("home"));
    }

    #[test]
    fn goto_unknown_leaves_stack() {
        let (ids, _, dom) = setup();
        let app = App::new(dom, AppConfig::default()).view("home", Container::new(&ids));
        app.start("home").unwrap();
        assert!(app.goto("nowhere").is_err());
        assert_eq!(app.current().as_deref(), Some("home"));
    }

    // ── Document settings ────────────────────────────────────────────

    #[test]
    fn start_applies_config() {
        let (ids, doc, dom) = setup();
        let config = AppConfig::new()
            .with_title("Demo")
            .with_theme(Theme::Dark(None))
            .with_favicon("a.png");
        let app = App::new(dom.clone(), config).view("home", Container::new(&ids));
        app.start("home").unwrap();

        assert!(dom.has_class(dom.body(), LIGHT_CLASS));
        assert_eq!(
            dom.attribute(dom.document_element(), "style").as_deref(),
            Some("background-color:#222;")
        );
        let head = dom.children(dom.head());
        assert_eq!(dom.attribute(head[0], "href").as_deref(), Some("a.png"));
        assert_eq!(doc.query_by_tag("title").len(), 1);
        assert_eq!(doc.query_by_tag("style").len(), 3);
    }

    #[test]
    fn favicon_replaces_previous() {
        let (_, doc, dom) = setup();
        let app = App::new(dom, AppConfig::default());
        app.favicon("one.png").favicon("two.png");
        let links = doc.query_by_tag("link");
        assert_eq!(links.len(), 1);
        assert_eq!(doc.get(links[0]).unwrap().attributes["href"], "two.png");
    }

    #[test]
    fn light_theme_removes_light_class() {
        let (_, _, dom) = setup();
        let app = App::new(dom.clone(), AppConfig::default());
        app.theme(&Theme::Dark(None)).theme(&Theme::Light(None));
        assert!(!dom.has_class(dom.body(), LIGHT_CLASS));
    }

    #[test]
    fn navigation_from_a_click_handler() {
        let (ids, doc, dom) = setup();
        let app = Arc::new(
            App::new(dom.clone(), AppConfig::default())
                .view("home", Container::new(&ids))
                .view("next", Container::new(&ids)),
        );
        app.start("home").unwrap();

        let button = dom.create_node("button");
        let nav = Arc::clone(&app);
        dom.subscribe(
            button,
            "click",
            Arc::new(move || {
                let _ = nav.goto("next");
            }),
        );
        doc.dispatch(button, "click");
        assert_eq!(app.current().as_deref(), Some("next"));
    }
}
