use crate::render::entities::EntityTable;

/// Configuration for ingesting an [`EpubDocument`](super::EpubDocument).
///
/// Options are explicitly constructed and passed in; ingestion holds no global state.
///
/// # Examples
/// ```
/// use epub_ingest::IngestOptions;
/// use epub_ingest::render::entities::EntityTable;
///
/// let options = IngestOptions::new()
///     .strict(true)
///     .scope_selector(".reader")
///     .container_id("reader-content")
///     .entities(EntityTable::default().with_entity("logo", "*"));
///
/// assert!(options.strict);
/// assert_eq!(".reader", options.scope_selector);
/// ```
#[derive(Clone, Debug)]
pub struct IngestOptions {
    /// When set to `true`, ensures an EPUB conforms to the following:
    /// - Has a **title**.
    /// - Has **no duplicate** manifest item ids.
    ///
    /// Otherwise, a missing title is accepted with a warning and, for duplicate
    /// ids, the first manifest item wins.
    ///
    /// Default: `false`
    pub strict: bool,
    /// Selector prefixed to every top-level stylesheet selector so rules cannot
    /// leak outside the rendered chapter container.
    ///
    /// Default: `#bw-book-content`
    pub scope_selector: String,
    /// The tag selector rewritten by the stylesheet scoper, as the sanitizer
    /// discards the element it names.
    ///
    /// Default: `body`
    pub root_selector: String,
    /// The tag selector substituted for [`Self::root_selector`].
    ///
    /// Default: `div`
    pub root_replacement: String,
    /// The `id` attribute of the container element wrapping sanitized chapter markup.
    ///
    /// Default: `bw-book-content`
    pub container_id: String,
    /// Entities available when parsing chapter markup and navigation documents.
    ///
    /// Default: [`EntityTable::html`]
    pub entities: EntityTable,
}

impl IngestOptions {
    /// Returns the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`Self::strict`](IngestOptions#structfield.strict).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// See [`Self::scope_selector`](IngestOptions#structfield.scope_selector).
    pub fn scope_selector(mut self, selector: impl Into<String>) -> Self {
        self.scope_selector = selector.into();
        self
    }

    /// See [`Self::root_selector`](IngestOptions#structfield.root_selector)
    /// and [`Self::root_replacement`](IngestOptions#structfield.root_replacement).
    pub fn root_rewrite(mut self, selector: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.root_selector = selector.into();
        self.root_replacement = replacement.into();
        self
    }

    /// See [`Self::container_id`](IngestOptions#structfield.container_id).
    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// See [`Self::entities`](IngestOptions#structfield.entities).
    pub fn entities(mut self, entities: EntityTable) -> Self {
        self.entities = entities;
        self
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            strict: false,
            scope_selector: String::from("#bw-book-content"),
            root_selector: String::from("body"),
            root_replacement: String::from("div"),
            container_id: String::from("bw-book-content"),
            entities: EntityTable::default(),
        }
    }
}
