//! The two operations the extraction engine needs from a rendered page:
//! selecting elements in document order and reading what is inside them.
//!
//! [`Snapshot`] backs both traits with a markup copy parsed by `scraper`, which is
//! how a live tab is read once the operator has pressed the start button.

use scraper::{ElementRef, Html, Selector};

/// A handle into the page's element tree.
pub trait Node: Sized {
    /// Every descendant matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> anyhow::Result<Vec<Self>>;

    fn select_first(&self, selector: &str) -> anyhow::Result<Option<Self>> {
        Ok(self.select_all(selector)?.into_iter().next())
    }

    /// Concatenated text of the subtree, like the DOM's `textContent`.
    fn text_content(&self) -> anyhow::Result<String>;

    fn attribute(&self, name: &str) -> anyhow::Result<Option<String>>;
}

pub trait Page {
    type Node<'a>: Node
    where
        Self: 'a;

    fn select_all(&self, selector: &str) -> anyhow::Result<Vec<Self::Node<'_>>>;

    /// Full markup, used for the diagnostic dump.
    fn markup(&self) -> anyhow::Result<String>;
}

pub fn parse_selector(selector: &str) -> anyhow::Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("bad selector {selector:?}: {e}"))
}

pub struct Snapshot {
    source: String,
    html: Html,
}

impl Snapshot {
    pub fn parse(source: String) -> Self {
        let html = Html::parse_document(&source);
        Self { source, html }
    }
}

impl Page for Snapshot {
    type Node<'a> = ElementRef<'a>;

    fn select_all(&self, selector: &str) -> anyhow::Result<Vec<ElementRef<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    fn markup(&self) -> anyhow::Result<String> {
        Ok(self.source.clone())
    }
}

impl Node for ElementRef<'_> {
    fn select_all(&self, selector: &str) -> anyhow::Result<Vec<Self>> {
        let selector = parse_selector(selector)?;
        Ok(self.select(&selector).collect())
    }

    fn select_first(&self, selector: &str) -> anyhow::Result<Option<Self>> {
        let selector = parse_selector(selector)?;
        Ok(self.select(&selector).next())
    }

    fn text_content(&self) -> anyhow::Result<String> {
        Ok(self.text().collect())
    }

    fn attribute(&self, name: &str) -> anyhow::Result<Option<String>> {
        Ok(self.value().attr(name).map(ToOwned::to_owned))
    }
}
