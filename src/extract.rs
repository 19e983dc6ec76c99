//! Ordered fallback chains for reading one field out of one container.
//!
//! A [`Field`] owns its strategies in priority order; [`first_non_empty`] walks
//! them and stops at the first one that produces non-blank text. A strategy that
//! errors is treated exactly like one that found nothing.

use regex::Regex;

use crate::{listing::NA, page::Node, util::non_empty};

/// One container together with its full text, read once per container.
pub struct Scope<'s, N> {
    pub node: &'s N,
    pub text: &'s str,
}

impl<'s, N> Scope<'s, N> {
    #[inline]
    pub const fn new(node: &'s N, text: &'s str) -> Self {
        Self { node, text }
    }
}

#[derive(Debug)]
pub enum Strategy {
    /// Text of the first descendant matching `selector`.
    Text {
        selector: &'static str,
        pattern: Option<Regex>,
    },
    /// Attribute `name` of the first descendant matching `selector`.
    Attr {
        selector: &'static str,
        name: &'static str,
        pattern: Option<Regex>,
    },
    /// Regex over the container's whole text.
    FullText {
        pattern: Regex,
        collapse: bool,
        join: Option<&'static str>,
    },
}

impl Strategy {
    pub const fn text(selector: &'static str) -> Self {
        Self::Text {
            selector,
            pattern: None,
        }
    }

    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self::Attr {
            selector,
            name,
            pattern: None,
        }
    }

    pub const fn full_text(pattern: Regex) -> Self {
        Self::FullText {
            pattern,
            collapse: false,
            join: None,
        }
    }

    /// Keeps only what `re` captures (group 1, else the whole match) from the raw value.
    #[must_use]
    pub fn matching(mut self, re: Regex) -> Self {
        match &mut self {
            Self::Text { pattern, .. } | Self::Attr { pattern, .. } => *pattern = Some(re),
            Self::FullText { pattern, .. } => *pattern = re,
        }
        self
    }

    /// Full-text only: match against whitespace-collapsed text.
    #[must_use]
    pub fn collapsed(mut self) -> Self {
        if let Self::FullText { collapse, .. } = &mut self {
            *collapse = true;
        }
        self
    }

    /// Full-text only: take every match, joined by `sep`, instead of the first.
    #[must_use]
    pub fn join_all(mut self, sep: &'static str) -> Self {
        if let Self::FullText { join, .. } = &mut self {
            *join = Some(sep);
        }
        self
    }

    pub fn eval<N: Node>(&self, scope: &Scope<'_, N>) -> anyhow::Result<Option<String>> {
        match self {
            Self::Text { selector, pattern } => {
                let Some(el) = scope.node.select_first(selector)? else {
                    return Ok(None);
                };
                let text = el.text_content()?;
                Ok(refine(text, pattern.as_ref()))
            }
            Self::Attr {
                selector,
                name,
                pattern,
            } => {
                let Some(el) = scope.node.select_first(selector)? else {
                    return Ok(None);
                };
                Ok(el
                    .attribute(name)?
                    .and_then(|value| refine(value, pattern.as_ref())))
            }
            Self::FullText {
                pattern,
                collapse,
                join,
            } => {
                let collapsed;
                let haystack = if *collapse {
                    collapsed = crate::util::collapse_whitespace(scope.text);
                    &*collapsed
                } else {
                    scope.text
                };
                Ok(match join {
                    Some(sep) => {
                        let all = pattern
                            .find_iter(haystack)
                            .map(|m| m.as_str())
                            .collect::<Vec<_>>();
                        (!all.is_empty()).then(|| all.join(sep))
                    }
                    None => capture(pattern, haystack).map(ToOwned::to_owned),
                })
            }
        }
    }
}

fn refine(raw: String, pattern: Option<&Regex>) -> Option<String> {
    match pattern {
        Some(re) => capture(re, &raw).map(ToOwned::to_owned),
        None => Some(raw),
    }
}

fn capture<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    let caps = re.captures(haystack)?;
    caps.get(1).or_else(|| caps.get(0)).map(|m| m.as_str())
}

/// Evaluates `strategies` in order and returns the first trimmed, non-blank result.
///
/// Strategies after the first success are never evaluated.
pub fn first_non_empty<I, F>(strategies: I, mut eval: F) -> Option<String>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> anyhow::Result<Option<String>>,
{
    for (idx, strategy) in strategies.into_iter().enumerate() {
        match eval(strategy) {
            Ok(Some(value)) => {
                if let Some(value) = non_empty(&value) {
                    return Some(value.to_owned());
                }
            }
            Ok(None) => (),
            Err(e) => tracing::trace!(target: "extract", "strategy #{idx} failed: {e}"),
        }
    }
    None
}

/// A named field and its strategies, most trusted first.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub strategies: Vec<Strategy>,
}

impl Field {
    pub const fn new(name: &'static str, strategies: Vec<Strategy>) -> Self {
        Self { name, strategies }
    }

    /// `None` when every strategy missed.
    pub fn resolve<N: Node>(&self, scope: &Scope<'_, N>) -> Option<String> {
        let value = first_non_empty(&self.strategies, |s| s.eval(scope));
        if value.is_none() {
            tracing::trace!(target: "extract", "{}: no strategy matched", self.name);
        }
        value
    }

    pub fn extract<N: Node>(&self, scope: &Scope<'_, N>) -> String {
        self.resolve(scope).unwrap_or_else(|| NA.to_owned())
    }
}

#[derive(Debug)]
pub enum Evidence {
    /// Any of these phrases appears verbatim in the container text.
    Phrase(&'static [&'static str]),
    /// A descendant matches this selector.
    Badge(&'static str),
}

/// A yes/no field: true only when some piece of evidence is found.
#[derive(Debug)]
pub struct Flag {
    pub name: &'static str,
    pub evidence: Vec<Evidence>,
}

impl Flag {
    pub const fn new(name: &'static str, evidence: Vec<Evidence>) -> Self {
        Self { name, evidence }
    }

    pub fn detect<N: Node>(&self, scope: &Scope<'_, N>) -> bool {
        self.evidence.iter().any(|evidence| match evidence {
            Evidence::Phrase(phrases) => phrases.iter().any(|p| scope.text.contains(p)),
            Evidence::Badge(selector) => match scope.node.select_first(selector) {
                Ok(found) => found.is_some(),
                Err(e) => {
                    tracing::trace!(target: "extract", "{}: badge probe failed: {e}", self.name);
                    false
                }
            },
        })
    }
}
