//! Single-step element selectors.
//!
//! Only the forms the page needs are supported: `tag`, `#id`, `.class` and
//! `[attr='value']`. There are no combinators; scoping is done by querying
//! under a given node.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A selector matching one element property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by tag name.
    Tag(String),
    /// Match by element id.
    Id(String),
    /// Match elements carrying a class.
    Class(String),
    /// Match elements whose attribute equals a value.
    Attr {
        /// Attribute name.
        name: String,
        /// Expected value.
        value: String,
    },
}

impl Selector {
    /// Selector for the element with the given id.
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Selector for elements with the given class.
    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Selector for elements with the given tag.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Selector for elements whose attribute `name` equals `value`.
    #[must_use]
    pub fn attr(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attr {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSelector {
            selector: s.to_string(),
        };
        let s = s.trim();

        if let Some(id) = s.strip_prefix('#') {
            return non_empty(id).map(Self::id).ok_or_else(invalid);
        }
        if let Some(class) = s.strip_prefix('.') {
            return non_empty(class).map(Self::class).ok_or_else(invalid);
        }
        if let Some(body) = s.strip_prefix('[') {
            let body = body.strip_suffix(']').ok_or_else(invalid)?;
            let (name, value) = body.split_once('=').ok_or_else(invalid)?;
            let value = unquote(value.trim()).ok_or_else(invalid)?;
            return non_empty(name.trim())
                .map(|name| Self::attr(name, value))
                .ok_or_else(invalid);
        }
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Ok(Self::tag(s));
        }
        Err(invalid())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Attr { name, value } => write!(f, "[{name}='{value}']"),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn unquote(value: &str) -> Option<&str> {
    for quote in ['\'', '"'] {
        if let Some(inner) = value.strip_prefix(quote) {
            return inner.strip_suffix(quote);
        }
    }
    Some(value)
}
