//! Stable selection identity for heterogeneous backend records.
//!
//! List endpoints in the wild disagree about which field identifies a row:
//! some records carry a `uuid`, some a resource-specific primary key, some
//! only a generic `id`. Selection state must not care. This module maps
//! every record shape to one opaque [`ItemId`] through an ordered
//! [`IdentityResolver`], built once per view and never hand-rolled per
//! call site.
//!
//! Records for which no extractor yields an ID are excluded from all
//! selection operations; that is a filtering rule, not an error.
//!
//! # Example
//!
//! ```
//! use rollcall::identity::{IdentityResolver, ItemId};
//!
//! struct DocumentRow {
//!     uuid: Option<String>,
//!     document_id: Option<String>,
//!     id: Option<String>,
//! }
//!
//! // First non-empty field wins, deterministically.
//! let resolver = IdentityResolver::new()
//!     .field(|row: &DocumentRow| row.uuid.clone())
//!     .field(|row| row.document_id.clone())
//!     .field(|row| row.id.clone());
//!
//! let row = DocumentRow {
//!     uuid: None,
//!     document_id: Some("doc-41".into()),
//!     id: Some("41".into()),
//! };
//! assert_eq!(resolver.resolve(&row), Some(ItemId::from("doc-41")));
//! ```

use std::fmt;
use std::sync::Arc;

/// An opaque, stable identifier for a selectable item.
///
/// IDs are plain strings under the hood; equality and hashing are all the
/// selection machinery ever needs from them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    /// The string form of this ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Trait for record types that can produce their own selection ID.
///
/// Implement this when a row type has one obvious identity and no
/// per-view resolution order is needed; [`IdentityResolver::identified`]
/// bridges it into the resolver API.
pub trait Identified {
    /// The stable selection ID of this record, if it has one.
    fn identity(&self) -> Option<ItemId>;
}

/// Type alias for a single identity extractor function.
pub type IdExtractor<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// An ordered identity resolver: the first extractor returning a
/// non-empty value wins.
///
/// The conventional order for REST-backed rows is `uuid`, then the
/// resource's primary-key field, then a generic `id`.
pub struct IdentityResolver<T> {
    extractors: Vec<IdExtractor<T>>,
}

impl<T> Default for IdentityResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IdentityResolver<T> {
    /// Creates a resolver with no extractors (resolves nothing).
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Appends a field extractor with the next-lower priority.
    ///
    /// Extractors returning `None` or an empty string pass resolution on
    /// to the next extractor in order.
    pub fn field<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.extractors.push(Arc::new(extractor));
        self
    }

    /// Resolves an item to its selection ID, or `None` if no extractor
    /// yields one.
    pub fn resolve(&self, item: &T) -> Option<ItemId> {
        self.extractors
            .iter()
            .find_map(|extract| extract(item).filter(|value| !value.is_empty()))
            .map(ItemId)
    }

    /// Resolves a page of items, silently dropping items without an ID.
    pub fn resolve_page<'a, I>(&self, items: I) -> Vec<ItemId>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        items
            .into_iter()
            .filter_map(|item| self.resolve(item))
            .collect()
    }
}

impl<T: Identified> IdentityResolver<T> {
    /// A resolver that defers to the record's own [`Identified`] impl.
    pub fn identified() -> Self {
        Self::new().field(|item: &T| item.identity().map(|id| id.0))
    }
}

impl<T> Clone for IdentityResolver<T> {
    fn clone(&self) -> Self {
        Self {
            extractors: self.extractors.clone(),
        }
    }
}

impl<T> fmt::Debug for IdentityResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("extractors", &self.extractors.len())
            .finish()
    }
}
