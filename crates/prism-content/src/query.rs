//! Query types for the content store
//!
//! A query names a block and a scope, then narrows with a [`Filter`] that
//! can match on parent linkage, literal content paths, or indexer entries.
//! Ordering and pagination are applied after filtering; `total` always
//! counts matches before the page window.

use crate::record::ContentRecord;
use prism_core::TenantScope;
use serde_json::Value;

/// Predicate over content records.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Match every record of the block/scope
    All,
    /// Match records linked to the given parent
    ParentId(String),
    /// Match a literal content field by dot path
    Field {
        /// Dot-separated path into the content payload
        path: String,
        /// Value the field must equal
        value: Value,
    },
    /// Match a promoted indexer entry
    Indexed {
        /// Indexer key (the definition's indexer path)
        field: String,
        /// Value the entry must equal
        value: Value,
    },
    /// All sub-filters must match
    And(Vec<Filter>),
}

impl Filter {
    /// Field-equality filter
    pub fn field(path: impl Into<String>, value: Value) -> Self {
        Self::Field {
            path: path.into(),
            value,
        }
    }

    /// Indexer-equality filter
    pub fn indexed(field: impl Into<String>, value: Value) -> Self {
        Self::Indexed {
            field: field.into(),
            value,
        }
    }

    /// True when the record satisfies this filter
    pub fn matches(&self, record: &ContentRecord) -> bool {
        match self {
            Self::All => true,
            Self::ParentId(parent) => record.parent_id.as_deref() == Some(parent.as_str()),
            Self::Field { path, value } => record.content_field(path) == Some(value),
            Self::Indexed { field, value } => record.indexer.get(field) == Some(value),
            Self::And(filters) => filters.iter().all(|f| f.matches(record)),
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::All
    }
}

/// Sort order for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    /// Oldest first
    CreatedAsc,
    /// Newest first
    CreatedDesc,
    /// Least recently updated first
    UpdatedAsc,
    /// Most recently updated first
    UpdatedDesc,
}

impl OrderBy {
    fn sort(&self, records: &mut [ContentRecord]) {
        match self {
            Self::CreatedAsc => records.sort_by_key(|r| r.created_at),
            Self::CreatedDesc => records.sort_by_key(|r| std::cmp::Reverse(r.created_at)),
            Self::UpdatedAsc => records.sort_by_key(|r| r.updated_at),
            Self::UpdatedDesc => records.sort_by_key(|r| std::cmp::Reverse(r.updated_at)),
        }
    }
}

/// A content store query.
#[derive(Debug, Clone)]
pub struct Query {
    /// Block type to query
    pub block: String,
    /// Scope to query; applied literally, never widened
    pub scope: TenantScope,
    /// Record predicate
    pub filter: Filter,
    /// Maximum number of items to return
    pub limit: Option<usize>,
    /// Number of matching items to skip
    pub offset: Option<usize>,
    /// Sort order, applied before pagination
    pub order: Option<OrderBy>,
}

impl Query {
    /// Query all records of a block within a scope
    pub fn new(block: impl Into<String>, scope: TenantScope) -> Self {
        Self {
            block: block.into(),
            scope,
            filter: Filter::All,
            limit: None,
            offset: None,
            order: None,
        }
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the sort order
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Apply filter, order, and pagination to a scanned row set.
    pub(crate) fn apply(&self, mut rows: Vec<ContentRecord>) -> Page<ContentRecord> {
        rows.retain(|record| self.filter.matches(record));
        if let Some(order) = self.order {
            order.sort(&mut rows);
        }
        let total = rows.len();
        let items = rows
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();
        Page { items, total }
    }
}

/// A page of results plus the total match count.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Page<T> {
    /// The records in this page
    pub items: Vec<T>,
    /// Total matches before pagination
    pub total: usize,
}

impl<T> Page<T> {
    /// A page holding exactly one item
    pub fn single(item: T) -> Self {
        Self {
            items: vec![item],
            total: 1,
        }
    }

    /// An empty page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
