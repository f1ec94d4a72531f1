// src/api/types.rs
//! Query types for the Prismic search endpoint.

use std::fmt;

/// Sort key for a query, e.g. `document.first_publication_date desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

impl Ordering {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "{} desc", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Options accepted by `query_by_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Results per page; Prismic's default applies when `None`.
    pub page_size: Option<u32>,
    /// Only return documents after this document ID.
    pub after: Option<String>,
    pub orderings: Vec<Ordering>,
    /// Restrict returned fields (`<type>.<field>`).
    pub fetch: Vec<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn after(mut self, document_id: impl Into<String>) -> Self {
        self.after = Some(document_id.into());
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    /// Restricts the response to the given fields of `doc_type`.
    pub fn fetch_fields(mut self, doc_type: &str, fields: &[&str]) -> Self {
        self.fetch
            .extend(fields.iter().map(|field| format!("{}.{}", doc_type, field)));
        self
    }

    /// The `orderings` query parameter, e.g. `[my.posts.date desc]`.
    pub fn orderings_param(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        let joined = self
            .orderings
            .iter()
            .map(Ordering::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("[{}]", joined))
    }

    /// The `fetch` query parameter, comma separated.
    pub fn fetch_param(&self) -> Option<String> {
        if self.fetch.is_empty() {
            None
        } else {
            Some(self.fetch.join(","))
        }
    }
}

/// Builds a single-predicate query: `[[at(path,"value")]]`.
pub fn at_predicate(path: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[[at({},\"{}\")]]", path, escaped)
}
