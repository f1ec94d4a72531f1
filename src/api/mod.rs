// src/api/mod.rs
//! Prismic API interaction: the ability to retrieve posts from a repository.
//!
//! This module keeps I/O ([`client`]), wire parsing ([`parser`],
//! `responses`) and the pagination walk ([`pagination`]) apart. Business
//! logic depends on the [`ContentSource`](crate::algebras::ContentSource)
//! trait, never on HTTP details.

pub mod client;
pub mod pagination;
pub mod parser;
pub mod responses;
mod types;

pub use client::{ApiResponse, PrismicHttpClient};
pub use pagination::PaginationTracker;
pub use types::{at_predicate, Ordering, QueryOptions};
