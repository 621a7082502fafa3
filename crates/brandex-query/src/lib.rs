//! Read-only queries over a reconciled brand table.
//!
//! [`filter`] narrows the table with a [`FilterPredicate`]; [`count_by`]
//! summarises any sequence of records by one field. Nothing here mutates the
//! table. Reloading is done by swapping tables in a [`Catalog`].

pub mod catalog;
pub mod error;
pub mod lookup;
pub mod predicate;
pub mod view;

pub use catalog::Catalog;
pub use error::QueryError;
pub use lookup::{find_brand, find_brand_strict, find_by_key};
pub use predicate::FilterPredicate;
pub use view::{count_by, distinct_values, filter, BrandView, FacetCount};
