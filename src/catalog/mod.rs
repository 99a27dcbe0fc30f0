//! Static service catalog
//!
//! Offerings are read-only reference data loaded once from the built-in
//! list. Filtering is pure and keeps the catalog's declaration order.

mod filter;
mod offering;

pub use filter::CatalogFilter;
pub use offering::{Catalog, ClassType, ServiceOffering};
