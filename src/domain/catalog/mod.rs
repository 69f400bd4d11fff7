//! Product catalog domain module.
//!
//! Products back ingredient autocomplete only; the portion calculator never
//! consults them.

mod product;

pub use product::Product;
