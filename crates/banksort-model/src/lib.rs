//! Domain types shared by the bank sorting crates.
//!
//! Everything here is plain data: no I/O, no scheduling, no host bindings.

mod domain;
pub use domain::*;
