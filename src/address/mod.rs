// src/address/mod.rs
mod spec;

pub use spec::{AddressError, AddressSpec, PortMode, RangeSide};
