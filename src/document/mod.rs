//! Bridging parsed documents and [`Value`](crate::reflect::Value).
//!
//! Documents loaded from YAML or JSON become maps, lists and scalars that
//! paths can walk; results are written back out through `serde`.

pub mod convert;
pub mod serialize;

pub use convert::{from_json, from_yaml};
