//! Dataroom domain entities.

pub mod model;

pub use model::{CreateDataroom, Dataroom};
