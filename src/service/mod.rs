//! Use-case services over the entity store.

pub mod garden;

pub use garden::Garden;
