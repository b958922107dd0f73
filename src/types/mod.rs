//! Core value types shared across the crate.

mod colour;

pub use colour::Colour;
