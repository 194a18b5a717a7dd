// src/instruments/mod.rs

//! Concrete instrument models.

pub mod hp3458a;
pub mod hp6652a;

pub use hp3458a::Hp3458a;
pub use hp6652a::Hp6652a;
