//! Task persistence port.

pub mod repository;
