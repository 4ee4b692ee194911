#![warn(clippy::all, clippy::pedantic)]

pub mod catalog_tests;
pub mod engine_tests;
pub mod persistence_tests;
