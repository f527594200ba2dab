//! Row structs for the `tutorials` table.

pub mod tutorial;
