//! # Core Module
//!
//! The value layer of ChemGraph: every type here is plain data that can be created,
//! compared and cloned without an arena. The [`crate::engine`] layer stores these values
//! inside a `ChemSpace` and adds identity, notification and graph invariants on top.
//!
//! ## Architecture
//!
//! - **ChemObject base** ([`object`]) - identifier, property bag, boolean flags, listeners
//! - **Chemical entities** ([`models`]) - elements, isotopes, atom types, atoms, bonds,
//!   electron containers, stereo descriptors, containers and aggregates
//! - **Formula arithmetic** ([`formula`]) - isotope tallies with charge accumulation
//! - **Typing collaborators** ([`typing`]) - atom-type registry, matcher and hydrogen adder
//! - **Utilities** ([`utils`]) - periodic table, isotope table and diff helpers

pub mod formula;
pub mod models;
pub mod object;
pub mod typing;
pub mod utils;
