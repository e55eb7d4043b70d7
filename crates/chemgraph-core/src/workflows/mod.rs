//! # Workflows Module
//!
//! High-level procedures that combine the [`ChemSpace`](crate::engine::space::ChemSpace)
//! arena with external collaborators.
//!
//! ## Overview
//!
//! A workflow receives the space, the target container and the collaborators it needs,
//! and either completes or returns the first error it meets. Workflows never leave
//! temporary state behind on the atoms they touch.
//!
//! - **Hydrogen Addition** ([`hydrogens`]) - Atom-type perception followed by implicit
//!   hydrogen assignment, with the atoms' own type names restored afterwards.

pub mod hydrogens;
