//! # ChemGraph Core Library
//!
//! A mutable, observable, cloneable chemical-graph object model: atoms, bonds, lone pairs
//! and single electrons assembled into containers, rings, crystals, polymers, reactions
//! and the aggregates above them.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture, leaves first.
//!
//! - **[`core`]: The Foundation.** Plain value types (`Atom`, `Bond`, `AtomContainer`,
//!   `MolecularFormula`, ...), the ChemObject base data (identifier, properties, flags,
//!   listeners), and stateless helpers such as the periodic table, the isotope table, the
//!   atom-type registry and the diff utilities.
//!
//! - **[`engine`]: The Logic Core.** The [`engine::space::ChemSpace`] arena owns every
//!   entity and is the single construction entry point. It enforces the graph invariants,
//!   dispatches change notifications, and performs identity-remapping deep copies.
//!
//! - **[`workflows`]: The Public API.** Procedures composed from the engine and external
//!   collaborators, such as atom-type perception followed by implicit hydrogen addition.
//!
//! ```
//! use chemgraph::core::models::bond::BondOrder;
//! use chemgraph::engine::space::ChemSpace;
//!
//! let mut space = ChemSpace::new();
//! let acetone = space.new_atom_container();
//! let c1 = space.new_atom("C");
//! let o = space.new_atom("O");
//! space.add_atom(acetone, c1).unwrap();
//! space.add_atom(acetone, o).unwrap();
//! space.add_new_bond(acetone, 0, 1, BondOrder::Double).unwrap();
//!
//! assert_eq!(space.bond_order_sum(acetone, c1).unwrap(), 2.0);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
