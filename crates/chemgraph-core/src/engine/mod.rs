//! # Engine Module
//!
//! The stateful layer of ChemGraph. A [`space::ChemSpace`] owns every atom, bond,
//! electron container, atom container, set, reaction and model, and is the only way to
//! create or mutate them.
//!
//! ## Responsibilities
//!
//! - **Construction** - the space is the builder; its [`config::BuilderFlavor`] decides
//!   whether the objects it builds notify listeners
//! - **Graph invariants** - bonds only reference member atoms, atom removal cascades to
//!   electron containers and stereo elements, atom replacement is positional
//! - **Change notification** - mutations dispatch events to an object's listeners and to
//!   the listeners of every object it is attached to
//! - **Deep copy** - clones remap every internal reference to the copied objects
//! - **Typing collaborators** ([`typing`]) - the atom-type matcher and hydrogen adder
//!   seams used by the perception workflow
//!
//! Errors are reported through [`error::ChemError`]; a failed call leaves the space as it
//! was.

pub mod config;
pub mod error;
pub mod space;
pub mod typing;
