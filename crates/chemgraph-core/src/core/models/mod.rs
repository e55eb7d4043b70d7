pub mod atom;
pub mod atom_type;
pub mod bond;
pub mod chem_model;
pub mod container;
pub mod electron;
pub mod element;
pub mod ids;
pub mod isotope;
pub mod pdb;
pub mod reaction;
pub mod set;
pub mod stereo;
