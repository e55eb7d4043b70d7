/// Crystallographic metadata of an atom read from a PDB `ATOM`/`HETATM` record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbRecord {
    pub record: Option<String>,
    pub serial: Option<u32>,
    pub name: Option<String>,
    pub alt_loc: Option<String>,
    pub res_name: Option<String>,
    pub chain_id: Option<String>,
    pub res_seq: Option<String>,
    pub i_code: Option<String>,
    pub seg_id: Option<String>,
    pub occupancy: Option<f64>,
    pub temp_factor: Option<f64>,
    pub hetatm: bool,
    pub oxt: bool,
}

/// Residue-level PDB metadata attached to a monomer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbResidue {
    pub res_seq: Option<String>,
    pub i_code: Option<String>,
    pub chain_id: Option<String>,
}

/// A secondary-structure segment (`HELIX`, `SHEET`, `TURN`) of a PDB polymer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbStructure {
    pub structure_type: Option<String>,
    pub start_chain_id: Option<char>,
    pub start_sequence_number: Option<i32>,
    pub start_insertion_code: Option<char>,
    pub end_chain_id: Option<char>,
    pub end_sequence_number: Option<i32>,
    pub end_insertion_code: Option<char>,
}
