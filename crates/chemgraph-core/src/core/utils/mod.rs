pub mod diff;
pub mod isotope_table;
pub mod periodic_table;
