pub mod selection;
pub mod structure;
