pub mod types;
pub mod constants;
pub mod config;
pub mod input;
pub mod ontology;
pub mod network;
pub mod prepare;
pub mod artifacts;
