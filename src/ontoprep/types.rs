use flexstr::SharedStr as FlexStr;

// gene symbols from the ontology file, and canonical IDs from the network
pub type GeneSymbol = FlexStr;
pub type PathwayName = FlexStr;
pub type PathwayDescription = FlexStr;

// eg. "KEGG" or "PID"
pub type OntologyLabel = FlexStr;
