use std::collections::BTreeSet;

use anyhow::{Result, bail};
use flexstr::ToSharedStr;
use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::artifacts::write_artifacts;
use crate::config::{FailurePolicy, PrepConfig};
use crate::network::{NetworkGenes, read_network_genes};
use crate::ontology::{Ontology, read_ontology};
use crate::types::{GeneSymbol, OntologyLabel, PathwayName};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkStatus {
    Loaded { edge_count: usize },
    // the edge list couldn't be read so the pathways weren't filtered
    Unavailable(String),
}

// Everything derived from one ontology file and the network, ready to be
// written out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedOntology {
    pub label: OntologyLabel,
    pub path_names: Vec<PathwayName>,
    pub path_genes: Vec<Vec<GeneSymbol>>,
    pub all_genes: BTreeSet<GeneSymbol>,
    // None if the network wasn't available
    pub network_genes: Option<BTreeSet<GeneSymbol>>,
    // genes in the ontology that aren't in the network
    pub removed_genes: BTreeSet<GeneSymbol>,
    pub network_status: NetworkStatus,
}

impl PreparedOntology {
    pub fn is_filtered(&self) -> bool {
        matches!(self.network_status, NetworkStatus::Loaded { .. })
    }

    pub fn pathway_count(&self) -> usize {
        self.path_names.len()
    }

    pub fn log_summary(&self) {
        match self.network_status {
            NetworkStatus::Loaded { edge_count } => {
                let network_gene_count =
                    self.network_genes.as_ref().map(BTreeSet::len).unwrap_or_default();
                info!("{}: {} pathways, {} genes kept, {} genes removed, \
                       network has {} genes from {} edges",
                      self.label, self.pathway_count(), self.all_genes.len(),
                      self.removed_genes.len(), network_gene_count, edge_count);
            },
            NetworkStatus::Unavailable(ref reason) => {
                info!("{}: {} pathways, {} genes, not filtered: {}",
                      self.label, self.pathway_count(), self.all_genes.len(), reason);
            },
        }

        if !self.removed_genes.is_empty() {
            debug!("{}: removed genes: {}", self.label, self.removed_genes.iter().join(" "));
        }
    }
}

pub fn all_genes(path_genes: &[Vec<GeneSymbol>]) -> BTreeSet<GeneSymbol> {
    path_genes.iter().flatten().cloned().collect()
}

pub fn gene_difference(all_genes: &BTreeSet<GeneSymbol>,
                       network_genes: &BTreeSet<GeneSymbol>)
    -> BTreeSet<GeneSymbol>
{
    all_genes.difference(network_genes).cloned().collect()
}

// Remove the given genes from every pathway, keeping the order of the
// pathways and of the remaining genes
pub fn filter_pathways(path_genes: Vec<Vec<GeneSymbol>>,
                       removed_genes: &BTreeSet<GeneSymbol>)
    -> Vec<Vec<GeneSymbol>>
{
    path_genes.into_iter()
        .map(|genes| {
            genes.into_iter()
                .filter(|gene| !removed_genes.contains(gene))
                .collect()
        })
        .collect()
}

pub fn validate_label(ontology_label: &str) -> Result<OntologyLabel> {
    let label = ontology_label.trim();

    if label.is_empty() {
        bail!("the ontology label can't be empty");
    }

    if label.contains(['/', '\\']) {
        bail!(r#"the ontology label "{}" can't contain a path separator"#, label);
    }

    Ok(label.to_shared_str())
}

// Filter the ontology against the network.  If the network couldn't be
// loaded the pathways are kept as parsed.
pub fn prepare_from_parts(label: OntologyLabel, ontology: Ontology,
                          network_result: Result<NetworkGenes>)
    -> PreparedOntology
{
    let (path_names, path_genes) = ontology.into_parts();

    match network_result {
        Ok(network_genes) => {
            let unfiltered_genes = all_genes(&path_genes);
            let removed_genes = gene_difference(&unfiltered_genes, &network_genes.genes);
            let path_genes = filter_pathways(path_genes, &removed_genes);
            let all_genes = all_genes(&path_genes);

            PreparedOntology {
                label,
                path_names,
                path_genes,
                all_genes,
                network_status: NetworkStatus::Loaded {
                    edge_count: network_genes.edge_count,
                },
                network_genes: Some(network_genes.genes),
                removed_genes,
            }
        },
        Err(err) => {
            let all_genes = all_genes(&path_genes);

            PreparedOntology {
                label,
                path_names,
                path_genes,
                all_genes,
                network_genes: None,
                removed_genes: BTreeSet::new(),
                network_status: NetworkStatus::Unavailable(format!("{:#}", err)),
            }
        },
    }
}

// Read the ontology file and the network edge list from the data
// directory, filter the pathways and write the artifacts.  Load failures
// are handled according to config.failure_policy.
pub fn prepare_ontology(config: &PrepConfig, ontology_filename: &str, ontology_label: &str)
    -> Result<PreparedOntology>
{
    let label = validate_label(ontology_label)?;

    let ontology_path = config.ontology_path(ontology_filename);

    let ontology = match read_ontology(&ontology_path) {
        Ok(ontology) => ontology,
        Err(err) => match config.failure_policy {
            FailurePolicy::Continue => {
                warn!("File not found: {:#}", err);
                Ontology::default()
            },
            FailurePolicy::Abort => return Err(err.context("File not found")),
        },
    };

    info!("read {} pathways from {}", ontology.len(), ontology_path.display());

    let edge_list_path = config.edge_list_path();

    let network_result = match read_network_genes(&edge_list_path) {
        Ok(network_genes) => {
            info!("read {} network genes from {}", network_genes.len(),
                  edge_list_path.display());
            Ok(network_genes)
        },
        Err(err) => match config.failure_policy {
            FailurePolicy::Continue => {
                warn!("Invalid edge-list: {:#}", err);
                Err(err)
            },
            FailurePolicy::Abort => return Err(err.context("Invalid edge-list")),
        },
    };

    let prepared = prepare_from_parts(label, ontology, network_result);

    prepared.log_summary();

    write_artifacts(&prepared, config.output_dir(), config.artifact_format)?;

    Ok(prepared)
}


#[cfg(test)]
fn gene_vec(genes: &[&str]) -> Vec<GeneSymbol> {
    genes.iter().map(|gene| gene.to_shared_str()).collect()
}

#[test]
fn test_gene_difference() {
    let all: BTreeSet<GeneSymbol> = gene_vec(&["G1", "G2", "G4"]).into_iter().collect();
    let network: BTreeSet<GeneSymbol> = gene_vec(&["G1", "G2", "G3"]).into_iter().collect();

    let diff = gene_difference(&all, &network);

    assert_eq!(diff.into_iter().collect::<Vec<_>>(), gene_vec(&["G4"]));
}

#[test]
fn test_filter_pathways_keeps_order() {
    let path_genes = vec![gene_vec(&["G3", "G9", "G1", "G3"]), gene_vec(&["G9"]), vec![]];
    let removed: BTreeSet<GeneSymbol> = gene_vec(&["G9"]).into_iter().collect();

    let filtered = filter_pathways(path_genes, &removed);

    assert_eq!(filtered, vec![gene_vec(&["G3", "G1", "G3"]), vec![], vec![]]);
}

#[test]
fn test_validate_label() {
    assert_eq!(validate_label(" KEGG ").unwrap().as_str(), "KEGG");
    assert!(validate_label("").is_err());
    assert!(validate_label("../KEGG").is_err());
}
