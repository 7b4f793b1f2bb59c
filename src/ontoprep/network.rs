use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use flexstr::{SharedStr as FlexStr, ToSharedStr};
use tracing::debug;

use crate::input::open_input;
use crate::types::GeneSymbol;

// The genes of an interaction network: every identifier seen at either
// end of an edge
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkGenes {
    pub genes: BTreeSet<GeneSymbol>,
    pub edge_count: usize,
}

impl NetworkGenes {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

// Network files store Entrez IDs as numbers while the ontology files
// store them as text, so numeric identifiers are reduced to the plain
// decimal form of the integer before any comparison: "0042" -> "42"
pub fn canonical_gene_id(raw: &str) -> GeneSymbol {
    let trimmed = raw.trim();

    match trimmed.parse::<i64>() {
        Ok(numeric_id) => FlexStr::from(numeric_id.to_string()),
        Err(_) => trimmed.to_shared_str(),
    }
}

// Read a headerless tab delimited edge list.  Only the first two columns
// are used, anything after them (eg. an edge weight) is ignored.
pub fn parse_network_genes<R: Read>(reader: R, source: &str) -> Result<NetworkGenes> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let mut network_genes = NetworkGenes::default();

    for result in csv_reader.records() {
        let record = result
            .with_context(|| format!("failed to read edge list {}", source))?;

        let line_no = record.position().map(|pos| pos.line()).unwrap_or_default();

        if record.len() < 2 {
            bail!("{}:{}: expected two gene columns, found {}",
                  source, line_no, record.len());
        }

        for endpoint in [&record[0], &record[1]] {
            let gene = canonical_gene_id(endpoint);
            if gene.is_empty() {
                bail!("{}:{}: empty gene identifier", source, line_no);
            }
            network_genes.genes.insert(gene);
        }

        network_genes.edge_count += 1;
    }

    if network_genes.edge_count == 0 {
        bail!("{}: edge list has no edges", source);
    }

    debug!("read {} edges between {} genes from {}",
           network_genes.edge_count, network_genes.len(), source);

    Ok(network_genes)
}

pub fn read_network_genes(path: &Path) -> Result<NetworkGenes> {
    let reader = open_input(path)?;
    let source = path.display().to_string();

    parse_network_genes(reader, &source)
}


#[test]
fn test_canonical_gene_id() {
    assert_eq!(canonical_gene_id("5232").as_str(), "5232");
    assert_eq!(canonical_gene_id(" 0042 ").as_str(), "42");
    assert_eq!(canonical_gene_id("-7").as_str(), "-7");
    assert_eq!(canonical_gene_id("TP53").as_str(), "TP53");
    assert_eq!(canonical_gene_id("12.5").as_str(), "12.5");
}

#[test]
fn test_parse_network_genes() {
    let input = "1\t2\t0.61\n2\t3\t0.12\n0003\t4\t0.9\n";
    let network_genes = parse_network_genes(input.as_bytes(), "test").unwrap();

    assert_eq!(network_genes.edge_count, 3);
    let genes: Vec<&str> = network_genes.genes.iter().map(|gene| gene.as_str()).collect();
    assert_eq!(genes, vec!["1", "2", "3", "4"]);
}

#[test]
fn test_parse_network_genes_single_column() {
    let input = "1\t2\n3\n";
    let err = parse_network_genes(input.as_bytes(), "edges.dat").unwrap_err();

    assert!(err.to_string().contains("edges.dat:2"));
}

#[test]
fn test_parse_network_genes_no_edges() {
    let err = parse_network_genes("".as_bytes(), "empty.dat").unwrap_err();
    assert!(err.to_string().contains("empty.dat: edge list has no edges"));

    assert!(parse_network_genes("\n\n".as_bytes(), "blank.dat").is_err());
}
