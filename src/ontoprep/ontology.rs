use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use flexstr::ToSharedStr;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::open_input;
use crate::types::{GeneSymbol, PathwayDescription, PathwayName};

// One line of a pathway file: the name, a description or URL that
// nothing downstream uses, then the gene symbols
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Pathway {
    pub name: PathwayName,
    #[serde(skip_serializing_if="Option::is_none", default)]
    pub description: Option<PathwayDescription>,
    pub genes: Vec<GeneSymbol>,
}

impl Pathway {
    pub fn from_line(line: &str) -> Pathway {
        let mut fields = line.trim_end().split('\t');

        let name = fields.next().unwrap_or_default().to_shared_str();
        let description = fields.next()
            .filter(|desc| !desc.is_empty())
            .map(|desc| desc.to_shared_str());
        let genes = fields
            .filter(|gene| !gene.is_empty())
            .map(|gene| gene.to_shared_str())
            .collect();

        Pathway {
            name,
            description,
            genes,
        }
    }
}

// The pathways of an ontology in file order.  The name and gene list
// sequences are both derived from the same records so position i of one
// always belongs with position i of the other.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Ontology {
    pub pathways: Vec<Pathway>,
}

impl Ontology {
    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }

    pub fn path_names(&self) -> Vec<PathwayName> {
        self.pathways.iter().map(|pathway| pathway.name.clone()).collect()
    }

    pub fn into_parts(self) -> (Vec<PathwayName>, Vec<Vec<GeneSymbol>>) {
        self.pathways.into_iter()
            .map(|pathway| (pathway.name, pathway.genes))
            .unzip()
    }

    pub fn pathway_by_name(&self, name: &str) -> Option<&Pathway> {
        self.pathways.iter().find(|pathway| pathway.name.as_str() == name)
    }
}

pub fn parse_ontology<R: BufRead>(reader: R, source: &str) -> Result<Ontology> {
    let mut pathways = vec![];

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result
            .with_context(|| format!("{}:{}: failed to read line", source, idx + 1))?;

        if line.trim().is_empty() {
            debug!("{}:{}: skipping blank line", source, idx + 1);
            continue;
        }

        pathways.push(Pathway::from_line(&line));
    }

    Ok(Ontology {
        pathways,
    })
}

pub fn read_ontology(path: &Path) -> Result<Ontology> {
    let reader = open_input(path)?;
    let source = path.display().to_string();

    parse_ontology(reader, &source)
}


#[test]
fn test_pathway_from_line() {
    let pathway =
        Pathway::from_line("KEGG_GLYCOLYSIS_GLUCONEOGENESIS\thttp://www.broadinstitute.org/gsea/msigdb/cards/KEGG_GLYCOLYSIS_GLUCONEOGENESIS\t55902\t2645\t5232\n");

    assert_eq!(pathway.name.as_str(), "KEGG_GLYCOLYSIS_GLUCONEOGENESIS");
    assert!(pathway.description.is_some());
    assert_eq!(pathway.genes, vec!["55902".to_shared_str(), "2645".to_shared_str(),
                                   "5232".to_shared_str()]);
}

#[test]
fn test_pathway_from_short_lines() {
    let name_only = Pathway::from_line("PathA");
    assert_eq!(name_only.name.as_str(), "PathA");
    assert_eq!(name_only.description, None);
    assert!(name_only.genes.is_empty());

    // trailing tabs are trimmed and doubled tabs don't make empty genes
    let gappy = Pathway::from_line("PathB\tdesc\tG1\t\tG2\t\t\n");
    assert_eq!(gappy.genes, vec!["G1".to_shared_str(), "G2".to_shared_str()]);
}

#[test]
fn test_parse_ontology_keeps_order() {
    let input = "PathA\tdesc\tG1\tG2\tG3\n\nPathB\tdesc\tG2\tG4\tG2\n";
    let ontology = parse_ontology(input.as_bytes(), "test").unwrap();

    assert_eq!(ontology.len(), 2);
    assert_eq!(ontology.path_names(), vec!["PathA".to_shared_str(), "PathB".to_shared_str()]);
    // duplicates within a pathway are kept
    assert_eq!(ontology.pathway_by_name("PathB").unwrap().genes.len(), 3);
}
