use std::collections::BTreeSet;
use std::fs::{File, create_dir_all, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;
use zstd::stream::{Decoder, Encoder};

use crate::config::ArtifactFormat;
use crate::constants::{ALL_GENES_ARTIFACT_SUFFIX, NETWORK_GENES_ARTIFACT_NAME,
                       PATH_GENES_ARTIFACT_SUFFIX, PATH_NAMES_ARTIFACT_SUFFIX,
                       ZSTD_COMPRESSION_LEVEL};
use crate::prepare::PreparedOntology;
use crate::types::{GeneSymbol, PathwayName};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub path_genes: PathBuf,
    pub all_genes: PathBuf,
    pub path_names: PathBuf,
    // not written if the network couldn't be read
    pub network_genes: Option<PathBuf>,
}

impl ArtifactPaths {
    pub fn new(output_dir: &Path, label: &str, format: ArtifactFormat) -> ArtifactPaths {
        ArtifactPaths {
            path_genes: output_dir.join(labelled_file_name(label, PATH_GENES_ARTIFACT_SUFFIX, format)),
            all_genes: output_dir.join(labelled_file_name(label, ALL_GENES_ARTIFACT_SUFFIX, format)),
            path_names: output_dir.join(labelled_file_name(label, PATH_NAMES_ARTIFACT_SUFFIX, format)),
            network_genes: Some(output_dir.join(network_genes_file_name(format))),
        }
    }
}

// The artifacts as a downstream analysis sees them after reading them back
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredArtifacts {
    pub path_genes: Vec<Vec<GeneSymbol>>,
    pub all_genes: BTreeSet<GeneSymbol>,
    pub path_names: Vec<PathwayName>,
    pub network_genes: Option<BTreeSet<GeneSymbol>>,
}

pub fn labelled_file_name(label: &str, suffix: &str, format: ArtifactFormat) -> String {
    format!("{}_{}.{}", label, suffix, format.extension())
}

pub fn network_genes_file_name(format: ArtifactFormat) -> String {
    format!("{}.{}", NETWORK_GENES_ARTIFACT_NAME, format.extension())
}

fn write_artifact<T: Serialize + ?Sized>(value: &T, path: &Path, format: ArtifactFormat)
    -> Result<()>
{
    let file = File::create(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        ArtifactFormat::Json => {
            serde_json::to_writer(&mut writer, value)
                .with_context(|| format!("unable to write {}", path.display()))?;
            writer.flush()?;
        },
        ArtifactFormat::ZstdJson => {
            let mut encoder = Encoder::new(writer, ZSTD_COMPRESSION_LEVEL)?;
            serde_json::to_writer(&mut encoder, value)
                .with_context(|| format!("unable to write {}", path.display()))?;
            encoder.finish()?.flush()?;
        },
    }

    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path, format: ArtifactFormat) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut decoded_json = String::new();

    match format {
        ArtifactFormat::Json => {
            let mut reader = reader;
            reader.read_to_string(&mut decoded_json)?;
        },
        ArtifactFormat::ZstdJson => {
            let mut decoder = Decoder::new(reader)?;
            decoder.read_to_string(&mut decoded_json)?;
        },
    }

    serde_json::from_str(&decoded_json)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn write_artifacts(prepared: &PreparedOntology, output_dir: &Path, format: ArtifactFormat)
    -> Result<ArtifactPaths>
{
    create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {} failed", output_dir.display()))?;

    let mut paths = ArtifactPaths::new(output_dir, &prepared.label, format);

    write_artifact(&prepared.path_genes, &paths.path_genes, format)?;
    write_artifact(&prepared.all_genes, &paths.all_genes, format)?;
    write_artifact(&prepared.path_names, &paths.path_names, format)?;

    match (&prepared.network_genes, paths.network_genes.take()) {
        (Some(network_genes), Some(network_genes_path)) => {
            write_artifact(network_genes, &network_genes_path, format)?;
            paths.network_genes = Some(network_genes_path);
        },
        (None, Some(network_genes_path)) => {
            // a network gene file left by an earlier run doesn't belong
            // with unfiltered pathways
            match remove_file(&network_genes_path) {
                Ok(()) => info!("removed stale {}", network_genes_path.display()),
                Err(err) if err.kind() == ErrorKind::NotFound => (),
                Err(err) => Err(err).with_context(|| {
                    format!("failed to remove {}", network_genes_path.display())
                })?,
            }
        },
        (_, None) => (),
    }

    info!("wrote {} artifacts for {} to {}",
          if paths.network_genes.is_some() { 4 } else { 3 },
          prepared.label, output_dir.display());

    Ok(paths)
}

// Read back the artifacts written for the given label.  The network gene
// set is None if there's no file for it.
pub fn read_artifacts(output_dir: &Path, label: &str, format: ArtifactFormat)
    -> Result<StoredArtifacts>
{
    let paths = ArtifactPaths::new(output_dir, label, format);

    let network_genes = match paths.network_genes {
        Some(ref network_genes_path) if network_genes_path.exists() => {
            Some(read_artifact(network_genes_path, format)?)
        },
        _ => None,
    };

    Ok(StoredArtifacts {
        path_genes: read_artifact(&paths.path_genes, format)?,
        all_genes: read_artifact(&paths.all_genes, format)?,
        path_names: read_artifact(&paths.path_names, format)?,
        network_genes,
    })
}


#[test]
fn test_artifact_file_names() {
    assert_eq!(labelled_file_name("KEGG", PATH_GENES_ARTIFACT_SUFFIX, ArtifactFormat::Json),
               "KEGG_path_genes.json");
    assert_eq!(labelled_file_name("PID", ALL_GENES_ARTIFACT_SUFFIX, ArtifactFormat::ZstdJson),
               "PID_all_genes.json.zst");
    assert_eq!(network_genes_file_name(ArtifactFormat::Json), "IMP_genes.json");

    let paths = ArtifactPaths::new(Path::new("Data"), "KEGG", ArtifactFormat::Json);
    assert_eq!(paths.path_names, PathBuf::from("Data/KEGG_path_names.json"));
}
