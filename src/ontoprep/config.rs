use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_EDGE_LIST_FILE_NAME,
                       JSON_EXTENSION, ZSTD_JSON_EXTENSION};

// what to do when the ontology file or the edge list can't be loaded
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    // log a diagnostic and carry on: an unreadable ontology becomes an
    // empty one, an unreadable network means no filtering and no
    // network gene artifact
    #[default]
    Continue,
    // return the error before anything is written
    Abort,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    #[default]
    Json,
    ZstdJson,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Json => JSON_EXTENSION,
            ArtifactFormat::ZstdJson => ZSTD_JSON_EXTENSION,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PrepConfig {
    // the ontology file and the edge list are read from here
    pub data_dir: PathBuf,
    pub edge_list_file_name: String,
    // None means: write the artifacts to data_dir
    #[serde(skip_serializing_if="Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
    pub artifact_format: ArtifactFormat,
}

impl Default for PrepConfig {
    fn default() -> PrepConfig {
        PrepConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            edge_list_file_name: DEFAULT_EDGE_LIST_FILE_NAME.to_owned(),
            output_dir: None,
            failure_policy: FailurePolicy::default(),
            artifact_format: ArtifactFormat::default(),
        }
    }
}

impl PrepConfig {
    pub fn read(config_file_name: &Path) -> Result<PrepConfig> {
        let file = File::open(config_file_name)
            .with_context(|| format!("failed to read {}", config_file_name.display()))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {}", config_file_name.display()))
    }

    pub fn ontology_path(&self, ontology_filename: &str) -> PathBuf {
        self.data_dir.join(ontology_filename)
    }

    pub fn edge_list_path(&self) -> PathBuf {
        self.data_dir.join(&self.edge_list_file_name)
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.data_dir)
    }
}


#[test]
fn test_default_paths() {
    let config = PrepConfig::default();

    assert_eq!(config.ontology_path("PID.Entrez.DB.txt"),
               PathBuf::from("Data/PID.Entrez.DB.txt"));
    assert_eq!(config.edge_list_path(),
               PathBuf::from("Data/global_average.filtered.dat"));
    assert_eq!(config.output_dir(), Path::new("Data"));
    assert_eq!(config.failure_policy, FailurePolicy::Continue);
}

#[test]
fn test_partial_config_json() {
    let json = r#"{"data_dir": "/tmp/ontology_data",
                   "failure_policy": "abort",
                   "artifact_format": "zstd_json"}"#;
    let config: PrepConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/tmp/ontology_data"));
    assert_eq!(config.edge_list_file_name, DEFAULT_EDGE_LIST_FILE_NAME);
    assert_eq!(config.output_dir(), Path::new("/tmp/ontology_data"));
    assert_eq!(config.failure_policy, FailurePolicy::Abort);
    assert_eq!(config.artifact_format.extension(), "json.zst");
}
