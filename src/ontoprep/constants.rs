pub const DEFAULT_DATA_DIR: &str = "Data";

pub const DEFAULT_EDGE_LIST_FILE_NAME: &str = "global_average.filtered.dat";

// the network gene set isn't scoped by ontology label
pub const NETWORK_GENES_ARTIFACT_NAME: &str = "IMP_genes";

pub const PATH_GENES_ARTIFACT_SUFFIX: &str = "path_genes";
pub const ALL_GENES_ARTIFACT_SUFFIX: &str = "all_genes";
pub const PATH_NAMES_ARTIFACT_SUFFIX: &str = "path_names";

pub const JSON_EXTENSION: &str = "json";
pub const ZSTD_JSON_EXTENSION: &str = "json.zst";

pub const GZIP_EXTENSION: &str = "gz";

pub const ZSTD_COMPRESSION_LEVEL: i32 = 9;
