extern crate ontoprep;

use std::env;
use std::path::PathBuf;
use std::process;

use getopts::Options;
use getopts::ParsingStyle;
use tracing::error;
use tracing_subscriber::EnvFilter;

use ontoprep::config::{ArtifactFormat, FailurePolicy, PrepConfig};
use ontoprep::prepare::prepare_ontology;

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage_message(program: &str) -> String {
    format!("Usage: {} [options] <ontology_filename> <ontology_label>

Reads a pathway file (eg. c2.cp.kegg.v5.1.entrez.gmt.txt) and the network
edge list from the data directory, removes genes that aren't in the network
from each pathway and writes <label>_path_genes, <label>_all_genes,
<label>_path_names and IMP_genes for enrichment testing and community
detection.
",
            program)
}

fn print_usage(program: &str, opts: &Options) {
    let message = usage_message(program);
    print!("{}", opts.usage(&message));
}

fn eprint_usage(program: &str, opts: &Options) {
    let message = usage_message(program);
    eprint!("{}", opts.usage(&message));
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut opts = Options::new();
    let opts = opts.parsing_style(ParsingStyle::FloatingFrees);

    opts.optflag("h", "help", "print this help message");
    opts.optflag("V", "version", "print the version");
    opts.optopt("c", "config", "JSON configuration file, options given here override it",
                "FILE");
    opts.optopt("d", "data-dir", "directory containing the input files (default: Data)",
                "DIR");
    opts.optopt("e", "edge-list",
                "edge list file name inside the data directory (default: global_average.filtered.dat)",
                "FILE");
    opts.optopt("o", "output-dir", "where to write the artifacts (default: the data directory)",
                "DIR");
    opts.optflag("s", "strict", "stop if the ontology file or the edge list can't be read");
    opts.optflag("z", "compress", "write zstd compressed JSON");

    let program = args[0].clone();

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprint_usage(&program, opts);
            eprintln!("\noption error: {}", e);
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        print_usage(&program, opts);
        process::exit(0);
    }

    if matches.opt_present("version") {
        println!("{} v{}", PKG_NAME, VERSION);
        process::exit(0);
    }

    if matches.free.len() != 2 {
        eprintln!("needs <ontology_filename> and <ontology_label> arguments");
        eprint_usage(&program, opts);
        process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("ontology_prep=info,ontoprep=info"))
                .unwrap(),
        )
        .init();

    let mut config =
        if let Some(config_file_name) = matches.opt_str("config") {
            match PrepConfig::read(&PathBuf::from(config_file_name)) {
                Ok(config) => config,
                Err(err) => {
                    error!("{:#}", err);
                    process::exit(1);
                }
            }
        } else {
            PrepConfig::default()
        };

    if let Some(data_dir) = matches.opt_str("data-dir") {
        config.data_dir = PathBuf::from(data_dir);
    }
    if let Some(edge_list_file_name) = matches.opt_str("edge-list") {
        config.edge_list_file_name = edge_list_file_name;
    }
    if let Some(output_dir) = matches.opt_str("output-dir") {
        config.output_dir = Some(PathBuf::from(output_dir));
    }
    if matches.opt_present("strict") {
        config.failure_policy = FailurePolicy::Abort;
    }
    if matches.opt_present("compress") {
        config.artifact_format = ArtifactFormat::ZstdJson;
    }

    let ontology_filename = &matches.free[0];
    let ontology_label = &matches.free[1];

    if let Err(err) = prepare_ontology(&config, ontology_filename, ontology_label) {
        error!("{:#}", err);
        process::exit(1);
    }
}
