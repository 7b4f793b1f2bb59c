use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::assert::Assert;
use tempfile::TempDir;

const ONTOLOGY: &str = "PathA\tdesc\tG1\tG2\tG3\nPathB\tdesc\tG2\tG4\n";
const EDGES: &str = "G1\tG2\nG2\tG3\n";

fn run_ontology_prep(args: &[&str]) -> Assert {
    let mut cmd = Command::cargo_bin("ontology-prep").unwrap();
    cmd.args(args).env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd.assert()
}

fn stdout_of(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp dir path")
}

fn make_data_dir(with_edges: bool) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("kegg.gmt.txt"), ONTOLOGY).unwrap();
    if with_edges {
        fs::write(tmp.path().join("global_average.filtered.dat"), EDGES).unwrap();
    }
    tmp
}

#[test]
fn test_wrong_positional_arguments() {
    run_ontology_prep(&[]).failure().code(1);
    run_ontology_prep(&["kegg.gmt.txt"]).failure().code(1);
    run_ontology_prep(&["kegg.gmt.txt", "KEGG", "extra"]).failure().code(1);
    run_ontology_prep(&["--no-such-option"]).failure().code(1);
}

#[test]
fn test_help_and_version() {
    let help = run_ontology_prep(&["--help"]).success();
    assert!(stdout_of(&help).contains("<ontology_filename> <ontology_label>"));

    let version = run_ontology_prep(&["-V"]).success();
    assert!(stdout_of(&version).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_run_writes_artifacts() {
    let tmp = make_data_dir(true);

    run_ontology_prep(&["-d", path_arg(tmp.path()), "kegg.gmt.txt", "KEGG"]).success();

    assert_eq!(fs::read_to_string(tmp.path().join("KEGG_path_genes.json")).unwrap(),
               r#"[["G1","G2","G3"],["G2"]]"#);
    assert!(tmp.path().join("IMP_genes.json").exists());
}

#[test]
fn test_missing_edge_list_exit_codes() {
    let tmp = make_data_dir(false);

    // the diagnostic is logged but the run still succeeds
    let continued =
        run_ontology_prep(&["-d", path_arg(tmp.path()), "kegg.gmt.txt", "KEGG"]).success();
    assert!(stdout_of(&continued).contains("Invalid edge-list"));
    assert!(tmp.path().join("KEGG_path_genes.json").exists());
    assert!(!tmp.path().join("IMP_genes.json").exists());

    let strict_out = tmp.path().join("strict");
    let aborted =
        run_ontology_prep(&["--strict", "-d", path_arg(tmp.path()),
                            "-o", path_arg(&strict_out), "kegg.gmt.txt", "KEGG"])
        .failure()
        .code(1);
    // reported once, by the final error
    assert_eq!(stdout_of(&aborted).matches("Invalid edge-list").count(), 1);
    assert!(!stdout_of(&aborted).contains("WARN"));
    assert!(!strict_out.exists());
}

#[test]
fn test_options_override_config_file() {
    let tmp = make_data_dir(false);
    fs::write(tmp.path().join("edges.dat"), EDGES).unwrap();

    let config_json = serde_json::json!({
        "data_dir": tmp.path().join("no_such_dir"),
        "edge_list_file_name": "missing.dat",
        "failure_policy": "abort",
    });
    let config_path = tmp.path().join("config.json");
    fs::write(&config_path, config_json.to_string()).unwrap();

    // the config alone points at inputs that don't exist and asks to abort
    run_ontology_prep(&["-c", path_arg(&config_path), "kegg.gmt.txt", "KEGG"])
        .failure()
        .code(1);

    let out_dir = tmp.path().join("out");
    run_ontology_prep(&["-c", path_arg(&config_path),
                        "-d", path_arg(tmp.path()),
                        "-e", "edges.dat",
                        "-o", path_arg(&out_dir),
                        "-z",
                        "kegg.gmt.txt", "KEGG"])
        .success();
    assert!(out_dir.join("KEGG_path_genes.json.zst").exists());
    assert!(out_dir.join("IMP_genes.json.zst").exists());
    assert!(!tmp.path().join("KEGG_path_genes.json").exists());
}

#[test]
fn test_unreadable_config_file() {
    let tmp = make_data_dir(true);
    let config_path = tmp.path().join("config.json");
    fs::write(&config_path, "{ not json").unwrap();

    run_ontology_prep(&["-c", path_arg(&config_path), "-d", path_arg(tmp.path()),
                        "kegg.gmt.txt", "KEGG"])
        .failure()
        .code(1);
}
