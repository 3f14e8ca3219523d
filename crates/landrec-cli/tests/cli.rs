use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const DOCUMENT: &str = "Encumbrance certificate
Sr. No. : 1
Document No. : 1234/2019
Registration Date : 15-03-2019
Nature : Sale Deed
Executants : 1. Raman 2. Kumar
Claimants : 1. Lakshmi
Market Value : 13,00,000
Survey No. : 12/3, 45
Plot No. : 7A
Sr. No. : 2
Document No. : 88/2020
Registration Date : 02-01-2020
Executants : 1. Lakshmi
Claimants : 1. Selvi
Survey No. : 99
";

fn landrec(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("landrec").unwrap();
    cmd.arg("-c").arg(config);
    cmd
}

fn setup(dir: &Path) -> std::path::PathBuf {
    let config = dir.join("config.json");
    fs::write(
        &config,
        format!(
            r#"{{"translation": {{"enabled": false}}, "store": {{"path": "{}"}}}}"#,
            dir.join("store.jsonl").display()
        ),
    )
    .unwrap();
    fs::write(dir.join("ec.txt"), DOCUMENT).unwrap();
    config
}

#[test]
fn test_parse_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    landrec(&config)
        .args(["parse", "--no-translate", "-f", "json"])
        .arg(dir.path().join("ec.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document_number\": \"1234/2019\""))
        .stdout(predicate::str::contains("\"document_number\": \"88/2020\""))
        .stdout(predicate::str::contains("\"registration_date\": \"2019-03-15\""));
}

#[test]
fn test_parse_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    let output = dir.path().join("out.csv");

    landrec(&config)
        .args(["parse", "-f", "csv", "-o"])
        .arg(&output)
        .arg(dir.path().join("ec.txt"))
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Raman; Kumar"));
}

#[test]
fn test_parse_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    landrec(&config)
        .args(["parse", "absent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_save_then_search() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    landrec(&config)
        .args(["parse", "--save", "--owner", "5"])
        .arg(dir.path().join("ec.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 2 transactions"));

    landrec(&config)
        .args(["search", "--buyer", "lakshmi", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created_by\": 5"))
        .stdout(predicate::str::contains("1234/2019"))
        .stdout(predicate::str::contains("88/2020").not());

    landrec(&config)
        .args(["search", "--document-number", "88/2020", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,serial_number"))
        .stdout(predicate::str::contains("2,2,88/2020"));
}

#[test]
fn test_search_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    landrec(&config)
        .args(["search", "--seller", "nobody"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No matching transactions"));
}

#[test]
fn test_batch_writes_one_file_per_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    fs::write(dir.path().join("second.txt"), "Sr. No. : 1\nDocument No. : 5/2021\n").unwrap();
    let out_dir = dir.path().join("out");

    landrec(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("-d")
        .arg(&out_dir)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files"));

    assert!(out_dir.join("ec.json").exists());
    assert!(fs::read_to_string(out_dir.join("second.json")).unwrap().contains("5/2021"));
    assert!(out_dir.join("summary.csv").exists());
}

#[test]
fn test_config_init_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");

    landrec(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());

    landrec(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    landrec(&config)
        .args(["config", "get", "translation.endpoint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://libretranslate.de"));

    landrec(&config)
        .args(["config", "set", "extraction.max_concurrent_sections", "8"])
        .assert()
        .success();

    landrec(&config)
        .args(["config", "get", "extraction.max_concurrent_sections"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8"));

    landrec(&config)
        .args(["config", "set", "translation.no_such_key", "1"])
        .assert()
        .failure();
}

#[test]
fn test_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    landrec(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn test_batch_keeps_documents_with_shared_stem() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    let input = dir.path().join("in");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("deed.txt"), "Sr. No. : 1\nDocument No. : 7/2021\n").unwrap();
    fs::write(input.join("deed.text"), "Sr. No. : 1\nDocument No. : 8/2021\n").unwrap();
    let out_dir = dir.path().join("out");

    landrec(&config)
        .arg("batch")
        .arg(format!("{}/deed.*", input.display()))
        .arg("-d")
        .arg(&out_dir)
        .assert()
        .success();

    assert!(fs::read_to_string(out_dir.join("deed.txt.json")).unwrap().contains("7/2021"));
    assert!(fs::read_to_string(out_dir.join("deed.text.json")).unwrap().contains("8/2021"));
}
