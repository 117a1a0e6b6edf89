use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LOG: &str = "\
Pay Type,Till No,Transaction Date,Detail,Transacted Amount,User Name
Cash Pickup,T1,03/01/2024,end of day,5000,Jane Doe
Cash,T1,03/01/2024,Brookside milk 2L,640,Jane Doe
Cash,T2,03/02/2024,Delivery to Nyali client,400,John Kamau
Cash,T2,03/02/2024,qzx vrtk 123,90,John Kamau
";

fn petty(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("petty").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("PETTY_LOG");
    cmd
}

fn write_log(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn convert_writes_iif_next_to_input() {
    let home = TempDir::new().unwrap();
    let input = write_log(&home, "till.csv", LOG);

    petty(&home)
        .args(["convert", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"))
        .stdout(predicate::str::contains("4 entries written"));

    let iif = std::fs::read_to_string(home.path().join("till.iif")).unwrap();
    let lines: Vec<&str> = iif.lines().collect();
    assert_eq!(lines[0], "!TRNS\tTRNSTYPE\tDATE\tACCNT\tNAME\tAMOUNT\tMEMO\tDOCNUM\tCLEAR");
    assert_eq!(lines[2], "!ENDTRNS");
    assert!(lines[3].starts_with("TRNS\tTRANSFER\t03/01/2024\tCash in Drawer\tDiamond Trust Bank\t-5000\t"));
    assert!(lines[3].ends_with("\t20240301001\tN"));
    assert!(iif.contains("SPL\tCHECK\t03/01/2024\tAccounts Payable\tBrookside Dairy Ltd\t640\t"));
    assert!(iif.contains("\tQzx Vrtk 123\t"));
    assert_eq!(lines.iter().filter(|l| **l == "ENDTRNS").count(), 4);
}

#[test]
fn convert_to_stdout_keeps_summary_on_stderr() {
    let home = TempDir::new().unwrap();
    let input = write_log(&home, "till.csv", LOG);

    petty(&home)
        .args(["convert", input.to_str().unwrap(), "-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("!TRNS\t"))
        .stdout(predicate::str::contains("entries written").not())
        .stderr(predicate::str::contains("Qzx Vrtk 123"));

    assert!(!home.path().join("till.iif").exists());
}

#[test]
fn convert_reports_missing_columns() {
    let home = TempDir::new().unwrap();
    let input = write_log(&home, "bad.csv", "Date,Detail\n03/01/2024,milk\n");

    petty(&home)
        .args(["convert", input.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required columns"));
}

#[test]
fn convert_rejects_unsupported_extension() {
    let home = TempDir::new().unwrap();
    let input = write_log(&home, "till.txt", LOG);

    petty(&home)
        .args(["convert", input.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn threshold_above_100_is_rejected() {
    let home = TempDir::new().unwrap();
    petty(&home)
        .args(["match", "Brookside milk", "--threshold", "101"])
        .assert()
        .failure();
}

#[test]
fn match_resolves_alias() {
    let home = TempDir::new().unwrap();
    petty(&home)
        .args(["match", "Brookside milk 2L"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brookside Dairy Ltd"))
        .stdout(predicate::str::contains("alias"));
}

#[test]
fn match_with_custom_vendor_list() {
    let home = TempDir::new().unwrap();
    let vendors = write_log(&home, "vendors.txt", "# farms\nGreen Valley Farm\nGreen Hill Farm\n");

    petty(&home)
        .args(["match", "green farm supplies", "--threshold", "80", "--vendors"])
        .arg(&vendors)
        .assert()
        .success()
        .stdout(predicate::str::contains("Green Hill Farm (fuzzy 80)"));
}

#[test]
fn review_lists_unmatched_payees() {
    let home = TempDir::new().unwrap();
    let input = write_log(&home, "till.csv", LOG);

    petty(&home)
        .args(["review", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 new/unmatched vendors:"))
        .stdout(predicate::str::contains("Qzx Vrtk 123"));
}

#[test]
fn config_threshold_persists() {
    let home = TempDir::new().unwrap();
    petty(&home).args(["config", "threshold", "72"]).assert().success();

    let saved = std::fs::read_to_string(home.path().join(".config/petty/settings.json")).unwrap();
    assert!(saved.contains("\"threshold\": 72"));

    petty(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Threshold:  72"));
}

#[test]
fn config_alias_feeds_matching() {
    let home = TempDir::new().unwrap();
    petty(&home)
        .args(["config", "alias", "Mala", "Brookside Dairy Ltd"])
        .assert()
        .success();

    petty(&home)
        .args(["match", "mala 500ml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brookside Dairy Ltd (alias)"));

    petty(&home)
        .args(["vendors", "aliases"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings"));
}

#[test]
fn config_alias_rejects_unknown_vendor() {
    let home = TempDir::new().unwrap();
    petty(&home)
        .args(["config", "alias", "foo", "Nobody Ltd"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown vendor"));
}
