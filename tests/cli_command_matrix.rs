use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn run_help(home: &TempDir, args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("yamltrimmer");
    cmd.env("HOME", home.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let home = TempDir::new().expect("temp home");

    run_help(&home, &[]);
    run_help(&home, &["trim"]);
    run_help(&home, &["check"]);
    run_help(&home, &["cache"]);
    run_help(&home, &["cache", "clear"]);
}

#[test]
fn version_flag_works() {
    let home = TempDir::new().expect("temp home");
    cargo_bin_cmd!("yamltrimmer")
        .env("HOME", home.path())
        .arg("--version")
        .assert()
        .success();
}
