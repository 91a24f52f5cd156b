//! Runs the `dvf` binary over a local mirror.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const NICE_2023: &str = "\
type_local,valeur_fonciere,surface_reelle_bati,code_postal,nom_commune
Maison,540000,120,06000,Nice
Appartement,310000,62,06000,Nice
";

const PARIS_2023: &str = "\
type_local,valeur_fonciere,surface_reelle_bati,code_postal,nom_commune
Appartement,820000,82,75011,Paris 11e Arrondissement
";

const SUMMARY: &str = "\
code_departement,annee,prix_m2_median
06,2023,5100
75,2023,10200
";

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("mirror/2023/departements/06.csv"), NICE_2023);
    write(&root.join("mirror/2023/departements/75.csv"), PARIS_2023);
    write(&root.join("summary.csv"), SUMMARY);
    let settings = format!(
        "[data]\nmirror_dir = {:?}\nsummary_source = {:?}\n",
        root.join("mirror").display().to_string(),
        root.join("summary.csv").display().to_string(),
    );
    write(&root.join("settings.toml"), &settings);
    dir
}

fn dvf(dir: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_dvf"))
        .arg("--config")
        .arg(dir.path().join("settings.toml"))
        .args(args)
        .env_remove("DATA_GOUV_URL")
        .env_remove("AWS_S3_URL")
        .env_remove("DVF_SUMMARY_SOURCE")
        .env_remove("DVF_MIRROR_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn scripted_session_prints_views() {
    let dir = fixture();
    let script = dir.path().join("script.txt");
    write(
        &script,
        "postcode 06000\ndepartment 75\n# no data for Corsica in the mirror\ndepartment 2A\nquit\nshow\n",
    );

    let output = dvf(
        &dir,
        &["session", "--json", "--script", script.to_str().unwrap()],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("\"key\": \"06/2023\""));
    assert!(stdout.contains("\"title\": \"06000 - Nice\""));
    assert!(stdout.contains("\"key\": \"75/2023\""));
    assert!(stdout.contains("\"key\": \"2A/2023\""));
    assert!(stdout.contains("\"available\": false"));
    // Initial view plus three changes; `show` after `quit` is not run.
    assert_eq!(stdout.matches("\"key\":").count(), 4);
}

#[test]
fn explore_prints_json_view() {
    let dir = fixture();
    let output = dvf(
        &dir,
        &["explore", "--department", "06", "--year", "2023", "--property-type", "Maison", "--json"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"property_type\": \"Maison\""));
    assert!(stdout.contains("\"median\": 4500.0"));
}

#[test]
fn departments_needs_no_settings() {
    let output = Command::new(env!("CARGO_BIN_EXE_dvf"))
        .arg("departments")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("2A"));
    assert!(stdout.contains("974"));
}

#[test]
fn missing_summary_aborts() {
    let dir = fixture();
    fs::remove_file(dir.path().join("summary.csv")).unwrap();
    let output = dvf(&dir, &["explore"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("summary"));
}
