//! Summary loading from local files.

use std::fs;

use dvf_ingest::{HttpConfig, IngestError, SummaryLoader, SummarySource};
use dvf_model::Department;
use tempfile::TempDir;

const SUMMARY: &str = "\
code_departement,annee,type_local,nb_mutations,prix_m2_median
06,2023,Maison,5120,5400
06,2023,Appartement,18200,5100
75,2023,Appartement,31000,10200
";

fn loader(dir: &TempDir, name: &str, contents: Option<&str>) -> SummaryLoader {
    let path = dir.path().join(name);
    if let Some(contents) = contents {
        fs::write(&path, contents).unwrap();
    }
    SummaryLoader::new(SummarySource::File(path), HttpConfig::default())
}

#[test]
fn loads_once() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader(&dir, "summary.csv", Some(SUMMARY));

    let first = loader.load().unwrap();
    assert!(loader.is_loaded());
    // The second load must not read the file again.
    fs::remove_file(dir.path().join("summary.csv")).unwrap();
    let second = loader.load().unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first.height(), 3);
    assert_eq!(first.departments().len(), 2);
    let paris = first
        .for_department(&Department::new("75").unwrap())
        .unwrap();
    assert_eq!(paris.height(), 1);
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader(&dir, "absent.csv", None);
    assert!(matches!(
        loader.load(),
        Err(IngestError::FileNotFound { .. })
    ));
    assert!(!loader.is_loaded());
}

#[test]
fn missing_department_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader(&dir, "bad.csv", Some("annee,prix\n2023,1\n"));
    assert!(matches!(
        loader.load(),
        Err(IngestError::MissingColumn { ref column, .. }) if column == "code_departement"
    ));
}

#[test]
fn empty_table_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut loader = loader(&dir, "empty.csv", Some("code_departement,annee\n"));
    assert!(matches!(
        loader.load(),
        Err(IngestError::EmptySummary { .. })
    ));
}
