#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use dvf_ingest::{
    DatasetProvider, HttpConfig, Result, SummaryLoader, SummarySource, decode_table,
};
use dvf_model::{DatasetKey, Department, Year};
use polars::prelude::DataFrame;
use tempfile::TempDir;

/// In-memory provider counting its fetches.
#[derive(Default)]
pub struct MemoryProvider {
    tables: HashMap<DatasetKey, String>,
    pub calls: Cell<usize>,
}

impl MemoryProvider {
    pub fn with(mut self, department: &str, year: u16, csv: &str) -> Self {
        self.tables.insert(key(department, year), csv.to_string());
        self
    }
}

impl DatasetProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self, key: &DatasetKey) -> Result<Option<DataFrame>> {
        self.calls.set(self.calls.get() + 1);
        match self.tables.get(key) {
            Some(csv) => decode_table(csv.as_bytes().to_vec(), "memory"),
            None => Ok(None),
        }
    }
}

pub fn key(department: &str, year: u16) -> DatasetKey {
    DatasetKey::new(Department::new(department).unwrap(), Year::new(year).unwrap())
}

pub const HEADER: &str =
    "type_local,valeur_fonciere,surface_reelle_bati,code_postal,nom_commune,longitude,latitude\n";

pub const NICE_2023: &str = "\
type_local,valeur_fonciere,surface_reelle_bati,code_postal,nom_commune,longitude,latitude
Maison,540000,120,06000,Nice,7.26,43.70
Appartement,310000,62,06000,Nice,7.27,43.70
Appartement,185000,31,06300,Nice,7.29,43.71
Maison,260000,,06340,Drap,7.32,43.75
";

pub const NICE_2022: &str = "\
type_local,valeur_fonciere,surface_reelle_bati,code_postal,nom_commune,longitude,latitude
Maison,510000,115,06000,Nice,7.26,43.70
Local industriel. commercial ou assimilé,150000,80,06100,Nice,7.25,43.72
";

pub const PARIS_2023: &str = "\
type_local,valeur_fonciere,surface_reelle_bati,code_postal,nom_commune,longitude,latitude
Appartement,820000,78,75011,Paris 11e Arrondissement,2.38,48.86
Appartement,455000,35,75018,Paris 18e Arrondissement,2.34,48.89
";

pub const SUMMARY: &str = "\
code_departement,annee,type_local,nb_mutations,prix_m2_median
06,2023,Maison,5120,5400
06,2023,Appartement,18200,5100
75,2023,Appartement,31000,10200
2A,2022,Maison,900,3900
";

/// Summary file written to a temporary directory.
pub struct SummaryFixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl SummaryFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geo_dvf_summarized_full.csv");
        fs::write(&path, SUMMARY).unwrap();
        Self { _dir: dir, path }
    }

    pub fn loader(&self) -> SummaryLoader {
        SummaryLoader::new(SummarySource::File(self.path.clone()), HttpConfig::default())
    }
}

pub fn provider() -> MemoryProvider {
    MemoryProvider::default()
        .with("06", 2023, NICE_2023)
        .with("06", 2022, NICE_2022)
        .with("75", 2023, PARIS_2023)
        .with("2A", 2022, HEADER)
}
