//! Properties of the price-per-area derivation.

use dvf_core::{normalize, normalize_frame};
use dvf_ingest::Dataset;
use dvf_model::columns::{PRICE_UNDEFINED, VALEUR_FONCIERE};
use dvf_model::{DatasetKey, Department, Year};
use polars::prelude::*;
use proptest::prelude::*;

fn dataset(rows: &[(Option<f64>, Option<f64>)]) -> Dataset {
    let prices: Vec<Option<f64>> = rows.iter().map(|(price, _)| *price).collect();
    let areas: Vec<Option<f64>> = rows.iter().map(|(_, area)| *area).collect();
    let types: Vec<&str> = rows.iter().map(|_| "Maison").collect();
    let postcodes: Vec<&str> = rows.iter().map(|_| "06000").collect();
    let frame = DataFrame::new(vec![
        Series::new("type_local".into(), types).into_column(),
        Series::new("valeur_fonciere".into(), prices).into_column(),
        Series::new("surface_reelle_bati".into(), areas).into_column(),
        Series::new("code_postal".into(), postcodes).into_column(),
    ])
    .unwrap();
    let key = DatasetKey::new(Department::new("06").unwrap(), Year::new(2023).unwrap());
    Dataset::from_frame(key, frame).unwrap()
}

fn column_f64(frame: &DataFrame, name: &str) -> Vec<Option<f64>> {
    frame.column(name).unwrap().f64().unwrap().into_iter().collect()
}

fn column_bool(frame: &DataFrame, name: &str) -> Vec<Option<bool>> {
    frame.column(name).unwrap().bool().unwrap().into_iter().collect()
}

fn row() -> impl Strategy<Value = (Option<f64>, Option<f64>)> {
    (
        proptest::option::of(0.0_f64..5_000_000.0),
        proptest::option::of(prop_oneof![Just(0.0_f64), -10.0_f64..0.0, 1.0_f64..2_000.0]),
    )
}

proptest! {
    #[test]
    fn by_area_divides_or_flags(rows in proptest::collection::vec(row(), 1..40)) {
        let data = dataset(&rows);
        let before = data.frame().clone();

        let out = normalize(&data, true).unwrap();
        prop_assert_eq!(out.height(), rows.len());

        let prices = column_f64(&out, VALEUR_FONCIERE);
        let flags = column_bool(&out, PRICE_UNDEFINED);
        for (idx, (price, area)) in rows.iter().enumerate() {
            match (price, area) {
                (Some(price), Some(area)) if *area > 0.0 => {
                    prop_assert_eq!(prices[idx], Some(price / area));
                    prop_assert_eq!(flags[idx], Some(false));
                }
                _ => {
                    prop_assert_eq!(prices[idx], None);
                    prop_assert_eq!(flags[idx], Some(true));
                }
            }
        }
        prop_assert!(data.frame().equals_missing(&before));
    }

    #[test]
    fn absolute_price_is_idempotent(rows in proptest::collection::vec(row(), 1..40)) {
        let data = dataset(&rows);
        let once = normalize(&data, false).unwrap();
        let twice = normalize_frame(&once, false).unwrap();
        prop_assert!(once.equals_missing(&twice));

        let prices = column_f64(&once, VALEUR_FONCIERE);
        let expected: Vec<Option<f64>> = rows.iter().map(|(price, _)| *price).collect();
        prop_assert_eq!(prices, expected);
    }
}
