//! Column names of the geo-DVF transaction files.
//!
//! The remote provider publishes French column names; they are kept verbatim
//! so that payloads can be read without a renaming step.

/// Property type (`Maison`, `Appartement`, `Dépendance`, ...).
pub const TYPE_LOCAL: &str = "type_local";
/// Sale price in euros.
pub const VALEUR_FONCIERE: &str = "valeur_fonciere";
/// Built area in square metres. Null for land-only sales.
pub const SURFACE_REELLE_BATI: &str = "surface_reelle_bati";
pub const CODE_POSTAL: &str = "code_postal";
pub const NOM_COMMUNE: &str = "nom_commune";
pub const CODE_DEPARTEMENT: &str = "code_departement";
pub const LONGITUDE: &str = "longitude";
pub const LATITUDE: &str = "latitude";

/// Flag added by price normalization: `true` when the price of the row is undefined.
pub const PRICE_UNDEFINED: &str = "price_undefined";

/// Columns a transaction payload must carry to be usable.
pub const REQUIRED: &[&str] = &[TYPE_LOCAL, VALEUR_FONCIERE, SURFACE_REELLE_BATI, CODE_POSTAL];

/// Columns parsed as floating point after loading.
pub const NUMERIC: &[&str] = &[VALEUR_FONCIERE, SURFACE_REELLE_BATI, LONGITUDE, LATITUDE];
