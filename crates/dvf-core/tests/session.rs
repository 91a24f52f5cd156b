//! End-to-end session behaviour over an in-memory provider.

mod common;

use common::{MemoryProvider, SummaryFixture, provider};
use dvf_core::{DashboardConfig, DashboardSession, SessionError};
use dvf_ingest::{HttpConfig, SummaryLoader, SummarySource};
use dvf_model::{ChartId, Department, SelectionChange, SelectionState, Year};

fn open(fixture: &SummaryFixture) -> DashboardSession<MemoryProvider> {
    DashboardSession::open(DashboardConfig::default(), provider(), fixture.loader()).unwrap()
}

#[test]
fn opens_on_default_selection() {
    let fixture = SummaryFixture::new();
    let session = open(&fixture);

    assert_eq!(session.state().key().to_string(), "06/2023");
    assert!(session.state().normalize_by_area);
    assert_eq!(session.state().charts.len(), ChartId::all().len());
    assert!(session.view().is_ready());
    assert_eq!(session.summary().height(), 4);
    assert!(session.summary_loader().is_loaded());
}

#[test]
fn postcode_cleared_when_department_changes() {
    let fixture = SummaryFixture::new();
    let mut session = open(&fixture);

    session
        .apply(SelectionChange::Postcode(Some("06000".to_string())))
        .unwrap();
    assert_eq!(
        session.state().postcode_title.as_deref(),
        Some("06000 - Nice")
    );

    let view = session
        .apply(SelectionChange::Department(Department::new("75").unwrap()))
        .unwrap();
    assert!(view.is_ready());
    assert!(session.state().postcode.is_none());
    assert!(session.state().postcode_title.is_none());
    assert_eq!(
        session.state().property_type.as_deref(),
        Some("Appartement")
    );
}

#[test]
fn revisiting_a_key_hits_the_cache() {
    let fixture = SummaryFixture::new();
    let mut session = open(&fixture);
    assert_eq!(session.cache().provider().calls.get(), 1);

    session
        .apply(SelectionChange::Department(Department::new("75").unwrap()))
        .unwrap();
    session
        .apply(SelectionChange::Department(Department::new("06").unwrap()))
        .unwrap();
    session.apply(SelectionChange::NormalizeByArea(false)).unwrap();

    assert_eq!(session.cache().provider().calls.get(), 2);
    assert_eq!(session.cache().len(), 2);
}

#[test]
fn unavailable_key_suppresses_selectors() {
    let fixture = SummaryFixture::new();
    let mut session = open(&fixture);

    session
        .apply_all([
            SelectionChange::Department(Department::new("2A").unwrap()),
            SelectionChange::Year(Year::new(2022).unwrap()),
        ])
        .unwrap();

    let view = session.view();
    assert!(!view.is_ready());
    assert!(view.property_type_options().is_empty());
    assert!(view.postcode_options().is_empty());
    assert!(session.state().property_type.is_none());

    let summary = view.summary();
    assert_eq!(summary.key, "2A/2022");
    assert_eq!(summary.message.as_deref(), Some("no data for this selection"));
}

#[test]
fn postcode_survives_a_year_without_data() {
    let fixture = SummaryFixture::new();
    let mut session = open(&fixture);
    session
        .apply(SelectionChange::Postcode(Some("06000".to_string())))
        .unwrap();

    let view = session
        .apply(SelectionChange::Year(Year::new(2021).unwrap()))
        .unwrap();
    assert!(!view.is_ready());
    assert!(view.postcode_options().is_empty());

    let view = session
        .apply(SelectionChange::Year(Year::new(2023).unwrap()))
        .unwrap();
    assert!(view.is_ready());
    assert_eq!(session.state().postcode.as_deref(), Some("06000"));
    assert_eq!(
        session.state().postcode_title.as_deref(),
        Some("06000 - Nice")
    );
}

#[test]
fn open_with_fetches_only_the_initial_key() {
    let fixture = SummaryFixture::new();
    let initial = SelectionState::new(Department::new("75").unwrap(), Year::new(2023).unwrap());
    let session = DashboardSession::open_with(
        DashboardConfig::default(),
        provider(),
        fixture.loader(),
        initial,
    )
    .unwrap();

    assert_eq!(session.state().key().to_string(), "75/2023");
    assert!(session.view().is_ready());
    assert_eq!(session.cache().provider().calls.get(), 1);
    assert_eq!(session.cache().len(), 1);
}

#[test]
fn open_with_rejects_unoffered_year() {
    let fixture = SummaryFixture::new();
    let initial = SelectionState::new(Department::default(), Year::new(2015).unwrap());
    let result = DashboardSession::open_with(
        DashboardConfig::default(),
        provider(),
        fixture.loader(),
        initial,
    );
    assert!(matches!(result, Err(SessionError::YearNotOffered(_))));
}

#[test]
fn reset_cache_refetches_current_key() {
    let fixture = SummaryFixture::new();
    let mut session = open(&fixture);
    session.reset_cache().unwrap();
    assert_eq!(session.cache().provider().calls.get(), 2);
    assert!(session.view().is_ready());
}

#[test]
fn unoffered_year_is_rejected() {
    let fixture = SummaryFixture::new();
    let mut session = open(&fixture);
    let err = session
        .apply(SelectionChange::Year(Year::new(2015).unwrap()))
        .unwrap_err();
    assert!(matches!(err, SessionError::YearNotOffered(_)));
    assert_eq!(session.state().year.value(), 2023);
}

#[test]
fn summary_failure_is_fatal() {
    let loader = SummaryLoader::new(
        SummarySource::File("/nonexistent/summary.csv".into()),
        HttpConfig::default(),
    );
    let result = DashboardSession::open(DashboardConfig::default(), provider(), loader);
    assert!(matches!(result, Err(SessionError::Summary(_))));
}
