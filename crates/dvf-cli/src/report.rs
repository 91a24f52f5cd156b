//! Terminal and JSON rendering of session views.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dvf_core::{ReadyView, SelectionView, ViewSummary};
use dvf_ingest::SummaryDataset;
use dvf_ingest::polars_utils::{any_to_string, float_values, format_numeric};
use dvf_model::Department;
use dvf_model::columns::VALEUR_FONCIERE;
use polars::prelude::DataFrame;
use serde::Serialize;

/// Price statistics of the selected rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub rows: usize,
    /// Rows with a defined price.
    pub priced: usize,
    pub min: Option<f64>,
    pub median: Option<f64>,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

impl PriceStats {
    pub fn from_frame(frame: &DataFrame) -> anyhow::Result<Self> {
        let mut prices: Vec<f64> = float_values(frame, VALEUR_FONCIERE)?
            .into_iter()
            .flatten()
            .filter(|price| price.is_finite())
            .collect();
        prices.sort_by(f64::total_cmp);

        let priced = prices.len();
        let median = match priced {
            0 => None,
            n if n % 2 == 1 => Some(prices[n / 2]),
            n => Some((prices[n / 2 - 1] + prices[n / 2]) / 2.0),
        };
        let mean = (priced > 0).then(|| prices.iter().sum::<f64>() / priced as f64);
        Ok(Self {
            rows: frame.height(),
            priced,
            min: prices.first().copied(),
            median,
            mean,
            max: prices.last().copied(),
        })
    }
}

/// JSON document printed by `explore --json` and the session `show` command.
#[derive(Debug, Clone, Serialize)]
pub struct ViewReport {
    #[serde(flatten)]
    pub view: ViewSummary,
    pub stats: Option<PriceStats>,
}

impl ViewReport {
    pub fn new(view: &SelectionView) -> anyhow::Result<Self> {
        let stats = match view.ready() {
            Some(ready) => Some(PriceStats::from_frame(&ready.selection_frame()?)?),
            None => None,
        };
        Ok(Self {
            view: view.summary(),
            stats,
        })
    }
}

pub fn print_json(view: &SelectionView) -> anyhow::Result<()> {
    let report = ViewReport::new(view)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn print_view(view: &SelectionView) -> anyhow::Result<()> {
    match view {
        SelectionView::NoData { key, reason, .. } => {
            println!("{key}: {reason}");
            Ok(())
        }
        SelectionView::Ready(ready) => print_ready(ready),
    }
}

fn print_ready(view: &ReadyView) -> anyhow::Result<()> {
    let unit = if view.normalize_by_area { "€/m²" } else { "€" };
    let charts: Vec<&str> = view.charts.iter().map(|chart| chart.label()).collect();

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Selection"), header_cell("Value")]);
    table.add_row(vec!["Department".to_string(), view.key.department.to_string()]);
    table.add_row(vec!["Year".to_string(), view.key.year.label()]);
    table.add_row(vec![
        "Property type".to_string(),
        format!("{} ({} options)", view.property_type, view.property_types.len()),
    ]);
    table.add_row(vec![
        "Postcode".to_string(),
        view.postcode
            .as_ref()
            .map_or_else(|| format!("all ({} options)", view.postcodes.len()), |option| option.title.clone()),
    ]);
    table.add_row(vec!["Price".to_string(), unit.to_string()]);
    table.add_row(vec!["Charts".to_string(), charts.join(", ")]);
    println!("{table}");

    let stats = PriceStats::from_frame(&view.selection_frame()?)?;
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Priced"),
        header_cell("Min"),
        header_cell("Median"),
        header_cell("Mean"),
        header_cell("Max"),
    ]);
    table.add_row(vec![
        Cell::new(stats.rows),
        Cell::new(stats.priced),
        price_cell(stats.min),
        price_cell(stats.median),
        price_cell(stats.mean),
        price_cell(stats.max),
    ]);
    for index in 0..6 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{table}");

    let note = undefined_note(
        view.normalize_by_area,
        view.undefined_prices,
        view.frame.height(),
    );
    if let Some(note) = note {
        println!("{note}");
    }
    Ok(())
}

/// Only price per m² can be undefined.
fn undefined_note(normalize_by_area: bool, undefined: usize, total: usize) -> Option<String> {
    (normalize_by_area && undefined > 0).then(|| {
        format!(
            "{undefined} of {total} transactions have no built area; \
             their price per m² is undefined."
        )
    })
}

pub fn print_departments() {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Code"), header_cell("Area")]);
    for department in Department::all() {
        let area = if department.is_overseas() {
            "Outre-mer"
        } else {
            "Métropole"
        };
        table.add_row(vec![department.to_string(), area.to_string()]);
    }
    println!("{table}");
}

/// Print the summary overview, or the rows of one department.
pub fn print_summary(summary: &SummaryDataset, department: Option<&Department>) -> anyhow::Result<()> {
    println!("Summary: {} ({} rows)", summary.source(), summary.height());
    let Some(department) = department else {
        let codes: Vec<String> = summary
            .departments()
            .into_iter()
            .map(String::from)
            .collect();
        println!("Departments ({}): {}", codes.len(), codes.join(" "));
        return Ok(());
    };

    let frame = summary.for_department(department)?;
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(
        frame
            .get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    for idx in 0..frame.height() {
        let row: Vec<String> = frame
            .get_columns()
            .iter()
            .map(|column| {
                column
                    .get(idx)
                    .map(any_to_string)
                    .unwrap_or_default()
            })
            .collect();
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

fn price_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_numeric(value.round())),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
