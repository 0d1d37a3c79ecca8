//! Human-readable output tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use ivr_map::CompletenessReport;
use ivr_model::ExtractionResult;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn styled(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn print_extraction(result: &ExtractionResult) {
    match &result.manufacturer {
        Some(name) => println!(
            "Manufacturer: {name} (confidence {})",
            result.confidence_score
        ),
        None => println!("Manufacturer: not identified"),
    }

    if !result.extracted_fields.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Field"), header_cell("Value")]);
        styled(&mut table);
        for (field, value) in &result.extracted_fields {
            table.add_row(vec![field.clone(), value.clone()]);
        }
        println!("{table}");
    }

    if !result.products.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("SKU"),
            header_cell("Product"),
            header_cell("Size"),
            header_cell("Qty"),
            header_cell("Unit price"),
        ]);
        styled(&mut table);
        for index in [3, 4] {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        for product in &result.products {
            table.add_row(vec![
                product.sku.clone().unwrap_or_default(),
                product.name.clone(),
                product.size.clone(),
                product.quantity.to_string(),
                format!("{:.2}", product.unit_price),
            ]);
        }
        println!("{table}");
    }

    for warning in &result.warnings {
        println!("warning: {warning}");
    }
}

pub fn print_completeness(report: &CompletenessReport) {
    println!(
        "{} / {}: {:.1}% complete, can proceed: {}",
        report.manufacturer, report.template, report.completeness_percent, report.can_proceed
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Required field"), header_cell("Status")]);
    styled(&mut table);
    for field in &report.available {
        table.add_row(vec![field.clone(), "available".to_string()]);
    }
    for field in &report.missing {
        let status = if report.critical_missing.contains(field) {
            "MISSING (critical)"
        } else {
            "missing"
        };
        table.add_row(vec![field.clone(), status.to_string()]);
    }
    println!("{table}");
}
