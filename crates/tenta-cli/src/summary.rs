use std::path::Path;

use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tenta_cli::render::format_price;
use tenta_model::{Counters, MergedRecord, RecordStatus};
use tenta_store::{CommitReport, ProductDocument};
use tenta_transform::{LegacyImport, ValidityWindow};

pub fn print_counters(counters: &Counters, window: &ValidityWindow, as_of: NaiveDate) {
    println!("Reference date: {as_of}");
    println!("Validity window: {}", describe_window(window));
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for status in RecordStatus::ALL {
        table.add_row(vec![
            status_cell(status),
            Cell::new(counters.get(status)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(counters.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_records(records: &[&MergedRecord]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product"),
        header_cell("Description"),
        header_cell("Barcodes"),
        header_cell("Price"),
        header_cell("Validity"),
        header_cell("Status"),
        header_cell("Reason"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.product_id).add_attribute(Attribute::Bold),
            Cell::new(&record.description),
            barcodes_cell(&record.barcodes),
            Cell::new(format_price(record.price)),
            Cell::new(&record.validity_text),
            status_cell(record.status),
            match record.reason {
                Some(reason) => dim_cell(reason),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

pub fn print_products(documents: &[&ProductDocument]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Description"),
        header_cell("Barcodes"),
        header_cell("Price"),
        header_cell("Validity"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for document in documents {
        table.add_row(vec![
            Cell::new(&document.id).add_attribute(Attribute::Bold),
            Cell::new(&document.description),
            barcodes_cell(&document.barcodes),
            Cell::new(format_price(document.price)),
            validity_cell(document.validity),
        ]);
    }
    println!("{table}");
}

pub fn print_product(document: &ProductDocument) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let rows = [
        ("Id", Cell::new(&document.id).add_attribute(Attribute::Bold)),
        ("Description", Cell::new(&document.description)),
        ("Barcodes", barcodes_cell(&document.barcodes)),
        ("Price", Cell::new(format_price(document.price))),
        ("Validity", validity_cell(document.validity)),
        (
            "Photo",
            document
                .photo_url
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![header_cell(label), value]);
    }
    println!("{table}");
}

pub fn print_commit(report: &CommitReport, total_writes: usize, store: &Path) {
    println!(
        "Wrote {} of {} products to {} ({} this session).",
        report.written.len(),
        report.attempted(),
        store.display(),
        total_writes
    );
    if report.failed.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Product"), header_cell("Error")]);
    apply_table_style(&mut table);
    for failure in &report.failed {
        table.add_row(vec![
            Cell::new(&failure.id).fg(Color::Red),
            Cell::new(&failure.error),
        ]);
    }
    eprintln!("Failed writes (run again to retry):");
    eprintln!("{table}");
}

pub fn print_legacy(import: &LegacyImport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Legacy products"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in [
        ("Accepted", import.records.len()),
        ("Without id", import.missing_id),
        ("Invalid validity", import.invalid_validity),
        ("Outside range", import.out_of_range),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    println!("{table}");
}

fn describe_window(window: &ValidityWindow) -> String {
    match (window.start, window.end) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        (Some(start), None) => format!("from {start}"),
        (None, Some(end)) => format!("up to {end}"),
        (None, None) => "any date".to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: RecordStatus) -> Cell {
    match status {
        RecordStatus::ToWrite => Cell::new(status).fg(Color::Green),
        RecordStatus::Skipped => Cell::new(status).fg(Color::Yellow),
        RecordStatus::OutOfValidity => Cell::new(status).fg(Color::DarkGrey),
    }
}

fn barcodes_cell(barcodes: &[String]) -> Cell {
    if barcodes.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(barcodes.join(", "))
    }
}

fn validity_cell(validity: Option<NaiveDate>) -> Cell {
    match validity {
        Some(date) => Cell::new(tenta_transform::format_validity(date)),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
