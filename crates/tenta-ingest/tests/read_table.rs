use std::fs;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

use tenta_ingest::{IngestError, check_file_size_with_limit, read_table};
use tenta_model::{CellValue, Table};

#[test]
fn reads_price_list_csv() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("precios.csv");
    fs::write(
        &path,
        "producto,descripcion,lista,listadesc,vigencia,precio\n\
         P1,Widget A,1,General,01/01/25,\"1.000,50\"\n\
         \n\
         P2,,1,General,15-02-2025,\"12,75\"\n",
    )
    .expect("write csv");

    let table = read_table(&path).expect("read csv");

    assert_eq!(table.name, "precios.csv");
    assert_eq!(table.data_len(), 2);
    let first = table.data_rows().next().expect("first data row");
    assert_eq!(Table::cell(first, 0), &CellValue::from("P1"));
    assert_eq!(Table::cell(first, 4), &CellValue::from("01/01/25"));
    assert_eq!(Table::cell(first, 5), &CellValue::from("1.000,50"));
}

#[test]
fn missing_file_is_structural_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_table(&dir.path().join("missing.csv")).expect_err("missing file");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn unsupported_extension_is_rejected_before_io() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_table(&dir.path().join("prices.pdf")).expect_err("unsupported");
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn corrupt_workbook_is_structural_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("equivalencias.xlsx");
    fs::write(&path, b"not a zip archive").expect("write bogus xlsx");

    let err = read_table(&path).expect_err("corrupt workbook");
    assert!(matches!(err, IngestError::Workbook { .. }));
}

#[test]
fn oversized_file_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("precios.csv");
    fs::write(&path, "a,b,c\n1,2,3\n").expect("write csv");

    let err = check_file_size_with_limit(&path, 4).expect_err("too large");
    assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
}

#[test]
fn reads_first_sheet_of_xlsx_with_dates_as_serials() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("precios.xlsx");

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let sheet = workbook.add_worksheet();
    sheet.set_name("Precios").expect("sheet name");
    // Column A left empty: data starts in column B.
    sheet.write_string(0, 1, "producto").expect("header");
    sheet.write_string(0, 5, "vigencia").expect("header");
    sheet.write_string(0, 6, "precio").expect("header");
    sheet.write_string(1, 1, "P1").expect("key");
    let validity = ExcelDateTime::from_ymd(2025, 1, 1).expect("date");
    sheet
        .write_datetime_with_format(1, 5, &validity, &date_format)
        .expect("validity");
    sheet.write_number(1, 6, 1000.5).expect("price");
    let other = workbook.add_worksheet();
    other.set_name("Notas").expect("sheet name");
    other.write_string(0, 0, "ignored").expect("note");
    workbook.save(&path).expect("save workbook");

    let table = read_table(&path).expect("read workbook");

    assert_eq!(table.name, "Precios");
    assert_eq!(table.data_len(), 1);
    let row = table.data_rows().next().expect("data row");
    assert_eq!(
        row,
        &[
            CellValue::Empty,
            CellValue::from("P1"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Number(45658.0),
            CellValue::Number(1000.5),
        ]
    );
}
