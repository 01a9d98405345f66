//! Plain-text renderings of merge results.

use tenta_model::MergedRecord;

/// Column headers of the CSV export.
pub const CSV_HEADER: [&str; 7] = [
    "product_id",
    "description",
    "barcodes",
    "price",
    "validity",
    "status",
    "reason",
];

/// Two-decimal price, or empty when there is none.
pub fn format_price(price: Option<f64>) -> String {
    price.map(|value| format!("{value:.2}")).unwrap_or_default()
}

/// Render records as CSV. Barcodes are joined with `|`.
pub fn records_to_csv<'a, I>(records: I) -> csv::Result<String>
where
    I: IntoIterator<Item = &'a MergedRecord>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.product_id.as_str(),
            record.description.as_str(),
            record.barcodes.join("|").as_str(),
            format_price(record.price).as_str(),
            record.validity_text.as_str(),
            record.status.as_str(),
            record
                .reason
                .map(|reason| reason.to_string())
                .unwrap_or_default()
                .as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| csv::Error::from(error.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_use_two_decimals() {
        assert_eq!(format_price(Some(1000.5)), "1000.50");
        assert_eq!(format_price(None), "");
    }
}
