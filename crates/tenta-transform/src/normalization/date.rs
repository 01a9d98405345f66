//! Validity date parsing.
//!
//! Numeric cells are spreadsheet date serials; text cells are `d/m/y` with
//! `/` or `-` separators. Unparseable or impossible dates yield `None`.

use chrono::{Days, NaiveDate};

use tenta_model::{CellValue, SerialEpoch};

/// Largest serial accepted (9999-12-31).
const MAX_SERIAL: i64 = 2_958_465;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert a spreadsheet date serial to a calendar date.
///
/// The fractional (time of day) part is dropped. Serials below 1 are invalid.
///
/// With [`SerialEpoch::Proleptic1899`], serial 1 is 1899-12-31, serial 2 is
/// 1900-01-01 and serial 60 is 1900-02-28. With [`SerialEpoch::Lotus1900`],
/// serial 1 is 1900-01-01 and serial 60 (the phantom 1900-02-29) is rejected;
/// both conventions agree from serial 61 (1900-03-01) onwards.
pub fn serial_to_date(serial: f64, epoch: SerialEpoch) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let day = serial.trunc() as i64;
    if !(1..=MAX_SERIAL).contains(&day) {
        return None;
    }
    let (base, offset) = match epoch {
        SerialEpoch::Proleptic1899 => (date(1899, 12, 30)?, day),
        SerialEpoch::Lotus1900 if day < 60 => (date(1899, 12, 31)?, day),
        SerialEpoch::Lotus1900 if day == 60 => return None,
        SerialEpoch::Lotus1900 => (date(1899, 12, 30)?, day),
    };
    base.checked_add_days(Days::new(offset as u64))
}

/// Parse `d/m/y` or `d-m-y` text.
///
/// Exactly three numeric parts are required. Years below 100 are read as
/// `2000 + year`. A four-digit first part switches to `y-m-d` so ISO dates
/// exported by some spreadsheets still parse.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.trim().split(['/', '-']).map(str::trim).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    let numbers = [first, second, third]
        .iter()
        .map(|part| part.parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;

    let (year, month, day) = if first.len() == 4 {
        (numbers[0], numbers[1], numbers[2])
    } else {
        let year = if numbers[2] < 100 {
            2000 + numbers[2]
        } else {
            numbers[2]
        };
        (year, numbers[1], numbers[0])
    };
    date(i32::try_from(year).ok()?, month, day)
}

/// Parse a validity cell of either kind.
pub fn parse_validity_cell(cell: &CellValue, epoch: SerialEpoch) -> Option<NaiveDate> {
    match cell {
        CellValue::Number(serial) => serial_to_date(*serial, epoch),
        CellValue::Text(text) => parse_date_text(text),
        CellValue::Empty => None,
    }
}

/// Render a validity date the way the clerk reads it (`5/3/2024`).
pub fn format_validity(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn two_digit_year_is_twenty_first_century() {
        assert_eq!(parse_date_text("05/03/24"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("05-03-2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text(" 1/1/25 "), Some(ymd(2025, 1, 1)));
    }

    #[test]
    fn iso_order_when_year_leads() {
        assert_eq!(parse_date_text("2024-03-05"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("05/03"), None);
        assert_eq!(parse_date_text("05/03/24/1"), None);
        assert_eq!(parse_date_text("aa/bb/cc"), None);
        assert_eq!(parse_date_text("31/02/24"), None);
        assert_eq!(parse_date_text("01/13/24"), None);
    }

    #[test]
    fn proleptic_epoch_has_no_phantom_leap_day() {
        let epoch = SerialEpoch::Proleptic1899;
        assert_eq!(serial_to_date(1.0, epoch), Some(ymd(1899, 12, 31)));
        assert_eq!(serial_to_date(2.0, epoch), Some(ymd(1900, 1, 1)));
        assert_eq!(serial_to_date(60.0, epoch), Some(ymd(1900, 2, 28)));
        assert_eq!(serial_to_date(61.0, epoch), Some(ymd(1900, 3, 1)));
        assert_eq!(serial_to_date(45658.0, epoch), Some(ymd(2025, 1, 1)));
    }

    #[test]
    fn lotus_epoch_reproduces_1900_leap_bug() {
        let epoch = SerialEpoch::Lotus1900;
        assert_eq!(serial_to_date(1.0, epoch), Some(ymd(1900, 1, 1)));
        assert_eq!(serial_to_date(59.0, epoch), Some(ymd(1900, 2, 28)));
        assert_eq!(serial_to_date(60.0, epoch), None);
        assert_eq!(serial_to_date(61.0, epoch), Some(ymd(1900, 3, 1)));
        assert_eq!(serial_to_date(45658.0, epoch), Some(ymd(2025, 1, 1)));
    }

    #[test]
    fn serial_time_of_day_is_dropped() {
        assert_eq!(
            serial_to_date(45658.75, SerialEpoch::Proleptic1899),
            Some(ymd(2025, 1, 1))
        );
    }

    #[test]
    fn out_of_range_serials_are_rejected() {
        let epoch = SerialEpoch::Proleptic1899;
        assert_eq!(serial_to_date(0.0, epoch), None);
        assert_eq!(serial_to_date(-3.0, epoch), None);
        assert_eq!(serial_to_date(f64::NAN, epoch), None);
        assert_eq!(serial_to_date(1e12, epoch), None);
    }

    #[test]
    fn formats_without_padding() {
        assert_eq!(format_validity(ymd(2024, 3, 5)), "5/3/2024");
        assert_eq!(format_validity(ymd(2025, 12, 31)), "31/12/2025");
    }
}
