//! CSV export of the shot log.
//!
//! Each shot is joined to its bean and rendered as one row. Every cell is
//! quoted and embedded quotes are doubled, so notes containing `"` or
//! commas stay inside their cell.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::{Local, NaiveDate, TimeZone};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::domain::{Bean, Shot};

/// Header row of the export, in column order.
pub const CSV_HEADER: [&str; 12] = [
    "Date",
    "Bean",
    "Grind Outside",
    "Grind Inside",
    "Grind Amount",
    "Dose In (g)",
    "Yield Out (g)",
    "Time (s)",
    "Ratio",
    "Rating",
    "Tags",
    "Notes",
];

/// Bean label used when a shot references a bean that no longer exists.
pub const UNKNOWN_BEAN: &str = "Unknown";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Failure while rendering the export document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render `shots` (in the given order) as CSV, formatting dates in the
/// local time zone.
pub fn to_csv(shots: &[Shot], beans: &[Bean]) -> Result<String, ExportError> {
    render_csv(shots, beans, &Local)
}

/// Render `shots` as CSV with dates formatted in `tz`.
pub fn render_csv<Tz>(shots: &[Shot], beans: &[Bean], tz: &Tz) -> Result<String, ExportError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let labels: HashMap<i64, String> = beans.iter().map(|b| (b.id, b.label())).collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for shot in shots {
        let bean = labels
            .get(&shot.bean_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_BEAN.to_string());
        let tags: Vec<&str> = shot.tags.iter().map(|t| t.as_str()).collect();

        writer.write_record([
            shot.timestamp
                .with_timezone(tz)
                .format(DATE_FORMAT)
                .to_string(),
            bean,
            shot.grind_setting_outside.to_string(),
            shot.grind_setting_inside.to_string(),
            shot.grind_amount.to_string(),
            shot.dose_in.to_string(),
            shot.yield_out.to_string(),
            shot.extraction_time.to_string(),
            shot.brew_ratio.to_string(),
            shot.rating.to_string(),
            tags.join("; "),
            shot.notes.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

/// File name for an export taken on `date`, e.g. `barista-shots-2024-05-01.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("barista-shots-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShotTag;
    use chrono::{FixedOffset, Utc};
    use std::collections::BTreeSet;

    fn shot(id: i64, bean_id: i64) -> Shot {
        Shot {
            id,
            bean_id,
            grind_setting_outside: 5.0,
            grind_setting_inside: 3.5,
            grind_amount: 18.0,
            dose_in: 18.0,
            yield_out: 36.5,
            extraction_time: 28,
            brew_ratio: 2.03,
            rating: 4,
            tags: BTreeSet::from([ShotTag::Slow, ShotTag::Perfect]),
            notes: Some("syrupy".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap(),
        }
    }

    fn beans() -> Vec<Bean> {
        vec![Bean {
            id: 1,
            name: "Kenya AA".to_string(),
            roaster: "Square Mile".to_string(),
        }]
    }

    #[test]
    fn test_header_row() {
        let csv = render_csv(&[], &beans(), &Utc).unwrap();
        assert_eq!(
            csv,
            "\"Date\",\"Bean\",\"Grind Outside\",\"Grind Inside\",\"Grind Amount\",\
             \"Dose In (g)\",\"Yield Out (g)\",\"Time (s)\",\"Ratio\",\"Rating\",\"Tags\",\"Notes\"\n"
        );
    }

    #[test]
    fn test_row_contents() {
        let csv = render_csv(&[shot(1, 1)], &beans(), &Utc).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"2024-05-01 07:30:00\",\"Kenya AA - Square Mile\",\"5\",\"3.5\",\"18\",\"18\",\
             \"36.5\",\"28\",\"2.03\",\"4\",\"perfect; slow\",\"syrupy\""
        );
    }

    #[test]
    fn test_missing_bean_renders_unknown() {
        let csv = render_csv(&[shot(1, 7), shot(2, 1)], &beans(), &Utc).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains(",\"Unknown\","));
        assert!(rows[1].contains(",\"Kenya AA - Square Mile\","));
    }

    #[test]
    fn test_rows_follow_input_order() {
        let csv = render_csv(&[shot(2, 7), shot(1, 1)], &beans(), &Utc).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert!(rows[0].contains("Unknown"));
        assert!(rows[1].contains("Kenya AA"));
    }

    #[test]
    fn test_absent_notes_render_empty() {
        let mut s = shot(1, 1);
        s.notes = None;
        s.tags.clear();
        let csv = render_csv(&[s], &beans(), &Utc).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with(",\"\",\"\""));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut s = shot(1, 1);
        s.notes = Some("tasted \"bright\", then flat".to_string());
        let csv = render_csv(&[s], &beans(), &Utc).unwrap();
        assert!(
            csv.lines()
                .nth(1)
                .unwrap()
                .ends_with(",\"tasted \"\"bright\"\", then flat\"")
        );
    }

    #[test]
    fn test_multiline_note_stays_in_one_record() {
        let mut s = shot(1, 1);
        s.notes = Some("line one\nline \"two\"".to_string());
        let csv = render_csv(&[s], &beans(), &Utc).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][11], "line one\nline \"two\"");
    }

    #[test]
    fn test_dates_use_given_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let csv = render_csv(&[shot(1, 1)], &beans(), &tz).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("\"2024-05-01 09:30:00\""));
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_filename(date), "barista-shots-2024-05-01.csv");
    }
}
