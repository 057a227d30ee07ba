use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::types::errors::ExportError;
use crate::types::log_entry::LogEntry;

/// Header line, written as-is before the quoted rows.
pub const CSV_HEADER: &str = "Timestamp,Offset,ID,Type,DLC,Data";

/// Renders entries as CSV, in the order given.
///
/// Every data field is wrapped in double quotes, with embedded quotes
/// doubled. `Offset` is the entry's stored offset in seconds with 6 decimals.
/// An empty slice renders the header line only.
///
/// # Errors
/// - [`ExportError::Csv`] / [`ExportError::Format`] only if the in-memory
///   writer fails; entry content is never validated.
pub fn render_csv(entries: &[LogEntry]) -> Result<String, ExportError> {
    let mut buf: Vec<u8> = Vec::with_capacity(CSV_HEADER.len() + 1 + entries.len() * 64);
    buf.extend_from_slice(CSV_HEADER.as_bytes());
    buf.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);

    for entry in entries {
        writer.write_record([
            entry.time_display(),
            format!("{:.6}", entry.offset),
            entry.id_display.clone(),
            entry.entry_type.as_str().to_string(),
            entry.dlc.to_string(),
            entry.data_display.clone(),
        ])?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|_| ExportError::Format)?;
    String::from_utf8(bytes).map_err(|_| ExportError::Format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::parse_byte_string;
    use crate::types::canframe::{CanFrame, Direction, FrameId};
    use crate::LogStore;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(sec: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_milli_opt(9, 5, sec, ms)
            .unwrap()
    }

    #[test]
    fn empty_log_is_header_only() {
        assert_eq!(render_csv(&[]).unwrap(), "Timestamp,Offset,ID,Type,DLC,Data\n");
    }

    #[test]
    fn single_entry_row_is_fully_quoted() {
        let mut store = LogStore::new();
        store.append_at(
            &CanFrame::new(FrameId::standard(0x7FF), vec![0x11, 0x22]),
            Direction::Rx,
            at(1, 7),
        );

        let text = render_csv(store.entries()).unwrap();
        assert_eq!(
            text,
            "Timestamp,Offset,ID,Type,DLC,Data\n\
             \"09:05:01.007\",\"0.000000\",\"7FF\",\"STD\",\"2\",\"11 22\"\n"
        );
    }

    #[test]
    fn rows_keep_chronological_order_and_offsets() {
        let mut store = LogStore::new();
        store.append_at(&CanFrame::new(FrameId::standard(0x1), vec![]), Direction::Rx, at(0, 0));
        store.append_at(
            &CanFrame::new(FrameId::extended(0x18DAF110), vec![0xAA]),
            Direction::Tx,
            at(2, 345),
        );

        let text = render_csv(store.entries()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"09:05:00.000\",\"0.000000\",\"001\",\"STD\",\"0\",\"\"");
        assert_eq!(lines[2], "\"09:05:02.345\",\"2.345000\",\"18DAF110\",\"TX\",\"1\",\"AA\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut store = LogStore::new();
        store.append_at(&CanFrame::system("status", "say \"hi\""), Direction::Rx, at(0, 0));

        let text = render_csv(store.entries()).unwrap();
        assert!(text.ends_with("\"STATUS\",\"SYS\",\"0\",\"say \"\"hi\"\"\"\n"));
    }

    #[test]
    fn data_column_parses_back_to_payload() {
        let payloads: Vec<Vec<u8>> = vec![vec![0x11, 0x22, 0x33], vec![], vec![0x00, 0xFF, 0x0A, 0xB0]];
        let mut store = LogStore::new();
        for (i, data) in payloads.iter().enumerate() {
            store.append_at(
                &CanFrame::new(FrameId::standard(0x100 + i as u32), data.clone()),
                Direction::Rx,
                at(0, i as u32),
            );
        }

        let text = render_csv(store.entries()).unwrap();
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Timestamp", "Offset", "ID", "Type", "DLC", "Data"]);

        let mut parsed: Vec<Vec<u8>> = Vec::new();
        for record in reader.records() {
            let record = record.unwrap();
            parsed.push(parse_byte_string(&record[5]).unwrap());
        }
        assert_eq!(parsed, payloads);
    }
}
