use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::export::{ExportOptions, comment_text};
use crate::types::abs_time;
use crate::types::canframe::FrameKind;
use crate::types::errors::ExportError;
use crate::types::log_entry::{EntryType, LogEntry};

/// Chrono pattern of the `date` header, e.g. `Fri Mar 15 10:30:00.000 am 2024`.
pub const ASC_DATE_FORMAT: &str = "%a %b %d %I:%M:%S%.3f %P %Y";

/// Renders entries as a Vector-style `.asc` trace with default options.
pub fn render_asc(entries: &[LogEntry], session_start: &NaiveDateTime) -> Result<String, ExportError> {
    render_asc_with(entries, session_start, &ExportOptions::default())
}

/// Renders entries as a Vector-style `.asc` trace.
///
/// ```text
/// date Fri Mar 15 10:30:00.000 am 2024
/// 0.0000 1 123 Rx d 2 11 22
/// // ERROR Bus off
/// 1.5000 1 18DAF110x Tx d 0
/// ```
///
/// Offsets are seconds since `session_start` with 4 decimals. Extended ids
/// carry the usual `x` suffix. System entries become `//` comments.
pub fn render_asc_with(
    entries: &[LogEntry],
    session_start: &NaiveDateTime,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let mut out = String::with_capacity(64 + entries.len() * 40);

    writeln!(out, "date {}", session_start.format(ASC_DATE_FORMAT))?;
    if let Some(creator) = &options.creator {
        writeln!(out, "// Generated by {}", creator)?;
    }

    for entry in entries {
        let suffix: &str = match (entry.entry_type, entry.kind) {
            (EntryType::Sys, _) | (_, FrameKind::System) => {
                writeln!(out, "// {}", comment_text(entry))?;
                continue;
            }
            (_, FrameKind::Standard) => "",
            (_, FrameKind::Extended) => "x",
        };

        let line: String = format!(
            "{:.4} {} {}{} {} d {} {}",
            abs_time::offset_seconds(session_start, &entry.timestamp),
            options.asc_channel,
            entry.id_display,
            suffix,
            entry.direction().as_str(),
            entry.dlc,
            entry.data_display
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    Ok(out)
}

/// Reads the start time back from an ASC `date` header line.
///
/// Returns `None` if the line does not start with `date` or the rest does
/// not match [`ASC_DATE_FORMAT`]. Extra whitespace between tokens is accepted.
pub fn parse_date_header(line: &str) -> Option<NaiveDateTime> {
    let mut parts = line.split_ascii_whitespace();
    if parts.next()? != "date" {
        return None;
    }

    let date_str: String = parts.collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&date_str, ASC_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::canframe::{CanFrame, Direction, FrameId};
    use crate::LogStore;
    use chrono::NaiveDate;

    fn at(hh: u32, sec: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_milli_opt(hh, 30, sec, ms)
            .unwrap()
    }

    #[test]
    fn empty_log_is_date_line_only() {
        assert_eq!(
            render_asc(&[], &at(10, 0, 0)).unwrap(),
            "date Fri Mar 15 10:30:00.000 am 2024\n"
        );
        assert_eq!(
            render_asc(&[], &at(22, 0, 0)).unwrap(),
            "date Fri Mar 15 10:30:00.000 pm 2024\n"
        );
    }

    #[test]
    fn renders_frames_and_system_comments() {
        let mut store = LogStore::new();
        store.append_at(
            &CanFrame::new(FrameId::standard(0x123), vec![0x11, 0x22]),
            Direction::Rx,
            at(10, 0, 0),
        );
        store.append_at(&CanFrame::system("error", "Bus off"), Direction::Rx, at(10, 1, 0));
        store.append_at(
            &CanFrame::new(FrameId::extended(0x18DAF110), vec![]),
            Direction::Tx,
            at(10, 1, 500),
        );

        let text = render_asc(store.entries(), &at(10, 0, 0)).unwrap();
        assert_eq!(
            text,
            "date Fri Mar 15 10:30:00.000 am 2024\n\
             0.0000 1 123 Rx d 2 11 22\n\
             // ERROR Bus off\n\
             1.5000 1 18DAF110x Tx d 0\n"
        );
    }

    #[test]
    fn offsets_ignore_stored_entry_offsets() {
        // entries from two sessions merged into one export
        let mut first = LogStore::new();
        first.append_at(&CanFrame::new(FrameId::standard(0x1), vec![]), Direction::Rx, at(10, 0, 0));
        let mut second = LogStore::new();
        second.append_at(&CanFrame::new(FrameId::standard(0x2), vec![0x01]), Direction::Rx, at(10, 3, 250));

        let mut merged = first.snapshot();
        merged.extend(second.snapshot());
        assert_eq!(merged[1].offset, 0.0);

        let text = render_asc(&merged, &at(10, 0, 0)).unwrap();
        assert!(text.ends_with("0.0000 1 001 Rx d 0\n3.2500 1 002 Rx d 1 01\n"));
    }

    #[test]
    fn options_set_channel_and_creator() {
        let mut store = LogStore::new();
        store.append_at(&CanFrame::new(FrameId::standard(0x10), vec![0xFF]), Direction::Rx, at(10, 0, 0));
        let options = ExportOptions {
            asc_channel: 3,
            creator: Some("can-logger".into()),
            ..ExportOptions::default()
        };

        let text = render_asc_with(store.entries(), &at(10, 0, 0), &options).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "// Generated by can-logger");
        assert_eq!(lines[2], "0.0000 3 010 Rx d 1 FF");
    }

    #[test]
    fn date_header_reads_back() {
        let start = at(14, 59, 123);
        let text = render_asc(&[], &start).unwrap();
        assert_eq!(parse_date_header(text.lines().next().unwrap()), Some(start));
    }

    #[test]
    fn date_header_rejects_other_lines() {
        // case-sensitive leading token
        assert_eq!(parse_date_header("DATE Fri Mar 15 10:30:00.000 am 2024"), None);
        assert_eq!(parse_date_header("0.0000 1 123 Rx d 0"), None);
        assert_eq!(parse_date_header("date not a date"), None);
    }

    #[test]
    fn date_header_tolerates_extra_spaces() {
        let got = parse_date_header("date  Fri Mar 15   12:00:00.000 am 2024").unwrap();
        assert_eq!(got, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }
}
