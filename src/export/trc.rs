use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::export::{ExportOptions, comment_text};
use crate::types::abs_time;
use crate::types::canframe::FrameKind;
use crate::types::errors::ExportError;
use crate::types::log_entry::{EntryType, LogEntry};

/// Renders entries as a PEAK-style `.trc` trace with default options.
pub fn render_trc(entries: &[LogEntry], session_start: &NaiveDateTime) -> Result<String, ExportError> {
    render_trc_with(entries, session_start, &ExportOptions::default())
}

/// Renders entries as a PEAK-style `.trc` trace.
///
/// ```text
/// ;$FILEVERSION=1.1
/// ;$STARTTIME=45366.4375000000
/// ;
/// ;   Start time: 15.03.2024 10:30:00.000
/// ;   No    Time[ms] Dr       ID Typ L Data
///      1)          0 Rx      123 STD 2 11 22
/// ;   ERROR Bus off
///      2)       1500 Tx 18DAF110 EXT 0
/// ```
///
/// Frame lines are numbered from 1 and skip System entries, which become
/// `;` comments so frame-indexed tools never see them. `$STARTTIME` is the
/// session start as fractional days since 1899-12-30.
pub fn render_trc_with(
    entries: &[LogEntry],
    session_start: &NaiveDateTime,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let mut out = String::with_capacity(256 + entries.len() * 48);

    writeln!(out, ";$FILEVERSION={}", options.trc_file_version)?;
    writeln!(out, ";$STARTTIME={:.10}", abs_time::ole_date(session_start))?;
    writeln!(out, ";")?;
    writeln!(
        out,
        ";   Start time: {}",
        session_start.format("%d.%m.%Y %H:%M:%S%.3f")
    )?;
    if let Some(creator) = &options.creator {
        writeln!(out, ";   Generated by {}", creator)?;
    }
    // same column widths as the frame lines below
    writeln!(
        out,
        ";{:>5}  {:>10} {:<2} {:>8} {:<3} {} {}",
        "No", "Time[ms]", "Dr", "ID", "Typ", "L", "Data"
    )?;

    let mut index: usize = 0;
    for entry in entries {
        let tag: &str = match (entry.entry_type, entry.kind) {
            (EntryType::Sys, _) | (_, FrameKind::System) => {
                writeln!(out, ";   {}", comment_text(entry))?;
                continue;
            }
            (_, FrameKind::Standard) => "STD",
            (_, FrameKind::Extended) => "EXT",
        };
        index += 1;

        let line: String = format!(
            "{:>6}) {:>10} {:<2} {:>8} {} {} {}",
            index,
            abs_time::offset_millis(session_start, &entry.timestamp),
            entry.direction().as_str(),
            entry.id_display,
            tag,
            entry.dlc,
            entry.data_display
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    Ok(out)
}
