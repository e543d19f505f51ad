//! Trace file serialization: header + one `OP       0xHEX` line per record.

use crate::core::{Operation, TraceRecord};
use crate::error::{Result, TraceError};
use crate::random::RandomSource;
use crate::workload::Pattern;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// First line of every trace file.
pub const HEADER: &str = "# Type  Addr";

/// Writes the header followed by every record, in order. Returns the number
/// of records written.
pub fn write_trace<W, I>(writer: &mut W, records: I) -> Result<usize>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = TraceRecord>,
{
    writeln!(writer, "{HEADER}")?;
    let mut written = 0;
    for record in records {
        writeln!(writer, "{record}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Creates (or truncates) `path` and writes the trace to it.
pub fn write_trace_file<P, I>(path: P, records: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = TraceRecord>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let written = write_trace(&mut writer, records)?;
    debug!(path = %path.display(), records = written, "wrote trace file");
    Ok(written)
}

/// Runs `pattern` for `count` records and writes the result to `path`.
pub fn generate_file<P, R>(pattern: Pattern, path: P, count: usize, rng: &mut R) -> Result<usize>
where
    P: AsRef<Path>,
    R: RandomSource + ?Sized,
{
    write_trace_file(path, pattern.records(count, rng))
}

/// Parses one data line. Blank and `#` lines yield `None`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<TraceRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let err = |message: String| TraceError::Parse {
        line: line_no,
        message,
    };

    let mut fields = trimmed.split_whitespace();
    let (op_field, addr_field) = match (fields.next(), fields.next()) {
        (Some(op), Some(addr)) => (op, addr),
        _ => return Err(err(format!("expected `OP ADDR`, got `{trimmed}`"))),
    };
    if let Some(extra) = fields.next() {
        return Err(err(format!("unexpected trailing field `{extra}`")));
    }

    let mut op_chars = op_field.chars();
    let operation = match (op_chars.next(), op_chars.next()) {
        (Some(c), None) => Operation::from_code(c),
        _ => None,
    }
    .ok_or_else(|| err(format!("unknown operation `{op_field}`")))?;

    let digits = addr_field
        .strip_prefix("0x")
        .or_else(|| addr_field.strip_prefix("0X"))
        .unwrap_or(addr_field);
    let address = u64::from_str_radix(digits, 16)
        .map_err(|e| err(format!("invalid address `{addr_field}`: {e}")))?;

    Ok(Some(TraceRecord { operation, address }))
}

/// Reads every data record from a trace, skipping the header and comments.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(record) = parse_line(&line?, idx + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

pub fn read_trace_file<P: AsRef<Path>>(path: P) -> Result<Vec<TraceRecord>> {
    let file = File::open(path.as_ref())?;
    parse_trace(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: Vec<TraceRecord>) -> String {
        let mut out = Vec::new();
        write_trace(&mut out, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_trace_is_header_only() {
        assert_eq!(render(vec![]), "# Type  Addr\n");
    }

    #[test]
    fn writes_reference_layout() {
        let text = render(vec![TraceRecord::load(0x1000), TraceRecord::store(0x3FFFFC0)]);
        assert_eq!(text, "# Type  Addr\nL       0x1000\nS       0x3FFFFC0\n");
    }

    #[test]
    fn write_reports_record_count() {
        let mut out = Vec::new();
        let n = write_trace(&mut out, (0..7).map(|i| TraceRecord::load(i * 64))).unwrap();
        assert_eq!(n, 7);
    }

    #[test]
    fn parse_accepts_prefix_variants() {
        assert_eq!(
            parse_line("L 0x1a40", 1).unwrap(),
            Some(TraceRecord::load(0x1A40))
        );
        assert_eq!(
            parse_line("S\t1A40", 1).unwrap(),
            Some(TraceRecord::store(0x1A40))
        );
        assert_eq!(
            parse_line("  L       0XFF  ", 1).unwrap(),
            Some(TraceRecord::load(0xFF))
        );
    }

    #[test]
    fn parse_skips_header_comments_and_blanks() {
        let text = "# Type  Addr\n\nL       0x40\n# note\nS       0x80\n";
        let records = parse_trace(text.as_bytes()).unwrap();
        assert_eq!(records, vec![TraceRecord::load(0x40), TraceRecord::store(0x80)]);
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        for (line, bad) in [
            ("X 0x40", "operation"),
            ("LS 0x40", "operation"),
            ("L 0xZZ", "address"),
            ("L", "OP ADDR"),
            ("L 0x40 extra", "trailing"),
        ] {
            match parse_line(line, 3) {
                Err(TraceError::Parse { line: 3, message }) => {
                    assert!(message.contains(bad), "{line}: {message}")
                }
                other => panic!("{line}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn parse_reports_line_number() {
        let text = "# Type  Addr\nL       0x40\nQ       0x80\n";
        match parse_trace(text.as_bytes()) {
            Err(TraceError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn round_trip_preserves_records() {
        let records = vec![
            TraceRecord::store(0),
            TraceRecord::load(0x50008),
            TraceRecord::load(u64::MAX - 63),
        ];
        let text = render(records.clone());
        assert_eq!(parse_trace(text.as_bytes()).unwrap(), records);
    }
}
