//! Value-stream ingestion with zero-allocation float parsing.
//!
//! Accepts one measurement per line, either `value` or `time,value`.
//! Blank lines and `#` comments are skipped, as is a leading header line.
//! Non-finite values parse and flow through; the store's pass-through
//! policy applies to replayed data too.

use std::{
    error::Error,
    fmt::{self, Display},
    io::{BufRead, BufReader, Read},
};

use crate::core::series::TimeSeries;

/// One parsed line. `time` is present only for two-column rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub time: Option<f64>,
    pub value: f64,
}

// --- Error Handling ---
#[derive(Debug)]
pub struct ParseCsvError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug)]
pub enum ParseErrorKind {
    Io(std::io::Error),
    BadColumnCount(usize),
    BadFloat { field: &'static str, text: String },
}

impl Display for ParseCsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Io(e) => write!(f, "I/O error on line {}: {}", self.line, e),
            ParseErrorKind::BadColumnCount(n) => {
                write!(f, "line {}: expected 1–2 columns, got {}", self.line, n)
            }
            ParseErrorKind::BadFloat { field, text } => {
                write!(f, "line {}: invalid {} value '{}'", self.line, field, text)
            }
        }
    }
}
impl Error for ParseCsvError {}

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while !b.is_empty() && b[0].is_ascii_whitespace() {
        b = &b[1..];
    }
    while !b.is_empty() && b[b.len() - 1].is_ascii_whitespace() {
        b = &b[..b.len() - 1];
    }
    b
}

/// Rewrite U+2212 (minus sign, as emitted by some exporters) to ASCII `-`.
#[inline]
fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

#[inline]
fn parse_f64(bytes: &[u8], line: usize, field: &'static str) -> Result<f64, ParseCsvError> {
    lexical_core::parse::<f64>(bytes).map_err(|_| ParseCsvError {
        line,
        kind: ParseErrorKind::BadFloat {
            field,
            text: String::from_utf8_lossy(bytes).into_owned(),
        },
    })
}

// --- Stream reader ---
const BUF_CAP: usize = 1 << 20; // 1 MiB

/// Read every measurement from `src`. An empty stream is not an error;
/// it replays into an empty series, which still renders.
pub fn read_values<R: Read>(src: R) -> Result<Vec<Measurement>, ParseCsvError> {
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut data = Vec::<Measurement>::new();
    let mut saw_first = false;
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = rdr.read_until(b'\n', &mut buf).map_err(|e| ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::Io(e),
        })?;
        if n == 0 {
            break;
        }
        line_no += 1;

        if buf.ends_with(b"\n") {
            buf.pop();
        }
        if buf.ends_with(b"\r") {
            buf.pop();
        }

        normalize_unicode_minus(&mut buf);
        if trim(&buf).is_empty() || buf[0] == b'#' {
            continue;
        }

        // simple header detection (non-numeric first field)
        if !saw_first {
            saw_first = true;
            let first = buf.iter().position(|&b| b == b',').unwrap_or(buf.len());
            if lexical_core::parse::<f64>(trim(&buf[..first])).is_err() {
                continue;
            }
        }

        // split – at most time,value
        let split = buf.iter().position(|&b| b == b',');
        let measurement = match split {
            None => Measurement {
                time: None,
                value: parse_f64(trim(&buf), line_no, "value")?,
            },
            Some(comma) => {
                let rest = &buf[comma + 1..];
                if rest.contains(&b',') {
                    let cols = 2 + rest.iter().filter(|&&b| b == b',').count();
                    return Err(ParseCsvError {
                        line: line_no,
                        kind: ParseErrorKind::BadColumnCount(cols),
                    });
                }
                Measurement {
                    time: Some(parse_f64(trim(&buf[..comma]), line_no, "time")?),
                    value: parse_f64(trim(rest), line_no, "value")?,
                }
            }
        };
        data.push(measurement);
    }
    Ok(data)
}

pub fn read_values_from_path(path: &str) -> Result<Vec<Measurement>, ParseCsvError> {
    if path == "-" {
        read_values(std::io::stdin())
    } else {
        use std::fs::File;
        read_values(File::open(path).map_err(|e| ParseCsvError {
            line: 0,
            kind: ParseErrorKind::Io(e),
        })?)
    }
}

/// Feed measurements into a store in stream order. Timestamped rows go
/// through `record_at`, bare values get wall-clock stamps.
pub fn replay(series: &mut TimeSeries, measurements: &[Measurement]) {
    for m in measurements {
        match m.time {
            Some(t) => series.record_at(m.value, t),
            None => series.record(m.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<Measurement> {
        read_values(input.as_bytes()).unwrap()
    }

    #[test]
    fn bare_values_have_no_time() {
        let rows = values("1.5\n-2.0\n");
        assert_eq!(
            rows,
            vec![
                Measurement {
                    time: None,
                    value: 1.5
                },
                Measurement {
                    time: None,
                    value: -2.0
                },
            ]
        );
    }

    #[test]
    fn two_columns_are_time_value() {
        let rows = values("0.0,10.0\n0.5,11.0\n");
        assert_eq!(rows[1].time, Some(0.5));
        assert_eq!(rows[1].value, 11.0);
    }

    #[test]
    fn skips_header_comments_and_blanks() {
        let rows = values("time,value\n# warmup\n\n1.0,2.0\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, 2.0);
    }

    #[test]
    fn normalizes_unicode_minus() {
        let rows = values("\u{2212}3.5\n");
        assert_eq!(rows[0].value, -3.5);
    }

    #[test]
    fn rejects_extra_columns() {
        let err = read_values("1.0,2.0,3.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::BadColumnCount(3)));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn rejects_garbage_floats() {
        let err = read_values("growth\n1.0\nfast\n".as_bytes()).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::BadFloat { .. }));
        assert_eq!(err.line, 3);
    }

    #[test]
    fn empty_stream_is_not_an_error() {
        assert!(values("").is_empty());
        assert!(values("# only comments\n").is_empty());
    }

    #[test]
    fn replay_feeds_the_store() {
        let mut series = TimeSeries::with_capacity(8);
        replay(
            &mut series,
            &values("0.0,1.0\n1.0,4.0\n2.0,9.0\n"),
        );
        assert_eq!(series.step(), 3);
        let points = series.extract(crate::core::series::Axis::Time, (0.0, 1.0));
        assert_eq!(points, vec![(0.0, 1.0), (1.0, 4.0), (2.0, 9.0)]);
    }
}
