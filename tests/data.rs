// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
#![cfg(feature = "std")]

use std::io::Write;

use strejc_pid::data::{self, DataError, RecordedRun, Sample, Series};

const TEMPERATURE: &str = "\
# time\ttemperature
0\t21.5
1\t22.75

2\t24.0
";

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

mod test_parse {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let series = data::parse_series(TEMPERATURE.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.times(), vec![0.0, 1.0, 2.0]);
        assert_eq!(series.values(), vec![21.5, 22.75, 24.0]);
    }

    #[test]
    fn test_spaces_and_extra_columns() {
        let series = data::parse_series("  0.5   3e2  ignored\n".as_bytes()).unwrap();
        assert_eq!(
            series.samples(),
            &[Sample {
                time: 0.5,
                value: 300.0
            }]
        );
    }

    #[test]
    fn test_missing_column_reports_line() {
        let err = data::parse_series("0\t1\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { line: 2 }));
    }

    #[test]
    fn test_invalid_number_reports_line_and_text() {
        let err = data::parse_series("# header\n0\tabc\n".as_bytes()).unwrap_err();
        match err {
            DataError::InvalidNumber { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "abc");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(data::parse_series("".as_bytes()).unwrap().is_empty());
    }
}

mod test_load {
    use super::*;

    #[test]
    fn test_load_series_from_file() {
        let file = write_temp(TEMPERATURE);
        let series = data::load_series(file.path()).unwrap();
        assert_eq!(series.values(), vec![21.5, 22.75, 24.0]);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match data::load_series(&path).unwrap_err() {
            DataError::File { path: failed, source } => {
                assert_eq!(failed, path);
                assert!(matches!(*source, DataError::Io(_)));
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_in_file_is_wrapped() {
        let file = write_temp("0\t1\n1\tx\n");
        let err = data::load_series(file.path()).unwrap_err();
        match err {
            DataError::File { source, .. } => {
                assert!(matches!(*source, DataError::InvalidNumber { line: 2, .. }))
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_recorded_run_truncates_to_limit() {
        let measured = write_temp("0\t20\n1\t21\n2\t22\n3\t23\n");
        let target = write_temp("0\t150\n1\t150\n2\t150\n3\t150\n");

        let run = RecordedRun::load(measured.path(), target.path(), Some(2)).unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(run.measured.values(), vec![20.0, 21.0]);
        assert_eq!(run.target.values(), vec![150.0, 150.0]);
    }

    #[test]
    fn test_recorded_run_truncates_to_shorter_series() {
        let measured: Series = (0..5)
            .map(|i| Sample {
                time: i as f64,
                value: 20.0,
            })
            .collect();
        let target: Series = (0..3)
            .map(|i| Sample {
                time: i as f64,
                value: 150.0,
            })
            .collect();

        let run = RecordedRun::new(measured, target, Some(data::FURNACE_RECORDING_ROWS));
        assert_eq!(run.len(), 3);
        assert_eq!(run.target.len(), 3);
        assert!(!run.is_empty());
    }
}

mod test_write {
    use super::*;

    #[test]
    fn test_written_series_reads_back() {
        let rows = [[0.0, 150.0, 20.0], [1.0, 150.0, 6.25]];
        let mut buffer = Vec::new();
        data::write_series(&mut buffer, &["time", "setpoint", "value"], rows).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert_eq!(text, "# time\tsetpoint\tvalue\n0\t150\t20\n1\t150\t6.25\n");

        let series = data::parse_series(buffer.as_slice()).unwrap();
        assert_eq!(series.values(), vec![150.0, 150.0]);
    }
}
