//! The detection log store.
//!
//! Detections live in dated CSV files (`detections_YYYYMMDD_HHMM.csv`)
//! under one log directory. Ingest appends to the file for the current
//! minute; `/csv-data` merges every file into one JSON-ready record list.
//! The store is behind a trait so the router can be exercised against a
//! mock.

use chrono::Local;
use seawatch_business::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fs::{self, OpenOptions};
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Column layout of the log files, also the ingest stamp order.
const CSV_HEADER: [&str; 7] = ["time", "label", "conf", "x1", "y1", "x2", "y2"];

/// Bounding-box columns, rounded to 2 decimals in merged output.
const COORDINATE_COLUMNS: [&str; 4] = ["x1", "y1", "x2", "y2"];

const TIME_COLUMN: &str = "time";
const LOG_FILE_PREFIX: &str = "detections_";
const LOG_FILE_SUFFIX: &str = ".csv";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("log directory error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// One detection to ingest. The store stamps the time itself; clients
/// only supply the detection payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRow {
    pub label: String,
    pub conf: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

pub trait DetectionStore {
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Merge every log file into one record list, newest first.
    fn load_records(&self) -> impl Future<Output = Result<Vec<Record>, StoreError>> + Send;

    /// Append detections to the current log file, stamping each row.
    fn append(&self, rows: Vec<DetectionRow>)
    -> impl Future<Output = Result<usize, StoreError>> + Send;
}

/// Filesystem-backed store over a directory of CSV log files.
#[derive(Debug, Clone)]
pub struct CsvLogStore {
    dir: PathBuf,
}

impl CsvLogStore {
    /// Open (and create, when missing) the log directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn log_files(&self) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| {
                        name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
                    })
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

impl DetectionStore for CsvLogStore {
    async fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    async fn load_records(&self) -> Result<Vec<Record>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Record> = Vec::new();

        for path in self.log_files()? {
            match read_log_file(&path) {
                Ok((headers, file_rows)) => {
                    for header in &headers {
                        if !columns.contains(header) {
                            columns.push(header.clone());
                        }
                    }
                    for file_row in file_rows {
                        let mut row = Record::new();
                        for (header, value) in headers.iter().zip(file_row) {
                            row.insert(header.clone(), value);
                        }
                        rows.push(row);
                    }
                }
                // One bad file never takes the whole merge down.
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "Skipping unreadable log file");
                }
            }
        }

        let mut records: Vec<Record> = rows
            .into_iter()
            .map(|row| {
                // Outer join: every record carries the full column union,
                // in first-seen order, with nulls where a file had no
                // such column.
                let mut record = Record::new();
                for column in &columns {
                    record.insert(column.clone(), row.get(column).cloned().unwrap_or(Value::Null));
                }
                record
            })
            .collect();

        for record in &mut records {
            for column in COORDINATE_COLUMNS {
                // Only float cells get rounded; integers are already exact.
                if let Some(value) = record.get_mut(column)
                    && value.is_f64()
                    && let Some(number) = value.as_f64()
                {
                    *value = float_value(round_to(number, 2));
                }
            }
        }

        // Newest first; rows without a time stamp go last. Stable, so
        // file order breaks ties.
        records.sort_by(|a, b| {
            let ta = a.get(TIME_COLUMN).and_then(Value::as_str);
            let tb = b.get(TIME_COLUMN).and_then(Value::as_str);
            match (ta, tb) {
                (Some(x), Some(y)) => y.cmp(x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });

        Ok(records)
    }

    async fn append(&self, rows: Vec<DetectionRow>) -> Result<usize, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }

        fs::create_dir_all(&self.dir)?;

        let now = Local::now();
        let path = self
            .dir
            .join(format!("{}{}{}", LOG_FILE_PREFIX, now.format("%Y%m%d_%H%M"), LOG_FILE_SUFFIX));
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(CSV_HEADER)?;
        }

        let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
        for row in &rows {
            let conf = round_to(row.conf, 3).to_string();
            let coords = [row.x1, row.y1, row.x2, row.y2];
            let [x1, y1, x2, y2] = coords.map(|c| round_to(c, 2).to_string());
            writer.write_record([
                stamp.as_str(),
                row.label.as_str(),
                conf.as_str(),
                x1.as_str(),
                y1.as_str(),
                x2.as_str(),
                y2.as_str(),
            ])?;
        }
        writer.flush()?;

        Ok(rows.len())
    }
}

/// Read one log file: its header row and its cells, typed.
fn read_log_file(path: &Path) -> Result<(Vec<String>, Vec<Vec<Value>>), csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(parse_cell).collect());
    }
    Ok((headers, rows))
}

/// Type a CSV cell: empty reads as null, then integer, then float
/// (non-finite floats become null, JSON has no NaN), otherwise the raw
/// string stands.
fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::Number(integer.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return float_value(float);
    }
    Value::String(raw.to_owned())
}

fn float_value(float: f64) -> Value {
    Number::from_f64(float).map(Value::Number).unwrap_or(Value::Null)
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_with_files(files: &[(&str, &str)]) -> (TempDir, CsvLogStore) {
        let dir = TempDir::new().expect("tempdir");
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).expect("write log file");
        }
        let store = CsvLogStore::new(dir.path()).expect("store");
        (dir, store)
    }

    #[tokio::test]
    async fn empty_directory_loads_zero_records() {
        let (_dir, store) = store_with_files(&[]);
        let records = store.load_records().await.expect("load");
        assert!(records.is_empty());
        assert!(store.is_available().await);
    }

    #[tokio::test]
    async fn merges_files_newest_first() {
        let (_dir, store) = store_with_files(&[
            (
                "detections_20260806_0900.csv",
                "time,label,conf\n2026-08-06 09:00:01,ship,0.9\n",
            ),
            (
                "detections_20260807_1200.csv",
                "time,label,conf\n2026-08-07 12:00:05,buoy,0.7\n",
            ),
        ]);

        let records = store.load_records().await.expect("load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["label"], "buoy");
        assert_eq!(records[1]["label"], "ship");
    }

    #[tokio::test]
    async fn outer_joins_heterogeneous_headers() {
        let (_dir, store) = store_with_files(&[
            (
                "detections_20260807_0001.csv",
                "time,label\n2026-08-07 00:01:00,ship\n",
            ),
            (
                "detections_20260807_0002.csv",
                "time,label,conf\n2026-08-07 00:02:00,buoy,0.5\n",
            ),
        ]);

        let records = store.load_records().await.expect("load");
        assert_eq!(records.len(), 2);
        // Union of headers in first-seen order, on every record.
        for record in &records {
            let keys: Vec<&str> = record.keys().map(String::as_str).collect();
            assert_eq!(keys, ["time", "label", "conf"]);
        }
        // The file without a conf column reads null there.
        assert_eq!(records[1]["label"], "ship");
        assert_eq!(records[1]["conf"], Value::Null);
        assert_eq!(records[0]["conf"], 0.5);
    }

    #[tokio::test]
    async fn skips_unparseable_files() {
        let (_dir, store) = store_with_files(&[
            (
                "detections_20260807_0001.csv",
                "time,label\n2026-08-07 00:01:00,ship\n",
            ),
            (
                "detections_20260807_0002.csv",
                "time,label\nonly-one-cell-on-this-row,and,too,many\n",
            ),
        ]);

        let records = store.load_records().await.expect("load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["label"], "ship");
    }

    #[tokio::test]
    async fn ignores_files_outside_the_naming_scheme() {
        let (_dir, store) = store_with_files(&[
            ("notes.txt", "not a log"),
            ("other.csv", "a,b\n1,2\n"),
            (
                "detections_20260807_0001.csv",
                "time,label\n2026-08-07 00:01:00,ship\n",
            ),
        ]);

        let records = store.load_records().await.expect("load");
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn types_cells_and_rounds_coordinates() {
        let (_dir, store) = store_with_files(&[(
            "detections_20260807_0001.csv",
            "time,label,conf,x1,y1,x2,y2\n\
             2026-08-07 00:01:00,ship,0.921,10.346,20,NaN,\n",
        )]);

        let records = store.load_records().await.expect("load");
        let record = &records[0];
        assert_eq!(record["conf"], 0.921);
        assert_eq!(record["x1"], 10.35);
        assert_eq!(record["y1"], 20);
        // Non-finite floats and empty cells both read as null.
        assert_eq!(record["x2"], Value::Null);
        assert_eq!(record["y2"], Value::Null);
        assert_eq!(record["label"], "ship");
    }

    #[tokio::test]
    async fn rows_without_time_sort_last() {
        let (_dir, store) = store_with_files(&[(
            "detections_20260807_0001.csv",
            "time,label\n,late\n2026-08-07 00:01:00,ship\n",
        )]);

        let records = store.load_records().await.expect("load");
        assert_eq!(records[0]["label"], "ship");
        assert_eq!(records[1]["label"], "late");
    }

    #[tokio::test]
    async fn append_stamps_and_writes_one_header() {
        let (dir, store) = store_with_files(&[]);

        let row = DetectionRow {
            label: "ship".to_owned(),
            conf: 0.92144,
            x1: 1.005,
            y1: 2.0,
            x2: 3.5,
            y2: 4.25,
        };
        let appended = store.append(vec![row.clone()]).await.expect("append");
        assert_eq!(appended, 1);
        let appended = store.append(vec![row]).await.expect("append again");
        assert_eq!(appended, 1);

        let files: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name();
        let name = name.to_string_lossy();
        assert!(name.starts_with("detections_") && name.ends_with(".csv"));

        let records = store.load_records().await.expect("load");
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record["label"], "ship");
            assert_eq!(record["conf"], 0.921);
            let time = record["time"].as_str().expect("time is a string");
            assert_eq!(time.len(), "2026-08-07 00:01:00".len());
        }
    }

    #[tokio::test]
    async fn append_nothing_touches_nothing() {
        let (dir, store) = store_with_files(&[]);
        let appended = store.append(Vec::new()).await.expect("append");
        assert_eq!(appended, 0);
        assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
    }
}
