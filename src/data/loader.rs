use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record};

/// Column names expected in every supported format.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Title", "Genre", "Year", "IMDb Rating", "MetaScore"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a movie dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – delimited table with a header row
/// * `.json`         – records-oriented array of objects
/// * `.parquet`      – flat scalar columns
///
/// Rows missing Genre, IMDb Rating, or a parseable Year are dropped (the
/// count is logged, individual rows are not reported). When `min_year` is
/// given, rows released earlier are dropped as well.
pub fn load_file(path: &Path, min_year: Option<i32>) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(build_dataset(rows, min_year))
}

// ---------------------------------------------------------------------------
// Row assembly and cleaning
// ---------------------------------------------------------------------------

/// One source row before cleaning: every field may still be absent.
#[derive(Debug, Default)]
struct RawRow {
    title: Option<String>,
    genre: Option<String>,
    year: Option<i32>,
    imdb_rating: Option<f64>,
    meta_score: Option<f64>,
}

/// Drop defective rows, apply the minimum-year cutoff, and build the Dataset.
fn build_dataset(rows: Vec<RawRow>, min_year: Option<i32>) -> Dataset {
    let total = rows.len();
    let mut below_min = 0usize;
    let mut records = Vec::with_capacity(total);

    for row in rows {
        let (Some(genre), Some(year), Some(rating)) = (row.genre, row.year, row.imdb_rating)
        else {
            continue;
        };
        if genre.trim().is_empty() {
            continue;
        }
        if min_year.is_some_and(|m| year < m) {
            below_min += 1;
            continue;
        }
        records.push(Record {
            title: row.title.unwrap_or_default(),
            genre,
            year,
            imdb_rating: rating,
            meta_score: row.meta_score,
        });
    }

    let defective = total - records.len() - below_min;
    if defective > 0 {
        log::warn!("dropped {defective} of {total} rows missing genre, rating, or year");
    }
    if below_min > 0 {
        log::info!("dropped {below_min} rows released before the configured minimum year");
    }

    Dataset::from_records(records)
}

/// Coerce a year field to an integer.  Accepts integer text and float-like
/// text (`"2010.0"`, truncated toward zero); anything else counts as missing.
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f.trunc() as i32),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Serde view of one delimited row.  Fields deserialize as `None` when the
/// cell is empty; Year is read as text so float-like values can be coerced.
#[derive(Debug, Deserialize)]
struct DelimitedRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "IMDb Rating")]
    imdb_rating: Option<f64>,
    #[serde(rename = "MetaScore")]
    meta_score: Option<f64>,
}

fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context("opening delimited file")?;

    let headers = reader.headers().context("reading header row")?;
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            bail!("missing required column: {required:?}");
        }
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<DelimitedRow>() {
        match result {
            Ok(row) => rows.push(RawRow {
                title: row.title,
                genre: row.genre,
                year: row.year.as_deref().and_then(parse_year),
                imdb_rating: row.imdb_rating,
                meta_score: row.meta_score,
            }),
            // An undeserializable row (e.g. non-numeric rating) is kept as
            // all-missing so the cleaner counts it among the dropped.
            Err(_) => rows.push(RawRow::default()),
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Title": "Alien",
///     "Genre": "Sci-Fi",
///     "Year": 1979,
///     "IMDb Rating": 8.5,
///     "MetaScore": 89
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        rows.push(RawRow {
            title: obj.get("Title").and_then(json_to_string),
            genre: obj.get("Genre").and_then(json_to_string),
            year: obj.get("Year").and_then(json_to_year),
            imdb_rating: obj.get("IMDb Rating").and_then(JsonValue::as_f64),
            meta_score: obj.get("MetaScore").and_then(JsonValue::as_f64),
        });
    }
    Ok(rows)
}

fn json_to_string(val: &JsonValue) -> Option<String> {
    val.as_str().map(str::to_string)
}

fn json_to_year(val: &JsonValue) -> Option<i32> {
    match val {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok()
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i32)
            }
        }
        JsonValue::String(s) => parse_year(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one movie per row.
///
/// Expected schema: scalar `Title`, `Genre`, `Year`, `IMDb Rating` and
/// `MetaScore` columns.  String columns may be Utf8 or LargeUtf8; numeric
/// columns may be any common int/float width.  Works with files written by
/// both **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let col = |name: &str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i).clone())
                .map_err(|_| anyhow::anyhow!("Parquet file missing {name:?} column"))
        };
        let title_col = col("Title")?;
        let genre_col = col("Genre")?;
        let year_col = col("Year")?;
        let rating_col = col("IMDb Rating")?;
        let meta_col = col("MetaScore")?;

        for row in 0..batch.num_rows() {
            rows.push(RawRow {
                title: string_at(&title_col, row),
                genre: string_at(&genre_col, row),
                year: year_at(&year_col, row),
                imdb_rating: float_at(&rating_col, row),
                meta_score: float_at(&meta_col, row),
            });
        }
    }
    Ok(rows)
}

// -- Arrow helpers --

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}

/// Extract a numeric cell as `f64` from a common int/float column.
fn float_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}

/// Extract a year cell, coercing numeric and text representations.
fn year_at(col: &Arc<dyn Array>, row: usize) -> Option<i32> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => string_at(col, row).as_deref().and_then(parse_year),
        _ => float_at(col, row)
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i32),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_coercion_handles_int_float_and_garbage() {
        assert_eq!(parse_year("2010"), Some(2010));
        assert_eq!(parse_year(" 1979 "), Some(1979));
        assert_eq!(parse_year("2010.0"), Some(2010));
        assert_eq!(parse_year("2010.9"), Some(2010));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("unknown"), None);
    }

    #[test]
    fn cleaner_drops_rows_missing_required_fields() {
        let rows = vec![
            RawRow {
                title: Some("Good".into()),
                genre: Some("Drama".into()),
                year: Some(1999),
                imdb_rating: Some(8.1),
                meta_score: Some(77.0),
            },
            RawRow {
                genre: Some("Drama".into()),
                year: Some(2001),
                ..Default::default()
            },
            RawRow {
                title: Some("Blank genre".into()),
                genre: Some("  ".into()),
                year: Some(2001),
                imdb_rating: Some(6.0),
                ..Default::default()
            },
            RawRow::default(),
        ];
        let ds = build_dataset(rows, None);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].title, "Good");
    }

    #[test]
    fn min_year_cutoff_is_applied_only_when_configured() {
        let mk = |year| RawRow {
            title: Some(format!("Y{year}")),
            genre: Some("Drama".into()),
            year: Some(year),
            imdb_rating: Some(7.0),
            meta_score: None,
        };
        let ds = build_dataset(vec![mk(1950), mk(1957), mk(1980)], Some(1957));
        assert_eq!(ds.len(), 2);
        assert!(ds.records.iter().all(|r| r.year >= 1957));

        let ds = build_dataset(vec![mk(1950), mk(1957), mk(1980)], None);
        assert_eq!(ds.len(), 3);
    }
}
