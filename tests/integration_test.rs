use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use cinescope::data::aggregate::{aggregate, FilterRequest};
use cinescope::data::loader::load_file;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

const CSV_FIXTURE: &str = "\
Title,Genre,Year,IMDb Rating,MetaScore
Alpha,Action,2010,7.0,60
Beta,Action,2010.0,8.0,
Gamma,Action,2015,6.0,55
Delta,Drama,2012,9.0,90
NoGenre,,2011,7.5,70
NoRating,Comedy,2011,,70
BadYear,Comedy,n/a,6.5,50
Oldie,Action,1950,7.2,80
";

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_load_drops_defective_rows_and_derives_lookups() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "movies.csv", CSV_FIXTURE);

    let ds = load_file(&path, None).unwrap();

    // NoGenre, NoRating, and BadYear are dropped; everything else survives.
    assert_eq!(ds.len(), 5);
    assert_eq!(ds.genres, vec!["Action", "Drama"]);
    assert_eq!(ds.year_range, Some((1950, 2015)));

    // Float-like year text is truncated to an integer.
    let beta = ds.records.iter().find(|r| r.title == "Beta").unwrap();
    assert_eq!(beta.year, 2010);
    assert_eq!(beta.meta_score, None);
}

#[test]
fn min_year_cutoff_drops_early_releases() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "movies.csv", CSV_FIXTURE);

    let ds = load_file(&path, Some(1957)).unwrap();
    assert_eq!(ds.len(), 4);
    assert!(ds.records.iter().all(|r| r.year >= 1957));
    assert!(ds.records.iter().all(|r| r.title != "Oldie"));
}

#[test]
fn tsv_dispatches_on_extension() {
    let dir = TempDir::new().unwrap();
    let tsv = CSV_FIXTURE.replace(',', "\t");
    let path = write_fixture(&dir, "movies.tsv", &tsv);

    let ds = load_file(&path, None).unwrap();
    assert_eq!(ds.len(), 5);
}

#[test]
fn json_load_matches_csv_semantics() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "movies.json",
        r#"[
            {"Title": "Alpha", "Genre": "Action", "Year": 2010, "IMDb Rating": 7.0, "MetaScore": 60},
            {"Title": "Beta", "Genre": "Action", "Year": 2010.0, "IMDb Rating": 8.0, "MetaScore": null},
            {"Title": "NoGenre", "Year": 2011, "IMDb Rating": 7.5, "MetaScore": 70},
            {"Title": "NoYear", "Genre": "Drama", "IMDb Rating": 6.5}
        ]"#,
    );

    let ds = load_file(&path, None).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.genres, vec!["Action"]);
    assert_eq!(ds.records[1].year, 2010);
    assert_eq!(ds.records[1].meta_score, None);
}

#[test]
fn parquet_round_trips_through_the_loader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Title", DataType::Utf8, false),
        Field::new("Genre", DataType::Utf8, true),
        Field::new("Year", DataType::Int64, true),
        Field::new("IMDb Rating", DataType::Float64, true),
        Field::new("MetaScore", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Alpha", "Beta", "NoGenre"])),
            Arc::new(StringArray::from(vec![Some("Action"), Some("Drama"), None])),
            Arc::new(Int64Array::from(vec![Some(2010), Some(2012), Some(2011)])),
            Arc::new(Float64Array::from(vec![Some(7.0), Some(9.0), Some(6.0)])),
            Arc::new(Float64Array::from(vec![Some(60.0), None, Some(50.0)])),
        ],
    )
    .unwrap();

    let file = File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(&path, None).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.genres, vec!["Action", "Drama"]);
    assert_eq!(ds.records[1].meta_score, None);
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_file(&dir.path().join("nope.csv"), None).is_err());
}

#[test]
fn missing_required_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "movies.csv", "Title,Genre,Year\nAlpha,Action,2010\n");
    assert!(load_file(&path, None).is_err());
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "movies.xlsx", "whatever");
    assert!(load_file(&path, None).is_err());
}

#[test]
fn load_then_aggregate_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "movies.csv", CSV_FIXTURE);
    let ds = load_file(&path, None).unwrap();

    let result = aggregate(
        &ds,
        &FilterRequest {
            genre: "Action".to_string(),
            year_start: 2010,
            year_end: 2015,
        },
    );

    assert_eq!(result.filtered.len(), 3);
    assert_eq!(result.average_rating, Some(7.0));
    assert_eq!(result.count_by_year, vec![(2010, 2), (2015, 1)]);

    let top: Vec<f64> = result
        .top_rated
        .iter()
        .map(|&i| ds.records[i].imdb_rating)
        .collect();
    assert_eq!(top, vec![8.0, 7.0, 6.0]);

    // Beta has no MetaScore, so the mean is (60 + 55) / 2.
    assert_eq!(
        result.summary_text(),
        "Average Rating: 7.00 | Average MetaScore: 57.50"
    );

    let total: usize = result.count_by_year.iter().map(|&(_, n)| n).sum();
    assert_eq!(total, result.filtered.len());
}
