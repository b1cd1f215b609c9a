/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, drop defective rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, genre list, year bounds
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  (Dataset, FilterRequest) → FilterResult
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
