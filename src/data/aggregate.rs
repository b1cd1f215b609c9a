use std::collections::BTreeMap;

use thiserror::Error;

use super::model::Dataset;

/// Number of equal-width buckets in the rating histogram.
pub const RATING_BUCKET_COUNT: usize = 20;

/// Maximum number of entries in the top-rated chart.
pub const TOP_RATED_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// FilterRequest – one user interaction
// ---------------------------------------------------------------------------

/// The user's current selection: one genre and an inclusive year range.
///
/// Theme is deliberately not part of the request: it only affects rendering
/// and never reaches the aggregation step.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    pub genre: String,
    pub year_start: i32,
    pub year_end: i32,
}

/// Boundary validation failures for a [`FilterRequest`].
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("unknown genre: {0:?}")]
    UnknownGenre(String),
    #[error("invalid year range: {start} > {end}")]
    YearRangeInverted { start: i32, end: i32 },
}

/// Check a request against the dataset before aggregating.
///
/// `aggregate` itself assumes validated input; the UI constrains its controls
/// so a failure here only ever surfaces as a status message.
pub fn validate(dataset: &Dataset, request: &FilterRequest) -> Result<(), RequestError> {
    if request.year_start > request.year_end {
        return Err(RequestError::YearRangeInverted {
            start: request.year_start,
            end: request.year_end,
        });
    }
    if !dataset.has_genre(&request.genre) {
        return Err(RequestError::UnknownGenre(request.genre.clone()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// FilterResult – derived charts and statistics
// ---------------------------------------------------------------------------

/// One histogram bucket: the half-open value range `[lo, hi)` and its count.
/// The last bucket is closed so the maximum rating is always counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBucket {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl HistogramBucket {
    /// Midpoint of the bucket range, used as the bar position.
    pub fn center(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    /// Bucket width.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Everything derived from one [`FilterRequest`], recomputed fresh per
/// request. Record references are indices into the source [`Dataset`],
/// which outlives every result.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    /// Indices of records matching the filter, in original dataset order.
    pub filtered: Vec<usize>,
    /// Rating distribution over the filtered subset. Empty subset → no
    /// buckets; bucket edges are re-derived per request from the subset's
    /// own min/max, so they are not stable across requests.
    pub rating_histogram: Vec<HistogramBucket>,
    /// Mean MetaScore per year, ascending. `None` for a year whose records
    /// all lack a MetaScore.
    pub meta_by_year: Vec<(i32, Option<f64>)>,
    /// Up to [`TOP_RATED_LIMIT`] indices sorted descending by rating, ties
    /// kept in original order.
    pub top_rated: Vec<usize>,
    /// Titles released per year, ascending. Years with no matches are
    /// omitted, not zero-filled.
    pub count_by_year: Vec<(i32, usize)>,
    /// Mean IMDb rating over the filtered subset, `None` when empty.
    pub average_rating: Option<f64>,
    /// Mean MetaScore over the records that have one, `None` when no
    /// filtered record carries a score.
    pub average_meta_score: Option<f64>,
}

impl FilterResult {
    /// The dashboard summary line. Undefined statistics render as `n/a`
    /// rather than a fake `0.00`.
    pub fn summary_text(&self) -> String {
        fn fmt(v: Option<f64>) -> String {
            match v {
                Some(v) => format!("{v:.2}"),
                None => "n/a".to_string(),
            }
        }
        format!(
            "Average Rating: {} | Average MetaScore: {}",
            fmt(self.average_rating),
            fmt(self.average_meta_score)
        )
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute all derived artifacts for one request.
///
/// Pure and stateless: only reads the shared dataset and allocates fresh
/// outputs, so identical inputs always yield identical results. An empty
/// match is a valid outcome, never an error.
pub fn aggregate(dataset: &Dataset, request: &FilterRequest) -> FilterResult {
    let filtered: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.genre == request.genre
                && r.year >= request.year_start
                && r.year <= request.year_end
        })
        .map(|(i, _)| i)
        .collect();

    let rating_histogram = rating_histogram(dataset, &filtered);

    // Per-year MetaScore means. Every matched year gets an entry so a year
    // whose scores are all missing still shows up (as None) in the series.
    let mut meta_groups: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for &i in &filtered {
        let rec = &dataset.records[i];
        let entry = meta_groups.entry(rec.year).or_insert((0.0, 0));
        if let Some(score) = rec.meta_score {
            entry.0 += score;
            entry.1 += 1;
        }
    }
    let meta_by_year: Vec<(i32, Option<f64>)> = meta_groups
        .into_iter()
        .map(|(year, (sum, n))| (year, (n > 0).then(|| sum / n as f64)))
        .collect();

    // Stable sort keeps ties in original order.
    let mut top_rated = filtered.clone();
    top_rated.sort_by(|&a, &b| {
        dataset.records[b]
            .imdb_rating
            .total_cmp(&dataset.records[a].imdb_rating)
    });
    top_rated.truncate(TOP_RATED_LIMIT);

    let mut count_groups: BTreeMap<i32, usize> = BTreeMap::new();
    for &i in &filtered {
        *count_groups.entry(dataset.records[i].year).or_insert(0) += 1;
    }
    let count_by_year: Vec<(i32, usize)> = count_groups.into_iter().collect();

    let average_rating = mean(filtered.iter().map(|&i| dataset.records[i].imdb_rating));
    let average_meta_score = mean(filtered.iter().filter_map(|&i| dataset.records[i].meta_score));

    FilterResult {
        filtered,
        rating_histogram,
        meta_by_year,
        top_rated,
        count_by_year,
        average_rating,
        average_meta_score,
    }
}

/// Arithmetic mean, `None` on an empty iterator so an empty subset never
/// surfaces as 0.0 or NaN.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Partition the filtered ratings into [`RATING_BUCKET_COUNT`] equal-width
/// buckets spanning the subset's own min/max. A zero-width span (all ratings
/// identical) collapses to a single bucket holding every value.
fn rating_histogram(dataset: &Dataset, filtered: &[usize]) -> Vec<HistogramBucket> {
    let mut ratings = filtered.iter().map(|&i| dataset.records[i].imdb_rating);
    let first = match ratings.next() {
        Some(r) => r,
        None => return Vec::new(),
    };
    let (min, max) = ratings.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r)));

    let span = max - min;
    if span <= 0.0 {
        return vec![HistogramBucket {
            lo: min,
            hi: max,
            count: filtered.len(),
        }];
    }

    let width = span / RATING_BUCKET_COUNT as f64;
    let mut buckets: Vec<HistogramBucket> = (0..RATING_BUCKET_COUNT)
        .map(|i| HistogramBucket {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &i in filtered {
        let r = dataset.records[i].imdb_rating;
        let idx = (((r - min) / width) as usize).min(RATING_BUCKET_COUNT - 1);
        buckets[idx].count += 1;
    }
    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
