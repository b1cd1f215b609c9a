use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Record – one row of the movie dataset
// ---------------------------------------------------------------------------

/// A single movie (one row of the source table).
///
/// Rows that survive loading always carry a genre, a rating, and an integer
/// release year; only the critic score may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    /// Single-valued genre, matched exactly (case-sensitive) when filtering.
    pub genre: String,
    /// Release year.
    pub year: i32,
    /// IMDb user rating, plausibly within [0, 10].
    pub imdb_rating: f64,
    /// MetaScore critic rating. Missing for a fair share of titles.
    pub meta_score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed lookups for UI population.
/// Immutable after construction; shared read-only across the app.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<Record>,
    /// Sorted, deduplicated list of genres present in `records`.
    pub genres: Vec<String>,
    /// Observed (min, max) release year, `None` for an empty dataset.
    pub year_range: Option<(i32, i32)>,
}

impl Dataset {
    /// Build the derived lookups from the cleaned records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let genres: Vec<String> = records
            .iter()
            .map(|r| r.genre.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let year_range = records.iter().map(|r| r.year).fold(None, |acc: Option<(i32, i32)>, y| {
            Some(match acc {
                None => (y, y),
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
            })
        });

        Dataset {
            records,
            genres,
            year_range,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `genre` occurs in the dataset.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(genre: &str, year: i32) -> Record {
        Record {
            title: format!("{genre} {year}"),
            genre: genre.to_string(),
            year,
            imdb_rating: 7.0,
            meta_score: None,
        }
    }

    #[test]
    fn genres_are_sorted_and_deduplicated() {
        let ds = Dataset::from_records(vec![
            rec("Drama", 2001),
            rec("Action", 1999),
            rec("Drama", 2005),
            rec("Comedy", 2010),
        ]);
        assert_eq!(ds.genres, vec!["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn year_range_spans_observed_years() {
        let ds = Dataset::from_records(vec![rec("Action", 1962), rec("Action", 2020)]);
        assert_eq!(ds.year_range, Some((1962, 2020)));
    }

    #[test]
    fn empty_dataset_has_no_year_range() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.year_range, None);
        assert!(ds.genres.is_empty());
    }
}
