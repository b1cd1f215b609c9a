use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

// ---------------------------------------------------------------------------
// Synthetic movie rows
// ---------------------------------------------------------------------------

/// (genre, typical IMDb rating for the genre)
const GENRES: [(&str, f64); 14] = [
    ("Action", 6.4),
    ("Adventure", 6.6),
    ("Animation", 6.9),
    ("Biography", 7.1),
    ("Comedy", 6.2),
    ("Crime", 6.8),
    ("Drama", 7.0),
    ("Fantasy", 6.3),
    ("Horror", 5.7),
    ("Mystery", 6.5),
    ("Romance", 6.4),
    ("Sci-Fi", 6.5),
    ("Thriller", 6.3),
    ("Western", 6.7),
];

const ADJECTIVES: [&str; 16] = [
    "Silent", "Crimson", "Last", "Hidden", "Broken", "Golden", "Midnight", "Lost", "Burning",
    "Frozen", "Distant", "Savage", "Quiet", "Electric", "Hollow", "Restless",
];

const NOUNS: [&str; 16] = [
    "Horizon", "Empire", "Garden", "River", "Signal", "Harvest", "Covenant", "Voyage", "Shadow",
    "Reckoning", "Mirror", "Outpost", "Carnival", "Labyrinth", "Summit", "Tide",
];

struct SampleRow {
    title: String,
    genre: Option<&'static str>,
    year: Option<i64>,
    rating: Option<f64>,
    meta: Option<f64>,
}

fn make_title(rng: &mut SimpleRng) -> String {
    let adj = rng.pick(&ADJECTIVES);
    let noun = rng.pick(&NOUNS);
    match rng.next_u64() % 3 {
        0 => format!("The {adj} {noun}"),
        1 => format!("{adj} {noun}"),
        _ => format!("{noun} of the {adj}"),
    }
}

fn make_row(rng: &mut SimpleRng) -> SampleRow {
    let &(genre, genre_mean) = rng.pick(&GENRES);

    // Quadratic bias toward recent releases.
    let t = rng.next_f64();
    let year = 2024 - (t * t * 74.0) as i64;

    let rating = (rng.gauss(genre_mean, 1.1).clamp(1.0, 10.0) * 10.0).round() / 10.0;
    let meta = if rng.next_f64() < 0.12 {
        None
    } else {
        Some(rng.gauss(rating * 9.0 + 4.0, 7.0).clamp(0.0, 100.0).round())
    };

    // A sprinkling of defective rows to exercise the loader's cleaning.
    let roll = rng.next_f64();
    let (genre, year, rating) = if roll < 0.02 {
        (None, Some(year), Some(rating))
    } else if roll < 0.035 {
        (Some(genre), Some(year), None)
    } else if roll < 0.045 {
        (Some(genre), None, Some(rating))
    } else {
        (Some(genre), Some(year), Some(rating))
    };

    SampleRow {
        title: make_title(rng),
        genre,
        year,
        rating,
        meta,
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_csv(rows: &[SampleRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["Title", "Genre", "Year", "IMDb Rating", "MetaScore"])?;

    for row in rows {
        let year = row.year.map(|y| y.to_string()).unwrap_or_default();
        let rating = row.rating.map(|r| format!("{r:.1}")).unwrap_or_default();
        let meta = row.meta.map(|m| format!("{m:.0}")).unwrap_or_default();
        writer.write_record([
            row.title.as_str(),
            row.genre.unwrap_or(""),
            year.as_str(),
            rating.as_str(),
            meta.as_str(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Title", DataType::Utf8, false),
        Field::new("Genre", DataType::Utf8, true),
        Field::new("Year", DataType::Int64, true),
        Field::new("IMDb Rating", DataType::Float64, true),
        Field::new("MetaScore", DataType::Float64, true),
    ]));

    let titles = StringArray::from(rows.iter().map(|r| r.title.as_str()).collect::<Vec<_>>());
    let genres = StringArray::from(rows.iter().map(|r| r.genre).collect::<Vec<_>>());
    let years = Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>());
    let ratings = Float64Array::from(rows.iter().map(|r| r.rating).collect::<Vec<_>>());
    let metas = Float64Array::from(rows.iter().map(|r| r.meta).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(titles),
            Arc::new(genres),
            Arc::new(years),
            Arc::new(ratings),
            Arc::new(metas),
        ],
    )
    .context("assembling record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("opening parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<SampleRow> = (0..1500).map(|_| make_row(&mut rng)).collect();

    let dir = Path::new("data");
    std::fs::create_dir_all(dir).context("creating data directory")?;

    let csv_path = dir.join("imdb.csv");
    write_csv(&rows, &csv_path)?;
    println!("wrote {}", csv_path.display());

    let parquet_path = dir.join("imdb.parquet");
    write_parquet(&rows, &parquet_path)?;
    println!("wrote {}", parquet_path.display());

    Ok(())
}
