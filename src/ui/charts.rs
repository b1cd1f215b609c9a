use eframe::egui::{RichText, Ui, Vec2};
use egui_plot::{Bar, BarChart, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::ChartPalette;
use crate::data::aggregate::FilterResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the summary line and the 2×2 chart grid.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("CineScope");
        ui.label("Explore trends, ratings and popularity of movies over the years.");
    });
    ui.add_space(4.0);

    let result = match &state.result {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No plottable data. Open a dataset via File → Open…");
            });
            return;
        }
    };
    let genre = state.selected_genre.as_deref().unwrap_or("");

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(result.summary_text());
    });
    ui.add_space(4.0);

    let palette = palette_for(state, result);

    // 2×2 grid with explicitly sized plots.
    let spacing = ui.spacing().item_spacing;
    let cell = Vec2::new(
        (ui.available_width() - spacing.x) / 2.0,
        (ui.available_height() - spacing.y - 2.0 * HEADER_HEIGHT) / 2.0,
    );

    ui.horizontal(|ui: &mut Ui| {
        rating_histogram(ui, result, genre, &palette, cell);
        meta_over_time(ui, result, genre, &palette, cell);
    });
    ui.horizontal(|ui: &mut Ui| {
        top_rated(ui, state, result, genre, &palette, cell);
        releases_per_year(ui, result, genre, &palette, cell);
    });
}

/// Vertical room reserved above each plot for its caption.
const HEADER_HEIGHT: f32 = 22.0;

fn palette_for(state: &AppState, result: &FilterResult) -> ChartPalette {
    // The rating colour ramp spans the top-rated chart's own values.
    let ratings = result
        .top_rated
        .iter()
        .map(|&i| state.dataset.records[i].imdb_rating);
    let (min, max) = ratings.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r), hi.max(r))
    });
    let (min, max) = if min.is_finite() { (min, max) } else { (0.0, 10.0) };
    ChartPalette::for_theme(state.theme, min, max)
}

fn caption(ui: &mut Ui, text: String) {
    ui.add_sized(
        Vec2::new(ui.available_width(), HEADER_HEIGHT),
        eframe::egui::Label::new(RichText::new(text).strong()),
    );
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Histogram of IMDb ratings over the filtered subset.
fn rating_histogram(ui: &mut Ui, result: &FilterResult, genre: &str, palette: &ChartPalette, cell: Vec2) {
    ui.vertical(|ui: &mut Ui| {
        caption(ui, format!("Rating distribution ({genre})"));

        let bars: Vec<Bar> = result
            .rating_histogram
            .iter()
            .map(|b| {
                // A degenerate single-value bucket still gets a visible bar.
                let width = if b.width() > 0.0 { b.width() * 0.95 } else { 0.25 };
                Bar::new(b.center(), b.count as f64).width(width)
            })
            .collect();

        Plot::new("rating_histogram")
            .width(cell.x)
            .height(cell.y)
            .x_axis_label("IMDb Rating")
            .y_axis_label("Titles")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(palette.histogram));
            });
    });
}

/// Mean MetaScore per release year. Years whose records all lack a score
/// are skipped, leaving a gap in the line.
fn meta_over_time(ui: &mut Ui, result: &FilterResult, genre: &str, palette: &ChartPalette, cell: Vec2) {
    ui.vertical(|ui: &mut Ui| {
        caption(ui, format!("Average MetaScore over the years ({genre})"));

        let points: Vec<[f64; 2]> = result
            .meta_by_year
            .iter()
            .filter_map(|&(year, mean)| mean.map(|m| [year as f64, m]))
            .collect();

        Plot::new("meta_over_time")
            .width(cell.x)
            .height(cell.y)
            .x_axis_label("Year")
            .y_axis_label("MetaScore")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(palette.meta_line)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .color(palette.meta_line)
                        .shape(MarkerShape::Circle)
                        .radius(3.0),
                );
            });
    });
}

/// Top-10 titles by rating, ascending left to right, bars coloured by the
/// rating ramp. Titles appear in the hover tooltip.
fn top_rated(
    ui: &mut Ui,
    state: &AppState,
    result: &FilterResult,
    genre: &str,
    palette: &ChartPalette,
    cell: Vec2,
) {
    ui.vertical(|ui: &mut Ui| {
        caption(ui, format!("Top {} titles ({genre})", result.top_rated.len()));

        let bars: Vec<Bar> = result
            .top_rated
            .iter()
            .rev()
            .enumerate()
            .map(|(pos, &i)| {
                let rec = &state.dataset.records[i];
                Bar::new(pos as f64, rec.imdb_rating)
                    .width(0.7)
                    .fill(palette.top_rated_scale.color_for(rec.imdb_rating))
                    .name(&rec.title)
            })
            .collect();

        Plot::new("top_rated")
            .width(cell.x)
            .height(cell.y)
            .show_axes([false, true])
            .y_axis_label("IMDb Rating")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(
                    |bar: &Bar, _chart: &BarChart| format!("{} ({:.1})", bar.name, bar.value),
                )));
            });
    });
}

/// Titles released per year, drawn as a filled area.
fn releases_per_year(ui: &mut Ui, result: &FilterResult, genre: &str, palette: &ChartPalette, cell: Vec2) {
    ui.vertical(|ui: &mut Ui| {
        caption(ui, format!("Titles released per year ({genre})"));

        let points: Vec<[f64; 2]> = result
            .count_by_year
            .iter()
            .map(|&(year, count)| [year as f64, count as f64])
            .collect();

        Plot::new("releases_per_year")
            .width(cell.x)
            .height(cell.y)
            .x_axis_label("Year")
            .y_axis_label("Titles")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .color(palette.release_area)
                        .fill(0.0)
                        .width(1.5),
                );
            });
    });
}
