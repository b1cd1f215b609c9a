use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::state::Theme;

// ---------------------------------------------------------------------------
// Chart accent colours
// ---------------------------------------------------------------------------

/// Fixed accent colours for the four dashboard charts, tuned per theme so
/// lines stay readable against both backgrounds.
#[derive(Debug, Clone, Copy)]
pub struct ChartPalette {
    pub histogram: Color32,
    pub meta_line: Color32,
    pub top_rated_scale: RatingScale,
    pub release_area: Color32,
}

impl ChartPalette {
    pub fn for_theme(theme: Theme, rating_min: f64, rating_max: f64) -> Self {
        let lightness = match theme {
            Theme::Light => 0.45,
            Theme::Dark => 0.62,
        };
        ChartPalette {
            histogram: hsl_color(210.0, 0.70, lightness),
            meta_line: hsl_color(28.0, 0.80, lightness),
            top_rated_scale: RatingScale::new(rating_min, rating_max, theme),
            release_area: hsl_color(150.0, 0.55, lightness),
        }
    }
}

fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Rating scale: rating value → blue gradient
// ---------------------------------------------------------------------------

/// Maps a rating within `[min, max]` onto a blue lightness ramp, higher
/// ratings reading as more saturated. Mirrors the continuous colour scale of
/// the top-rated bar chart.
#[derive(Debug, Clone, Copy)]
pub struct RatingScale {
    min: f64,
    max: f64,
    theme: Theme,
}

impl RatingScale {
    pub fn new(min: f64, max: f64, theme: Theme) -> Self {
        RatingScale { min, max, theme }
    }

    /// Colour for a rating. Out-of-range values clamp to the ramp ends.
    pub fn color_for(&self, rating: f64) -> Color32 {
        let span = self.max - self.min;
        let t = if span > 0.0 {
            ((rating - self.min) / span).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        // Light theme ramps pale → deep blue; dark theme the reverse so the
        // strongest bars stay bright on a dark background.
        let (lo, hi) = match self.theme {
            Theme::Light => (0.78, 0.35),
            Theme::Dark => (0.35, 0.72),
        };
        let lightness = lo + (hi - lo) * t;
        hsl_color(210.0, 0.75, lightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_scale_clamps_and_orders() {
        let scale = RatingScale::new(5.0, 9.0, Theme::Light);
        assert_eq!(scale.color_for(4.0), scale.color_for(5.0));
        assert_eq!(scale.color_for(10.0), scale.color_for(9.0));
        assert_ne!(scale.color_for(5.0), scale.color_for(9.0));
    }

    #[test]
    fn zero_span_scale_is_uniform() {
        let scale = RatingScale::new(7.0, 7.0, Theme::Dark);
        assert_eq!(scale.color_for(0.0), scale.color_for(100.0));
    }
}
