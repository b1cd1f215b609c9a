/// UI layer: egui panels and the chart grid.
///
/// The panels own all interaction; every control change calls back into
/// [`crate::state::AppState`], which runs one synchronous validate +
/// aggregate round trip. Rendering only reads the stored result.

pub mod charts;
pub mod panels;
