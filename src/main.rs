use cinescope::app::CineScopeApp;
use cinescope::config::AppConfig;
use cinescope::data::loader;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env();
    let dataset = match loader::load_file(&config.dataset_path, config.min_year) {
        Ok(ds) => {
            log::info!(
                "Loaded {} titles across {} genres from {}",
                ds.len(),
                ds.genres.len(),
                config.dataset_path.display()
            );
            ds
        }
        Err(e) => {
            // Fatal: the dashboard never opens without a dataset.
            log::error!("Failed to load {}: {e:#}", config.dataset_path.display());
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CineScope – Movie Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CineScopeApp::new(dataset, &config)))),
    )
}
