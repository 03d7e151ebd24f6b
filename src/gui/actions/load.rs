// src/gui/actions/load.rs
use crate::gui::app::App;
use crate::store;

/// (Re)load every export file from the local exports directory.
pub fn load_local(app: &mut App) {
    let dir = app.state.options.export_dir.clone();

    match store::load_dir(&dir) {
        Ok(listings) => {
            logf!("Load: {} listings from {}", listings.len(), dir.display());
            if listings.is_empty() {
                app.status(format!("No data in {}", dir.display()));
            } else {
                app.status(format!("Loaded {} listings", listings.len()));
            }
            app.listings = listings;
            app.on_data_loaded();
        }
        Err(e) => {
            loge!("Load: {} failed: {}", dir.display(), e);
            app.status(format!("Error: {e}"));
        }
    }
}
