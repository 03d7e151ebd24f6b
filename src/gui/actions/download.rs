// src/gui/actions/download.rs
use crate::gui::app::App;
use crate::gui::progress::GuiProgress;
use crate::{remote, store};

/// Download the published history and merge it into the loaded data.
/// Local rows win on key collision.
pub fn download_remote(app: &mut App) {
    let opts = app.state.options.remote.clone();
    let mut prog = GuiProgress::new(app.status.clone());

    match remote::fetch_all(&opts, Some(&mut prog)) {
        Ok(fetched) => {
            logf!("Download: {} listings from {}", fetched.len(), opts.repo);
            let mut merged = std::mem::take(&mut app.listings);
            merged.extend(fetched);
            let mut merged = store::dedup(merged);
            merged.sort_by_key(|l| l.timestamp);

            app.status(format!("Loaded {} listings", merged.len()));
            app.listings = merged;
            app.on_data_loaded();
        }
        Err(e) => {
            loge!("Download: {} failed: {}", opts.repo, e);
            app.status(format!("Error: {e}"));
        }
    }
}
