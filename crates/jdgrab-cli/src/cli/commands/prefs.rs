//! `jdgrab prefs` – show and edit stored media preferences.

use anyhow::Result;
use jdgrab_core::media::{MediaCategory, MediaOptions};
use jdgrab_core::prefs::PreferenceStore;

fn print_options(options: &MediaOptions) {
    for category in MediaCategory::ALL {
        let state = if options.is_enabled(category) { "on" } else { "off" };
        println!("{:<8} {}", category.as_str(), state);
    }
}

pub fn run_prefs_show() -> Result<()> {
    let store = PreferenceStore::open_default()?;
    print_options(&store.load());
    tracing::debug!(path = %store.path().display(), "preferences shown");
    Ok(())
}

pub fn run_prefs_set(category: MediaCategory, enabled: bool) -> Result<()> {
    let store = PreferenceStore::open_default()?;
    let options = store.set(category, enabled);
    print_options(&options);
    Ok(())
}

pub fn run_prefs_reset() -> Result<()> {
    let store = PreferenceStore::open_default()?;
    print_options(&store.reset());
    Ok(())
}
