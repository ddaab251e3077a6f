// Library browser - selection over the catalog and handoff to the player
use crate::catalog::{Catalog, MediaEntry};
use crate::player::{MediaLoader, PlaybackController};

/// Overlay that previews catalog entries and opens the selected one.
///
/// Owns its own player; while that player is open the browser overlay is
/// suppressed so the player replaces it instead of stacking on top.
pub struct LibraryBrowser<L: MediaLoader> {
    catalog: Catalog,
    is_open: bool,
    /// Index into the catalog; `None` only when the catalog is empty
    selected: Option<usize>,
    player: PlaybackController<L>,
}

impl<L: MediaLoader> LibraryBrowser<L> {
    pub fn new(catalog: Catalog, player: PlaybackController<L>) -> Self {
        let selected = if catalog.is_empty() { None } else { Some(0) };
        Self {
            catalog,
            is_open: false,
            selected,
            player,
        }
    }

    pub fn open(&mut self) {
        if self.is_open {
            return;
        }
        self.is_open = true;
        tracing::debug!("Library opened");
    }

    /// Close the overlay, tearing down any playback first
    pub fn close(&mut self) {
        self.player.close();
        if self.is_open {
            self.is_open = false;
            tracing::debug!("Library closed");
        }
    }

    /// Move the preview cursor. Unknown ids are ignored.
    pub fn select(&mut self, entry_id: &str) {
        let Some(index) = self.catalog.position(entry_id) else {
            tracing::debug!("Ignoring selection of unknown entry {}", entry_id);
            return;
        };
        self.selected = Some(index);
    }

    /// Open the player on the selected entry's source
    pub fn play(&mut self) {
        let Some(entry) = self.selected.and_then(|i| self.catalog.get(i)) else {
            return;
        };
        tracing::info!("Playing {:?}", entry.title);
        let source = entry.source_url.clone();
        self.player.open(source.as_deref());
    }

    /// Close the player and return to the (still open) browser
    pub fn close_player(&mut self) {
        self.player.close();
    }

    /// Point the cursor back at the first entry
    pub fn reset_selection(&mut self) {
        self.selected = if self.catalog.is_empty() { None } else { Some(0) };
    }

    /// Swap in a freshly loaded catalog
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.player.close();
        self.catalog = catalog;
        self.reset_selection();
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Browser overlay renders only while its player is not open
    pub fn is_overlay_visible(&self) -> bool {
        self.is_open && !self.player.is_open()
    }

    pub fn selected_entry(&self) -> Option<&MediaEntry> {
        self.selected.and_then(|i| self.catalog.get(i))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn player(&self) -> &PlaybackController<L> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackController<L> {
        &mut self.player
    }
}
