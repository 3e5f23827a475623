//! Application state shared by the controller and the card renderer.

use tracing::info;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::store::RecordStore;
use crate::view::{self, Document, RenderTargets};

/// The record store plus the rendered view it drives.
///
/// Built once per session; every handler takes it by `&mut`.
#[derive(Debug)]
pub struct AppState {
    /// Records and their persisted mirror.
    pub store: RecordStore,
    /// The element tree.
    pub document: Document,
    /// Handles to the form, buttons and card list.
    pub targets: RenderTargets,
    /// Button labels used for new cards.
    pub labels: RenderConfig,
}

impl AppState {
    /// Mount the page and render every stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the page skeleton cannot be mounted.
    pub fn mount(store: RecordStore, labels: RenderConfig) -> Result<Self> {
        let mut document = Document::new();
        let targets = view::mount(&mut document)?;
        let cards = view::rerender_all(&mut document, targets.list, store.records(), &labels);
        info!(cards = cards.len(), "Mounted view");

        Ok(Self {
            store,
            document,
            targets,
            labels,
        })
    }

    /// Number of cards currently in the list.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.document.children(self.targets.list).len()
    }

    /// Serialize the mounted page as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}
