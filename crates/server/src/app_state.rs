use navigator::{DirectoryMedia, Navigator};
use storage::Storage;

pub(crate) type CatalogNavigator = Navigator<Storage, DirectoryMedia>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) navigator: std::sync::Arc<CatalogNavigator>,
}

impl AppState {
    pub(crate) fn new(navigator: CatalogNavigator) -> Self {
        Self {
            navigator: std::sync::Arc::new(navigator),
        }
    }

    pub(crate) fn storage(&self) -> &Storage {
        self.navigator.repository()
    }
}
