use std::sync::Arc;

use axum::extract::FromRef;
use catalog::Catalog;

use super::{config::Config, session::SessionKey, views::Views};

pub struct AppState {
    pub catalog: Catalog,
    pub config: Config,
    pub views: Views,
    pub session_key: SessionKey,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, anyhow::Error> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::seed()?,
        };

        let views = Views::new()?;
        let session_key = SessionKey::new(&config.session_secret)?;

        Ok(Arc::new(Self {
            catalog,
            config,
            views,
            session_key,
        }))
    }
}

impl FromRef<Arc<AppState>> for SessionKey {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.session_key.clone()
    }
}
