use crate::app::managers::{ProductFormManager, ProductListManager, SessionManager};
use crate::app::msg::Msg;
use crate::config::AppConfig;
use crate::error::AppResult;
use services::ServiceError;
use services::auth::AuthService;
use services::products::ProductService;
use services::store::{FileStore, KeyValueStore};
use services::transport::{ReqwestTransport, Transport};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Wires the services and managers together for one run of the client.
pub struct AppContext {
    pub session: SessionManager,
    pub product_list: ProductListManager,
    pub product_form: ProductFormManager,
}

impl AppContext {
    /// Builds the context with the HTTP transport and the file store.
    ///
    /// `store_path` overrides `storage.path` from the configuration; with
    /// neither set the platform default location is used.
    pub fn new(config: &AppConfig, store_path: Option<PathBuf>, tx: Sender<Msg>) -> AppResult<Self> {
        let transport = ReqwestTransport::new(config.api().request_timeout())
            .map_err(ServiceError::from)?;

        let path = match store_path.or_else(|| config.storage().path()) {
            Some(path) => path,
            None => FileStore::default_path().map_err(ServiceError::from)?,
        };
        let store = FileStore::open(&path).map_err(ServiceError::from)?;
        log::info!("Using store at {}", path.display());

        Ok(Self::with_collaborators(
            config,
            Arc::new(transport),
            Arc::new(store),
            tx,
        ))
    }

    /// Builds the context on explicit collaborators.
    pub fn with_collaborators(
        config: &AppConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
        tx: Sender<Msg>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(
            config.api().auth_base_url(),
            transport.clone(),
            store.clone(),
        ));
        let products = Arc::new(ProductService::new(
            config.api().products_base_url(),
            transport,
        ));

        Self {
            session: SessionManager::new(auth, tx.clone()),
            product_list: ProductListManager::new(
                products.clone(),
                store,
                config.search_debounce(),
                tx.clone(),
            ),
            product_form: ProductFormManager::new(products, tx),
        }
    }
}
