use crate::app::msg::{LoadingActivityMsg, Msg, ProductActivityMsg};
use crate::app::notify;
use services::ServiceResult;
use services::debounce::Debouncer;
use services::model::Product;
use services::products::ProductService;
use services::store::{KeyValueStore, favorite_key};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;
use tokio::sync::RwLock;

/// Snapshot of everything the product list screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListState {
    pub products: Vec<Product>,
    pub filtered: Vec<Product>,
    pub search_text: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl ProductListState {
    fn recompute_filtered(&mut self) {
        self.filtered = filter_products(&self.products, &self.search_text);
    }
}

/// Products whose name contains `search` (case-insensitive), favorites first.
///
/// The favorites partition is stable: within each half the input order is kept.
pub fn filter_products(products: &[Product], search: &str) -> Vec<Product> {
    let needle = search.to_lowercase();
    let (favorites, others): (Vec<Product>, Vec<Product>) = products
        .iter()
        .filter(|product| needle.is_empty() || product.name.to_lowercase().contains(&needle))
        .cloned()
        .partition(|product| product.is_favorite);

    favorites.into_iter().chain(others).collect()
}

/// Holds the fetched product set and derives the filtered view.
///
/// Search changes are debounced; favorite toggles recompute right away.
/// Overlapping [`fetch`](Self::fetch) calls are not ordered: the one that
/// completes last determines the visible products.
pub struct ProductListManager {
    service: Arc<ProductService>,
    store: Arc<dyn KeyValueStore>,
    state: Arc<RwLock<ProductListState>>,
    debouncer: Debouncer,
    tx: Sender<Msg>,
}

impl ProductListManager {
    pub fn new(
        service: Arc<ProductService>,
        store: Arc<dyn KeyValueStore>,
        search_debounce: Duration,
        tx: Sender<Msg>,
    ) -> Self {
        Self {
            service,
            store,
            state: Arc::new(RwLock::new(ProductListState::default())),
            debouncer: Debouncer::new(search_debounce),
            tx,
        }
    }

    /// Loads products and merges stored favorite flags.
    ///
    /// On failure the error message is recorded and the previous product set
    /// stays as it was. The error is also returned.
    pub async fn fetch(&self) -> ServiceResult<usize> {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error_message = None;
        }
        notify(
            &self.tx,
            Msg::LoadingActivity(LoadingActivityMsg::Start("Loading products...".to_string())),
        );

        let result = self.service.list_products().await;

        let mut state = self.state.write().await;
        let outcome = match result {
            Ok(mut products) => {
                for product in &mut products {
                    if let Some(id) = product.id {
                        product.is_favorite = self.load_favorite(id);
                    }
                }
                let count = products.len();
                state.products = products;
                state.recompute_filtered();

                notify(&self.tx, Msg::ProductActivity(ProductActivityMsg::ProductsLoaded(count)));
                notify(
                    &self.tx,
                    Msg::ProductActivity(ProductActivityMsg::FilteredViewChanged(
                        state.filtered.clone(),
                    )),
                );
                Ok(count)
            }
            Err(e) => {
                let message = format!("Failed to fetch products: {e}");
                log::error!("{message}");
                state.error_message = Some(message.clone());
                notify(&self.tx, Msg::ProductActivity(ProductActivityMsg::FetchFailed(message)));
                Err(e)
            }
        };
        state.is_loading = false;
        drop(state);

        notify(&self.tx, Msg::LoadingActivity(LoadingActivityMsg::Stop));
        outcome
    }

    /// Stores the new search text and schedules a recompute after the
    /// debounce delay. A newer call replaces a pending recompute.
    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.state.write().await.search_text = text.into();

        let state = self.state.clone();
        let tx = self.tx.clone();
        self.debouncer.schedule(move || async move {
            let mut state = state.write().await;
            state.recompute_filtered();
            log::debug!(
                "Search '{}' matched {} products",
                state.search_text,
                state.filtered.len()
            );
            notify(
                &tx,
                Msg::ProductActivity(ProductActivityMsg::FilteredViewChanged(
                    state.filtered.clone(),
                )),
            );
        });
    }

    /// Recomputes the filtered view now, dropping any pending debounced one.
    pub async fn apply_search_now(&self) {
        self.debouncer.cancel();
        let mut state = self.state.write().await;
        state.recompute_filtered();
        notify(
            &self.tx,
            Msg::ProductActivity(ProductActivityMsg::FilteredViewChanged(
                state.filtered.clone(),
            )),
        );
    }

    /// Flips the favorite flag of `product_id` and persists it.
    ///
    /// Returns the new flag, or `None` when no loaded product has that id.
    pub async fn toggle_favorite(&self, product_id: i64) -> Option<bool> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .iter_mut()
            .find(|product| product.id == Some(product_id))?;
        product.toggle_favorite();
        let is_favorite = product.is_favorite;
        state.recompute_filtered();
        let filtered = state.filtered.clone();
        drop(state);

        self.save_favorite(product_id, is_favorite);

        notify(
            &self.tx,
            Msg::ProductActivity(ProductActivityMsg::FavoriteToggled {
                product_id,
                is_favorite,
            }),
        );
        notify(
            &self.tx,
            Msg::ProductActivity(ProductActivityMsg::FilteredViewChanged(filtered)),
        );
        Some(is_favorite)
    }

    pub async fn snapshot(&self) -> ProductListState {
        self.state.read().await.clone()
    }

    pub async fn filtered_products(&self) -> Vec<Product> {
        self.state.read().await.filtered.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error_message(&self) -> Option<String> {
        self.state.read().await.error_message.clone()
    }

    fn load_favorite(&self, product_id: i64) -> bool {
        self.store
            .get_bool(&favorite_key(product_id))
            .unwrap_or_else(|e| {
                log::warn!("Failed to read favorite flag for product {product_id}: {e}");
                false
            })
    }

    // One retry, then give up: the in-memory flag stays toggled either way.
    fn save_favorite(&self, product_id: i64, is_favorite: bool) {
        let key = favorite_key(product_id);
        if let Err(first) = self.store.set_bool(&key, is_favorite) {
            log::warn!("Failed to save favorite flag for product {product_id}, retrying: {first}");
            if let Err(second) = self.store.set_bool(&key, is_favorite) {
                log::error!("Favorite flag for product {product_id} was not saved: {second}");
            }
        }
    }
}
