//! Owns the catalog and the active view, applies user intents, and fires the
//! matching API calls.

use std::sync::Arc;

use shared::{
    domain::{Product, ProductId},
    error::ApiError,
    protocol::ProductOperation,
};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::CatalogError,
    store::CatalogStore,
    view_state::{ActionButton, Intent, ViewState},
    ProductApi,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A detached API call. Dropping the handle does not cancel the request.
pub type PendingRequest<T> = JoinHandle<Result<T, ApiError>>;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    CatalogLoaded {
        count: usize,
    },
    ProductCreated {
        product: Product,
    },
    ProductDeleted {
        id: ProductId,
    },
    ProductUpdated {
        id: ProductId,
    },
    RequestFailed {
        operation: ProductOperation,
        error: ApiError,
    },
}

pub struct ViewController {
    api: Arc<dyn ProductApi>,
    store: CatalogStore,
    state: ViewState,
    events: broadcast::Sender<CatalogEvent>,
}

impl ViewController {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self::with_store(api, CatalogStore::new())
    }

    pub fn with_store(api: Arc<dyn ProductApi>, store: CatalogStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            store,
            state: ViewState::default(),
            events,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn button(&self) -> ActionButton {
        self.state.button()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    /// Refreshes the whole catalog from the API. A failed fetch is logged and
    /// leaves the current catalog in place. Returns the new product count.
    pub async fn load(&mut self) -> Option<usize> {
        match self.api.list_products().await {
            Ok(products) => {
                self.store.replace_all(products);
                let count = self.store.len();
                info!(count, "catalog loaded");
                let _ = self.events.send(CatalogEvent::CatalogLoaded { count });
                Some(count)
            }
            Err(err) => {
                report_failure(&self.events, ProductOperation::List, &err);
                None
            }
        }
    }

    pub fn toggle(&mut self) {
        let from = self.state.name();
        self.state.toggle();
        debug!(from, to = self.state.name(), "toggled view");
    }

    pub fn select(&mut self, id: &ProductId) -> Result<(), CatalogError> {
        let product = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        self.state.select(product)
    }

    pub fn request_edit(&mut self) -> Result<(), CatalogError> {
        self.state.request_edit()
    }

    /// Sells one unit. Only the local catalog and the shown snapshot change;
    /// the API is not told.
    pub fn buy(&mut self, id: &ProductId) -> Result<(), CatalogError> {
        let updated = self.store.decrement_availability(id)?.clone();
        info!(product_id = %id, quantity = %updated.quantity, "sold one unit");
        self.state.show_updated(updated);
        Ok(())
    }

    /// Drops the product locally and returns to the list before the DELETE
    /// is even sent; the local removal stands whatever the server answers.
    /// Rejected with nothing changed while a form is open.
    /// Must be called from within a Tokio runtime.
    pub fn delete(&mut self, id: &ProductId) -> Result<PendingRequest<()>, CatalogError> {
        self.state.finish_delete()?;
        if self.store.remove(id).is_none() {
            debug!(product_id = %id, "deleting product that is not in the local catalog");
        }

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let id = id.clone();
        Ok(tokio::spawn(async move {
            match api.delete_product(&id).await {
                Ok(()) => {
                    info!(product_id = %id, "product deleted");
                    let _ = events.send(CatalogEvent::ProductDeleted { id });
                    Ok(())
                }
                Err(err) => {
                    report_failure(&events, ProductOperation::Delete, &err);
                    Err(err)
                }
            }
        }))
    }

    /// Closes the create form and POSTs the product. The local catalog only
    /// picks it up on the next [`ViewController::load`].
    /// Must be called from within a Tokio runtime.
    pub fn submit_new(
        &mut self,
        product: Product,
    ) -> Result<PendingRequest<Product>, CatalogError> {
        self.state.submit_new()?;

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        Ok(tokio::spawn(async move {
            match api.create_product(&product).await {
                Ok(created) => {
                    info!(
                        product_id = ?created.id,
                        name = %created.display_name(),
                        "product created"
                    );
                    let _ = events.send(CatalogEvent::ProductCreated {
                        product: created.clone(),
                    });
                    Ok(created)
                }
                Err(err) => {
                    report_failure(&events, ProductOperation::Create, &err);
                    Err(err)
                }
            }
        }))
    }

    /// Closes the edit form, PUTs the edited product under the selected id,
    /// then reloads the catalog so it matches the server. A failed PUT is
    /// logged and the reload still happens.
    pub async fn submit_edit(&mut self, edited: Product) -> Result<(), CatalogError> {
        let id = self.state.submit_edit()?;

        match self.api.update_product(&id, &edited).await {
            Ok(_) => {
                info!(product_id = %id, "product updated");
                let _ = self.events.send(CatalogEvent::ProductUpdated { id });
            }
            Err(err) => report_failure(&self.events, ProductOperation::Update, &err),
        }

        self.load().await;
        Ok(())
    }

    /// Applies an intent, detaching any request it fires.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<(), CatalogError> {
        match intent {
            Intent::Toggle => self.toggle(),
            Intent::Select(id) => self.select(&id)?,
            Intent::RequestEdit => self.request_edit()?,
            Intent::Buy(id) => self.buy(&id)?,
            Intent::Delete(id) => {
                self.delete(&id)?;
            }
            Intent::SubmitNew(product) => {
                self.submit_new(product)?;
            }
            Intent::SubmitEdit(product) => self.submit_edit(product).await?,
            Intent::Reload => {
                self.load().await;
            }
        }
        Ok(())
    }
}

fn report_failure(
    events: &broadcast::Sender<CatalogEvent>,
    operation: ProductOperation,
    err: &ApiError,
) {
    warn!(%operation, error = %err, "catalog request failed");
    let _ = events.send(CatalogEvent::RequestFailed {
        operation,
        error: err.clone(),
    });
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
