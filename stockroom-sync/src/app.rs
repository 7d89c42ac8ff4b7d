//! Controller tying the view state to the sync engine.

use crate::engine::InventorySync;
use crate::error::SyncResult;
use crate::view::{Action, AppState, ItemCard, update, visible_cards};
use std::sync::Arc;
use stockroom_types::ItemId;
use tracing::warn;

/// One inventory screen.
///
/// Several screens may share one engine. Every engine failure is recorded as
/// [`Status::Failed`](crate::Status::Failed) and also returned to the caller.
pub struct InventoryApp {
    engine: Arc<InventorySync>,
    state: AppState,
}

impl InventoryApp {
    pub fn new(engine: Arc<InventorySync>) -> Self {
        Self {
            engine,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn engine(&self) -> &Arc<InventorySync> {
        &self.engine
    }

    /// Applies a view-only action.
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = update(state, action);
    }

    /// Cards for the items matching the current search.
    pub fn cards(&self) -> Vec<ItemCard> {
        visible_cards(&self.state)
    }

    /// Loads the inventory.
    pub async fn load(&mut self) -> SyncResult<()> {
        self.dispatch(Action::Started);
        let result = self.engine.refresh().await;
        let items = self.settle(result)?;
        self.dispatch(Action::Loaded(items));
        Ok(())
    }

    /// Submits the add form.
    ///
    /// The form is cleared once the item is stored, before the reload.
    pub async fn submit(&mut self) -> SyncResult<ItemId> {
        let draft = self.state.form.to_draft();
        self.dispatch(Action::Started);

        let result = self.engine.create_item(draft).await;
        let item = self.settle(result)?;
        // stored: the form must not be submitted again even if the reload fails
        self.dispatch(Action::ItemAdded);

        let result = self.engine.refresh().await;
        let items = self.settle(result)?;
        self.dispatch(Action::Loaded(items));
        Ok(item.id)
    }

    /// Removes an item.
    pub async fn remove(&mut self, id: &ItemId) -> SyncResult<()> {
        self.dispatch(Action::Started);

        let result = self.engine.remove_item(id).await;
        self.settle(result)?;

        let items = self.engine.snapshot().await;
        self.dispatch(Action::Loaded(items));
        Ok(())
    }

    fn settle<T>(&mut self, result: SyncResult<T>) -> SyncResult<T> {
        result.inspect_err(|e| {
            warn!("Inventory operation failed: {}", e);
            self.dispatch(Action::Failed(e.to_string()));
        })
    }
}
