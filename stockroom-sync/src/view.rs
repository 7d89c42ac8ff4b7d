//! View state and its transitions.
//!
//! All state the screen needs lives in [`AppState`]; [`update`] is the only
//! way it changes. Nothing in this module performs I/O.

use crate::filter::matches_query;
use stockroom_types::{Category, ImageFile, InventoryItem, ItemDraft, ItemId};

/// Progress of the last engine call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Busy,
    /// The last call failed; the message is shown until dismissed or until
    /// the next call starts.
    Failed(String),
}

/// Contents of the add-item form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemForm {
    pub name: String,
    pub count: String,
    pub category: String,
    pub image: Option<ImageFile>,
}

impl ItemForm {
    /// The draft submitted for the current form contents, taken verbatim.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            count: self.count.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
        }
    }
}

/// Everything the inventory screen renders from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// Last applied snapshot.
    pub inventory: Vec<InventoryItem>,
    pub form: ItemForm,
    pub form_open: bool,
    pub search_query: String,
    pub status: Status,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenForm,
    CloseForm,
    SetName(String),
    SetCount(String),
    SetCategory(String),
    SetImage(Option<ImageFile>),
    SetSearch(String),
    /// An engine call started.
    Started,
    /// A refreshed snapshot arrived.
    Loaded(Vec<InventoryItem>),
    /// The form's item was written; clears and closes the form.
    ItemAdded,
    /// An engine call failed.
    Failed(String),
    DismissError,
}

/// Applies `action` to `state`.
pub fn update(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::OpenForm => state.form_open = true,
        Action::CloseForm => state.form_open = false,
        Action::SetName(name) => state.form.name = name,
        Action::SetCount(count) => state.form.count = count,
        Action::SetCategory(category) => state.form.category = category,
        Action::SetImage(image) => state.form.image = image,
        Action::SetSearch(query) => state.search_query = query,
        Action::Started => state.status = Status::Busy,
        Action::Loaded(items) => {
            state.inventory = items;
            state.status = Status::Idle;
        }
        Action::ItemAdded => {
            state.form = ItemForm::default();
            state.form_open = false;
        }
        Action::Failed(message) => state.status = Status::Failed(message),
        Action::DismissError => {
            if matches!(state.status, Status::Failed(_)) {
                state.status = Status::Idle;
            }
        }
    }
    state
}

/// Items matching the current search, in snapshot order.
pub fn visible_items(state: &AppState) -> Vec<&InventoryItem> {
    state
        .inventory
        .iter()
        .filter(|item| matches_query(item, &state.search_query))
        .collect()
}

/// Display projection of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub id: ItemId,
    pub title: String,
    /// `None` when the item has no image.
    pub image_url: Option<String>,
    /// Alt text for the image.
    pub image_alt: String,
    pub count_label: String,
    pub category_label: String,
}

impl ItemCard {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.name.clone(),
            image_url: (!item.image.is_empty()).then(|| item.image.clone()),
            image_alt: item.name.clone(),
            count_label: format!("Count: {}", item.count),
            category_label: format!("Category: {}", item.category),
        }
    }
}

/// Cards for the visible items.
pub fn visible_cards(state: &AppState) -> Vec<ItemCard> {
    visible_items(state)
        .into_iter()
        .map(ItemCard::from_item)
        .collect()
}

/// An entry of the category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// The category selector entries.
pub fn category_options() -> Vec<CategoryOption> {
    Category::ALL
        .into_iter()
        .map(|c| CategoryOption {
            value: c.as_str(),
            label: c.label(),
        })
        .collect()
}
