use async_trait::async_trait;
use std::sync::Arc;
use stockroom_cloud::{
    CloudError, CloudResult, DocumentCollection, MemoryBlobStore, MemoryCollection,
};
use stockroom_sync::{Action, InventoryApp, InventorySync, RemoteOperation, Status, SyncConfig};
use stockroom_types::{Category, Document, Fields, ImageFile};

struct Fixture {
    collection: Arc<MemoryCollection>,
    blobs: Arc<MemoryBlobStore>,
    engine: Arc<InventorySync>,
}

fn fixture() -> Fixture {
    let collection = Arc::new(MemoryCollection::new("inventory"));
    let blobs = Arc::new(MemoryBlobStore::with_url_prefix("https://cdn.test"));
    let engine = Arc::new(InventorySync::new(
        collection.clone(),
        blobs.clone(),
        SyncConfig::default(),
    ));
    Fixture {
        collection,
        blobs,
        engine,
    }
}

fn fill_form(app: &mut InventoryApp, name: &str, count: &str, category: Category) {
    app.dispatch(Action::OpenForm);
    app.dispatch(Action::SetName(name.into()));
    app.dispatch(Action::SetCount(count.into()));
    app.dispatch(Action::SetCategory(category.into()));
}

#[tokio::test]
async fn load_populates_inventory() {
    let fx = fixture();
    fx.engine
        .add_item(stockroom_types::ItemDraft::new("Hammer", "3", Category::Electronics))
        .await
        .unwrap();

    let mut app = InventoryApp::new(fx.engine.clone());
    app.load().await.unwrap();

    assert_eq!(app.state().status, Status::Idle);
    assert_eq!(app.state().inventory.len(), 1);
    assert_eq!(app.cards()[0].title, "Hammer");
}

#[tokio::test]
async fn submit_adds_item_and_resets_form() {
    let fx = fixture();
    let mut app = InventoryApp::new(fx.engine.clone());

    fill_form(&mut app, "Scarf", "5", Category::Clothing);
    app.dispatch(Action::SetImage(Some(ImageFile::new("scarf.png", b"x".to_vec()))));
    let id = app.submit().await.unwrap();

    let state = app.state();
    assert!(!state.form_open);
    assert_eq!(state.form.name, "");
    assert_eq!(state.form.image, None);
    assert_eq!(state.status, Status::Idle);
    assert_eq!(state.inventory.len(), 1);
    assert_eq!(state.inventory[0].id, id);
    assert_eq!(state.inventory[0].image, "https://cdn.test/images/scarf.png");
    assert!(fx.blobs.get("images/scarf.png").await.is_some());
}

#[tokio::test]
async fn submit_failure_is_visible_and_keeps_form() {
    let fx = fixture();
    let mut app = InventoryApp::new(fx.engine.clone());
    fx.collection.set_offline(true);

    fill_form(&mut app, "Scarf", "5", Category::Clothing);
    let err = app.submit().await.unwrap_err();

    let state = app.state();
    assert!(err.is_remote_unavailable());
    assert!(matches!(&state.status, Status::Failed(msg) if msg.contains("remote unavailable")));
    assert!(state.form_open);
    assert_eq!(state.form.name, "Scarf");
}

/// Accepts writes but can never be listed.
struct WriteOnlyCollection {
    inner: MemoryCollection,
}

#[async_trait]
impl DocumentCollection for WriteOnlyCollection {
    fn provider_name(&self) -> &'static str {
        "write-only"
    }

    fn collection_name(&self) -> &str {
        self.inner.collection_name()
    }

    async fn list(&self) -> CloudResult<Vec<Document>> {
        Err(CloudError::Unavailable("listing disabled".into()))
    }

    async fn put(&self, id: &str, fields: &Fields) -> CloudResult<()> {
        self.inner.put(id, fields).await
    }

    async fn delete(&self, id: &str) -> CloudResult<()> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn stored_item_clears_form_even_if_reload_fails() {
    let collection = Arc::new(WriteOnlyCollection {
        inner: MemoryCollection::new("inventory"),
    });
    let engine = Arc::new(InventorySync::new(
        collection.clone(),
        Arc::new(MemoryBlobStore::new()),
        SyncConfig::default(),
    ));
    let mut app = InventoryApp::new(engine);

    fill_form(&mut app, "Scarf", "5", Category::Clothing);
    let err = app.submit().await.unwrap_err();

    assert_eq!(err.operation(), Some(RemoteOperation::List));
    let state = app.state();
    assert!(matches!(state.status, Status::Failed(_)));
    assert!(!state.form_open);
    assert_eq!(state.form.name, "");
    assert_eq!(collection.inner.len().await, 1);

    // submitting the now-empty form again must not duplicate the scarf
    app.dispatch(Action::OpenForm);
    let _ = app.submit().await;
    let stored = collection.inner.list().await.unwrap();
    let scarves = stored.iter().filter(|d| d.string_field("name") == "Scarf").count();
    assert_eq!(scarves, 1);
}

#[tokio::test]
async fn load_failure_is_visible() {
    let fx = fixture();
    fx.collection.set_offline(true);
    let mut app = InventoryApp::new(fx.engine.clone());

    assert!(app.load().await.is_err());
    assert!(matches!(app.state().status, Status::Failed(_)));

    fx.collection.set_offline(false);
    app.load().await.unwrap();
    assert_eq!(app.state().status, Status::Idle);
}

#[tokio::test]
async fn remove_updates_cards() {
    let fx = fixture();
    let mut app = InventoryApp::new(fx.engine.clone());

    fill_form(&mut app, "Milk", "2", Category::Groceries);
    let milk = app.submit().await.unwrap();
    fill_form(&mut app, "Bread", "1", Category::Groceries);
    app.submit().await.unwrap();
    assert_eq!(app.cards().len(), 2);

    app.remove(&milk).await.unwrap();
    let titles: Vec<String> = app.cards().into_iter().map(|c| c.title).collect();
    assert_eq!(titles, vec!["Bread".to_string()]);
}

#[tokio::test]
async fn second_screen_sees_changes_after_load() {
    let fx = fixture();
    let mut first = InventoryApp::new(fx.engine.clone());
    let mut second = InventoryApp::new(fx.engine.clone());

    fill_form(&mut first, "Cable", "7", Category::Electronics);
    first.submit().await.unwrap();

    // no push: the other screen only changes when it reloads
    assert!(second.state().inventory.is_empty());
    second.load().await.unwrap();
    assert_eq!(second.state().inventory.len(), 1);
}

#[tokio::test]
async fn search_narrows_cards() {
    let fx = fixture();
    let mut app = InventoryApp::new(fx.engine.clone());

    fill_form(&mut app, "Hammer", "3", Category::Electronics);
    app.submit().await.unwrap();
    fill_form(&mut app, "Nail", "10", Category::Groceries);
    app.submit().await.unwrap();

    app.dispatch(Action::SetSearch("ham".into()));
    assert_eq!(app.cards().len(), 1);
    app.dispatch(Action::SetSearch("bolt".into()));
    assert!(app.cards().is_empty());
}
