use mealmind_meal::{MealInput, MealStore};
use mealmind_shared::meal::Ingredient;
use temp_dir::TempDir;

async fn setup(dir: &TempDir) -> anyhow::Result<MealStore> {
    let url = format!("sqlite://{}", dir.child("db.sqlite3").display());
    let pool = mealmind_db::pool::create_pool(&url, 2).await?;
    mealmind_db::migrate(&pool).await?;

    Ok(MealStore::new(pool.clone(), pool))
}

fn tacos() -> MealInput {
    MealInput {
        name: "Tacos".to_owned(),
        tags: vec!["mexican".to_owned(), "quick".to_owned()],
        cook_time_minutes: 25,
        ingredients: vec![
            Ingredient {
                name: "Tortillas".to_owned(),
                quantity: Some("8".to_owned()),
            },
            Ingredient::new("Ground beef"),
        ],
    }
}

#[tokio::test]
async fn create_then_list_and_get() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup(&dir).await?;

    let created = store.create("alice", tacos()).await?;
    assert_eq!(created.name, "Tacos");
    assert_eq!(created.tags, vec!["mexican", "quick"]);

    let listed = store.list("alice").await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);

    let fetched = store.get("alice", &created.id).await?;
    assert_eq!(fetched.as_ref(), Some(&created));

    // Scoped by user: another user sees nothing.
    assert!(store.list("bob").await?.is_empty());
    assert!(store.get("bob", &created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn update_changes_fields_and_misses_are_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup(&dir).await?;

    let created = store.create("alice", tacos()).await?;

    let mut input = tacos();
    input.name = "Fish tacos".to_owned();
    input.cook_time_minutes = 35;
    let updated = store.update("alice", &created.id, input.clone()).await?;
    assert_eq!(updated.name, "Fish tacos");
    assert_eq!(updated.cook_time_minutes, 35);
    assert_eq!(store.get("alice", &created.id).await?, Some(updated));

    let missing = store.update("alice", "no-such-id", input.clone()).await;
    assert!(matches!(missing, Err(mealmind_shared::Error::NotFound(_))));

    // A foreign meal is invisible, so updating it is a not-found too.
    let foreign = store.update("bob", &created.id, input).await;
    assert!(matches!(foreign, Err(mealmind_shared::Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn delete_removes_the_meal() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup(&dir).await?;

    let created = store.create("alice", tacos()).await?;
    store.delete("alice", &created.id).await?;

    assert!(store.get("alice", &created.id).await?.is_none());

    let again = store.delete("alice", &created.id).await;
    assert!(matches!(again, Err(mealmind_shared::Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn rejects_malformed_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup(&dir).await?;

    let mut input = tacos();
    input.name = String::new();
    let result = store.create("alice", input).await;
    assert!(matches!(result, Err(mealmind_shared::Error::Validate(_))));

    let mut input = tacos();
    input.ingredients.push(Ingredient::new("  "));
    let result = store.create("alice", input).await;
    assert!(matches!(result, Err(mealmind_shared::Error::User(_))));

    Ok(())
}
