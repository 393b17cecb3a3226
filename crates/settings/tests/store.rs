use mealmind_settings::{SettingsInput, SettingsStore};
use mealmind_shared::settings::Settings;
use temp_dir::TempDir;

async fn setup(dir: &TempDir) -> anyhow::Result<SettingsStore> {
    let url = format!("sqlite://{}", dir.child("db.sqlite3").display());
    let pool = mealmind_db::pool::create_pool(&url, 2).await?;
    mealmind_db::migrate(&pool).await?;

    Ok(SettingsStore::new(pool.clone(), pool))
}

#[tokio::test]
async fn get_falls_back_to_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup(&dir).await?;

    let settings = store.get("alice").await?;
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.dinners_per_week, 5);
    assert_eq!(settings.max_cook_time_minutes, 45);
    assert!(settings.excluded_ingredients.is_empty());
    assert!(!settings.allow_repeats);

    Ok(())
}

#[tokio::test]
async fn save_then_get_round_trips_and_overwrites() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup(&dir).await?;

    let saved = store
        .save(
            "alice",
            SettingsInput {
                dinners_per_week: 3,
                max_cook_time_minutes: 30,
                excluded_ingredients: vec!["peanut".to_owned()],
                allow_repeats: true,
            },
        )
        .await?;
    assert_eq!(store.get("alice").await?, saved);

    // Second save replaces the single row for the user.
    store
        .save(
            "alice",
            SettingsInput {
                dinners_per_week: 7,
                max_cook_time_minutes: 90,
                excluded_ingredients: vec![],
                allow_repeats: false,
            },
        )
        .await?;
    let settings = store.get("alice").await?;
    assert_eq!(settings.dinners_per_week, 7);
    assert!(settings.excluded_ingredients.is_empty());

    // Other users are untouched.
    assert_eq!(store.get("bob").await?, Settings::default());

    Ok(())
}

#[tokio::test]
async fn rejects_out_of_range_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup(&dir).await?;

    let result = store
        .save(
            "alice",
            SettingsInput {
                dinners_per_week: 0,
                max_cook_time_minutes: 30,
                excluded_ingredients: vec![],
                allow_repeats: false,
            },
        )
        .await;
    assert!(matches!(result, Err(mealmind_shared::Error::Validate(_))));

    let result = store
        .save(
            "alice",
            SettingsInput {
                dinners_per_week: 8,
                max_cook_time_minutes: 30,
                excluded_ingredients: vec![],
                allow_repeats: false,
            },
        )
        .await;
    assert!(matches!(result, Err(mealmind_shared::Error::Validate(_))));

    Ok(())
}
