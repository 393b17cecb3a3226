use chrono::NaiveDate;
use mealmind_household::{
    CreateHouseholdInput, HouseholdService, JoinHouseholdInput, MealRequestInput,
};
use mealmind_meal::{MealInput, MealStore};
use mealmind_plan::PlanService;
use mealmind_shared::household::{MemberRole, RequestStatus};
use mealmind_shared::meal::Ingredient;
use temp_dir::TempDir;

struct TestState {
    households: HouseholdService,
    meals: MealStore,
    plans: PlanService,
}

async fn setup(dir: &TempDir) -> anyhow::Result<TestState> {
    let url = format!("sqlite://{}", dir.child("db.sqlite3").display());
    let pool = mealmind_db::pool::create_pool(&url, 2).await?;
    mealmind_db::migrate(&pool).await?;

    Ok(TestState {
        households: HouseholdService::new(pool.clone(), pool.clone()),
        meals: MealStore::new(pool.clone(), pool.clone()),
        plans: PlanService::new(pool.clone(), pool),
    })
}

fn create_input(name: &str, display_name: &str) -> CreateHouseholdInput {
    CreateHouseholdInput {
        name: name.to_owned(),
        display_name: display_name.to_owned(),
    }
}

fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
}

#[tokio::test]
async fn create_and_join_by_invite_code() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup(&dir).await?;

    let household = state
        .households
        .create("alice", create_input("The Smiths", "Alice"))
        .await?;
    assert_eq!(household.owner_id, "alice");
    assert_eq!(household.invite_code.len(), 6);

    let joined = state
        .households
        .join(
            "bob",
            JoinHouseholdInput {
                // Codes are matched case-insensitively.
                invite_code: household.invite_code.to_lowercase(),
                display_name: "Bob".to_owned(),
            },
        )
        .await?;
    assert_eq!(joined.id, household.id);

    let members = state.households.members("bob", &household.id).await?;
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].role, MemberRole::Owner);
    assert_eq!(members[1].role, MemberRole::Member);

    // Re-joining is idempotent.
    state
        .households
        .join(
            "bob",
            JoinHouseholdInput {
                invite_code: household.invite_code.to_owned(),
                display_name: "Bobby".to_owned(),
            },
        )
        .await?;
    assert_eq!(state.households.members("bob", &household.id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn unknown_invite_code_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup(&dir).await?;

    let result = state
        .households
        .join(
            "bob",
            JoinHouseholdInput {
                invite_code: "NOPE99".to_owned(),
                display_name: "Bob".to_owned(),
            },
        )
        .await;
    assert!(matches!(result, Err(mealmind_shared::Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn approve_places_the_meal_on_the_approvers_plan() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup(&dir).await?;

    let household = state
        .households
        .create("alice", create_input("The Smiths", "Alice"))
        .await?;
    state
        .households
        .join(
            "bob",
            JoinHouseholdInput {
                invite_code: household.invite_code.to_owned(),
                display_name: "Bob".to_owned(),
            },
        )
        .await?;

    let lasagna = state
        .meals
        .create(
            "alice",
            MealInput {
                name: "Lasagna".to_owned(),
                tags: vec![],
                cook_time_minutes: 60,
                ingredients: vec![Ingredient::new("pasta")],
            },
        )
        .await?;

    let request = state
        .households
        .request(
            "bob",
            MealRequestInput {
                household_id: household.id.to_owned(),
                meal_id: lasagna.id.to_owned(),
                date: wednesday(),
            },
        )
        .await?;
    assert_eq!(request.status, RequestStatus::Pending);

    // No plan for that week yet: approval refuses, request stays pending.
    let early = state.households.approve("alice", &request.id).await;
    assert!(matches!(early, Err(mealmind_shared::Error::User(_))));
    let requests = state.households.requests("alice", &household.id).await?;
    assert_eq!(requests[0].status, RequestStatus::Pending);

    state.plans.generate("alice", wednesday()).await?;
    let approved = state.households.approve("alice", &request.id).await?;
    assert_eq!(approved.status, RequestStatus::Approved);

    let plan = state.plans.get("alice", wednesday()).await?.unwrap();
    assert_eq!(
        plan.day(wednesday()).unwrap().meal_id.as_deref(),
        Some(lasagna.id.as_str())
    );

    // A decided request cannot be decided again.
    let again = state.households.approve("alice", &request.id).await;
    assert!(matches!(again, Err(mealmind_shared::Error::User(_))));

    Ok(())
}

#[tokio::test]
async fn decline_marks_the_request_without_touching_plans() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup(&dir).await?;

    let household = state
        .households
        .create("alice", create_input("The Smiths", "Alice"))
        .await?;
    let request = state
        .households
        .request(
            "alice",
            MealRequestInput {
                household_id: household.id.to_owned(),
                meal_id: "any-meal".to_owned(),
                date: wednesday(),
            },
        )
        .await?;

    let declined = state.households.decline("alice", &request.id).await?;
    assert_eq!(declined.status, RequestStatus::Declined);
    assert!(state.plans.get("alice", wednesday()).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn non_members_cannot_request_or_decide() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup(&dir).await?;

    let household = state
        .households
        .create("alice", create_input("The Smiths", "Alice"))
        .await?;

    let request = state
        .households
        .request(
            "mallory",
            MealRequestInput {
                household_id: household.id.to_owned(),
                meal_id: "meal".to_owned(),
                date: wednesday(),
            },
        )
        .await;
    assert!(matches!(request, Err(mealmind_shared::Error::User(_))));

    let own = state
        .households
        .request(
            "alice",
            MealRequestInput {
                household_id: household.id.to_owned(),
                meal_id: "meal".to_owned(),
                date: wednesday(),
            },
        )
        .await?;
    let decide = state.households.decline("mallory", &own.id).await;
    assert!(matches!(decide, Err(mealmind_shared::Error::User(_))));

    let list = state.households.requests("mallory", &household.id).await;
    assert!(matches!(list, Err(mealmind_shared::Error::User(_))));

    Ok(())
}
