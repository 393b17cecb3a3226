use chrono::NaiveDate;
use mealmind_plan::PlanService;
use mealmind_shared::household::{
    Household, HouseholdMember, MealRequest, MemberRole, RequestStatus,
};
use mealmind_shared::week_start_of;
use rand::Rng;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::HouseholdStore;

const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const INVITE_CODE_LEN: usize = 6;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHouseholdInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinHouseholdInput {
    #[validate(length(min = 1, message = "Invite code is required"))]
    pub invite_code: String,
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealRequestInput {
    #[validate(length(min = 1, message = "Household is required"))]
    pub household_id: String,
    #[validate(length(min = 1, message = "Meal is required"))]
    pub meal_id: String,
    pub date: NaiveDate,
}

/// Household membership and meal requests. Approval is routing, not engine
/// logic: it funnels into the plan service's manual override and nothing
/// else.
#[derive(Clone)]
pub struct HouseholdService {
    store: HouseholdStore,
    plans: PlanService,
}

impl HouseholdService {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self {
            store: HouseholdStore::new(read_db.clone(), write_db.clone()),
            plans: PlanService::new(read_db, write_db),
        }
    }

    pub async fn create(
        &self,
        user_id: &str,
        input: CreateHouseholdInput,
    ) -> mealmind_shared::Result<Household> {
        input.validate()?;

        let household = Household {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.trim().to_owned(),
            invite_code: invite_code(&mut rand::rng()),
            owner_id: user_id.to_owned(),
        };

        self.store.insert_household(&household).await?;

        let owner = HouseholdMember {
            household_id: household.id.to_owned(),
            user_id: user_id.to_owned(),
            display_name: input.display_name.trim().to_owned(),
            role: MemberRole::Owner,
        };

        // The household row is useless without its owner membership; undo it
        // rather than leave an orphan behind.
        if let Err(e) = self.store.insert_member(&owner).await {
            self.store.delete_household(&household.id).await?;
            return Err(e);
        }

        tracing::info!(household_id = household.id, "household created");

        Ok(household)
    }

    pub async fn join(
        &self,
        user_id: &str,
        input: JoinHouseholdInput,
    ) -> mealmind_shared::Result<Household> {
        input.validate()?;

        let code = input.invite_code.trim().to_uppercase();
        let Some(household) = self.store.get_by_invite_code(&code).await? else {
            mealmind_shared::not_found!("household");
        };

        self.store
            .insert_member(&HouseholdMember {
                household_id: household.id.to_owned(),
                user_id: user_id.to_owned(),
                display_name: input.display_name.trim().to_owned(),
                role: MemberRole::Member,
            })
            .await?;

        Ok(household)
    }

    pub async fn members(
        &self,
        user_id: &str,
        household_id: &str,
    ) -> mealmind_shared::Result<Vec<HouseholdMember>> {
        self.ensure_member(household_id, user_id).await?;
        self.store.list_members(household_id).await
    }

    pub async fn request(
        &self,
        user_id: &str,
        input: MealRequestInput,
    ) -> mealmind_shared::Result<MealRequest> {
        input.validate()?;
        self.ensure_member(&input.household_id, user_id).await?;

        let request = MealRequest {
            id: uuid::Uuid::new_v4().to_string(),
            household_id: input.household_id,
            requested_by: user_id.to_owned(),
            meal_id: input.meal_id,
            date: input.date,
            status: RequestStatus::Pending,
        };

        self.store.insert_request(&request).await?;

        Ok(request)
    }

    pub async fn requests(
        &self,
        user_id: &str,
        household_id: &str,
    ) -> mealmind_shared::Result<Vec<MealRequest>> {
        self.ensure_member(household_id, user_id).await?;
        self.store.list_requests(household_id).await
    }

    /// Approve into the approver's own plan via the engine's manual override.
    /// The week must already have a plan; the request stays pending when it
    /// does not.
    pub async fn approve(
        &self,
        user_id: &str,
        request_id: &str,
    ) -> mealmind_shared::Result<MealRequest> {
        let mut request = self.pending_request(user_id, request_id).await?;

        let week_start = week_start_of(request.date);
        let placed = self
            .plans
            .set_day_meal(
                user_id,
                week_start,
                request.date,
                Some(request.meal_id.to_owned()),
            )
            .await?;

        if placed.is_none() {
            mealmind_shared::user!("No plan exists for the week of {week_start} yet");
        }

        self.store
            .set_request_status(&request.id, RequestStatus::Approved)
            .await?;
        request.status = RequestStatus::Approved;

        Ok(request)
    }

    pub async fn decline(
        &self,
        user_id: &str,
        request_id: &str,
    ) -> mealmind_shared::Result<MealRequest> {
        let mut request = self.pending_request(user_id, request_id).await?;

        self.store
            .set_request_status(&request.id, RequestStatus::Declined)
            .await?;
        request.status = RequestStatus::Declined;

        Ok(request)
    }

    async fn pending_request(
        &self,
        user_id: &str,
        request_id: &str,
    ) -> mealmind_shared::Result<MealRequest> {
        let Some(request) = self.store.get_request(request_id).await? else {
            mealmind_shared::not_found!("meal request");
        };

        self.ensure_member(&request.household_id, user_id).await?;

        if request.status != RequestStatus::Pending {
            mealmind_shared::user!("Request has already been {}", request.status);
        }

        Ok(request)
    }

    async fn ensure_member(
        &self,
        household_id: &str,
        user_id: &str,
    ) -> mealmind_shared::Result<()> {
        if !self.store.is_member(household_id, user_id).await? {
            mealmind_shared::user!("Not a member of this household");
        }

        Ok(())
    }
}

fn invite_code(rng: &mut impl Rng) -> String {
    (0..INVITE_CODE_LEN)
        .map(|_| INVITE_CODE_ALPHABET[rng.random_range(0..INVITE_CODE_ALPHABET.len())] as char)
        .collect()
}
