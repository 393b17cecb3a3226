use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Meals {
    Table,
    Id,
    UserId,
    Name,
    Tags,
    CookTimeMinutes,
    Ingredients,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum UserSettings {
    Table,
    UserId,
    DinnersPerWeek,
    MaxCookTimeMinutes,
    ExcludedIngredients,
    AllowRepeats,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum WeekPlans {
    Table,
    UserId,
    WeekStart,
    Days,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingLists {
    Table,
    UserId,
    WeekStart,
    Items,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Households {
    Table,
    Id,
    Name,
    InviteCode,
    OwnerId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum HouseholdMembers {
    Table,
    HouseholdId,
    UserId,
    DisplayName,
    Role,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum MealRequests {
    Table,
    Id,
    HouseholdId,
    RequestedBy,
    MealId,
    Date,
    Status,
    CreatedAt,
}
