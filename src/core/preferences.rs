//! User preference business logic - home city and budget defaults per user.

use crate::{
    entities::{UserPreferences, user_preferences},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};

/// Finds the preferences of a user, if they set any.
pub async fn get_preferences<C>(db: &C, user_id: i64) -> Result<Option<user_preferences::Model>>
where
    C: ConnectionTrait,
{
    UserPreferences::find()
        .filter(user_preferences::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Home city of a user.
///
/// # Errors
/// Returns [`Error::Validation`] when the user has no preferences yet.
pub async fn get_home_city<C>(db: &C, user_id: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    get_preferences(db, user_id)
        .await?
        .map(|prefs| prefs.home_city_id)
        .ok_or_else(|| Error::validation("could not find user home city"))
}

/// Creates or replaces the preferences of a user.
///
/// The budget range must be non-negative with `budget_min <= budget_max`.
pub async fn upsert_preferences(
    db: &DatabaseConnection,
    user_id: i64,
    home_city_id: i64,
    budget_min: f64,
    budget_max: f64,
    travel_style: String,
) -> Result<user_preferences::Model> {
    if !budget_min.is_finite() || !budget_max.is_finite() || budget_min < 0.0 {
        return Err(Error::validation("budget range must be non-negative"));
    }
    if budget_min > budget_max {
        return Err(Error::validation(
            "minimum budget cannot exceed maximum budget",
        ));
    }

    let now = Utc::now();
    match get_preferences(db, user_id).await? {
        Some(existing) => {
            let mut prefs: user_preferences::ActiveModel = existing.into();
            prefs.home_city_id = Set(home_city_id);
            prefs.budget_min = Set(budget_min);
            prefs.budget_max = Set(budget_max);
            prefs.travel_style = Set(travel_style);
            prefs.updated_at = Set(now);
            prefs.update(db).await.map_err(Into::into)
        }
        None => user_preferences::ActiveModel {
            user_id: Set(user_id),
            home_city_id: Set(home_city_id),
            budget_min: Set(budget_min),
            budget_max: Set(budget_max),
            travel_style: Set(travel_style),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_preferences_inserts_then_updates() -> Result<()> {
        let db = setup_test_db().await?;
        let home = create_test_city(&db, "Home").await?;
        let other = create_test_city(&db, "Other").await?;

        let created =
            upsert_preferences(&db, 5, home.id, 500.0, 2500.0, "relaxed".to_string()).await?;
        assert_eq!(created.home_city_id, home.id);

        let updated =
            upsert_preferences(&db, 5, other.id, 800.0, 3000.0, "active".to_string()).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.home_city_id, other.id);
        assert_eq!(updated.budget_max, 3000.0);

        assert_eq!(get_home_city(&db, 5).await?, other.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_home_city() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            get_home_city(&db, 1).await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_budget_range() -> Result<()> {
        let db = setup_test_db().await?;
        let home = create_test_city(&db, "Home").await?;
        let result = upsert_preferences(&db, 5, home.id, 900.0, 100.0, String::new()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }
}
