//! Record service: validated, owner-scoped CRUD for assets, liabilities,
//! expenses and goals.
//!
//! A missing record and one owned by someone else both surface as
//! `AppError::NotFound`.

use finagent_common::error::AppError;
use finagent_common::validation::Validate;

use crate::repository::{Stored, Stores};

/// Service layer for record CRUD operations.
pub struct RecordService;

fn not_found<T: Stored>(id: i64) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", T::KIND, id))
}

impl RecordService {
    /// All records of one kind for an owner, in id order.
    pub async fn list<T: Stored>(stores: &Stores, owner_id: i64) -> Result<Vec<T>, AppError> {
        T::repository(stores).list(owner_id).await
    }

    pub async fn get<T: Stored>(stores: &Stores, owner_id: i64, id: i64) -> Result<T, AppError> {
        T::repository(stores)
            .get(owner_id, id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    /// Validate and store a new record. The store assigns the id.
    pub async fn create<T: Stored>(
        stores: &Stores,
        owner_id: i64,
        input: T::Input,
    ) -> Result<T, AppError> {
        let input = input.validate()?;
        let record = T::repository(stores).create(owner_id, input).await?;

        tracing::info!(kind = T::KIND, id = record.id(), owner_id, "Record created");

        Ok(record)
    }

    /// Validate and fully replace an existing record.
    pub async fn update<T: Stored>(
        stores: &Stores,
        owner_id: i64,
        id: i64,
        input: T::Input,
    ) -> Result<T, AppError> {
        let input = input.validate()?;
        let record = T::repository(stores)
            .update(owner_id, id, input)
            .await?
            .ok_or_else(|| not_found::<T>(id))?;

        tracing::info!(kind = T::KIND, id, owner_id, "Record updated");

        Ok(record)
    }

    pub async fn delete<T: Stored>(stores: &Stores, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !T::repository(stores).delete(owner_id, id).await? {
            return Err(not_found::<T>(id));
        }

        tracing::info!(kind = T::KIND, id, owner_id, "Record deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finagent_common::types::{
        Expense, ExpenseFrequency, ExpenseInput, Goal, GoalCategory, GoalInput, GoalPriority,
        Liability, LiabilityInput, NeedWant,
    };

    fn liability_input(name: &str, amount: f64) -> LiabilityInput {
        LiabilityInput {
            name: name.to_string(),
            liability_type: "Secured Loan".to_string(),
            outstanding_amount_inr: amount,
            interest_rate: Some(9.2),
            due_date: NaiveDate::from_ymd_opt(2028, 11, 1),
        }
    }

    fn goal_input(target: f64) -> GoalInput {
        GoalInput {
            name: "Japan Trip".to_string(),
            target_amount: target,
            current_amount: 65_000.0,
            target_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
            priority: GoalPriority::Low,
            category: GoalCategory::Vacation,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let stores = Stores::in_memory();
        let created: Liability =
            RecordService::create(&stores, 1, liability_input("Car Loan", 450_000.0))
                .await
                .unwrap();

        let fetched: Liability = RecordService::get(&stores, 1, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.liability_type, "Secured Loan");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let stores = Stores::in_memory();
        let err = RecordService::create::<Liability>(&stores, 1, liability_input("Loan", 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(
            RecordService::list::<Liability>(&stores, 1)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let stores = Stores::in_memory();
        let err = RecordService::update::<Goal>(&stores, 1, 42, goal_input(250_000.0))
            .await
            .unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Goal with id 42 not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let stores = Stores::in_memory();
        let err = RecordService::update::<Goal>(&stores, 1, 42, goal_input(-1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let stores = Stores::in_memory();
        let expense: Expense = RecordService::create(
            &stores,
            1,
            ExpenseInput {
                category: "Rent".to_string(),
                details: Some("House Rent".to_string()),
                amount: 70_000.0,
                frequency: ExpenseFrequency::Monthly,
                need_want: NeedWant::Need,
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
        )
        .await
        .unwrap();

        RecordService::delete::<Expense>(&stores, 1, expense.id)
            .await
            .unwrap();
        let err = RecordService::delete::<Expense>(&stores, 1, expense.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_other_owner_sees_not_found() {
        let stores = Stores::in_memory();
        let goal: Goal = RecordService::create(&stores, 1, goal_input(250_000.0))
            .await
            .unwrap();

        let err = RecordService::get::<Goal>(&stores, 2, goal.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
