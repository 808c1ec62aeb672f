use async_trait::async_trait;
use sqlx::PgPool;

use finagent_common::error::AppError;
use finagent_common::types::{
    Asset, AssetInput, Expense, ExpenseInput, Goal, GoalInput, Liability, LiabilityInput,
};

use super::Repository;

/// PostgreSQL record store. One instance serves every entity table.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_from(&self, table: &str, owner_id: i64, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {table} WHERE id = $1 AND owner_id = $2");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Repository<Asset> for PgRepository {
    async fn list(&self, owner_id: i64) -> Result<Vec<Asset>, AppError> {
        let rows: Vec<Asset> =
            sqlx::query_as("SELECT * FROM assets WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Option<Asset>, AppError> {
        let row: Option<Asset> =
            sqlx::query_as("SELECT * FROM assets WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn create(&self, owner_id: i64, input: AssetInput) -> Result<Asset, AppError> {
        let row: Asset = sqlx::query_as(
            r#"
            INSERT INTO assets (owner_id, name, value_inr, asset_class, asset_type, fp_asset_class)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.value_inr)
        .bind(input.asset_class)
        .bind(input.asset_type)
        .bind(input.fp_asset_class)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        input: AssetInput,
    ) -> Result<Option<Asset>, AppError> {
        let row: Option<Asset> = sqlx::query_as(
            r#"
            UPDATE assets
            SET name = $1, value_inr = $2, asset_class = $3, asset_type = $4,
                fp_asset_class = $5, updated_at = NOW()
            WHERE id = $6 AND owner_id = $7
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.value_inr)
        .bind(input.asset_class)
        .bind(input.asset_type)
        .bind(input.fp_asset_class)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        self.delete_from("assets", owner_id, id).await
    }
}

#[async_trait]
impl Repository<Liability> for PgRepository {
    async fn list(&self, owner_id: i64) -> Result<Vec<Liability>, AppError> {
        let rows: Vec<Liability> =
            sqlx::query_as("SELECT * FROM liabilities WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Option<Liability>, AppError> {
        let row: Option<Liability> =
            sqlx::query_as("SELECT * FROM liabilities WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn create(&self, owner_id: i64, input: LiabilityInput) -> Result<Liability, AppError> {
        let row: Liability = sqlx::query_as(
            r#"
            INSERT INTO liabilities
                (owner_id, name, liability_type, outstanding_amount_inr, interest_rate, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.liability_type)
        .bind(input.outstanding_amount_inr)
        .bind(input.interest_rate)
        .bind(input.due_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        input: LiabilityInput,
    ) -> Result<Option<Liability>, AppError> {
        let row: Option<Liability> = sqlx::query_as(
            r#"
            UPDATE liabilities
            SET name = $1, liability_type = $2, outstanding_amount_inr = $3,
                interest_rate = $4, due_date = $5, updated_at = NOW()
            WHERE id = $6 AND owner_id = $7
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.liability_type)
        .bind(input.outstanding_amount_inr)
        .bind(input.interest_rate)
        .bind(input.due_date)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        self.delete_from("liabilities", owner_id, id).await
    }
}

#[async_trait]
impl Repository<Expense> for PgRepository {
    async fn list(&self, owner_id: i64) -> Result<Vec<Expense>, AppError> {
        let rows: Vec<Expense> =
            sqlx::query_as("SELECT * FROM expenses WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Option<Expense>, AppError> {
        let row: Option<Expense> =
            sqlx::query_as("SELECT * FROM expenses WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn create(&self, owner_id: i64, input: ExpenseInput) -> Result<Expense, AppError> {
        let row: Expense = sqlx::query_as(
            r#"
            INSERT INTO expenses (owner_id, category, details, amount, frequency, need_want, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.category)
        .bind(&input.details)
        .bind(input.amount)
        .bind(input.frequency)
        .bind(input.need_want)
        .bind(input.date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        input: ExpenseInput,
    ) -> Result<Option<Expense>, AppError> {
        let row: Option<Expense> = sqlx::query_as(
            r#"
            UPDATE expenses
            SET category = $1, details = $2, amount = $3, frequency = $4,
                need_want = $5, date = $6, updated_at = NOW()
            WHERE id = $7 AND owner_id = $8
            RETURNING *
            "#,
        )
        .bind(&input.category)
        .bind(&input.details)
        .bind(input.amount)
        .bind(input.frequency)
        .bind(input.need_want)
        .bind(input.date)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        self.delete_from("expenses", owner_id, id).await
    }
}

#[async_trait]
impl Repository<Goal> for PgRepository {
    async fn list(&self, owner_id: i64) -> Result<Vec<Goal>, AppError> {
        let rows: Vec<Goal> =
            sqlx::query_as("SELECT * FROM goals WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Option<Goal>, AppError> {
        let row: Option<Goal> =
            sqlx::query_as("SELECT * FROM goals WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn create(&self, owner_id: i64, input: GoalInput) -> Result<Goal, AppError> {
        let row: Goal = sqlx::query_as(
            r#"
            INSERT INTO goals
                (owner_id, name, target_amount, current_amount, target_date, priority, category, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.target_amount)
        .bind(input.current_amount)
        .bind(input.target_date)
        .bind(input.priority)
        .bind(input.category)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        input: GoalInput,
    ) -> Result<Option<Goal>, AppError> {
        let row: Option<Goal> = sqlx::query_as(
            r#"
            UPDATE goals
            SET name = $1, target_amount = $2, current_amount = $3, target_date = $4,
                priority = $5, category = $6, notes = $7, updated_at = NOW()
            WHERE id = $8 AND owner_id = $9
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.target_amount)
        .bind(input.current_amount)
        .bind(input.target_date)
        .bind(input.priority)
        .bind(input.category)
        .bind(&input.notes)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        self.delete_from("goals", owner_id, id).await
    }
}
