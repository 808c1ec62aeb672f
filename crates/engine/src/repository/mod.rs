//! Record store abstraction.
//!
//! Every operation is scoped to an owner id; a record belonging to another
//! owner behaves exactly like a missing one. Two backends exist: an in-memory
//! store (tests, demo mode) and PostgreSQL via sqlx.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use finagent_common::error::AppError;
use finagent_common::types::{
    Asset, AssetInput, Expense, ExpenseInput, Goal, GoalInput, Liability, LiabilityInput,
};
use finagent_common::validation::Validate;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// A stored record and the payload it is created from.
pub trait Record: Clone + Send + Sync + 'static {
    type Input: Clone + Send + Sync + Validate + 'static;

    /// Human-readable entity name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn owner_id(&self) -> i64;

    fn from_input(id: i64, owner_id: i64, input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Replace every editable field; id, owner and creation time are kept.
    fn apply(&mut self, input: Self::Input, now: DateTime<Utc>);
}

/// Owner-scoped CRUD over one record type.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn list(&self, owner_id: i64) -> Result<Vec<T>, AppError>;

    async fn get(&self, owner_id: i64, id: i64) -> Result<Option<T>, AppError>;

    async fn create(&self, owner_id: i64, input: T::Input) -> Result<T, AppError>;

    /// Full replace. Returns `None` when no such record exists for the owner.
    async fn update(&self, owner_id: i64, id: i64, input: T::Input)
    -> Result<Option<T>, AppError>;

    /// Returns true if a record was deleted.
    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError>;
}

/// The set of repositories owned by the composition root.
#[derive(Clone)]
pub struct Stores {
    pub assets: Arc<dyn Repository<Asset>>,
    pub liabilities: Arc<dyn Repository<Liability>>,
    pub expenses: Arc<dyn Repository<Expense>>,
    pub goals: Arc<dyn Repository<Goal>>,
}

impl Stores {
    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            assets: Arc::new(MemoryRepository::<Asset>::new()),
            liabilities: Arc::new(MemoryRepository::<Liability>::new()),
            expenses: Arc::new(MemoryRepository::<Expense>::new()),
            goals: Arc::new(MemoryRepository::<Goal>::new()),
        }
    }

    /// In-memory stores holding the sample portfolio for `owner_id`.
    pub async fn seeded(owner_id: i64) -> Result<Self, AppError> {
        let stores = Self::in_memory();
        crate::seed::seed_sample_data(&stores, owner_id).await?;
        Ok(stores)
    }

    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        let repo = Arc::new(PgRepository::new(pool));
        Self {
            assets: repo.clone(),
            liabilities: repo.clone(),
            expenses: repo.clone(),
            goals: repo,
        }
    }
}

/// Resolves the repository holding a record type.
pub trait Stored: Record {
    fn repository(stores: &Stores) -> &dyn Repository<Self>;
}

impl Stored for Asset {
    fn repository(stores: &Stores) -> &dyn Repository<Self> {
        stores.assets.as_ref()
    }
}

impl Stored for Liability {
    fn repository(stores: &Stores) -> &dyn Repository<Self> {
        stores.liabilities.as_ref()
    }
}

impl Stored for Expense {
    fn repository(stores: &Stores) -> &dyn Repository<Self> {
        stores.expenses.as_ref()
    }
}

impl Stored for Goal {
    fn repository(stores: &Stores) -> &dyn Repository<Self> {
        stores.goals.as_ref()
    }
}

// ============================================================
// Record impls
// ============================================================

impl Record for Asset {
    type Input = AssetInput;
    const KIND: &'static str = "Asset";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.owner_id
    }

    fn from_input(id: i64, owner_id: i64, input: AssetInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: input.name,
            value_inr: input.value_inr,
            asset_class: input.asset_class,
            asset_type: input.asset_type,
            fp_asset_class: input.fp_asset_class,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: AssetInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.value_inr = input.value_inr;
        self.asset_class = input.asset_class;
        self.asset_type = input.asset_type;
        self.fp_asset_class = input.fp_asset_class;
        self.updated_at = now;
    }
}

impl Record for Liability {
    type Input = LiabilityInput;
    const KIND: &'static str = "Liability";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.owner_id
    }

    fn from_input(id: i64, owner_id: i64, input: LiabilityInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: input.name,
            liability_type: input.liability_type,
            outstanding_amount_inr: input.outstanding_amount_inr,
            interest_rate: input.interest_rate,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: LiabilityInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.liability_type = input.liability_type;
        self.outstanding_amount_inr = input.outstanding_amount_inr;
        self.interest_rate = input.interest_rate;
        self.due_date = input.due_date;
        self.updated_at = now;
    }
}

impl Record for Expense {
    type Input = ExpenseInput;
    const KIND: &'static str = "Expense";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.owner_id
    }

    fn from_input(id: i64, owner_id: i64, input: ExpenseInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            category: input.category,
            details: input.details,
            amount: input.amount,
            frequency: input.frequency,
            need_want: input.need_want,
            date: input.date,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: ExpenseInput, now: DateTime<Utc>) {
        self.category = input.category;
        self.details = input.details;
        self.amount = input.amount;
        self.frequency = input.frequency;
        self.need_want = input.need_want;
        self.date = input.date;
        self.updated_at = now;
    }
}

impl Record for Goal {
    type Input = GoalInput;
    const KIND: &'static str = "Goal";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.owner_id
    }

    fn from_input(id: i64, owner_id: i64, input: GoalInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: input.name,
            target_amount: input.target_amount,
            current_amount: input.current_amount,
            target_date: input.target_date,
            priority: input.priority,
            category: input.category,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: GoalInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.target_amount = input.target_amount;
        self.current_amount = input.current_amount;
        self.target_date = input.target_date;
        self.priority = input.priority;
        self.category = input.category;
        self.notes = input.notes;
        self.updated_at = now;
    }
}
