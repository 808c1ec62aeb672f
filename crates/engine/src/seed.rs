//! Demo portfolio loaded into empty stores at startup.

use chrono::NaiveDate;
use tracing::info;

use finagent_common::error::AppError;
use finagent_common::types::{
    AssetClass, AssetInput, AssetType, ExpenseFrequency, ExpenseInput, FpAssetClass,
    GoalCategory, GoalInput, GoalPriority, LiabilityInput, NeedWant,
};

use crate::repository::Stores;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn sample_assets() -> Vec<AssetInput> {
    let asset = |name: &str, value_inr, asset_class, asset_type, fp_asset_class| AssetInput {
        name: name.to_string(),
        value_inr,
        asset_class,
        asset_type,
        fp_asset_class,
    };

    vec![
        asset(
            "Saving Account",
            500_000.0,
            AssetClass::CashEquivalent,
            AssetType::SavingsAccount,
            FpAssetClass::EmergencyFund,
        ),
        asset(
            "Shares",
            10_000_000.0,
            AssetClass::Equity,
            AssetType::DirectEquity,
            FpAssetClass::Retirement,
        ),
        asset(
            "Other Asset",
            200_000.0,
            AssetClass::Equity,
            AssetType::DirectEquity,
            FpAssetClass::Retirement,
        ),
    ]
}

pub fn sample_liabilities() -> Vec<LiabilityInput> {
    let liability = |name: &str, kind: &str, amount, rate, due| LiabilityInput {
        name: name.to_string(),
        liability_type: kind.to_string(),
        outstanding_amount_inr: amount,
        interest_rate: Some(rate),
        due_date: Some(due),
    };

    vec![
        liability("Home Loan", "Secured Loan", 3_500_000.0, 8.5, date(2043, 5, 15)),
        liability("Car Loan", "Secured Loan", 450_000.0, 9.2, date(2028, 11, 1)),
        liability(
            "Credit Card Due - ICICI",
            "Unsecured Loan",
            35_000.0,
            36.0,
            date(2023, 11, 20),
        ),
        liability("Personal Loan", "Unsecured Loan", 150_000.0, 14.0, date(2026, 7, 1)),
    ]
}

pub fn sample_expenses() -> Vec<ExpenseInput> {
    use ExpenseFrequency::{Annually, Monthly};
    use NeedWant::{Need, Want};

    let rows: &[(&str, &str, f64, ExpenseFrequency, NeedWant)] = &[
        ("Childcare", "Kid 1 school fees broken into monthly", 16_667.0, Monthly, Need),
        ("Childcare", "Kid 2 school fees broken into monthly", 16_667.0, Monthly, Need),
        ("Food", "Veg groceries food expense", 7_500.0, Monthly, Need),
        ("Food", "Restaurent food expense", 10_000.0, Monthly, Want),
        ("Helper", "Helper Cook", 6_500.0, Monthly, Need),
        ("Helper", "Helper Sweeping", 1_000.0, Monthly, Need),
        ("Helper", "Helper Dish Washing", 1_000.0, Monthly, Need),
        ("Helper", "Helper Bathroom", 1_500.0, Monthly, Need),
        ("Insurance", "Medical Super Top Up", 833.0, Monthly, Need),
        ("Insurance", "Medical", 417.0, Monthly, Need),
        ("Rent", "House Rent", 70_000.0, Monthly, Need),
        ("EMI", "House EMI", 50_000.0, Monthly, Need),
        ("Shopping", "General shopping", 5_000.0, Monthly, Need),
        ("Tax", "Dad Tax Filing", 1_200.0, Monthly, Need),
        ("Tax", "Mom Tax Filing", 1_200.0, Monthly, Need),
        ("Trip", "International Trip", 41_667.0, Monthly, Want),
        ("Trip", "Long Trip", 16_667.0, Monthly, Want),
        ("Trip", "Short Trip", 8_333.0, Monthly, Want),
        ("Utilities", "Electricity Bill", 3_500.0, Monthly, Need),
        ("Utilities", "Internet Bill", 1_500.0, Monthly, Need),
        ("Utilities", "Gas Bill", 750.0, Monthly, Need),
        ("Utilities", "Dry Cleaning Bill", 500.0, Monthly, Need),
        ("Utilities", "Mom Phone Bill", 450.0, Monthly, Need),
        ("Utilities", "Water Bill", 400.0, Monthly, Need),
        ("Utilities", "Dad Phone Bill", 500.0, Monthly, Need),
        ("Utilities", "Ironing Bill", 500.0, Monthly, Need),
        ("Utilities", "Car Petrol Bill", 3_000.0, Monthly, Need),
        ("Childcare", "Kid 1 school fees broken into monthly", 200_000.0, Annually, Need),
        ("Childcare", "Kid 2 school fees broken into monthly", 200_000.0, Annually, Need),
        ("Trip", "Short Trip", 100_000.0, Annually, Want),
        ("Trip", "Long Trip", 200_000.0, Annually, Want),
        ("Trip", "International Trip", 1_000_000.0, Annually, Want),
        ("Insurance", "Family Medical Super Top Up Insurance", 30_000.0, Annually, Need),
        ("Insurance", "Family Medical Insurance", 10_000.0, Annually, Need),
    ];

    rows.iter()
        .map(|&(category, details, amount, frequency, need_want)| ExpenseInput {
            category: category.to_string(),
            details: Some(details.to_string()),
            amount,
            frequency,
            need_want,
            date: date(2025, 6, 1),
        })
        .collect()
}

pub fn sample_goals() -> Vec<GoalInput> {
    let goal = |name: &str, target_amount, current_amount, target_date, priority, category| {
        GoalInput {
            name: name.to_string(),
            target_amount,
            current_amount,
            target_date,
            priority,
            category,
            notes: None,
        }
    };

    vec![
        goal(
            "Emergency Fund",
            500_000.0,
            350_000.0,
            date(2024, 12, 31),
            GoalPriority::High,
            GoalCategory::EmergencyFund,
        ),
        goal(
            "New Laptop Fund",
            150_000.0,
            45_000.0,
            date(2025, 6, 30),
            GoalPriority::Medium,
            GoalCategory::Other,
        ),
        goal(
            "Car Upgrade",
            1_200_000.0,
            280_000.0,
            date(2026, 8, 15),
            GoalPriority::Medium,
            GoalCategory::Car,
        ),
        goal(
            "International Certification",
            80_000.0,
            25_000.0,
            date(2025, 3, 31),
            GoalPriority::High,
            GoalCategory::Education,
        ),
        goal(
            "Japan Trip",
            250_000.0,
            65_000.0,
            date(2025, 12, 15),
            GoalPriority::Low,
            GoalCategory::Vacation,
        ),
    ]
}

/// Insert the demo portfolio for `owner_id`.
pub async fn seed_sample_data(stores: &Stores, owner_id: i64) -> Result<(), AppError> {
    let assets = sample_assets();
    let liabilities = sample_liabilities();
    let expenses = sample_expenses();
    let goals = sample_goals();

    let counts = (assets.len(), liabilities.len(), expenses.len(), goals.len());

    for input in assets {
        stores.assets.create(owner_id, input).await?;
    }
    for input in liabilities {
        stores.liabilities.create(owner_id, input).await?;
    }
    for input in expenses {
        stores.expenses.create(owner_id, input).await?;
    }
    for input in goals {
        stores.goals.create(owner_id, input).await?;
    }

    info!(
        owner_id,
        assets = counts.0,
        liabilities = counts.1,
        expenses = counts.2,
        goals = counts.3,
        "Seeded sample data"
    );

    Ok(())
}
