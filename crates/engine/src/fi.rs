//! FI status service: loads an owner's records and runs the calculator.

use finagent_common::error::AppError;
use finagent_common::types::{FinancialIndependenceResult, RequiredCorpus, UserFiParameters};
use finagent_common::validation::Validate;

use crate::fi_calculator::FiCalculator;
use crate::repository::Stores;
use crate::reserve::GoalsReserve;

pub struct FiService;

impl FiService {
    pub async fn calculate(
        stores: &Stores,
        owner_id: i64,
        params: UserFiParameters,
        reserve: GoalsReserve,
    ) -> Result<FinancialIndependenceResult, AppError> {
        let params = params.validate()?;

        let (assets, liabilities) = tokio::try_join!(
            stores.assets.list(owner_id),
            stores.liabilities.list(owner_id),
        )?;

        let goals = if reserve.needs_goals() {
            stores.goals.list(owner_id).await?
        } else {
            Vec::new()
        };

        let calculator = FiCalculator::new(reserve.amount(&goals));
        let result = calculator.calculate(&assets, &liabilities, &params);
        ensure_representable(&result, &params)?;

        tracing::info!(
            owner_id,
            assets = assets.len(),
            liabilities = liabilities.len(),
            is_fi = result.is_financially_independent,
            ratio = result.fi_ratio_percentage,
            "FI status calculated"
        );

        Ok(result)
    }
}

/// Rejects results whose totals overflowed `f64`. Each input is finite, but
/// sums and the corpus division can still reach infinity or NaN.
fn ensure_representable(
    result: &FinancialIndependenceResult,
    params: &UserFiParameters,
) -> Result<(), AppError> {
    let totals = [
        ("net_investable_assets", result.details.net_investable_assets),
        ("net_fi_corpus_available", result.net_fi_corpus_available),
        ("fi_ratio_percentage", result.fi_ratio_percentage),
    ];
    if let Some((field, _)) = totals.iter().find(|(_, v)| !v.is_finite()) {
        return Err(AppError::Validation(format!(
            "{field} is out of range for the given records and parameters"
        )));
    }

    if params.swr_percentage > 0.0 && result.required_fi_corpus == RequiredCorpus::NotApplicable {
        return Err(AppError::Validation(
            "required_fi_corpus is out of range for the given parameters".to_string(),
        ));
    }

    Ok(())
}
