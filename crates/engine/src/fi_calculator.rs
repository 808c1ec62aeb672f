//! Financial independence calculator.
//!
//! Net investable wealth = total assets - emergency fund - primary residence
//! equity - total liabilities. The goals reserve is then set aside and the
//! remainder is compared against the corpus needed to fund the desired annual
//! expenses at the safe withdrawal rate:
//!
//! required = expenses / (swr% / 100), or +inf when swr% <= 0
//!
//! The calculator is a pure function of its inputs. It never fails for finite
//! inputs and holds no state between calls.

use finagent_common::types::{
    Asset, FiDetails, FinancialIndependenceResult, Liability, RequiredCorpus, UserFiParameters,
};

/// FI calculator with an injected goals reserve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiCalculator {
    goals_reserve: f64,
}

impl FiCalculator {
    pub fn new(goals_reserve: f64) -> Self {
        Self { goals_reserve }
    }

    /// Compute FI status for one owner's assets and liabilities.
    pub fn calculate(
        &self,
        assets: &[Asset],
        liabilities: &[Liability],
        params: &UserFiParameters,
    ) -> FinancialIndependenceResult {
        let required = required_fi_corpus(params.desired_annual_fi_expenses, params.swr_percentage);

        let net_investable_assets = total_asset_value(assets)
            - params.emergency_fund_to_exclude
            - params.primary_residence_equity_to_exclude
            - total_liabilities_value(liabilities);

        let net_fi_corpus_available = net_investable_assets - self.goals_reserve;

        let (is_financially_independent, ratio) = fi_status(net_fi_corpus_available, required);

        let required_fi_corpus = if required.is_infinite() {
            RequiredCorpus::NotApplicable
        } else {
            RequiredCorpus::Amount(round2(required))
        };

        FinancialIndependenceResult {
            is_financially_independent,
            fi_ratio_percentage: round2(ratio),
            net_fi_corpus_available: round2(net_fi_corpus_available),
            required_fi_corpus,
            fi_annual_expenses_used: round2(params.desired_annual_fi_expenses),
            swr_percentage_used: params.swr_percentage,
            details: FiDetails {
                net_investable_assets: round2(net_investable_assets),
                total_current_cost_of_goals_to_set_aside: round2(self.goals_reserve),
            },
        }
    }
}

/// One-shot form of [`FiCalculator::calculate`].
pub fn calculate_fi(
    assets: &[Asset],
    liabilities: &[Liability],
    params: &UserFiParameters,
    goals_reserve: f64,
) -> FinancialIndependenceResult {
    FiCalculator::new(goals_reserve).calculate(assets, liabilities, params)
}

/// Corpus needed to sustain `annual_expenses` at `swr_percentage`.
///
/// A non-positive withdrawal rate yields `f64::INFINITY`.
pub fn required_fi_corpus(annual_expenses: f64, swr_percentage: f64) -> f64 {
    if swr_percentage <= 0.0 {
        return f64::INFINITY;
    }
    annual_expenses / (swr_percentage / 100.0)
}

pub fn total_asset_value(assets: &[Asset]) -> f64 {
    assets.iter().fold(0.0, |acc, a| acc + a.value_inr)
}

pub fn total_liabilities_value(liabilities: &[Liability]) -> f64 {
    liabilities
        .iter()
        .fold(0.0, |acc, l| acc + l.outstanding_amount_inr)
}

/// Decide FI status and the FI ratio (percent, floored at 0).
///
/// - infinite required corpus: never FI, ratio 0
/// - positive: FI iff available >= required, ratio = available / required * 100
/// - zero: FI iff available >= 0, ratio 100 or 0
/// - negative (negative desired expenses): never FI, ratio 0
pub fn fi_status(net_fi_corpus_available: f64, required_fi_corpus: f64) -> (bool, f64) {
    if required_fi_corpus.is_infinite() {
        (false, 0.0)
    } else if required_fi_corpus > 0.0 {
        let is_fi = net_fi_corpus_available >= required_fi_corpus;
        let ratio = net_fi_corpus_available / required_fi_corpus * 100.0;
        (is_fi, if ratio > 0.0 { ratio } else { 0.0 })
    } else if required_fi_corpus == 0.0 {
        let is_fi = net_fi_corpus_available >= 0.0;
        (is_fi, if is_fi { 100.0 } else { 0.0 })
    } else {
        (false, 0.0)
    }
}

/// Above this magnitude `value * 100` has no fractional part to round.
const ROUNDING_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() || scaled.abs() >= ROUNDING_LIMIT {
        return value;
    }
    let rounded = scaled.round() / 100.0;
    // Normalize -0.0 so outputs never render as "-0.0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::Utc;
    use finagent_common::config::DEFAULT_GOALS_RESERVE_AMOUNT;
    use finagent_common::types::{AssetClass, AssetType, FpAssetClass};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn asset(value: f64) -> Asset {
        let now = Utc::now();
        Asset {
            id: 1,
            owner_id: 1,
            name: "Holding".to_string(),
            value_inr: value,
            asset_class: AssetClass::Equity,
            asset_type: AssetType::EquityMutualFund,
            fp_asset_class: FpAssetClass::Retirement,
            created_at: now,
            updated_at: now,
        }
    }

    fn liability(amount: f64) -> Liability {
        let now = Utc::now();
        Liability {
            id: 1,
            owner_id: 1,
            name: "Loan".to_string(),
            liability_type: "Secured Loan".to_string(),
            outstanding_amount_inr: amount,
            interest_rate: None,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_assets() -> Vec<Asset> {
        seed::sample_assets()
            .into_iter()
            .map(|input| asset(input.value_inr))
            .collect()
    }

    fn sample_liabilities() -> Vec<Liability> {
        seed::sample_liabilities()
            .into_iter()
            .map(|input| liability(input.outstanding_amount_inr))
            .collect()
    }

    #[test]
    fn test_sample_portfolio_is_far_from_fi() {
        let calc = FiCalculator::new(DEFAULT_GOALS_RESERVE_AMOUNT);
        let params = UserFiParameters::new(1_200_000.0, 4.0);

        let result = calc.calculate(&sample_assets(), &sample_liabilities(), &params);

        assert_eq!(result.required_fi_corpus, RequiredCorpus::Amount(30_000_000.0));
        assert_approx(result.details.net_investable_assets, 6_565_000.0);
        assert_approx(result.net_fi_corpus_available, -96_298_884.0);
        assert!(!result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 0.0);
        assert_approx(
            result.details.total_current_cost_of_goals_to_set_aside,
            102_863_884.0,
        );
        assert_approx(result.fi_annual_expenses_used, 1_200_000.0);
        assert_approx(result.swr_percentage_used, 4.0);
    }

    #[test]
    fn test_zero_swr_is_never_fi() {
        let calc = FiCalculator::new(0.0);
        let params = UserFiParameters::new(1_200_000.0, 0.0);

        let result = calc.calculate(&[asset(1e12)], &[], &params);

        assert_eq!(result.required_fi_corpus, RequiredCorpus::NotApplicable);
        assert!(!result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 0.0);
    }

    #[test]
    fn test_negative_swr_is_never_fi() {
        let calc = FiCalculator::new(0.0);
        let params = UserFiParameters::new(0.0, -2.5);

        let result = calc.calculate(&[asset(500.0)], &[], &params);

        assert_eq!(result.required_fi_corpus, RequiredCorpus::NotApplicable);
        assert!(!result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 0.0);
    }

    #[test]
    fn test_available_exactly_equals_required() {
        // required = 40_000 / 0.04 = 1_000_000; available = 1_300_000 - 200_000 - 100_000
        let calc = FiCalculator::new(100_000.0);
        let params = UserFiParameters::new(40_000.0, 4.0);

        let result = calc.calculate(&[asset(1_300_000.0)], &[liability(200_000.0)], &params);

        assert_eq!(result.required_fi_corpus, RequiredCorpus::Amount(1_000_000.0));
        assert_approx(result.net_fi_corpus_available, 1_000_000.0);
        assert!(result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 100.0);
    }

    #[test]
    fn test_zero_expenses_boundary() {
        let calc = FiCalculator::new(0.0);
        let params = UserFiParameters::new(0.0, 4.0);

        let result = calc.calculate(&[asset(10.0)], &[liability(10.0)], &params);
        assert_eq!(result.required_fi_corpus, RequiredCorpus::Amount(0.0));
        assert!(result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 100.0);

        let result = calc.calculate(&[asset(10.0)], &[liability(10.01)], &params);
        assert!(!result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 0.0);
    }

    #[test]
    fn test_ratio_unbounded_above() {
        let calc = FiCalculator::new(0.0);
        let params = UserFiParameters::new(10_000.0, 5.0);

        let result = calc.calculate(&[asset(600_000.0)], &[], &params);

        assert!(result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 300.0);
    }

    #[test]
    fn test_partial_progress_is_rounded() {
        let calc = FiCalculator::new(0.0);
        let params = UserFiParameters::new(30_000.0, 4.0);

        // 250_000 / 750_000 = 33.333...%
        let result = calc.calculate(&[asset(250_000.0)], &[], &params);

        assert!(!result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 33.33);
    }

    #[test]
    fn test_exclusions_applied_before_reserve() {
        let calc = FiCalculator::new(1_000.0);
        let mut params = UserFiParameters::new(40.0, 4.0);
        params.emergency_fund_to_exclude = 500.0;
        params.primary_residence_equity_to_exclude = 2_000.0;

        let result = calc.calculate(&[asset(10_000.0)], &[liability(1_500.0)], &params);

        assert_approx(result.details.net_investable_assets, 6_000.0);
        assert_approx(result.net_fi_corpus_available, 5_000.0);
        assert!(result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 500.0);
    }

    #[test]
    fn test_negative_expenses_fall_through_to_not_fi() {
        let calc = FiCalculator::new(0.0);
        let params = UserFiParameters::new(-40_000.0, 4.0);

        let result = calc.calculate(&[asset(5_000_000.0)], &[], &params);

        assert_eq!(result.required_fi_corpus, RequiredCorpus::Amount(-1_000_000.0));
        assert!(!result.is_financially_independent);
        assert_eq!(result.fi_ratio_percentage, 0.0);
    }

    #[test]
    fn test_fp_asset_class_filter_is_not_applied() {
        let calc = FiCalculator::new(0.0);
        let mut params = UserFiParameters::new(40_000.0, 4.0);
        params.fp_asset_classes_for_investable = vec![FpAssetClass::TaxSaving];
        let mut emergency = asset(300_000.0);
        emergency.fp_asset_class = FpAssetClass::EmergencyFund;

        let result = calc.calculate(&[asset(700_000.0), emergency], &[], &params);

        assert_approx(result.details.net_investable_assets, 1_000_000.0);
    }

    #[test]
    fn test_calculate_fi_matches_calculator() {
        let params = UserFiParameters::new(1_200_000.0, 4.0);
        let assets = sample_assets();
        let liabilities = sample_liabilities();
        assert_eq!(
            calculate_fi(&assets, &liabilities, &params, DEFAULT_GOALS_RESERVE_AMOUNT),
            FiCalculator::new(DEFAULT_GOALS_RESERVE_AMOUNT).calculate(&assets, &liabilities, &params)
        );
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(-1.235_000_1), -1.24);
        assert_eq!(round2(-0.001).to_string(), "0");
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-1e307), -1e307);
        assert!(round2(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_required_corpus_helper() {
        assert_approx(required_fi_corpus(1_200_000.0, 4.0), 30_000_000.0);
        assert!(required_fi_corpus(1_200_000.0, 0.0).is_infinite());
        assert!(required_fi_corpus(1_200_000.0, -1.0).is_infinite());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_required_corpus_matches_formula(
            expenses in 0u32..10_000_000,
            swr_bp in 1u32..2_000,
        ) {
            let expenses = expenses as f64;
            let swr = swr_bp as f64 / 100.0;
            let result = FiCalculator::new(0.0)
                .calculate(&[], &[], &UserFiParameters::new(expenses, swr));
            let expected = round2(expenses / (swr / 100.0));
            prop_assert_eq!(result.required_fi_corpus, RequiredCorpus::Amount(expected));
        }

        #[test]
        fn prop_non_positive_swr_never_fi(
            swr_bp in -2_000i32..=0,
            expenses in -1_000_000i64..10_000_000,
            asset_values in proptest::collection::vec(1u32..100_000_000, 0..6),
            liability_values in proptest::collection::vec(1u32..10_000_000, 0..6),
            reserve in 0u32..100_000_000,
        ) {
            let assets: Vec<Asset> = asset_values.iter().map(|v| asset(*v as f64)).collect();
            let liabilities: Vec<Liability> =
                liability_values.iter().map(|v| liability(*v as f64)).collect();
            let params = UserFiParameters::new(expenses as f64, swr_bp as f64 / 100.0);
            let result = FiCalculator::new(reserve as f64).calculate(&assets, &liabilities, &params);
            prop_assert!(!result.is_financially_independent);
            prop_assert_eq!(result.fi_ratio_percentage, 0.0);
            prop_assert_eq!(result.required_fi_corpus, RequiredCorpus::NotApplicable);
        }

        #[test]
        fn prop_ratio_never_negative_and_net_matches_identity(
            swr_bp in -500i32..2_000,
            expenses in -1_000_000i64..10_000_000,
            asset_values in proptest::collection::vec(1u32..100_000_000, 0..6),
            liability_values in proptest::collection::vec(1u32..100_000_000, 0..6),
            emergency in 0u32..5_000_000,
            residence in 0u32..50_000_000,
            reserve in 0u32..200_000_000,
        ) {
            let assets: Vec<Asset> = asset_values.iter().map(|v| asset(*v as f64)).collect();
            let liabilities: Vec<Liability> =
                liability_values.iter().map(|v| liability(*v as f64)).collect();
            let mut params = UserFiParameters::new(expenses as f64, swr_bp as f64 / 100.0);
            params.emergency_fund_to_exclude = emergency as f64;
            params.primary_residence_equity_to_exclude = residence as f64;

            let result = FiCalculator::new(reserve as f64).calculate(&assets, &liabilities, &params);

            prop_assert!(result.fi_ratio_percentage >= 0.0);
            let assets_total: f64 = asset_values.iter().map(|v| *v as f64).sum();
            let liabilities_total: f64 = liability_values.iter().map(|v| *v as f64).sum();
            let expected = assets_total - emergency as f64 - residence as f64
                - liabilities_total - reserve as f64;
            prop_assert_eq!(result.net_fi_corpus_available, round2(expected));
        }

        #[test]
        fn prop_zero_required_corpus_is_binary(
            swr_bp in 1u32..2_000,
            asset_value in 0u32..1_000_000,
            liability_value in 1u32..1_000_000,
        ) {
            let assets = if asset_value == 0 { vec![] } else { vec![asset(asset_value as f64)] };
            let params = UserFiParameters::new(0.0, swr_bp as f64 / 100.0);
            let result = FiCalculator::new(0.0)
                .calculate(&assets, &[liability(liability_value as f64)], &params);
            prop_assert!(
                result.fi_ratio_percentage == 100.0 || result.fi_ratio_percentage == 0.0
            );
            prop_assert_eq!(result.is_financially_independent, asset_value >= liability_value);
        }

        #[test]
        fn prop_calculation_is_deterministic(
            swr_bp in -100i32..1_000,
            expenses in 0u32..5_000_000,
            asset_values in proptest::collection::vec(1u32..50_000_000, 0..5),
        ) {
            let assets: Vec<Asset> = asset_values.iter().map(|v| asset(*v as f64)).collect();
            let params = UserFiParameters::new(expenses as f64, swr_bp as f64 / 100.0);
            let calc = FiCalculator::new(1_000_000.0);
            let first = calc.calculate(&assets, &[], &params);
            let second = calc.calculate(&assets, &[], &params);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }
}
