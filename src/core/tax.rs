use super::error::{CalcError, CalcResult, require_non_negative};
use super::types::{
    BuyerCategory, FederalTaxInput, FederalTaxResult, FilingStatus, StampDutyBand, StampDutyInput,
    StampDutyResult,
};

pub const FICA_RATE: f64 = 0.0765;

const FEDERAL_2025_SINGLE: [TaxBand; 7] = [
    TaxBand::capped(11_925.0, 0.10),
    TaxBand::capped(48_475.0, 0.12),
    TaxBand::capped(103_350.0, 0.22),
    TaxBand::capped(197_300.0, 0.24),
    TaxBand::capped(250_525.0, 0.32),
    TaxBand::capped(626_350.0, 0.35),
    TaxBand::unbounded(0.37),
];

const FEDERAL_2025_MARRIED_JOINT: [TaxBand; 7] = [
    TaxBand::capped(23_850.0, 0.10),
    TaxBand::capped(96_950.0, 0.12),
    TaxBand::capped(206_700.0, 0.22),
    TaxBand::capped(394_600.0, 0.24),
    TaxBand::capped(501_050.0, 0.32),
    TaxBand::capped(751_600.0, 0.35),
    TaxBand::unbounded(0.37),
];

const FEDERAL_2025_HEAD_OF_HOUSEHOLD: [TaxBand; 7] = [
    TaxBand::capped(17_000.0, 0.10),
    TaxBand::capped(64_850.0, 0.12),
    TaxBand::capped(103_350.0, 0.22),
    TaxBand::capped(197_300.0, 0.24),
    TaxBand::capped(250_500.0, 0.32),
    TaxBand::capped(626_350.0, 0.35),
    TaxBand::unbounded(0.37),
];

const SDLT_STANDARD: [TaxBand; 4] = [
    TaxBand::capped(250_000.0, 0.0),
    TaxBand::capped(925_000.0, 0.05),
    TaxBand::capped(1_500_000.0, 0.10),
    TaxBand::unbounded(0.12),
];

const SDLT_FIRST_TIME_BUYER: [TaxBand; 2] = [
    TaxBand::capped(425_000.0, 0.0),
    TaxBand::unbounded(0.05),
];

pub const SDLT_FIRST_TIME_BUYER_CEILING: f64 = 625_000.0;
pub const SDLT_ADDITIONAL_PROPERTY_SURCHARGE: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBand {
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

impl TaxBand {
    pub const fn capped(upper_bound: f64, rate: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub const fn unbounded(rate: f64) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

// Strictly increasing bounds, one open-ended final band, non-decreasing rates.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBracketTable {
    bands: Vec<TaxBand>,
}

impl TaxBracketTable {
    pub fn new(bands: Vec<TaxBand>) -> CalcResult<Self> {
        let Some(last) = bands.last() else {
            return Err(table_error("at least one band is required"));
        };
        if last.upper_bound.is_some() {
            return Err(table_error("the final band must be unbounded"));
        }

        let mut previous_bound = 0.0;
        let mut previous_rate = 0.0;
        for (idx, band) in bands.iter().enumerate() {
            if !band.rate.is_finite() || band.rate < 0.0 {
                return Err(table_error(format!("band {idx} rate must be >= 0")));
            }
            if band.rate < previous_rate {
                return Err(table_error(format!(
                    "band {idx} rate is lower than the band below it"
                )));
            }
            previous_rate = band.rate;

            match band.upper_bound {
                Some(bound) if !bound.is_finite() || bound <= previous_bound => {
                    return Err(table_error(format!(
                        "band {idx} upper bound must exceed {previous_bound}"
                    )));
                }
                Some(bound) => previous_bound = bound,
                None if idx + 1 != bands.len() => {
                    return Err(table_error(format!(
                        "only the final band may be unbounded (band {idx})"
                    )));
                }
                None => {}
            }
        }

        Ok(Self { bands })
    }

    fn from_static(bands: &[TaxBand]) -> CalcResult<Self> {
        Self::new(bands.to_vec())
    }

    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    fn with_surcharge(&self, surcharge: f64) -> CalcResult<Self> {
        Self::new(
            self.bands
                .iter()
                .map(|band| TaxBand {
                    upper_bound: band.upper_bound,
                    rate: band.rate + surcharge,
                })
                .collect(),
        )
    }
}

fn table_error(reason: impl Into<String>) -> CalcError {
    CalcError::InvalidBracketTable {
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketOutcome {
    pub tax: f64,
    pub marginal_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSlice {
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub rate: f64,
    pub taxable_amount: f64,
    pub tax: f64,
}

pub fn band_slices(amount: f64, table: &TaxBracketTable) -> Vec<BandSlice> {
    let amount = amount.max(0.0);
    let mut slices = Vec::new();
    let mut lower = 0.0;
    for band in table.bands() {
        if amount <= lower {
            break;
        }
        let upper = band.upper_bound.unwrap_or(f64::INFINITY);
        let taxable_amount = amount.min(upper) - lower;
        slices.push(BandSlice {
            lower_bound: lower,
            upper_bound: band.upper_bound,
            rate: band.rate,
            taxable_amount,
            tax: taxable_amount * band.rate,
        });
        lower = upper;
    }
    slices
}

pub fn apply_brackets(taxable_income: f64, table: &TaxBracketTable) -> BracketOutcome {
    let slices = band_slices(taxable_income, table);
    let marginal_rate = slices
        .last()
        .map(|slice| slice.rate)
        .unwrap_or(table.bands()[0].rate);
    BracketOutcome {
        tax: slices.iter().map(|slice| slice.tax).sum(),
        marginal_rate,
    }
}

pub fn standard_deduction(status: FilingStatus) -> f64 {
    match status {
        FilingStatus::Single => 15_000.0,
        FilingStatus::MarriedFilingJointly => 30_000.0,
        FilingStatus::HeadOfHousehold => 22_500.0,
    }
}

pub fn federal_brackets(status: FilingStatus) -> CalcResult<TaxBracketTable> {
    TaxBracketTable::from_static(match status {
        FilingStatus::Single => &FEDERAL_2025_SINGLE,
        FilingStatus::MarriedFilingJointly => &FEDERAL_2025_MARRIED_JOINT,
        FilingStatus::HeadOfHousehold => &FEDERAL_2025_HEAD_OF_HOUSEHOLD,
    })
}

pub fn federal_tax(input: &FederalTaxInput) -> CalcResult<FederalTaxResult> {
    let gross = require_non_negative("grossIncome", input.gross_income)?;
    let state_rate = require_non_negative("stateTaxRatePercent", input.state_tax_rate_percent)?;

    let deduction = standard_deduction(input.filing_status);
    let taxable_income = (gross - deduction).max(0.0);
    let outcome = apply_brackets(taxable_income, &federal_brackets(input.filing_status)?);

    let state_tax = gross * state_rate / 100.0;
    let fica_tax = gross * FICA_RATE;
    let total_tax = outcome.tax + state_tax + fica_tax;
    let after_tax_income = gross - total_tax;

    Ok(FederalTaxResult {
        gross_income: gross,
        filing_status: input.filing_status,
        standard_deduction: deduction,
        taxable_income,
        federal_tax: outcome.tax,
        state_tax,
        fica_tax,
        total_tax,
        after_tax_income,
        monthly_after_tax_income: after_tax_income / 12.0,
        effective_rate_percent: if gross > 0.0 {
            outcome.tax / gross * 100.0
        } else {
            0.0
        },
        marginal_rate_percent: outcome.marginal_rate * 100.0,
    })
}

impl TryFrom<&StampDutyInput> for BuyerCategory {
    type Error = CalcError;

    fn try_from(input: &StampDutyInput) -> Result<Self, Self::Error> {
        match (input.first_time_buyer, input.additional_property) {
            (true, true) => Err(CalcError::ConflictingBuyerCategory),
            (true, false) => Ok(BuyerCategory::FirstTimeBuyer),
            (false, true) => Ok(BuyerCategory::AdditionalProperty),
            (false, false) => Ok(BuyerCategory::Standard),
        }
    }
}

pub fn sdlt_table(category: BuyerCategory) -> CalcResult<TaxBracketTable> {
    match category {
        BuyerCategory::Standard => TaxBracketTable::from_static(&SDLT_STANDARD),
        BuyerCategory::FirstTimeBuyer => TaxBracketTable::from_static(&SDLT_FIRST_TIME_BUYER),
        BuyerCategory::AdditionalProperty => TaxBracketTable::from_static(&SDLT_STANDARD)?
            .with_surcharge(SDLT_ADDITIONAL_PROPERTY_SURCHARGE),
    }
}

pub fn stamp_duty(property_price: f64, category: BuyerCategory) -> CalcResult<StampDutyResult> {
    let price = require_non_negative("propertyPrice", property_price)?;
    let applied = match category {
        BuyerCategory::FirstTimeBuyer if price > SDLT_FIRST_TIME_BUYER_CEILING => {
            BuyerCategory::Standard
        }
        other => other,
    };

    let table = sdlt_table(applied)?;
    let slices = band_slices(price, &table);
    let stamp_duty: f64 = slices.iter().map(|slice| slice.tax).sum();

    Ok(StampDutyResult {
        property_price: price,
        buyer_category: applied,
        stamp_duty,
        effective_rate_percent: if price > 0.0 {
            stamp_duty / price * 100.0
        } else {
            0.0
        },
        bands: slices
            .into_iter()
            .map(|slice| StampDutyBand {
                from: slice.lower_bound,
                to: slice.upper_bound,
                rate_percent: slice.rate * 100.0,
                taxable_amount: slice.taxable_amount,
                tax: slice.tax,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn single() -> TaxBracketTable {
        federal_brackets(FilingStatus::Single).expect("built-in table is valid")
    }

    fn income(gross: f64, filing_status: FilingStatus) -> FederalTaxInput {
        FederalTaxInput {
            gross_income: gross,
            filing_status,
            ..FederalTaxInput::default()
        }
    }

    fn sdlt(
        price: f64,
        first_time_buyer: bool,
        additional_property: bool,
    ) -> CalcResult<StampDutyResult> {
        let input = StampDutyInput {
            property_price: price,
            first_time_buyer,
            additional_property,
        };
        stamp_duty(input.property_price, BuyerCategory::try_from(&input)?)
    }

    #[test]
    fn single_filer_sixty_thousand_taxable_matches_hand_sum() {
        let outcome = apply_brackets(60_000.0, &single());
        // 11925*0.10 + (48475-11925)*0.12 + (60000-48475)*0.22
        assert_approx(outcome.tax, 1_192.50 + 4_386.00 + 2_535.50);
        assert_approx(outcome.marginal_rate, 0.22);
    }

    #[test]
    fn federal_tax_applies_standard_deduction_and_flat_extras() {
        let result = federal_tax(&income(75_000.0, FilingStatus::Single)).expect("valid income");

        assert_approx(result.taxable_income, 60_000.0);
        assert_approx(result.federal_tax, 8_114.0);
        assert_approx(result.state_tax, 3_750.0);
        assert_approx(result.fica_tax, 5_737.5);
        assert_approx(result.total_tax, 8_114.0 + 3_750.0 + 5_737.5);
        assert_approx(result.after_tax_income, 75_000.0 - result.total_tax);
        assert_approx(result.monthly_after_tax_income, result.after_tax_income / 12.0);
        assert_approx(result.marginal_rate_percent, 22.0);
    }

    #[test]
    fn effective_rate_counts_federal_tax_only() {
        let result = federal_tax(&income(75_000.0, FilingStatus::Single)).expect("valid income");
        assert_approx(result.effective_rate_percent, 8_114.0 / 75_000.0 * 100.0);
        assert!(result.effective_rate_percent < result.total_tax / 75_000.0 * 100.0);
    }

    #[test]
    fn married_and_head_of_household_use_their_own_tables() {
        let married = federal_tax(&income(100_000.0, FilingStatus::MarriedFilingJointly))
            .expect("valid income");
        assert_approx(married.taxable_income, 70_000.0);
        assert_approx(married.federal_tax, 2_385.0 + 46_150.0 * 0.12);
        assert_approx(married.marginal_rate_percent, 12.0);

        let head = federal_tax(&income(50_000.0, FilingStatus::HeadOfHousehold))
            .expect("valid income");
        assert_approx(head.taxable_income, 27_500.0);
        assert_approx(head.federal_tax, 1_700.0 + 1_260.0);
    }

    #[test]
    fn zero_income_has_zero_effective_rate_and_lowest_marginal_rate() {
        let result = federal_tax(&income(0.0, FilingStatus::Single)).expect("valid income");
        assert_approx(result.federal_tax, 0.0);
        assert_approx(result.effective_rate_percent, 0.0);
        assert_approx(result.marginal_rate_percent, 10.0);
    }

    #[test]
    fn income_below_deduction_is_untaxed_federally() {
        let result = federal_tax(&income(12_000.0, FilingStatus::Single)).expect("valid income");
        assert_approx(result.taxable_income, 0.0);
        assert_approx(result.federal_tax, 0.0);
    }

    #[test]
    fn band_upper_bound_is_inclusive() {
        let at_bound = apply_brackets(11_925.0, &single());
        assert_approx(at_bound.marginal_rate, 0.10);
        let above = apply_brackets(11_926.0, &single());
        assert_approx(above.marginal_rate, 0.12);
    }

    #[test]
    fn federal_tax_rejects_negative_income() {
        let err = federal_tax(&income(-1.0, FilingStatus::Single)).expect_err("negative income");
        assert!(err.to_string().contains("grossIncome"));
    }

    #[test]
    fn bracket_table_rejects_malformed_tables() {
        assert!(TaxBracketTable::new(vec![]).is_err());
        assert!(TaxBracketTable::new(vec![TaxBand::capped(10.0, 0.1)]).is_err());
        assert!(
            TaxBracketTable::new(vec![
                TaxBand::capped(10.0, 0.1),
                TaxBand::capped(10.0, 0.2),
                TaxBand::unbounded(0.3),
            ])
            .is_err()
        );
        assert!(
            TaxBracketTable::new(vec![TaxBand::capped(10.0, 0.2), TaxBand::unbounded(0.1)])
                .is_err()
        );
        assert!(
            TaxBracketTable::new(vec![TaxBand::unbounded(0.1), TaxBand::unbounded(0.2)]).is_err()
        );
        assert!(
            TaxBracketTable::new(vec![TaxBand::capped(10.0, -0.1), TaxBand::unbounded(0.1)])
                .is_err()
        );

        let err = TaxBracketTable::new(vec![TaxBand::capped(-5.0, 0.1), TaxBand::unbounded(0.2)])
            .expect_err("non-positive first bound");
        assert!(matches!(err, CalcError::InvalidBracketTable { .. }));
    }

    #[test]
    fn stamp_duty_standard_purchase() {
        let result = sdlt(450_000.0, false, false).expect("valid purchase");
        assert_eq!(result.buyer_category, BuyerCategory::Standard);
        assert_approx(result.stamp_duty, 10_000.0);
        assert!((result.effective_rate_percent - 2.22).abs() < 0.01);

        assert_eq!(result.bands.len(), 2);
        assert_approx(result.bands[0].tax, 0.0);
        assert_approx(result.bands[1].from, 250_000.0);
        assert_approx(result.bands[1].taxable_amount, 200_000.0);
        assert_approx(result.bands[1].rate_percent, 5.0);
    }

    #[test]
    fn stamp_duty_first_time_buyer_relief_and_ceiling() {
        let relief = sdlt(450_000.0, true, false).expect("valid purchase");
        assert_eq!(relief.buyer_category, BuyerCategory::FirstTimeBuyer);
        assert_approx(relief.stamp_duty, 1_250.0);

        let at_ceiling = sdlt(625_000.0, true, false).expect("valid purchase");
        assert_approx(at_ceiling.stamp_duty, 10_000.0);

        let over = sdlt(700_000.0, true, false).expect("valid purchase");
        assert_eq!(over.buyer_category, BuyerCategory::Standard);
        assert_approx(over.stamp_duty, 22_500.0);
    }

    #[test]
    fn stamp_duty_additional_property_adds_surcharge_to_every_band() {
        let result = sdlt(450_000.0, false, true).expect("valid purchase");
        assert_eq!(result.buyer_category, BuyerCategory::AdditionalProperty);
        assert_approx(result.stamp_duty, 7_500.0 + 16_000.0);
    }

    #[test]
    fn stamp_duty_walks_all_standard_bands() {
        let result = sdlt(2_000_000.0, false, false).expect("valid purchase");
        assert_approx(result.stamp_duty, 33_750.0 + 57_500.0 + 60_000.0);
        assert_eq!(result.bands.len(), 4);
        assert_eq!(result.bands[3].to, None);
    }

    #[test]
    fn stamp_duty_rejects_conflicting_buyer_flags() {
        let err = sdlt(300_000.0, true, true).expect_err("conflicting flags");
        assert_eq!(err, CalcError::ConflictingBuyerCategory);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(96))]

        #[test]
        fn prop_tax_and_marginal_rate_never_fall_as_income_rises(
            base in 0u32..1_500_000,
            raise in 0u32..500_000,
            status_idx in 0usize..3,
        ) {
            let status = [
                FilingStatus::Single,
                FilingStatus::MarriedFilingJointly,
                FilingStatus::HeadOfHousehold,
            ][status_idx];
            let table = federal_brackets(status).expect("built-in table is valid");
            let low = apply_brackets(base as f64, &table);
            let high = apply_brackets((base + raise) as f64, &table);

            prop_assert!(high.tax >= low.tax - 1e-9);
            prop_assert!(high.marginal_rate >= low.marginal_rate);
            prop_assert!(low.tax <= base as f64 * low.marginal_rate + 1e-6);
        }

        #[test]
        fn prop_stamp_duty_never_exceeds_top_rate(price in 0u32..5_000_000) {
            let result = sdlt(price as f64, false, true).expect("valid purchase");
            prop_assert!(result.stamp_duty >= 0.0);
            prop_assert!(result.stamp_duty <= price as f64 * 0.15 + 1e-6);
        }
    }
}
