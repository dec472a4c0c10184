use serde::{Deserialize, Serialize};

use super::error::CalcResult;
use super::format::{Currency, format_currency, format_percent};
use super::growth::{compound_interest, project_401k};
use super::loan::{canadian_mortgage, car_loan, home_loan, mortgage};
use super::ratio::{bmi, paycheck};
use super::tax::{federal_tax, stamp_duty};
use super::types::{
    BmiInput, BmiResult, BuyerCategory, CanadianMortgageInput, CanadianMortgageResult,
    CarLoanInput, CarLoanResult, CompoundInterestInput, CompoundInterestResult, FederalTaxInput,
    FederalTaxResult, HomeLoanInput, HomeLoanResult, MortgageInput, MortgageResult, PaycheckInput,
    PaycheckResult, Retirement401kInput, Retirement401kResult, StampDutyInput, StampDutyResult,
    UnitSystem,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "input", rename_all = "kebab-case")]
pub enum Calculation {
    Mortgage(MortgageInput),
    CanadianMortgage(CanadianMortgageInput),
    #[serde(alias = "australian-home-loan")]
    HomeLoan(HomeLoanInput),
    CarLoan(CarLoanInput),
    #[serde(alias = "tax", alias = "salary")]
    FederalTax(FederalTaxInput),
    #[serde(alias = "sdlt")]
    StampDuty(StampDutyInput),
    CompoundInterest(CompoundInterestInput),
    #[serde(rename = "401k", alias = "retirement-401k")]
    Retirement401k(Retirement401kInput),
    Bmi(BmiInput),
    Paycheck(PaycheckInput),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "kebab-case")]
pub enum CalculationResult {
    Mortgage(MortgageResult),
    CanadianMortgage(CanadianMortgageResult),
    HomeLoan(HomeLoanResult),
    CarLoan(CarLoanResult),
    FederalTax(FederalTaxResult),
    StampDuty(StampDutyResult),
    CompoundInterest(CompoundInterestResult),
    #[serde(rename = "401k")]
    Retirement401k(Retirement401kResult),
    Bmi(BmiResult),
    Paycheck(PaycheckResult),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationKind {
    Mortgage,
    CanadianMortgage,
    HomeLoan,
    CarLoan,
    FederalTax,
    StampDuty,
    CompoundInterest,
    #[serde(rename = "401k")]
    Retirement401k,
    Bmi,
    Paycheck,
}

impl CalculationKind {
    pub const ALL: [CalculationKind; 10] = [
        CalculationKind::Mortgage,
        CalculationKind::CanadianMortgage,
        CalculationKind::HomeLoan,
        CalculationKind::CarLoan,
        CalculationKind::FederalTax,
        CalculationKind::StampDuty,
        CalculationKind::CompoundInterest,
        CalculationKind::Retirement401k,
        CalculationKind::Bmi,
        CalculationKind::Paycheck,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalculationKind::Mortgage => "mortgage",
            CalculationKind::CanadianMortgage => "canadian-mortgage",
            CalculationKind::HomeLoan => "home-loan",
            CalculationKind::CarLoan => "car-loan",
            CalculationKind::FederalTax => "federal-tax",
            CalculationKind::StampDuty => "stamp-duty",
            CalculationKind::CompoundInterest => "compound-interest",
            CalculationKind::Retirement401k => "401k",
            CalculationKind::Bmi => "bmi",
            CalculationKind::Paycheck => "paycheck",
        }
    }

    pub fn currency(self) -> Option<Currency> {
        match self {
            CalculationKind::CanadianMortgage => Some(Currency::Cad),
            CalculationKind::HomeLoan => Some(Currency::Aud),
            CalculationKind::StampDuty => Some(Currency::Gbp),
            CalculationKind::Bmi => None,
            _ => Some(Currency::Usd),
        }
    }
}

impl Calculation {
    pub fn kind(&self) -> CalculationKind {
        match self {
            Calculation::Mortgage(_) => CalculationKind::Mortgage,
            Calculation::CanadianMortgage(_) => CalculationKind::CanadianMortgage,
            Calculation::HomeLoan(_) => CalculationKind::HomeLoan,
            Calculation::CarLoan(_) => CalculationKind::CarLoan,
            Calculation::FederalTax(_) => CalculationKind::FederalTax,
            Calculation::StampDuty(_) => CalculationKind::StampDuty,
            Calculation::CompoundInterest(_) => CalculationKind::CompoundInterest,
            Calculation::Retirement401k(_) => CalculationKind::Retirement401k,
            Calculation::Bmi(_) => CalculationKind::Bmi,
            Calculation::Paycheck(_) => CalculationKind::Paycheck,
        }
    }

    pub fn evaluate(&self) -> CalcResult<CalculationResult> {
        Ok(match self {
            Calculation::Mortgage(input) => CalculationResult::Mortgage(mortgage(input)?),
            Calculation::CanadianMortgage(input) => {
                CalculationResult::CanadianMortgage(canadian_mortgage(input)?)
            }
            Calculation::HomeLoan(input) => CalculationResult::HomeLoan(home_loan(input)?),
            Calculation::CarLoan(input) => CalculationResult::CarLoan(car_loan(input)?),
            Calculation::FederalTax(input) => CalculationResult::FederalTax(federal_tax(input)?),
            Calculation::StampDuty(input) => {
                let category = BuyerCategory::try_from(input)?;
                CalculationResult::StampDuty(stamp_duty(input.property_price, category)?)
            }
            Calculation::CompoundInterest(input) => {
                CalculationResult::CompoundInterest(compound_interest(input)?)
            }
            Calculation::Retirement401k(input) => {
                CalculationResult::Retirement401k(project_401k(input)?)
            }
            Calculation::Bmi(input) => CalculationResult::Bmi(bmi(input)?),
            Calculation::Paycheck(input) => CalculationResult::Paycheck(paycheck(input)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl CalculationResult {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationResult::Mortgage(_) => CalculationKind::Mortgage,
            CalculationResult::CanadianMortgage(_) => CalculationKind::CanadianMortgage,
            CalculationResult::HomeLoan(_) => CalculationKind::HomeLoan,
            CalculationResult::CarLoan(_) => CalculationKind::CarLoan,
            CalculationResult::FederalTax(_) => CalculationKind::FederalTax,
            CalculationResult::StampDuty(_) => CalculationKind::StampDuty,
            CalculationResult::CompoundInterest(_) => CalculationKind::CompoundInterest,
            CalculationResult::Retirement401k(_) => CalculationKind::Retirement401k,
            CalculationResult::Bmi(_) => CalculationKind::Bmi,
            CalculationResult::Paycheck(_) => CalculationKind::Paycheck,
        }
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        let currency = self.kind().currency().unwrap_or(Currency::Usd);
        let money = |label: &'static str, amount: f64| SummaryLine {
            label,
            value: format_currency(amount, currency),
        };
        let percent = |label: &'static str, value: f64| SummaryLine {
            label,
            value: format_percent(value, 2),
        };

        match self {
            CalculationResult::Mortgage(r) => vec![
                money("Loan amount", r.loan_amount),
                money("Monthly principal & interest", r.monthly_principal_and_interest),
                money("Total monthly payment", r.total_monthly_payment),
                money("Total interest", r.total_interest),
            ],
            CalculationResult::CanadianMortgage(r) => vec![
                money("CMHC premium", r.cmhc_premium),
                money("Total mortgage", r.total_mortgage),
                money("Payment", r.periodic_payment),
                money("Total interest", r.total_interest),
            ],
            CalculationResult::HomeLoan(r) => vec![
                money("Repayment", r.periodic_repayment),
                money("Total interest", r.total_interest),
                money("Interest saved", r.interest_saved),
                SummaryLine {
                    label: "Time saved",
                    value: format!("{:.1} years", r.years_saved),
                },
            ],
            CalculationResult::CarLoan(r) => vec![
                money("Loan amount", r.loan_amount),
                money("Monthly payment", r.monthly_payment),
                money("Total interest", r.total_interest),
            ],
            CalculationResult::FederalTax(r) => vec![
                money("Federal tax", r.federal_tax),
                money("Total tax", r.total_tax),
                money("After-tax income", r.after_tax_income),
                percent("Effective rate", r.effective_rate_percent),
                percent("Marginal rate", r.marginal_rate_percent),
            ],
            CalculationResult::StampDuty(r) => vec![
                money("Stamp duty", r.stamp_duty),
                percent("Effective rate", r.effective_rate_percent),
            ],
            CalculationResult::CompoundInterest(r) => vec![
                money("Final amount", r.final_amount),
                money("Total contributions", r.total_contributions),
                money("Total interest", r.total_interest),
            ],
            CalculationResult::Retirement401k(r) => vec![
                money("Balance at retirement", r.final_balance),
                money("Your contributions", r.total_contributions),
                money("Employer contributions", r.employer_contributions),
                money("Monthly retirement income", r.monthly_retirement_income),
            ],
            CalculationResult::Bmi(r) => {
                let unit = match r.units {
                    UnitSystem::Metric => "kg",
                    UnitSystem::Imperial => "lb",
                };
                vec![
                    SummaryLine {
                        label: "BMI",
                        value: format!("{:.1}", r.bmi),
                    },
                    SummaryLine {
                        label: "Healthy weight",
                        value: format!(
                            "{:.1}-{:.1} {unit}",
                            r.healthy_weight_min, r.healthy_weight_max
                        ),
                    },
                ]
            }
            CalculationResult::Paycheck(r) => vec![
                money("Gross pay", r.gross_pay),
                money("Total deductions", r.total_deductions),
                money("Net pay", r.net_pay),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;

    fn parse(json: &str) -> Calculation {
        serde_json::from_str(json).expect("json should parse")
    }

    #[test]
    fn tagged_request_selects_the_matching_calculator() {
        let calc = parse(
            r#"{
              "kind": "mortgage",
              "input": {
                "homePrice": 400000,
                "downPayment": 80000,
                "interestRate": 7,
                "loanTerm": 30
              }
            }"#,
        );
        assert_eq!(calc.kind(), CalculationKind::Mortgage);

        let CalculationResult::Mortgage(result) = calc.evaluate().expect("valid mortgage") else {
            panic!("expected mortgage result");
        };
        assert!((result.monthly_principal_and_interest - 2_128.97).abs() < 0.005);
    }

    #[test]
    fn empty_input_uses_calculator_defaults() {
        let calc = parse(r#"{ "kind": "401k", "input": {} }"#);
        assert_eq!(calc, Calculation::Retirement401k(Retirement401kInput::default()));
    }

    #[test]
    fn kind_aliases_resolve() {
        assert_eq!(
            parse(r#"{ "kind": "australian-home-loan", "input": {} }"#).kind(),
            CalculationKind::HomeLoan
        );
        assert_eq!(
            parse(r#"{ "kind": "tax", "input": { "filingStatus": "married" } }"#).kind(),
            CalculationKind::FederalTax
        );
        assert_eq!(
            parse(r#"{ "kind": "paycheck", "input": { "payFrequency": "biweekly" } }"#),
            Calculation::Paycheck(PaycheckInput {
                pay_frequency: crate::core::PaymentFrequency::BiWeekly,
                ..PaycheckInput::default()
            })
        );
    }

    #[test]
    fn unknown_kind_is_rejected_by_the_decoder() {
        let json = r#"{ "kind": "lottery", "input": {} }"#;
        assert!(serde_json::from_str::<Calculation>(json).is_err());
    }

    #[test]
    fn stamp_duty_boundary_rejects_both_buyer_flags() {
        let calc = parse(
            r#"{
              "kind": "stamp-duty",
              "input": { "firstTimeBuyer": true, "additionalProperty": true }
            }"#,
        );
        assert_eq!(calc.evaluate(), Err(CalcError::ConflictingBuyerCategory));
    }

    #[test]
    fn result_serializes_with_kind_tag() {
        let calc = parse(r#"{ "kind": "stamp-duty", "input": { "propertyPrice": 450000 } }"#);
        let result = calc.evaluate().expect("valid purchase");
        let json = serde_json::to_string(&result).expect("result should serialize");

        assert!(json.contains("\"kind\":\"stamp-duty\""));
        assert!(json.contains("\"stampDuty\":10000.0"));
        assert!(json.contains("\"buyerCategory\":\"standard\""));
    }

    #[test]
    fn summary_formats_in_the_calculator_currency() {
        let result = parse(r#"{ "kind": "stamp-duty", "input": { "propertyPrice": 450000 } }"#)
            .evaluate()
            .expect("valid purchase");
        let summary = result.summary();
        assert_eq!(summary[0].value, "£10,000.00");
        assert_eq!(summary[1].value, "2.22%");
    }

    #[test]
    fn every_kind_has_a_distinct_name() {
        let mut names: Vec<_> = CalculationKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CalculationKind::ALL.len());
    }

    #[test]
    fn every_default_input_evaluates() {
        for calc in [
            Calculation::Mortgage(MortgageInput::default()),
            Calculation::CanadianMortgage(CanadianMortgageInput::default()),
            Calculation::HomeLoan(HomeLoanInput::default()),
            Calculation::CarLoan(CarLoanInput::default()),
            Calculation::FederalTax(FederalTaxInput::default()),
            Calculation::StampDuty(StampDutyInput::default()),
            Calculation::CompoundInterest(CompoundInterestInput::default()),
            Calculation::Retirement401k(Retirement401kInput::default()),
            Calculation::Bmi(BmiInput::default()),
            Calculation::Paycheck(PaycheckInput::default()),
        ] {
            let result = calc.evaluate().expect("defaults are valid");
            assert_eq!(result.kind(), calc.kind());
            assert!(!result.summary().is_empty());
        }
    }
}
