use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Monthly,
    #[serde(alias = "semiMonthly", alias = "semi_monthly", alias = "semimonthly")]
    SemiMonthly,
    #[serde(
        alias = "biWeekly",
        alias = "bi_weekly",
        alias = "biweekly",
        alias = "fortnightly"
    )]
    BiWeekly,
    Weekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::SemiMonthly => 24,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Daily,
    Monthly,
    Quarterly,
    #[serde(alias = "yearly")]
    Annually,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Annually => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_periods: u32,
    pub payments_per_year: PaymentFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub periodic_payment: f64,
    pub number_of_payments: u32,
    pub financed_amount: f64,
    pub total_cost: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MortgageInput {
    pub home_price: f64,
    pub down_payment: f64,
    #[serde(alias = "interestRate", alias = "rate")]
    pub annual_rate_percent: f64,
    #[serde(alias = "loanTerm")]
    pub term_years: u32,
    #[serde(alias = "propertyTaxRate")]
    pub property_tax_rate_percent: f64,
    #[serde(alias = "homeInsurance")]
    pub annual_home_insurance: f64,
    #[serde(alias = "hoaFees")]
    pub monthly_hoa: f64,
    #[serde(alias = "pmiRate")]
    pub pmi_rate_percent: f64,
}

impl Default for MortgageInput {
    fn default() -> Self {
        Self {
            home_price: 400_000.0,
            down_payment: 80_000.0,
            annual_rate_percent: 7.0,
            term_years: 30,
            property_tax_rate_percent: 1.2,
            annual_home_insurance: 1_500.0,
            monthly_hoa: 0.0,
            pmi_rate_percent: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub down_payment_percent: f64,
    pub monthly_principal_and_interest: f64,
    pub monthly_property_tax: f64,
    pub monthly_home_insurance: f64,
    pub monthly_pmi: f64,
    pub monthly_hoa: f64,
    pub total_monthly_payment: f64,
    pub number_of_payments: u32,
    pub total_interest: f64,
    pub total_cost: f64,
    pub schedule: Vec<AmortizationYear>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanadianMortgageInput {
    pub home_price: f64,
    pub down_payment: f64,
    #[serde(alias = "interestRate", alias = "rate")]
    pub annual_rate_percent: f64,
    #[serde(alias = "amortizationPeriod")]
    pub amortization_years: u32,
    pub payment_frequency: PaymentFrequency,
}

impl Default for CanadianMortgageInput {
    fn default() -> Self {
        Self {
            home_price: 600_000.0,
            down_payment: 60_000.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            payment_frequency: PaymentFrequency::Monthly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanadianMortgageResult {
    pub base_loan_amount: f64,
    pub down_payment_percent: f64,
    pub minimum_down_payment: f64,
    pub cmhc_premium_rate_percent: f64,
    pub cmhc_premium: f64,
    pub total_mortgage: f64,
    pub effective_annual_rate_percent: f64,
    pub payment_frequency: PaymentFrequency,
    pub periodic_payment: f64,
    pub number_of_payments: u32,
    pub total_interest: f64,
    pub total_cost: f64,
    pub schedule: Vec<AmortizationYear>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeLoanInput {
    pub loan_amount: f64,
    #[serde(alias = "interestRate", alias = "rate")]
    pub annual_rate_percent: f64,
    #[serde(alias = "loanTerm")]
    pub term_years: u32,
    #[serde(alias = "paymentFrequency")]
    pub repayment_frequency: PaymentFrequency,
    pub offset_balance: f64,
}

impl Default for HomeLoanInput {
    fn default() -> Self {
        Self {
            loan_amount: 600_000.0,
            annual_rate_percent: 6.0,
            term_years: 30,
            repayment_frequency: PaymentFrequency::Monthly,
            offset_balance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeLoanResult {
    pub loan_amount: f64,
    pub effective_loan_amount: f64,
    pub repayment_frequency: PaymentFrequency,
    pub periodic_repayment: f64,
    pub number_of_repayments: u32,
    pub total_interest: f64,
    pub total_cost: f64,
    pub repayment_without_offset: f64,
    pub total_interest_without_offset: f64,
    pub interest_saved: f64,
    pub repayments_saved: u32,
    pub years_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarLoanInput {
    pub vehicle_price: f64,
    pub down_payment: f64,
    pub trade_in_value: f64,
    #[serde(alias = "salesTax")]
    pub sales_tax_percent: f64,
    #[serde(alias = "interestRate", alias = "rate")]
    pub annual_rate_percent: f64,
    #[serde(alias = "loanTerm")]
    pub term_months: u32,
}

impl Default for CarLoanInput {
    fn default() -> Self {
        Self {
            vehicle_price: 35_000.0,
            down_payment: 5_000.0,
            trade_in_value: 0.0,
            sales_tax_percent: 7.0,
            annual_rate_percent: 6.5,
            term_months: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarLoanResult {
    pub sales_tax: f64,
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub number_of_payments: u32,
    pub total_interest: f64,
    pub total_cost: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilingStatus {
    Single,
    #[serde(
        alias = "married",
        alias = "marriedFilingJointly",
        alias = "married_filing_jointly"
    )]
    MarriedFilingJointly,
    #[serde(alias = "headOfHousehold", alias = "head_of_household")]
    HeadOfHousehold,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FederalTaxInput {
    #[serde(alias = "income", alias = "annualIncome")]
    pub gross_income: f64,
    pub filing_status: FilingStatus,
    #[serde(alias = "stateTaxRate")]
    pub state_tax_rate_percent: f64,
}

impl Default for FederalTaxInput {
    fn default() -> Self {
        Self {
            gross_income: 75_000.0,
            filing_status: FilingStatus::Single,
            state_tax_rate_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FederalTaxResult {
    pub gross_income: f64,
    pub filing_status: FilingStatus,
    pub standard_deduction: f64,
    pub taxable_income: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica_tax: f64,
    pub total_tax: f64,
    pub after_tax_income: f64,
    pub monthly_after_tax_income: f64,
    pub effective_rate_percent: f64,
    pub marginal_rate_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StampDutyInput {
    #[serde(alias = "price", alias = "purchasePrice")]
    pub property_price: f64,
    #[serde(alias = "isFirstTimeBuyer")]
    pub first_time_buyer: bool,
    #[serde(alias = "isAdditionalProperty")]
    pub additional_property: bool,
}

impl Default for StampDutyInput {
    fn default() -> Self {
        Self {
            property_price: 450_000.0,
            first_time_buyer: false,
            additional_property: false,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuyerCategory {
    Standard,
    FirstTimeBuyer,
    AdditionalProperty,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampDutyBand {
    pub from: f64,
    pub to: Option<f64>,
    pub rate_percent: f64,
    pub taxable_amount: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampDutyResult {
    pub property_price: f64,
    pub buyer_category: BuyerCategory,
    pub stamp_duty: f64,
    pub effective_rate_percent: f64,
    pub bands: Vec<StampDutyBand>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompoundInterestInput {
    #[serde(alias = "initialInvestment")]
    pub principal: f64,
    pub monthly_contribution: f64,
    #[serde(alias = "interestRate", alias = "rate")]
    pub annual_rate_percent: f64,
    pub years: u32,
    #[serde(alias = "compoundingFrequency")]
    pub compounding: CompoundingFrequency,
}

impl Default for CompoundInterestInput {
    fn default() -> Self {
        Self {
            principal: 10_000.0,
            monthly_contribution: 200.0,
            annual_rate_percent: 7.0,
            years: 10,
            compounding: CompoundingFrequency::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthYear {
    pub year: u32,
    pub balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestResult {
    pub principal: f64,
    pub final_amount: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub yearly_breakdown: Vec<GrowthYear>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Retirement401kInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_salary: f64,
    pub current_balance: f64,
    pub contribution_percent: f64,
    #[serde(alias = "employerMatch")]
    pub employer_match_percent: f64,
    #[serde(alias = "employerMatchLimit")]
    pub employer_match_limit_percent: f64,
    #[serde(alias = "annualReturn")]
    pub annual_return_percent: f64,
    #[serde(alias = "salaryIncrease")]
    pub salary_increase_percent: f64,
}

impl Default for Retirement401kInput {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 65,
            current_salary: 75_000.0,
            current_balance: 25_000.0,
            contribution_percent: 10.0,
            employer_match_percent: 50.0,
            employer_match_limit_percent: 6.0,
            annual_return_percent: 7.0,
            salary_increase_percent: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementYear {
    pub year: u32,
    pub age: u32,
    pub salary: f64,
    pub employee_contribution: f64,
    pub employer_contribution: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Retirement401kResult {
    pub years_to_retirement: u32,
    pub final_balance: f64,
    pub total_contributions: f64,
    pub employer_contributions: f64,
    pub total_interest: f64,
    pub monthly_retirement_income: f64,
    pub yearly_breakdown: Vec<RetirementYear>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSystem {
    Metric,
    #[serde(alias = "us", alias = "imperial-us")]
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BmiInput {
    pub units: UnitSystem,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub height_feet: f64,
    pub height_inches: f64,
    #[serde(alias = "weightLbs")]
    pub weight_lb: f64,
}

impl Default for BmiInput {
    fn default() -> Self {
        Self {
            units: UnitSystem::Metric,
            height_cm: 175.0,
            weight_kg: 70.0,
            height_feet: 5.0,
            height_inches: 9.0,
            weight_lb: 154.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub units: UnitSystem,
    pub healthy_weight_min: f64,
    pub healthy_weight_max: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaycheckInput {
    #[serde(alias = "salary")]
    pub annual_salary: f64,
    pub pay_frequency: PaymentFrequency,
}

impl Default for PaycheckInput {
    fn default() -> Self {
        Self {
            annual_salary: 60_000.0,
            pay_frequency: PaymentFrequency::BiWeekly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaycheckResult {
    pub pay_frequency: PaymentFrequency,
    pub periods_per_year: u32,
    pub gross_pay: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica_tax: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
    pub annual_net_pay: f64,
}
