mod calculation;
mod error;
mod format;
mod growth;
mod loan;
mod ratio;
mod tax;
mod types;

pub use calculation::{Calculation, CalculationKind, CalculationResult, SummaryLine};
pub use error::{CalcError, CalcResult};
pub use format::{Currency, format_currency, format_percent};
pub use growth::{compound_interest, project_401k};
pub use loan::{
    amortization_schedule, amortize, canadian_minimum_down_payment, canadian_mortgage,
    canadian_rate_per_payment, car_loan, cmhc_premium_rate, home_loan, mortgage,
};
pub use ratio::{bmi, bmi_category, paycheck};
pub use tax::{
    BandSlice, BracketOutcome, TaxBand, TaxBracketTable, apply_brackets, band_slices,
    federal_brackets, federal_tax, sdlt_table, stamp_duty, standard_deduction,
};
pub use types::{
    AmortizationYear, BmiCategory, BmiInput, BmiResult, BuyerCategory, CanadianMortgageInput,
    CanadianMortgageResult, CarLoanInput, CarLoanResult, CompoundInterestInput,
    CompoundInterestResult, CompoundingFrequency, FederalTaxInput, FederalTaxResult, FilingStatus,
    GrowthYear, HomeLoanInput, HomeLoanResult, LoanInput, LoanResult, MortgageInput,
    MortgageResult, PaycheckInput, PaycheckResult, PaymentFrequency, Retirement401kInput,
    Retirement401kResult, RetirementYear, StampDutyBand, StampDutyInput, StampDutyResult,
    UnitSystem,
};
