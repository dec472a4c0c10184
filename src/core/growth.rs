use super::error::{CalcError, CalcResult, require_finite, require_non_negative};
use super::types::{
    CompoundInterestInput, CompoundInterestResult, GrowthYear, Retirement401kInput,
    Retirement401kResult, RetirementYear,
};

pub const MAX_HORIZON_YEARS: u32 = 100;
pub const RETIREMENT_INCOME_MONTHS: f64 = 240.0;

#[derive(Debug, Clone, Copy)]
struct ClosedFormPoint {
    balance: f64,
    contributions: f64,
}

fn future_value(
    principal: f64,
    contribution_per_period: f64,
    rate_per_period: f64,
    periods: u32,
) -> ClosedFormPoint {
    let growth = (1.0 + rate_per_period).powi(periods as i32);
    let from_principal = principal * growth;
    let from_contributions = if rate_per_period.abs() <= 1e-12 {
        contribution_per_period * periods as f64
    } else {
        contribution_per_period * (growth - 1.0) / rate_per_period
    };
    ClosedFormPoint {
        balance: from_principal + from_contributions,
        contributions: contribution_per_period * periods as f64,
    }
}

fn check_horizon(field: &'static str, years: u32) -> CalcResult<u32> {
    if years > MAX_HORIZON_YEARS {
        return Err(CalcError::invalid(
            field,
            format!("must be <= {MAX_HORIZON_YEARS} years"),
        ));
    }
    Ok(years)
}

fn require_finite_outcome(field: &'static str, values: &[f64]) -> CalcResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CalcError::invalid(field, "is too large for the horizon"))
    }
}

fn require_rate_above_total_loss(field: &'static str, percent: f64) -> CalcResult<f64> {
    require_finite(field, percent)?;
    if percent <= -100.0 {
        return Err(CalcError::invalid(field, "must be > -100"));
    }
    Ok(percent)
}

pub fn compound_interest(input: &CompoundInterestInput) -> CalcResult<CompoundInterestResult> {
    let principal = require_non_negative("principal", input.principal)?;
    let monthly = require_non_negative("monthlyContribution", input.monthly_contribution)?;
    let annual_rate = require_non_negative("annualRatePercent", input.annual_rate_percent)?;
    let years = check_horizon("years", input.years)?;

    let periods_per_year = input.compounding.periods_per_year();
    let rate = annual_rate / 100.0 / periods_per_year as f64;
    let contribution_per_period = monthly * 12.0 / periods_per_year as f64;

    let yearly_breakdown = (1..=years)
        .map(|year| {
            let periods = periods_per_year * year;
            let point = future_value(principal, contribution_per_period, rate, periods);
            GrowthYear {
                year,
                balance: point.balance,
                total_contributions: point.contributions,
                total_interest: point.balance - principal - point.contributions,
            }
        })
        .collect();

    let point = future_value(
        principal,
        contribution_per_period,
        rate,
        periods_per_year * years,
    );
    require_finite_outcome("annualRatePercent", &[point.balance])?;

    Ok(CompoundInterestResult {
        principal,
        final_amount: point.balance,
        total_contributions: point.contributions,
        total_interest: point.balance - principal - point.contributions,
        yearly_breakdown,
    })
}

pub fn project_401k(input: &Retirement401kInput) -> CalcResult<Retirement401kResult> {
    if input.retirement_age < input.current_age {
        return Err(CalcError::invalid("retirementAge", "must be >= currentAge"));
    }
    let years = check_horizon("retirementAge", input.retirement_age - input.current_age)?;

    let starting_salary = require_non_negative("currentSalary", input.current_salary)?;
    let initial_balance = require_non_negative("currentBalance", input.current_balance)?;
    let contribution_rate =
        require_non_negative("contributionPercent", input.contribution_percent)? / 100.0;
    let match_rate =
        require_non_negative("employerMatchPercent", input.employer_match_percent)? / 100.0;
    let match_limit = require_non_negative(
        "employerMatchLimitPercent",
        input.employer_match_limit_percent,
    )? / 100.0;
    let annual_return =
        require_rate_above_total_loss("annualReturnPercent", input.annual_return_percent)? / 100.0;
    let salary_growth =
        require_rate_above_total_loss("salaryIncreasePercent", input.salary_increase_percent)?
            / 100.0;

    let mut salary = starting_salary;
    let mut balance = initial_balance;
    let mut total_contributions = 0.0;
    let mut employer_contributions = 0.0;
    let mut yearly_breakdown = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let employee_contribution = salary * contribution_rate;
        let employer_contribution = employee_contribution.min(salary * match_limit) * match_rate;

        balance = (balance + employee_contribution + employer_contribution) * (1.0 + annual_return);
        total_contributions += employee_contribution;
        employer_contributions += employer_contribution;

        yearly_breakdown.push(RetirementYear {
            year,
            age: input.current_age + year,
            salary,
            employee_contribution,
            employer_contribution,
            balance,
        });

        salary *= 1.0 + salary_growth;
    }

    require_finite_outcome(
        "salaryIncreasePercent",
        &[total_contributions, employer_contributions],
    )?;
    require_finite_outcome("annualReturnPercent", &[balance])?;

    Ok(Retirement401kResult {
        years_to_retirement: years,
        final_balance: balance,
        total_contributions,
        employer_contributions,
        total_interest: balance - initial_balance - total_contributions - employer_contributions,
        monthly_retirement_income: balance / RETIREMENT_INCOME_MONTHS,
        yearly_breakdown,
    })
}
