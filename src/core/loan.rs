use super::error::{CalcError, CalcResult, require_non_negative, require_positive};
use super::types::{
    AmortizationYear, CanadianMortgageInput, CanadianMortgageResult, CarLoanInput, CarLoanResult,
    HomeLoanInput, HomeLoanResult, LoanInput, LoanResult, MortgageInput, MortgageResult,
    PaymentFrequency,
};

const PMI_EQUITY_THRESHOLD: f64 = 0.20;
const CMHC_EQUITY_THRESHOLD: f64 = 0.20;
// (down payment fraction below which the tier applies, premium rate on the base loan)
const CMHC_PREMIUM_TIERS: [(f64, f64); 3] = [(0.10, 0.040), (0.15, 0.031), (0.20, 0.028)];
const CA_MIN_DOWN_TIER_ONE_LIMIT: f64 = 500_000.0;
const CA_UNINSURABLE_PRICE: f64 = 1_500_000.0;
const BALANCE_EPS: f64 = 1e-6;

pub const MAX_LOAN_YEARS: u32 = 100;
pub const MAX_LOAN_PERIODS: u32 = MAX_LOAN_YEARS * 52;

pub fn amortize(input: &LoanInput, add_on_premium: f64) -> CalcResult<LoanResult> {
    require_non_negative("principal", input.principal)?;
    require_non_negative("annualRatePercent", input.annual_rate_percent)?;
    require_non_negative("addOnPremium", add_on_premium)?;
    if input.term_periods == 0 {
        return Err(CalcError::invalid("termPeriods", "must be > 0"));
    }
    if input.term_periods > MAX_LOAN_PERIODS {
        return Err(CalcError::invalid(
            "termPeriods",
            format!("must be <= {MAX_LOAN_PERIODS}"),
        ));
    }

    let rate = periodic_rate(input.annual_rate_percent, input.payments_per_year);
    amortize_at_rate(
        input.principal + add_on_premium,
        rate,
        input.term_periods,
    )
}

pub(crate) fn amortize_at_rate(
    financed: f64,
    rate_per_period: f64,
    periods: u32,
) -> CalcResult<LoanResult> {
    let payment = annuity_payment(financed, rate_per_period, periods)?;
    let total_cost = payment * periods as f64;
    Ok(LoanResult {
        periodic_payment: payment,
        number_of_payments: periods,
        financed_amount: financed,
        total_cost,
        total_interest: total_cost - financed,
    })
}

fn annuity_payment(financed: f64, rate_per_period: f64, periods: u32) -> CalcResult<f64> {
    if periods == 0 {
        return Ok(0.0);
    }
    if rate_per_period.abs() <= 1e-12 {
        return Ok(financed / periods as f64);
    }
    // periods is capped well below i32::MAX by the callers.
    let growth = (1.0 + rate_per_period).powi(periods as i32);
    let payment = financed * rate_per_period * growth / (growth - 1.0);
    if !growth.is_finite() || !payment.is_finite() || !(payment * periods as f64).is_finite() {
        return Err(CalcError::invalid(
            "annualRatePercent",
            "is too large for the loan term",
        ));
    }
    Ok(payment)
}

fn periodic_rate(annual_rate_percent: f64, frequency: PaymentFrequency) -> f64 {
    annual_rate_percent / 100.0 / frequency.periods_per_year() as f64
}

pub fn canadian_rate_per_payment(annual_rate_percent: f64, frequency: PaymentFrequency) -> f64 {
    let effective_annual = canadian_effective_annual_rate(annual_rate_percent);
    (1.0 + effective_annual).powf(1.0 / frequency.periods_per_year() as f64) - 1.0
}

fn canadian_effective_annual_rate(annual_rate_percent: f64) -> f64 {
    let nominal = annual_rate_percent / 100.0;
    (1.0 + nominal / 2.0).powi(2) - 1.0
}

fn total_periods(field: &'static str, years: u32, frequency: PaymentFrequency) -> CalcResult<u32> {
    if years == 0 {
        return Err(CalcError::invalid(field, "must be > 0"));
    }
    if years > MAX_LOAN_YEARS {
        return Err(CalcError::invalid(
            field,
            format!("must be <= {MAX_LOAN_YEARS} years"),
        ));
    }
    Ok(years * frequency.periods_per_year())
}

pub fn amortization_schedule(
    financed: f64,
    rate_per_period: f64,
    payment: f64,
    periods: u32,
    periods_per_year: u32,
) -> Vec<AmortizationYear> {
    let periods_per_year = periods_per_year.max(1);
    let mut rows = Vec::with_capacity(periods.div_ceil(periods_per_year) as usize);
    let mut balance = financed;
    let mut principal_paid = 0.0;
    let mut interest_paid = 0.0;

    for period in 1..=periods {
        let interest = balance * rate_per_period;
        let principal = if period == periods {
            balance
        } else {
            (payment - interest).max(0.0).min(balance)
        };
        balance -= principal;
        principal_paid += principal;
        interest_paid += interest;

        if period % periods_per_year == 0 || period == periods {
            rows.push(AmortizationYear {
                year: period.div_ceil(periods_per_year),
                principal_paid,
                interest_paid,
                ending_balance: balance.max(0.0),
            });
            principal_paid = 0.0;
            interest_paid = 0.0;
        }
    }

    rows
}

pub fn mortgage(input: &MortgageInput) -> CalcResult<MortgageResult> {
    let price = require_positive("homePrice", input.home_price)?;
    let down = require_non_negative("downPayment", input.down_payment)?;
    if down > price {
        return Err(CalcError::invalid("downPayment", "cannot exceed homePrice"));
    }
    require_non_negative("propertyTaxRatePercent", input.property_tax_rate_percent)?;
    require_non_negative("annualHomeInsurance", input.annual_home_insurance)?;
    require_non_negative("monthlyHoa", input.monthly_hoa)?;
    require_non_negative("pmiRatePercent", input.pmi_rate_percent)?;

    let frequency = PaymentFrequency::Monthly;
    let periods = total_periods("termYears", input.term_years, frequency)?;
    let loan_amount = price - down;
    let loan = amortize(
        &LoanInput {
            principal: loan_amount,
            annual_rate_percent: input.annual_rate_percent,
            term_periods: periods,
            payments_per_year: frequency,
        },
        0.0,
    )?;

    let down_fraction = down / price;
    let monthly_pmi = if down_fraction < PMI_EQUITY_THRESHOLD {
        loan_amount * input.pmi_rate_percent / 100.0 / 12.0
    } else {
        0.0
    };
    let monthly_property_tax = price * input.property_tax_rate_percent / 100.0 / 12.0;
    let monthly_home_insurance = input.annual_home_insurance / 12.0;

    let schedule = amortization_schedule(
        loan_amount,
        periodic_rate(input.annual_rate_percent, frequency),
        loan.periodic_payment,
        periods,
        frequency.periods_per_year(),
    );

    Ok(MortgageResult {
        loan_amount,
        down_payment_percent: down_fraction * 100.0,
        monthly_principal_and_interest: loan.periodic_payment,
        monthly_property_tax,
        monthly_home_insurance,
        monthly_pmi,
        monthly_hoa: input.monthly_hoa,
        total_monthly_payment: loan.periodic_payment
            + monthly_property_tax
            + monthly_home_insurance
            + monthly_pmi
            + input.monthly_hoa,
        number_of_payments: periods,
        total_interest: loan.total_interest,
        total_cost: loan.total_cost,
        schedule,
    })
}

pub fn canadian_minimum_down_payment(price: f64) -> f64 {
    if price >= CA_UNINSURABLE_PRICE {
        price * 0.20
    } else if price <= CA_MIN_DOWN_TIER_ONE_LIMIT {
        price * 0.05
    } else {
        CA_MIN_DOWN_TIER_ONE_LIMIT * 0.05 + (price - CA_MIN_DOWN_TIER_ONE_LIMIT) * 0.10
    }
}

pub fn cmhc_premium_rate(down_payment_fraction: f64) -> f64 {
    if down_payment_fraction >= CMHC_EQUITY_THRESHOLD {
        return 0.0;
    }
    CMHC_PREMIUM_TIERS
        .iter()
        .find(|(below, _)| down_payment_fraction < *below)
        .map(|(_, rate)| *rate)
        .unwrap_or(0.0)
}

pub fn canadian_mortgage(input: &CanadianMortgageInput) -> CalcResult<CanadianMortgageResult> {
    let price = require_positive("homePrice", input.home_price)?;
    let down = require_non_negative("downPayment", input.down_payment)?;
    require_non_negative("annualRatePercent", input.annual_rate_percent)?;
    if down > price {
        return Err(CalcError::invalid("downPayment", "cannot exceed homePrice"));
    }

    let minimum_down_payment = canadian_minimum_down_payment(price);
    if down + BALANCE_EPS < minimum_down_payment {
        return Err(CalcError::invalid(
            "downPayment",
            format!("must be at least {minimum_down_payment:.2} for this price"),
        ));
    }

    let frequency = input.payment_frequency;
    let periods = total_periods("amortizationYears", input.amortization_years, frequency)?;

    let base_loan_amount = price - down;
    let down_fraction = down / price;
    let premium_rate = cmhc_premium_rate(down_fraction);
    let cmhc_premium = base_loan_amount * premium_rate;
    let total_mortgage = base_loan_amount + cmhc_premium;

    let rate = canadian_rate_per_payment(input.annual_rate_percent, frequency);
    let loan = amortize_at_rate(total_mortgage, rate, periods)?;
    let schedule = amortization_schedule(
        total_mortgage,
        rate,
        loan.periodic_payment,
        periods,
        frequency.periods_per_year(),
    );

    Ok(CanadianMortgageResult {
        base_loan_amount,
        down_payment_percent: down_fraction * 100.0,
        minimum_down_payment,
        cmhc_premium_rate_percent: premium_rate * 100.0,
        cmhc_premium,
        total_mortgage,
        effective_annual_rate_percent: canadian_effective_annual_rate(input.annual_rate_percent)
            * 100.0,
        payment_frequency: frequency,
        periodic_payment: loan.periodic_payment,
        number_of_payments: periods,
        total_interest: loan.total_interest,
        total_cost: loan.total_cost,
        schedule,
    })
}

// Repayment is sized on the offset-netted balance; total_interest stays
// relative to the nominal loan amount and can go negative.
pub fn home_loan(input: &HomeLoanInput) -> CalcResult<HomeLoanResult> {
    let loan_amount = require_non_negative("loanAmount", input.loan_amount)?;
    let offset = require_non_negative("offsetBalance", input.offset_balance)?;
    require_non_negative("annualRatePercent", input.annual_rate_percent)?;

    let frequency = input.repayment_frequency;
    let periods = total_periods("termYears", input.term_years, frequency)?;
    let rate = periodic_rate(input.annual_rate_percent, frequency);

    let effective_loan_amount = (loan_amount - offset).max(0.0);
    let with_offset = amortize_at_rate(effective_loan_amount, rate, periods)?;
    let without_offset = amortize_at_rate(loan_amount, rate, periods)?;

    let periods_needed = periods_to_clear_with_offset(
        loan_amount,
        offset,
        rate,
        without_offset.periodic_payment,
        periods,
    );
    let repayments_saved = periods - periods_needed;

    Ok(HomeLoanResult {
        loan_amount,
        effective_loan_amount,
        repayment_frequency: frequency,
        periodic_repayment: with_offset.periodic_payment,
        number_of_repayments: periods,
        total_interest: with_offset.total_cost - loan_amount,
        total_cost: with_offset.total_cost,
        repayment_without_offset: without_offset.periodic_payment,
        total_interest_without_offset: without_offset.total_interest,
        interest_saved: (without_offset.total_interest - with_offset.total_interest).max(0.0),
        repayments_saved,
        years_saved: repayments_saved as f64 / frequency.periods_per_year() as f64,
    })
}

fn periods_to_clear_with_offset(
    loan_amount: f64,
    offset: f64,
    rate_per_period: f64,
    repayment: f64,
    max_periods: u32,
) -> u32 {
    let mut balance = loan_amount;
    let mut period = 0;
    while balance > BALANCE_EPS && period < max_periods {
        let interest = (balance - offset).max(0.0) * rate_per_period;
        balance = balance + interest - repayment;
        period += 1;
    }
    period
}

pub fn car_loan(input: &CarLoanInput) -> CalcResult<CarLoanResult> {
    let price = require_non_negative("vehiclePrice", input.vehicle_price)?;
    let down = require_non_negative("downPayment", input.down_payment)?;
    let trade_in = require_non_negative("tradeInValue", input.trade_in_value)?;
    let tax_percent = require_non_negative("salesTaxPercent", input.sales_tax_percent)?;

    let sales_tax = price * tax_percent / 100.0;
    let loan_amount = (price + sales_tax - down - trade_in).max(0.0);
    let loan = amortize(
        &LoanInput {
            principal: loan_amount,
            annual_rate_percent: input.annual_rate_percent,
            term_periods: input.term_months,
            payments_per_year: PaymentFrequency::Monthly,
        },
        0.0,
    )
    .map_err(|err| match err {
        CalcError::InvalidInput { field: "termPeriods", reason } => CalcError::InvalidInput {
            field: "termMonths",
            reason,
        },
        other => other,
    })?;

    Ok(CarLoanResult {
        sales_tax,
        loan_amount,
        monthly_payment: loan.periodic_payment,
        number_of_payments: loan.number_of_payments,
        total_interest: loan.total_interest,
        total_cost: loan.total_cost,
    })
}
