use super::error::{CalcResult, require_non_negative, require_positive};
use super::tax::FICA_RATE;
use super::types::{BmiCategory, BmiInput, BmiResult, PaycheckInput, PaycheckResult, UnitSystem};

const CM_PER_INCH: f64 = 2.54;
const KG_PER_LB: f64 = 0.453_592_37;

pub const HEALTHY_BMI_MIN: f64 = 18.5;
pub const HEALTHY_BMI_MAX: f64 = 24.9;
const OVERWEIGHT_BMI: f64 = 25.0;
const OBESE_BMI: f64 = 30.0;

// Flat withholding for the paycheck estimate, not the bracketed federal tax.
pub const PAYCHECK_FEDERAL_RATE: f64 = 0.12;
pub const PAYCHECK_STATE_RATE: f64 = 0.05;

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < HEALTHY_BMI_MIN {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_BMI {
        BmiCategory::Normal
    } else if bmi < OBESE_BMI {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

fn metric_measurements(input: &BmiInput) -> CalcResult<(f64, f64)> {
    match input.units {
        UnitSystem::Metric => {
            let height_cm = require_positive("heightCm", input.height_cm)?;
            let weight_kg = require_positive("weightKg", input.weight_kg)?;
            Ok((height_cm / 100.0, weight_kg))
        }
        UnitSystem::Imperial => {
            let feet = require_non_negative("heightFeet", input.height_feet)?;
            let inches = require_non_negative("heightInches", input.height_inches)?;
            let total_inches = require_positive("heightInches", feet * 12.0 + inches)?;
            let weight_lb = require_positive("weightLb", input.weight_lb)?;
            Ok((total_inches * CM_PER_INCH / 100.0, weight_lb * KG_PER_LB))
        }
    }
}

pub fn bmi(input: &BmiInput) -> CalcResult<BmiResult> {
    let (height_m, weight_kg) = metric_measurements(input)?;
    let height_sq = height_m * height_m;
    let value = weight_kg / height_sq;

    let to_input_unit = |kg: f64| match input.units {
        UnitSystem::Metric => kg,
        UnitSystem::Imperial => kg / KG_PER_LB,
    };

    Ok(BmiResult {
        bmi: value,
        category: bmi_category(value),
        units: input.units,
        healthy_weight_min: to_input_unit(HEALTHY_BMI_MIN * height_sq),
        healthy_weight_max: to_input_unit(HEALTHY_BMI_MAX * height_sq),
    })
}

pub fn paycheck(input: &PaycheckInput) -> CalcResult<PaycheckResult> {
    let salary = require_non_negative("annualSalary", input.annual_salary)?;
    let periods_per_year = input.pay_frequency.periods_per_year();

    let gross_pay = salary / periods_per_year as f64;
    let federal_tax = gross_pay * PAYCHECK_FEDERAL_RATE;
    let state_tax = gross_pay * PAYCHECK_STATE_RATE;
    let fica_tax = gross_pay * FICA_RATE;
    let total_deductions = federal_tax + state_tax + fica_tax;
    let net_pay = gross_pay - total_deductions;

    Ok(PaycheckResult {
        pay_frequency: input.pay_frequency,
        periods_per_year,
        gross_pay,
        federal_tax,
        state_tax,
        fica_tax,
        total_deductions,
        net_pay,
        annual_net_pay: net_pay * periods_per_year as f64,
    })
}
