use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Cad,
    Aud,
    Gbp,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd | Currency::Cad | Currency::Aud => "$",
            Currency::Gbp => "£",
        }
    }
}

pub fn format_currency(amount: f64, currency: Currency) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{}{}.{:02}",
        currency.symbol(),
        group_thousands(cents / 100),
        cents % 100
    )
}

pub fn format_percent(value_percent: f64, decimals: usize) -> String {
    format!("{value_percent:.decimals$}%")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_rounds_cents() {
        assert_eq!(format_currency(2_128.9748, Currency::Usd), "$2,128.97");
        assert_eq!(format_currency(10_000.0, Currency::Gbp), "£10,000.00");
        assert_eq!(format_currency(1_234_567.0, Currency::Aud), "$1,234,567.00");
        assert_eq!(format_currency(999.999, Currency::Cad), "$1,000.00");
        assert_eq!(format_currency(0.0, Currency::Usd), "$0.00");
    }

    #[test]
    fn currency_keeps_sign_but_not_for_negative_zero() {
        assert_eq!(format_currency(-42.5, Currency::Usd), "-$42.50");
        assert_eq!(format_currency(-0.001, Currency::Usd), "$0.00");
    }

    #[test]
    fn percent_uses_requested_precision() {
        assert_eq!(format_percent(10_000.0 / 450_000.0 * 100.0, 2), "2.22%");
        assert_eq!(format_percent(22.0, 0), "22%");
    }
}
