//! Display helpers for report output

fn group_thousands(whole: i64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a currency value, e.g. `-$1,234.50`
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as i64;
    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands(cents_total / 100),
        cents_total % 100
    )
}

/// Currency with an explicit sign, for deltas
pub fn format_signed_currency(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

/// Format a 0-100 percentage
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a fractional rate (0.22) as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
