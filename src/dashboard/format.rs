//! KPI display formatting: `$1,234.50` and `1,234`.

/// Dollar amount with thousands separators and two decimals.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${sign}{}.{frac_part}", group_thousands(int_part))
}

/// Integer with thousands separators.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&digits))
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let pos_from_end = len - i;
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(',');
        }
    }
    out
}
