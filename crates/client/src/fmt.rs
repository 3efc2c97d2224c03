use rust_decimal::{Decimal, RoundingStrategy};

/// # Summary
/// 将十进制数值格式化为 en-US 美元货币串，如 `$1,234.56`。
///
/// # Logic
/// 1. 四舍五入（中点远离零）到两位小数。
/// 2. 整数部分每三位插入一个逗号分组。
/// 3. 负值在 `$` 前加负号，零不带符号。
///
/// # Arguments
/// * `value`: 待格式化的数值。
///
/// # Returns
/// 形如 `$1,234.56` / `-$42.50` 的字符串。
pub fn usd(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let text = abs.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (text.as_str(), ""),
    };

    let mut grouped = String::new();
    for (idx, ch) in int_part.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!(
        "{}${}.{:0<2}",
        if negative { "-" } else { "" },
        int_grouped,
        frac_part
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_groups_thousands() {
        assert_eq!(usd(dec!(1234.56)), "$1,234.56");
        assert_eq!(usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(usd(dec!(999)), "$999.00");
    }

    #[test]
    fn test_usd_pads_fraction() {
        assert_eq!(usd(dec!(0)), "$0.00");
        assert_eq!(usd(dec!(7.5)), "$7.50");
        assert_eq!(usd(dec!(100)), "$100.00");
    }

    #[test]
    fn test_usd_rounds_midpoint_away_from_zero() {
        assert_eq!(usd(dec!(0.005)), "$0.01");
        assert_eq!(usd(dec!(99.999)), "$100.00");
        assert_eq!(usd(dec!(-0.005)), "-$0.01");
    }

    #[test]
    fn test_usd_negative_sign_precedes_dollar() {
        assert_eq!(usd(dec!(-42.5)), "-$42.50");
        assert_eq!(usd(dec!(-1234.56)), "-$1,234.56");
    }
}
