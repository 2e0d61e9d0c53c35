//! Revenue reporting and display formatting.
//!
//! Framework-agnostic helpers that turn store contents into text the bot layer
//! can print as-is.

use crate::core::departments::Department;

/// One department's slice of total county revenue.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueShare {
    /// Department display name
    pub name: String,
    /// Emoji shown next to the name
    pub icon: String,
    /// Annual revenue in KES, `None` when unknown
    pub revenue: Option<f64>,
    /// Share of the total as a percentage (0-100)
    pub percent: f64,
}

/// Breaks total revenue down per department, largest first. Departments
/// without a figure are listed last with a zero share.
#[must_use]
pub fn revenue_breakdown(departments: &[Department]) -> Vec<RevenueShare> {
    let total: f64 = departments
        .iter()
        .map(|dept| dept.total_revenue.unwrap_or(0.0))
        .sum();

    let mut shares: Vec<RevenueShare> = departments
        .iter()
        .map(|dept| RevenueShare {
            name: dept.display_name().to_string(),
            icon: dept.icon.clone(),
            revenue: dept.total_revenue,
            percent: calculate_share(dept.total_revenue.unwrap_or(0.0), total),
        })
        .collect();
    shares.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    shares
}

/// `part` as a percentage of `total`; zero when the total is zero.
#[must_use]
pub fn calculate_share(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }

    (part / total) * 100.0
}

/// Text bar such as `[███░░░░░░░] 30.0%`.
#[must_use]
pub fn format_share_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(0.0, 100.0);

    // clamped is within [0, 100] and length is small, so the product fits in usize.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Whole Kenyan shillings with thousands separators, e.g. `KES 25,000,000`.
/// Absent and zero amounts render as `N/A`.
#[must_use]
pub fn format_kes(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| *a != 0.0 && a.is_finite()) else {
        return "N/A".to_string();
    };

    // Rounded to whole shillings; county figures are far below i64::MAX.
    #[allow(clippy::cast_possible_truncation)]
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if whole < 0 { "-" } else { "" };
    format!("KES {sign}{grouped}")
}

/// First `max_chars` characters of `text`, with `...` when it was cut.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::sample_department;

    #[test]
    fn test_format_kes() {
        assert_eq!(format_kes(Some(25_000_000.0)), "KES 25,000,000");
        assert_eq!(format_kes(Some(999.0)), "KES 999");
        assert_eq!(format_kes(Some(1_000.0)), "KES 1,000");
        assert_eq!(format_kes(Some(1_377_000_000.0)), "KES 1,377,000,000");
        assert_eq!(format_kes(Some(-1_500.0)), "KES -1,500");
    }

    #[test]
    fn test_format_kes_missing_or_zero() {
        assert_eq!(format_kes(None), "N/A");
        assert_eq!(format_kes(Some(0.0)), "N/A");
    }

    #[test]
    fn test_calculate_share() {
        assert_eq!(calculate_share(25.0, 100.0), 25.0);
        assert_eq!(calculate_share(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_share_bar() {
        assert_eq!(format_share_bar(30.0, None), "[███░░░░░░░] 30.0%");
        assert_eq!(format_share_bar(0.0, Some(4)), "[░░░░] 0.0%");
        assert_eq!(format_share_bar(150.0, Some(4)), "[████] 150.0%");
    }

    #[test]
    fn test_revenue_breakdown_orders_by_share() {
        let mut small = sample_department("small");
        small.total_revenue = Some(25.0);
        let mut big = sample_department("big");
        big.total_revenue = Some(75.0);
        let mut unknown = sample_department("unknown");
        unknown.total_revenue = None;

        let shares = revenue_breakdown(&[small, unknown, big]);
        let percents: Vec<f64> = shares.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![75.0, 25.0, 0.0]);
        assert_eq!(shares[2].revenue, None);
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 150), "short");
        assert_eq!(excerpt("abcdef ghij", 7), "abcdef...");
        assert_eq!(excerpt("ünïcode", 3), "ünï...");
    }
}
