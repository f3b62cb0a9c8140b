//! Console summary of the latest R estimate per region.
use crate::{
    estimation::REstimate,
    results::assembler::ResultTable,
};

/// Which regions the console summary lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryScope {
    /// Every base region followed by the aggregate.
    #[default]
    All,
    /// The aggregate row only.
    AggregateOnly,
}

/// Render the fixed-width "Estimated R as of …" report.
///
/// Region names are right-aligned in 20 columns, R shows three decimals
/// (`nan` when undefined) and case counts carry thousands separators.
pub fn render_summary(table: &ResultTable, scope: SummaryScope) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("   Estimated R as of {}\n\n", table.axis().last().format("%b %d")));
    out.push_str(&format!("   {:>20}   {:^6}   {:^11}\n", "Region", "R", "Cases"));
    out.push_str(&format!("   {:>20}   {:^6}   {:^11}\n", "-".repeat(20), "-".repeat(6), "-".repeat(11)));

    let latest = table.latest();
    let rows = match scope {
        SummaryScope::All => &latest[..],
        SummaryScope::AggregateOnly => &latest[latest.len() - 1..],
    };
    for row in rows {
        let r = match row.r_estimate {
            REstimate::Defined(r) => format!("{r:.3}"),
            REstimate::Undefined(_) => "nan".to_string(),
        };
        out.push_str(&format!(
            "   {:>20}   {:>6}   {:>11}\n",
            row.region,
            r,
            format_thousands(row.cumulative)
        ));
    }
    out
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        estimation::UndefinedReason,
        results::assembler::{RegionResult, ResultAssembler},
        series::DateAxis,
    };
    use chrono::NaiveDate;
    use ndarray::array;

    fn table() -> ResultTable {
        let day = NaiveDate::from_ymd_opt(2020, 4, 2).unwrap();
        let mut assembler = ResultAssembler::new(DateAxis::from_range(day, day).unwrap(), "All Regions", 0);
        assembler.push(RegionResult {
            name: "New York".to_string(),
            cumulative: array![92_381],
            incidence: array![92_381],
            infectious_pool: array![0],
            r_estimate: vec![REstimate::Defined(1.23456)],
        });
        assembler.push(RegionResult {
            name: "All Regions".to_string(),
            cumulative: array![92_381],
            incidence: array![92_381],
            infectious_pool: array![0],
            r_estimate: vec![REstimate::Undefined(UndefinedReason::BelowNoiseFloor)],
        });
        assembler.finish().unwrap()
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-45_000), "-45,000");
    }

    #[test]
    // Purpose
    // -------
    // The report carries the title date, aligned columns, three-decimal R
    // and `nan` for an undefined estimate.
    //
    // Given
    // -----
    // - One region with R = 1.23456 and an undefined aggregate on Apr 02.
    //
    // Expect
    // ------
    // - Title "Estimated R as of Apr 02", a "1.235" row for New York and a
    //   "nan" row for the aggregate, both with "92,381".
    fn summary_lists_regions_then_aggregate() {
        // Arrange
        let table = table();

        // Act
        let text = render_summary(&table, SummaryScope::All);
        let only = render_summary(&table, SummaryScope::AggregateOnly);

        // Assert
        assert!(text.contains("Estimated R as of Apr 02"));
        assert!(text.contains(&format!("   {:>20}    1.235        92,381\n", "New York")));
        assert!(text.contains(&format!("   {:>20}      nan        92,381\n", "All Regions")));
        assert!(!only.contains("New York"));
        assert!(only.contains("All Regions"));
    }
}
