//! `stats` command: combined monthly statistics as a table or JSON.

use rust_decimal::prelude::ToPrimitive;
use salesdb_core::Month;
use salesdb_db::CombinedStatistics;

/// Print the combined statistics for `month`.
///
/// # Errors
///
/// Returns an error if any of the statistics queries fail.
pub(crate) async fn run_stats(pool: &sqlx::PgPool, month: Month, json: bool) -> anyhow::Result<()> {
    let combined = salesdb_db::combined_statistics(pool, month).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&combined_json(&combined))?);
    } else {
        print!("{}", render_report(month, &combined));
    }
    Ok(())
}

/// JSON shape matching the HTTP `combined-statistics` payload.
fn combined_json(combined: &CombinedStatistics) -> serde_json::Value {
    let pie: Vec<serde_json::Value> = combined
        .pie_chart
        .iter()
        .map(|row| serde_json::json!({ "category": row.category, "itemCount": row.item_count }))
        .collect();

    serde_json::json!({
        "statistics": {
            "totalSalesAmount": combined.statistics.total_sales_amount.to_f64(),
            "totalSoldItems": combined.statistics.total_sold_items,
            "totalNotSoldItems": combined.statistics.total_not_sold_items,
        },
        "barChartData": combined.bar_chart,
        "pieChartData": pie,
    })
}

fn render_report(month: Month, combined: &CombinedStatistics) -> String {
    let stats = &combined.statistics;
    let mut lines = vec![
        format!("Sales statistics for {}", month.name()),
        format!("  {:<20}{}", "Total sales amount", stats.total_sales_amount.round_dp(2)),
        format!("  {:<20}{}", "Sold items", stats.total_sold_items),
        format!("  {:<20}{}", "Not sold items", stats.total_not_sold_items),
        String::new(),
        format!("{:<14}ITEMS", "PRICE RANGE"),
    ];
    lines.extend(
        combined
            .bar_chart
            .iter()
            .map(|band| format!("{:<14}{}", band.range, band.count)),
    );
    lines.push(String::new());

    if combined.pie_chart.is_empty() {
        lines.push(format!(
            "no sales in {}; run `seed` first if the store is empty",
            month.name()
        ));
    } else {
        lines.push(format!("{:<24}ITEMS", "CATEGORY"));
        lines.extend(combined.pie_chart.iter().map(|row| {
            format!(
                "{:<24}{}",
                row.category.as_deref().unwrap_or("(none)"),
                row.item_count
            )
        }));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
