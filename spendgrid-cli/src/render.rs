//! Plain-text and CSV renderings of a monthly report

use anyhow::{Context, Result};
use spendgrid_finance::{ChartSeries, MonthlyReport, TopSpends};
use std::io::Write;
use std::path::Path;

/// Monthly totals table, one row per month
pub fn write_summary(out: &mut impl Write, report: &MonthlyReport, show_unmatched: bool) -> Result<()> {
    writeln!(out, "--- Monthly Spends Summary ---")?;

    let mut header = format!("{:<15}", "Month");
    for m in &report.merchants {
        header.push_str(&format!(" | {:<10}", m));
    }
    if show_unmatched {
        header.push_str(&format!(" | {:<10}", "Other"));
    }
    writeln!(out, "{}", header.trim_end())?;
    writeln!(out, "{}", "-".repeat(header.trim_end().len()))?;

    for row in &report.summary {
        let mut line = format!("{:<15}", row.label);
        for m in &row.merchants {
            line.push_str(&format!(" | {:<10.2}", m.amount));
        }
        if show_unmatched {
            line.push_str(&format!(" | {:<10.2}", row.unmatched));
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Largest transactions of the latest month
pub fn write_top_spends(out: &mut impl Write, top: &TopSpends) -> Result<()> {
    writeln!(out, "--- Top {} Spends ({}) ---", top.rows.len(), top.label)?;
    writeln!(out, "{:<11} | {:<50} | {:>14}", "Date", "Description", "Amount (INR)")?;
    writeln!(out, "{}", "-".repeat(81))?;
    for row in &top.rows {
        writeln!(out, "{:<11} | {:<50} | {:>14}", row.date, row.description, row.amount)?;
    }
    Ok(())
}

pub fn write_failed(out: &mut impl Write, report: &MonthlyReport) -> Result<()> {
    if report.failed.is_empty() {
        return Ok(());
    }
    writeln!(out, "--- Failed Documents ---")?;
    for f in &report.failed {
        writeln!(out, "{} ({}): {}", f.name, f.month.label(), f.reason)?;
    }
    Ok(())
}

pub fn write_report(out: &mut impl Write, report: &MonthlyReport, show_unmatched: bool) -> Result<()> {
    write_summary(out, report, show_unmatched)?;
    if let Some(top) = &report.top_spends {
        writeln!(out)?;
        write_top_spends(out, top)?;
    }
    if !report.failed.is_empty() {
        writeln!(out)?;
        write_failed(out, report)?;
    }
    Ok(())
}

/// Chart series as CSV: `month,<merchant>...`, one record per month
pub fn write_series_csv(path: &Path, chart: &ChartSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;

    let mut header = vec!["month".to_string()];
    header.extend(chart.series.iter().map(|s| s.merchant.clone()));
    wtr.write_record(&header)?;

    for (i, month) in chart.months.iter().enumerate() {
        let mut record = vec![month.clone()];
        record.extend(chart.series.iter().map(|s| format!("{:.2}", s.values[i])));
        wtr.write_record(&record)?;
    }
    wtr.flush().with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendgrid_core::{MonthKey, RawGrid};
    use spendgrid_finance::{StatementAnalyzer, StatementRun};

    fn report() -> MonthlyReport {
        let analyzer = StatementAnalyzer::default();
        let mut run = StatementRun::new(&analyzer);
        let month: MonthKey = "2025-02".parse().unwrap();
        run.process(
            "Feb_2025_card.csv",
            month,
            Ok(vec![RawGrid::from_rows(vec![
                vec!["01/02/2025", "SWIGGY ORDER", "1,450.50"],
                vec!["02/02/2025", "AMAZON", "99.00"],
            ])]),
        );
        run.process("Mar_2025_card.csv", "2025-03".parse().unwrap(), Ok(vec![]));
        run.finish(15, 50).unwrap()
    }

    #[test]
    fn test_summary_table() {
        let mut out = Vec::new();
        write_summary(&mut out, &report(), true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[1], "Month           | Swiggy     | Zomato     | Blinkit    | Other");
        assert!(lines[2].chars().all(|c| c == '-'));
        assert_eq!(lines[3], "Feb 2025        | 1450.50    | 0.00       | 0.00       | 99.00");
    }

    #[test]
    fn test_full_report_lists_failures() {
        let mut out = Vec::new();
        write_report(&mut out, &report(), false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("--- Top 2 Spends (Feb 2025) ---"));
        assert!(text.contains("01 Feb 2025"));
        assert!(text.contains("1,450.50"));
        assert!(text.contains("Mar_2025_card.csv (Mar 2025)"));
        assert!(!text.contains("Other"));
    }

    #[test]
    fn test_series_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        write_series_csv(&path, &report().chart).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "month,Swiggy\nFeb 2025,1450.50\n");
    }
}
