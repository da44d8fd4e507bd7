use colored::*;

use crate::aggregator::RunStats;

/// Render the end-of-run summary printed by the CLI
pub fn render_run_summary(stats: &RunStats) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "API Diff Summary".bold()));
    out.push_str("---------------------------------------------------\n");
    out.push_str(&format!(
        "Started:      {}\n",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Cases:        {} / {}\n", stats.processed, stats.total_cases));
    out.push_str(&format!("With data:    {}\n", stats.with_data));
    out.push_str(&format!("Checkpoints:  {}\n", stats.checkpoints));
    out.push_str(&format!("Elapsed:      {:.2}s\n", stats.elapsed.as_secs_f64()));
    out.push_str("---------------------------------------------------\n");

    let status = if stats.diffs == 0 {
        "✅ No differences".green().bold()
    } else {
        format!("❌ {} case(s) differ", stats.diffs).red().bold()
    };
    out.push_str(&status.to_string());
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;

    fn stats(diffs: usize) -> RunStats {
        RunStats {
            total_cases: 4,
            processed: 4,
            diffs,
            with_data: 3,
            checkpoints: 0,
            started_at: Utc::now(),
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_summary_reports_counts() {
        colored::control::set_override(false);
        let out = render_run_summary(&stats(2));
        assert!(out.contains("Cases:        4 / 4"));
        assert!(out.contains("2 case(s) differ"));
        assert!(out.contains("1.50s"));
    }

    #[test]
    fn test_summary_without_diffs() {
        colored::control::set_override(false);
        assert!(render_run_summary(&stats(0)).contains("No differences"));
    }
}
