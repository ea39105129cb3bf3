use crate::metrics::ErrorRate;
use crate::runner::types::{IterationReport, RunSummary};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

pub struct RunReporter {
    verbose: bool,
}

impl RunReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// 打印压测开始信息
    pub fn print_header(&self, base_url: &str, users: usize) {
        println!(
            "\nRunning inventory scenario against {} with {} virtual user(s)...\n",
            base_url.bold(),
            users
        );
    }

    /// 打印单次迭代结果（verbose 模式逐步输出）
    pub fn print_iteration(&self, report: &IterationReport) {
        if !self.verbose && report.passed() {
            return;
        }

        for (index, step) in report.steps.iter().enumerate() {
            let symbol = if step.passed() { "✓" } else { "✗" };
            let color = if step.passed() { "green" } else { "red" };

            println!(
                " {} [{}] {} - {} {} {} ({}ms)",
                symbol.color(color),
                index + 1,
                step.step_name,
                step.method.cyan(),
                step.url,
                step.status,
                step.duration.as_millis()
            );

            if let Some(error) = &step.transport_error {
                println!("   {}: {}", "Error".red().bold(), error);
            }

            // 失败的检查总是展示，verbose 模式连同通过的一起展示
            for check in &step.checks {
                if check.passed {
                    if self.verbose {
                        println!("     {} {}", "✓".green(), check.name);
                    }
                } else {
                    println!("     {} {}", "✗".red(), check.name);
                    if let Some(detail) = &check.detail {
                        println!("       {}", detail.red());
                    }
                }
            }
        }
        println!();
    }

    /// 打印压测摘要
    pub fn print_summary(&self, summary: &RunSummary, signal: &ErrorRate) {
        println!("\n{}", "━".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "━".repeat(60));

        if summary.failed_steps == 0 {
            println!(
                "  {}: {} iterations, {} steps, all passed",
                "Run".bold(),
                summary.iterations,
                summary.total_steps
            );
        } else {
            println!(
                "  {}: {} iterations, {} steps, {} failed",
                "Run".bold(),
                summary.iterations,
                summary.total_steps,
                summary.failed_steps.to_string().red()
            );
        }

        if summary.failed_checks == 0 {
            println!(
                "  {}: {} passed, {} total",
                "Checks".bold(),
                summary.total_checks.to_string().green(),
                summary.total_checks
            );
        } else {
            println!(
                "  {}: {} passed, {} failed, {} total",
                "Checks".bold(),
                (summary.total_checks - summary.failed_checks)
                    .to_string()
                    .green(),
                summary.failed_checks.to_string().red(),
                summary.total_checks
            );
        }

        let rate_line = format!(
            "{:.2}% ({}/{} samples)",
            signal.rate() * 100.0,
            signal.failures(),
            signal.samples()
        );
        if signal.failures() == 0 {
            println!("  {}: {}", "Error rate".bold(), rate_line.green());
        } else {
            println!("  {}: {}", "Error rate".bold(), rate_line.red());
        }

        println!(
            "  {}: {:.3}s",
            "Duration".bold(),
            summary.wall_clock.as_secs_f64()
        );

        if !summary.per_step.is_empty() {
            println!();
            println!("{}", self.step_table(summary));
        }
        println!();
    }

    fn step_table(&self, summary: &RunSummary) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Step", "Requests", "Failures", "Min", "Avg", "Max"]);

        for stats in &summary.per_step {
            let failure_color = if stats.failures == 0 {
                Color::Green
            } else {
                Color::Red
            };

            table.add_row(vec![
                Cell::new(&stats.name),
                Cell::new(stats.requests),
                Cell::new(stats.failures).fg(failure_color),
                Cell::new(format!("{}ms", stats.min_ms)),
                Cell::new(format!("{}ms", stats.avg_ms)),
                Cell::new(format!("{}ms", stats.max_ms)),
            ]);
        }

        table
    }
}

impl Default for RunReporter {
    fn default() -> Self {
        Self::new(false)
    }
}
