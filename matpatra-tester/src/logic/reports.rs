use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

use crate::logic::simulation::StrategyResult;

pub fn generate_console_report(results: &[StrategyResult], total_duration: Duration) {
    println!();
    println!("{}", "📊 Shift Simulation Summary".bright_cyan().bold());
    println!("{}", "===========================".cyan());

    let total_runs = results.len();
    let passed_runs = results.iter().filter(|r| r.passed).count();
    let failed_runs = total_runs - passed_runs;

    println!("Strategies run: {total_runs}");
    println!("Passed: {}", passed_runs.to_string().green());
    println!("Failed: {}", failed_runs.to_string().red());
    println!("Total time: {total_duration:?}");
    println!();

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        println!("{} {}", status, result.strategy_name.bold());
        println!("   Sessions: {}", result.sessions_run);
        println!(
            "   Avg score: {:.1} · Avg accuracy: {:.1}%",
            result.avg_score, result.avg_accuracy_pct
        );
        println!("   Grades: {}", result.grades.join(" "));

        if !result.failures.is_empty() {
            println!("   Failures:");
            for failure in &result.failures {
                println!("     • {}", failure.red());
            }
        }
        println!();
    }
}

pub fn generate_json_report(results: &[StrategyResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    println!("{json_output}");
    Ok(())
}

pub fn generate_markdown_report(results: &[StrategyResult]) {
    println!("# Matpatra Shift Simulation Results\n");
    println!(
        "_Generated {}_\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let total_runs = results.len();
    let passed_runs = results.iter().filter(|r| r.passed).count();

    println!("## Summary\n");
    println!("- **Strategies run**: {total_runs}");
    println!("- **Passed**: {passed_runs}");
    println!("- **Failed**: {}\n", total_runs - passed_runs);

    println!("## Detailed Results\n");
    println!("| Strategy | Sessions | Avg Score | Avg Accuracy | Grades |");
    println!("|---|---|---|---|---|");
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        println!(
            "| {status} {} | {} | {:.1} | {:.1}% | {} |",
            result.strategy_name,
            result.sessions_run,
            result.avg_score,
            result.avg_accuracy_pct,
            result.grades.join(" ")
        );
    }
    println!();

    for result in results.iter().filter(|r| !r.failures.is_empty()) {
        println!("### ❌ {}\n", result.strategy_name);
        for failure in &result.failures {
            println!("- {failure}");
        }
        println!();
    }
}
