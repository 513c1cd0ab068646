mod logic;

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;
use std::time::Instant;

use logic::{
    ReviewStrategy, generate_console_report, generate_json_report, generate_markdown_report,
    run_strategy,
};

#[derive(Debug, Parser)]
#[command(name = "matpatra-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for the Matpatra game - headless session simulation")]
struct Args {
    /// Clerk strategies to run (comma-separated: diligent,hasty,coin,rubber-stamp,hardliner or "all")
    #[arg(long, default_value = "diligent")]
    strategies: String,

    /// Print the ballot validity rule book and exit
    #[arg(long)]
    list_rules: bool,

    /// Seeds to run per strategy (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Ballots per session queue
    #[arg(long, default_value_t = 25)]
    queue_length: usize,

    /// Simulated seconds the clerk spends on each ballot
    #[arg(long, default_value_t = 3)]
    review_secs: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_rules {
        print_rule_book();
        return Ok(());
    }

    announce_banner();

    let strategies = resolve_strategies(&args.strategies)?;
    let seeds = resolve_seeds(&args.seeds)?;
    log::info!(
        "running {} strategies over {} seeds (queue {}, {}s review pace)",
        strategies.len(),
        seeds.len(),
        args.queue_length,
        args.review_secs
    );

    let start_time = Instant::now();
    let mut results = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let (result, records) =
            run_strategy(strategy, &seeds, args.queue_length, args.review_secs)?;
        if args.verbose {
            for record in &records {
                println!(
                    "  {} seed {} → score {} ({}%, grade {})",
                    result.strategy_name.dimmed(),
                    record.seed,
                    record.stats.score,
                    record.report.accuracy_pct,
                    record.report.grade
                );
            }
        }
        results.push(result);
    }

    match args.report.as_str() {
        "json" => generate_json_report(&results)?,
        "markdown" => generate_markdown_report(&results),
        _ => generate_console_report(&results, start_time.elapsed()),
    }

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "🗳️ Matpatra Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn print_rule_book() {
    println!("{}", "A ballot is VALID when:".bold());
    for rule in matpatra_game::VALID_RULES {
        println!("  • {rule}");
    }
    println!();
    println!("{}", "A ballot is INVALID when:".bold());
    for entry in matpatra_game::INVALID_RULES {
        println!("  {:18} - {}", entry.label, entry.desc);
    }
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn resolve_strategies(input: &str) -> Result<Vec<ReviewStrategy>> {
    let tokens = split_csv(input);
    if tokens.iter().any(|t| t == "all") {
        return Ok(ReviewStrategy::ALL.to_vec());
    }
    let mut strategies = Vec::with_capacity(tokens.len());
    for token in &tokens {
        match ReviewStrategy::parse(token) {
            Some(strategy) => strategies.push(strategy),
            None => bail!("unknown strategy '{token}'"),
        }
    }
    if strategies.is_empty() {
        bail!("no strategies selected");
    }
    Ok(strategies)
}

fn resolve_seeds(input: &str) -> Result<Vec<u64>> {
    let tokens = split_csv(input);
    let mut seeds = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let seed: u64 = token
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid seed '{token}'"))?;
        seeds.push(seed);
    }
    if seeds.is_empty() {
        bail!("no seeds selected");
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_splitting_trims_and_drops_empties() {
        assert_eq!(split_csv("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn strategy_resolution_expands_all() {
        let all = resolve_strategies("all").unwrap();
        assert_eq!(all.len(), ReviewStrategy::ALL.len());

        let picked = resolve_strategies("diligent,hardliner").unwrap();
        assert_eq!(picked, vec![ReviewStrategy::Diligent, ReviewStrategy::Hardliner]);

        assert!(resolve_strategies("bogus").is_err());
        assert!(resolve_strategies("").is_err());
    }

    #[test]
    fn seed_resolution_parses_numbers() {
        assert_eq!(resolve_seeds("1337, 42").unwrap(), vec![1337, 42]);
        assert!(resolve_seeds("nan").is_err());
    }
}
