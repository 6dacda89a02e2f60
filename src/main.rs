use clap::Parser;
use cfn_tag_lint::cli::Cli;
use cfn_tag_lint::handlers::{LintOptions, handle_lint};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let options = LintOptions {
        templates: cli.templates,
        format: cli.format.map(Into::into),
        output: cli.output,
        config: cli.config,
        ignore_checks: cli.ignore_checks,
        taggable_prefixes: cli.taggable_prefixes,
        threshold: cli.threshold.map(Into::into),
        no_metadata_suppressions: cli.no_metadata_suppressions,
        list_rules: cli.list_rules,
    };

    match handle_lint(options) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
