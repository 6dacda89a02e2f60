use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::analyzer::cfnlint::{
    LintConfig, LintConfigBuilder, OutputFormat, Severity, Taxonomy, exit_code, format_results,
    lint_files, rule_definitions,
};
use crate::config;
use crate::error::{CfnTagLintError, ConfigError};

/// File extensions picked up when walking a directory.
pub const TEMPLATE_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "template"];

/// Options for the lint command, as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct LintOptions {
    pub templates: Vec<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub ignore_checks: Vec<String>,
    pub taggable_prefixes: Vec<String>,
    pub threshold: Option<Severity>,
    pub no_metadata_suppressions: bool,
    pub list_rules: bool,
}

/// Run the linter and return the process exit code.
pub fn handle_lint(options: LintOptions) -> crate::Result<i32> {
    let working_dir = std::env::current_dir()?;
    let file_config = config::load_config(options.config.as_deref(), &working_dir)?;

    let format = match options.format {
        Some(format) => format,
        None => match &file_config.output.format {
            Some(name) => OutputFormat::parse(name).ok_or_else(|| ConfigError::InvalidValue {
                field: "output.format".to_string(),
                reason: format!("unknown format '{name}'"),
            })?,
            None => OutputFormat::default(),
        },
    };

    let lint_config = build_lint_config(&options, &file_config.lint)?;

    if options.list_rules {
        write_report(&format_rule_list(&lint_config), options.output.as_deref())?;
        return Ok(0);
    }

    let roots = if options.templates.is_empty() {
        vec![working_dir]
    } else {
        options.templates.clone()
    };
    let files = collect_templates(&roots)?;
    info!("Found {} template(s)", files.len());

    let results = lint_files(&files, &lint_config);
    write_report(&format_results(&results, format), options.output.as_deref())?;

    Ok(exit_code(&results))
}

/// Merge file settings with command line overrides.
fn build_lint_config(
    options: &LintOptions,
    settings: &config::types::LintSettings,
) -> crate::Result<LintConfig> {
    let mut lint_config = LintConfigBuilder::new().from_settings(settings)?.build();

    for selector in &options.ignore_checks {
        lint_config = lint_config.ignore(selector.trim());
    }

    if !options.taggable_prefixes.is_empty() {
        lint_config =
            lint_config.with_taxonomy(Taxonomy::new(options.taggable_prefixes.iter().cloned())?);
    }

    if let Some(threshold) = options.threshold {
        lint_config = lint_config.with_threshold(threshold);
    }

    if options.no_metadata_suppressions {
        lint_config = lint_config.with_metadata_suppressions(false);
    }

    debug!(
        "Taggable prefixes: {}",
        lint_config.taxonomy.prefixes().join(", ")
    );
    Ok(lint_config)
}

/// Expand files and directories into a sorted, de-duplicated template list.
///
/// Files named explicitly are linted whatever their extension; directories
/// are walked for template extensions, skipping hidden entries.
pub fn collect_templates(paths: &[PathBuf]) -> crate::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(CfnTagLintError::TemplateNotFound(path.clone()));
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|e| readable_entry(path, e))
            .filter(|e| e.file_type().is_file() && has_template_extension(e.path()))
            .map(DirEntry::into_path)
            .collect();
        found.sort();
        debug!("{}: {} template(s)", path.display(), found.len());
        files.extend(found);
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Ok(files)
}

fn readable_entry(root: &Path, entry: walkdir::Result<DirEntry>) -> Option<DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(err) => {
            warn!("Skipping unreadable entry under {}: {}", root.display(), err);
            None
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_template_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Render the `--list-rules` listing.
pub fn format_rule_list(config: &LintConfig) -> String {
    let mut output = String::new();

    for def in rule_definitions(config) {
        output.push_str(&format!(
            "{} {} ({})\n    {}\n    {}\n    tags: {}\n",
            def.code,
            def.name,
            def.severity,
            def.short_description,
            def.description,
            def.tags.join(", ")
        ));
    }

    output.push_str("\nTaggable resource type prefixes:\n");
    for prefix in config.taxonomy.prefixes() {
        output.push_str(&format!("    {}\n", prefix));
    }

    output
}

fn write_report(report: &str, output: Option<&Path>) -> crate::Result<()> {
    match output {
        Some(path) => fs::write(path, report)
            .map_err(|e| CfnTagLintError::Output(format!("{}: {}", path.display(), e))),
        None => {
            print!("{}", report);
            Ok(())
        }
    }
}
