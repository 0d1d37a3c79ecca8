//! Subcommand implementations.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use serde_json::Value;

use ivr_extract::extract_order_form_data;
use ivr_map::{MappingEngine, TransformerRegistry, validate_template_completeness};
use ivr_model::SourceTag;
use ivr_normalize::{merge_records, normalize_record};
use ivr_patterns::PatternRegistry;

use crate::cli::{CompletenessArgs, ExtractArgs, MapArgs, MergeArgs, NormalizeArgs};
use ivr_cli::logging::redact_value;
use crate::summary::{print_completeness, print_extraction};

/// Loads the registry from the override file when given, or the built-ins.
pub fn load_registry(path: Option<&PathBuf>) -> Result<PatternRegistry> {
    match path {
        Some(path) => PatternRegistry::from_json_file(path)
            .with_context(|| format!("failed to load registry from {}", path.display())),
        None => Ok(PatternRegistry::builtin()),
    }
}

pub fn run_extract(args: &ExtractArgs, registry: &PatternRegistry) -> Result<()> {
    let text = read_input(&args.input)?;
    let result = extract_order_form_data(&text, registry)?;
    tracing::info!(
        manufacturer = result.manufacturer.as_deref().unwrap_or("unknown"),
        fields = result.extracted_fields.len(),
        products = result.products.len(),
        warnings = result.warnings.len(),
        "extraction finished"
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_extraction(&result);
    }
    Ok(())
}

pub fn run_normalize(args: &NormalizeArgs, _registry: &PatternRegistry) -> Result<()> {
    let source: SourceTag = args
        .source
        .parse()
        .with_context(|| format!("unrecognized source `{}`", args.source))?;
    let raw = read_json(&args.input)?;
    let (record, report) = normalize_record(&raw, source);
    for issue in &report.issues {
        tracing::warn!(
            field = %issue.field,
            raw = redact_value(&issue.raw),
            reason = ?issue.reason,
            "field did not normalize cleanly"
        );
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    if args.report {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

pub fn run_merge(args: &MergeArgs, _registry: &PatternRegistry) -> Result<()> {
    let mut records = Vec::new();
    for path in &args.inputs {
        let value = read_json(path)?;
        // A normalized record carries `_metadata`; anything else is read as a
        // map of source tags to raw records and normalized on the fly.
        if value.get("_metadata").is_some() {
            let record = serde_json::from_value(value)
                .with_context(|| format!("{} is not a normalized record", path.display()))?;
            records.push(record);
        } else {
            let sources = value.as_object().with_context(|| {
                format!("{} is neither a normalized record nor a source map", path.display())
            })?;
            for (tag, raw) in sources {
                let source: SourceTag = tag
                    .parse()
                    .with_context(|| format!("unrecognized source `{tag}` in {}", path.display()))?;
                let (record, report) = normalize_record(raw, source);
                for issue in &report.issues {
                    tracing::warn!(
                        source = %source,
                        field = %issue.field,
                        raw = redact_value(&issue.raw),
                        reason = ?issue.reason,
                        "field did not normalize cleanly"
                    );
                }
                records.push(record);
            }
        }
    }
    let merged = merge_records(&records)?;
    tracing::info!(
        records = records.len(),
        fields = merged.fields.len(),
        "merge finished"
    );
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

pub fn run_map(args: &MapArgs, registry: &PatternRegistry) -> Result<()> {
    let record = read_json(&args.input)?;
    let transformers = TransformerRegistry::builtin();
    let engine = MappingEngine::for_template(registry, &args.template, &transformers)?;
    let outcome = engine.apply(&record);
    tracing::info!(
        template = %args.template,
        mapped = outcome.mapped.len(),
        unmapped = outcome.unmapped.len(),
        "mapping finished"
    );
    for field in &outcome.unmapped {
        tracing::warn!(field = %field, "no rule resolved a value");
    }
    println!("{}", serde_json::to_string_pretty(&outcome.output)?);
    Ok(())
}

pub fn run_completeness(args: &CompletenessArgs, registry: &PatternRegistry) -> Result<()> {
    let record = read_json(&args.input)?;
    let report =
        validate_template_completeness(registry, &args.manufacturer, &args.template, &record)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_completeness(&report);
    }
    Ok(())
}

pub fn run_registry(registry: &PatternRegistry) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Manufacturer", "Identifiers", "Labeled fields"]);
    for profile in registry.manufacturers() {
        table.add_row(vec![
            profile.name.clone(),
            profile.identifier_keywords.join(", "),
            profile.field_label_variants.len().to_string(),
        ]);
    }
    println!("{table}");
    println!("Templates: {}", registry.template_names().join(", "));
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}
