use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use serde_json::json;

use evidence_tags_core::config::Config;
use evidence_tags_core::global::build_logged;
use evidence_tags_core::taxonomy::{parse_section_map, profiles_from_section_map};
use evidence_tags_core::{
    install_registry, normalize_tag, normalize_tags, resolve_base_dir, scan_directory,
    CategoryProfile, Registry, ResolveQuery, Resolution, Result, ScanOptions, TaxonomyError,
    EXTENSION_CATEGORIES,
};

mod args;
use args::{Cli, Commands, ConfigAction, RegistryAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let ctx = Context {
        base_dir: resolve_base_dir(cli.base_dir),
        registry_override: cli.registry,
        json: cli.json,
    };

    let result = match cli.command {
        Some(Commands::Resolve {
            category,
            tags,
            file,
        }) => handle_resolve(&ctx, category, tags, file),
        Some(Commands::Normalize { tags }) => handle_normalize(&ctx, &tags),
        Some(Commands::Candidates { tags }) => handle_candidates(&ctx, &tags),
        Some(Commands::Categories { slug }) => handle_categories(&ctx, slug.as_deref()),
        Some(Commands::Extensions) => handle_extensions(&ctx),
        Some(Commands::Registry { action }) => handle_registry(&ctx, action),
        Some(Commands::Scan {
            path,
            exclude,
            matched_only,
        }) => handle_scan(&ctx, &path, exclude, matched_only),
        Some(Commands::Config { action }) => handle_config(action, &ctx.base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

struct Context {
    base_dir: PathBuf,
    registry_override: Option<PathBuf>,
    json: bool,
}

impl Context {
    /// Build the process-wide registry from config (or --registry) and install it
    fn registry(&self) -> Result<&'static Registry> {
        let registry = match &self.registry_override {
            Some(source) => {
                tracing::debug!("Registry source from command line: {}", source.display());
                build_logged(Some(source))
            }
            None => Config::load(&self.base_dir)?.build_registry(&self.base_dir),
        };
        install_registry(registry)
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "evidence_tags_core=debug,evidence_tags=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "evidence-tags", &mut io::stdout());
}

fn handle_resolve(
    ctx: &Context,
    category: Option<String>,
    tags: Vec<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let registry = ctx.registry()?;

    let mut query = ResolveQuery::new().tags(tags);
    query.category = category;
    query.file_path = file;

    let resolution = registry.resolve(&query);
    if ctx.json {
        return print_json(&resolution);
    }

    print_resolution(&resolution);
    Ok(())
}

fn print_resolution(resolution: &Resolution) {
    println!();
    match (&resolution.category, resolution.matched_by) {
        (Some(category), Some(source)) => println!(
            "{} {} {}",
            "Category:".green(),
            category.cyan().bold(),
            format!("(matched by {:?})", source).dimmed()
        ),
        (Some(category), None) => println!(
            "{} {} {}",
            "Category:".yellow(),
            category,
            "(no match)".dimmed()
        ),
        (None, _) => println!("{} {}", "Category:".yellow(), "none".dimmed()),
    }

    if let Some(primary) = &resolution.primary_section {
        println!("{} {}", "Primary section:".green(), primary);
    }
    if !resolution.related_sections.is_empty() {
        println!(
            "{} {}",
            "Related sections:".green(),
            resolution.related_sections.join(", ")
        );
    }
    if !resolution.tags.is_empty() {
        println!("{} {}", "Tags:".green(), resolution.tags.join(", "));
    }
    println!();
}

fn handle_normalize(ctx: &Context, tags: &[String]) -> Result<()> {
    let tokens = normalize_tags(tags);
    if ctx.json {
        return print_json(&tokens);
    }

    for token in tokens {
        println!("{}", token);
    }
    Ok(())
}

fn handle_candidates(ctx: &Context, tags: &[String]) -> Result<()> {
    let registry = ctx.registry()?;
    let slugs = registry.candidates(tags);
    if ctx.json {
        return print_json(&slugs);
    }

    if slugs.is_empty() {
        println!("{}", "No tags given".dimmed());
        return Ok(());
    }
    for slug in slugs {
        println!("{}", slug);
    }
    Ok(())
}

fn handle_categories(ctx: &Context, slug: Option<&str>) -> Result<()> {
    let registry = ctx.registry()?;

    if let Some(slug) = slug {
        let profile = registry
            .get(&normalize_tag(slug))
            .ok_or_else(|| TaxonomyError::UnknownCategory {
                slug: slug.to_string(),
            })?;
        if ctx.json {
            return print_json(profile);
        }
        print_profile(registry, profile);
        return Ok(());
    }

    if ctx.json {
        return print_json(&registry.profiles());
    }

    println!();
    for profile in registry.profiles() {
        println!(
            "  {:<24} {:<28} {}",
            profile.slug.cyan(),
            profile.label,
            profile
                .primary_section
                .as_deref()
                .unwrap_or("-")
                .dimmed()
        );
    }
    println!();
    println!("{} {}", "Total:".green(), registry.len());
    Ok(())
}

fn print_profile(registry: &Registry, profile: &CategoryProfile) {
    println!();
    println!("{} {}", profile.slug.cyan().bold(), format!("({})", profile.label).dimmed());
    println!(
        "  {} {}",
        "Primary section:".green(),
        profile.primary_section.as_deref().unwrap_or("-")
    );
    println!(
        "  {} {}",
        "Related sections:".green(),
        profile.related_section_list().join(", ")
    );
    println!("  {} {}", "Priority:".green(), profile.priority);
    if let Some(keywords) = registry.keywords(&profile.slug) {
        let keywords: Vec<_> = keywords.iter().map(String::as_str).collect();
        println!("  {} {}", "Keywords:".green(), keywords.join(", "));
    }
    println!();
}

fn handle_extensions(ctx: &Context) -> Result<()> {
    if ctx.json {
        let table: serde_json::Map<String, serde_json::Value> = EXTENSION_CATEGORIES
            .iter()
            .map(|(ext, slug)| (ext.to_string(), json!(slug)))
            .collect();
        return print_json(&table);
    }

    for (ext, slug) in EXTENSION_CATEGORIES {
        println!("  {:<10} {}", ext.yellow(), slug);
    }
    Ok(())
}

fn handle_registry(ctx: &Context, action: RegistryAction) -> Result<()> {
    match action {
        RegistryAction::Validate { path } => {
            let text = fs::read_to_string(&path)?;
            let sections = parse_section_map(&text)?;
            let profiles = profiles_from_section_map(&sections);
            let merged = Registry::builtin().with_section_map(&sections);

            if ctx.json {
                return print_json(&json!({
                    "sections": sections.len(),
                    "categories": profiles.len(),
                    "new_categories": merged.len() - Registry::builtin().len(),
                    "fingerprint": merged.fingerprint(),
                }));
            }

            println!("{} {}", "Valid:".green(), path.display());
            println!("  sections:       {}", sections.len());
            println!("  categories:     {}", profiles.len());
            println!(
                "  new categories: {}",
                merged.len() - Registry::builtin().len()
            );
        }
        RegistryAction::Fingerprint => {
            let registry = ctx.registry()?;
            if ctx.json {
                return print_json(&json!({ "fingerprint": registry.fingerprint() }));
            }
            println!("{}", registry.fingerprint());
        }
    }

    Ok(())
}

fn handle_scan(
    ctx: &Context,
    path: &Path,
    exclude: Vec<String>,
    matched_only: bool,
) -> Result<()> {
    let registry = ctx.registry()?;

    let mut options = ScanOptions {
        matched_only,
        ..ScanOptions::default()
    };
    if !exclude.is_empty() {
        options.exclude = exclude;
    }

    let files = scan_directory(path, registry, &options)?;
    if ctx.json {
        return print_json(&files);
    }

    println!();
    for file in &files {
        let category = match (&file.resolution.category, file.resolution.is_match()) {
            (Some(category), true) => category.cyan().to_string(),
            _ => "uncategorized".dimmed().to_string(),
        };
        println!("  {:<24} {}", category, file.path.display());
    }
    println!();

    let matched = files.iter().filter(|f| f.resolution.is_match()).count();
    println!(
        "{} {} of {} files",
        "Matched:".green(),
        matched,
        files.len()
    );
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(TaxonomyError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
