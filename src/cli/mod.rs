//! Command-line interface for resload.
//!
//! Provides commands for resolving a single resource, listing a category,
//! inspecting slug candidates, listing page routes and showing the resolved
//! configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::core::{candidates, resource_routes, ResourceResolver};
use crate::domain::Category;

/// resload - Resolve packaged content resources by slug
#[derive(Parser, Debug)]
#[command(name = "resload")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Content root (overrides config and RESLOAD_CONTENT_ROOT)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one resource and print it as JSON
    Show {
        /// Category (services, insurances, scholarships, daycares)
        category: String,

        /// Slug in any supported spelling (fes-eo, fesEo)
        slug: String,
    },

    /// Load every resource of a category
    List {
        /// Category (services, insurances, scholarships, daycares)
        category: String,

        /// Print full envelopes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the slug spellings tried for a slug, in order
    Candidates {
        /// Slug to expand
        slug: String,
    },

    /// List page routes of every registered resource
    Routes {
        /// Site base URL (defaults to the configured one)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Show { ref category, ref slug } => {
                show_resource(&self.resolved_config()?, category, slug).await
            }
            Commands::List { ref category, json } => {
                list_category(&self.resolved_config()?, category, json).await
            }
            Commands::Candidates { ref slug } => {
                show_candidates(slug);
                Ok(())
            }
            Commands::Routes { ref base_url } => {
                list_routes(&self.resolved_config()?, base_url.as_deref())
            }
            Commands::Config => {
                show_config(&self.resolved_config()?);
                Ok(())
            }
        }
    }

    /// Global config with the `--root` override applied
    fn resolved_config(&self) -> Result<ResolvedConfig> {
        let mut cfg = config::config()?.clone();
        if let Some(root) = &self.root {
            cfg.content_root = root.clone();
        }
        Ok(cfg)
    }
}

/// Resolve a single resource
async fn show_resource(cfg: &ResolvedConfig, category: &str, slug: &str) -> Result<()> {
    let resolver = ResourceResolver::from_config(cfg);

    let envelope = resolver
        .resolve(category, slug)
        .await
        .ok_or_else(|| anyhow::anyhow!("Resource not found: {}/{}", category, slug))?;

    let json = serde_json::to_string_pretty(&envelope).context("Failed to serialize resource")?;
    println!("{}", json);

    Ok(())
}

/// List a category
async fn list_category(cfg: &ResolvedConfig, category: &str, json: bool) -> Result<()> {
    if category.parse::<Category>().is_err() {
        eprintln!("Unknown category '{}'; expected one of: {}", category, category_names());
    }

    let resolver = ResourceResolver::from_config(cfg);
    let envelopes = resolver
        .load_all(category)
        .await
        .with_context(|| format!("Failed to load {}", category))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&envelopes)?);
        return Ok(());
    }

    if envelopes.is_empty() {
        println!("No resources found");
        return Ok(());
    }

    println!("{:<40} {}", "SLUG", "TITLE");
    println!("{}", "-".repeat(75));
    for envelope in &envelopes {
        println!("{:<40} {}", envelope.slug, envelope.title().unwrap_or("-"));
    }

    Ok(())
}

/// Print candidate spellings
fn show_candidates(slug: &str) {
    for (i, candidate) in candidates(slug).iter().enumerate() {
        println!("{}. {}", i + 1, candidate);
    }
}

/// Print every resource route
fn list_routes(cfg: &ResolvedConfig, base_url: Option<&str>) -> Result<()> {
    let resolver = ResourceResolver::from_config(cfg);
    let base_url = base_url.unwrap_or(&cfg.base_url);

    for route in resource_routes(resolver.registry(), base_url) {
        println!("{}", route);
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) {
    println!("resload configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Content:");
    println!("  Root:        {}", cfg.content_root.display());
    println!("  Extension:   .{}", cfg.extension);
    println!("  Wrapper key: {}", cfg.wrapper_key);
    println!();
    println!("Category directories:");
    for category in Category::ALL {
        println!("  {:<13} {}", category, cfg.category_dir(category).display());
    }
    println!();
    println!("Loading:");
    match cfg.load_timeout {
        Some(timeout) => println!("  Timeout:     {}s", timeout.as_secs()),
        None => println!("  Timeout:     (none)"),
    }
    println!();
    println!(
        "Base URL: {}",
        if cfg.base_url.is_empty() { "(none)" } else { cfg.base_url.as_str() }
    );
}

fn category_names() -> String {
    Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
