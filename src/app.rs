use crate::cli::{Cli, Commands};
use crate::errors::ConfigError;
use crate::generator::{self, BodyKind, CountRange, GenerateOptions, Layout};
use crate::metadata::{self, CollectOptions, Git, Strategy};
use crate::utils::config::{self, Config};
use crate::utils::repo_root;
use clap::CommandFactory;
use clap_complete::generate;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUT_DIR: &str = "src/content/generated";
pub const DEFAULT_FILE_COUNT: usize = 10;
pub const DEFAULT_ANALYZE_DIR: &str = "src/content";
pub const DEFAULT_METADATA_OUTPUT: &str = "src/data/last-modified.json";

fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => config::load_config_at(p),
        None => Ok(config::load_config_near(Path::new("."))?.unwrap_or_default()),
    }
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success).
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    let cfg = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            return 1;
        }
    };

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            0
        }
        Commands::Generate { out_dir, count, layout, body, min, max, clean, no_clean } => {
            let gen_cfg = cfg.generate.unwrap_or_default();
            let out_dir = out_dir
                .or(gen_cfg.out_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
            let file_count = count.or(gen_cfg.count).unwrap_or(DEFAULT_FILE_COUNT);
            let layout: Layout = layout.map(Into::into).or(gen_cfg.layout).unwrap_or_default();
            let body: BodyKind = body.map(Into::into).or(gen_cfg.body).unwrap_or_default();
            let defaults = body.default_range();
            let range = match CountRange::new(
                min.or(gen_cfg.min).unwrap_or(defaults.min()),
                max.or(gen_cfg.max).unwrap_or(defaults.max()),
            ) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{e}");
                    return 1;
                }
            };
            let clean_flag = match (clean, no_clean) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let clean = clean_flag.or(gen_cfg.clean).unwrap_or(false);

            let opts = GenerateOptions { out_dir, file_count, layout, body, range, clean };
            let report = match generator::generate(&opts) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Generate failed: {e}");
                    return 1;
                }
            };
            if !cli.quiet {
                if let Some(c) = report.cleanup {
                    println!(
                        "Deleted {} generated files and {} empty directories in {}",
                        c.deleted_files,
                        c.removed_dirs,
                        opts.out_dir.display()
                    );
                }
                println!("Generated {} files in {}", report.written.len(), opts.out_dir.display());
            }
            0
        }
        Commands::Clean { dir } => {
            let dir = dir
                .or_else(|| cfg.generate.and_then(|g| g.out_dir))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
            match generator::cleanup(&dir) {
                Ok(report) => {
                    if !cli.quiet {
                        println!(
                            "Deleted {} generated files and {} empty directories in {}",
                            report.deleted_files,
                            report.removed_dirs,
                            dir.display()
                        );
                    }
                    0
                }
                Err(e) => {
                    eprintln!("Clean failed: {e}");
                    1
                }
            }
        }
        Commands::Collect { repo_root: root, analyze_dir, output, strategy } => {
            let col_cfg = cfg.collect.unwrap_or_default();
            let root = root.or(col_cfg.repo_root).unwrap_or_else(|| repo_root::detect(None));
            info!("Using repository root: {}", root.display());
            let mut opts = CollectOptions::new(
                &root,
                analyze_dir
                    .or(col_cfg.analyze_dir)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_ANALYZE_DIR)),
                output
                    .or(col_cfg.output)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_METADATA_OUTPUT)),
            );
            opts.strategy = strategy.map(Strategy::from).or(col_cfg.strategy).unwrap_or_default();

            let git = Git::new(&root);
            match metadata::collect_with(&git, &opts) {
                Ok(index) => {
                    if !cli.quiet {
                        println!(
                            "Wrote {} entries to {}",
                            index.len(),
                            opts.output_path().display()
                        );
                    }
                    0
                }
                Err(e) => {
                    eprintln!("Collect failed: {e}");
                    1
                }
            }
        }
    }
}
