use asset_pipeline::config::{self, PipelineConfig};
use asset_pipeline::fileops::{self, ApplyOptions};
use asset_pipeline::imaging::{Quality, RustBackend};
use asset_pipeline::mapping::MappingDocument;
use asset_pipeline::output::{self, OpKind};
use asset_pipeline::{convert, metadata, mirror, rename, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shared flags for the tools that read both trees.
#[derive(clap::Args, Clone)]
struct TreeArgs {
    /// Directory of original images [config: paths.assets]
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Directory of converted WebP files [config: paths.optimized]
    #[arg(long)]
    optimized: Option<PathBuf>,
}

impl TreeArgs {
    fn assets(&self, config: &PipelineConfig) -> PathBuf {
        self.assets.clone().unwrap_or_else(|| config.paths.assets.clone())
    }

    fn optimized(&self, config: &PipelineConfig) -> PathBuf {
        self.optimized
            .clone()
            .unwrap_or_else(|| config.paths.optimized.clone())
    }
}

/// Shared flags for the tools that move files.
#[derive(clap::Args, Clone)]
struct ApplyArgs {
    /// Print what would happen without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Overwrite destinations that already exist
    #[arg(long)]
    force: bool,
}

impl From<&ApplyArgs> for ApplyOptions {
    fn from(args: &ApplyArgs) -> Self {
        ApplyOptions {
            dry_run: args.dry_run,
            force: args.force,
        }
    }
}

#[derive(Parser)]
#[command(name = "asset-pipeline")]
#[command(about = "Convert, rename, organize and describe static site images")]
#[command(long_about = "\
Convert, rename, organize and describe static site images

Originals and their WebP conversions live in two parallel trees and are
matched by base name (file name without extension):

  assets/                          assets_optimized/
  ├── landing/                     ├── landing/
  │   └── IMG_2041.JPG      ←→     │   └── IMG_2041.webp
  └── gallery/                     └── gallery/
      └── dash.png          ←→         └── dash.webp

Typical order:
  convert    originals → WebP, same relative directories
  rename     apply mapping.json { \"IMG_2041\": \"engine_hood\" } to both trees
  mirror     move originals into the directories the WebP files live in
  metadata   write dimensions, orientation and layout hints per image

Run 'asset-pipeline gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (optional; stock defaults apply when it does not exist)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert png/jpg/jpeg images to WebP, preserving directory structure
    Convert {
        /// Input directory or single image [config: paths.assets]
        input: Option<PathBuf>,

        /// Output directory [config: convert.output]
        #[arg(long)]
        output: Option<PathBuf>,

        /// WebP quality 0-100 [config: convert.quality]
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        quality: Option<u32>,
    },
    /// Rename originals and converted files according to the mapping
    Rename {
        /// Rename mapping JSON [config: paths.mapping]
        #[arg(long)]
        mapping: Option<PathBuf>,

        #[command(flatten)]
        trees: TreeArgs,

        #[command(flatten)]
        apply: ApplyArgs,
    },
    /// Move originals into the subdirectories their conversions live in
    Mirror {
        #[command(flatten)]
        trees: TreeArgs,

        #[command(flatten)]
        apply: ApplyArgs,
    },
    /// Write per-image dimensions, orientation and layout suggestions
    Metadata {
        /// Rename mapping JSON [config: paths.mapping]
        #[arg(long)]
        mapping: Option<PathBuf>,

        #[command(flatten)]
        trees: TreeArgs,

        /// Metadata JSON output [config: paths.metadata]
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also store the metadata in the mapping file under "metadata"
        #[arg(long)]
        merge_into_mapping: bool,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let load_config = || config::load_config(&cli.config);

    match cli.command {
        Command::Convert {
            input,
            output,
            quality,
        } => {
            let config = load_config()?;
            let input = input.unwrap_or_else(|| config.paths.assets.clone());
            let output_dir = output.unwrap_or_else(|| config.convert_output().to_path_buf());
            let quality = Quality::new(quality.unwrap_or(config.convert.quality));

            let plan = convert::plan_conversions(&input, &output_dir)?;
            for skipped in &plan.skipped {
                println!("{}", output::format_skipped_input(skipped));
            }
            let outcomes =
                convert::convert_all(&RustBackend::new(), &plan, quality, output::print_convert_outcome);
            println!("{}", output::format_convert_summary(&outcomes));
        }
        Command::Rename {
            mapping,
            trees,
            apply,
        } => {
            let config = load_config()?;
            let mapping = mapping.unwrap_or_else(|| config.paths.mapping.clone());
            let pairs = MappingDocument::load(&mapping)?.rename_pairs();

            let ops = rename::plan_renames(&pairs, &trees.assets(&config), &trees.optimized(&config));
            output::print_plan(OpKind::Rename, &ops);
            if !ops.is_empty() {
                let results = fileops::apply(&ops, (&apply).into());
                output::print_apply_results(OpKind::Rename, &results);
            }
        }
        Command::Mirror { trees, apply } => {
            let config = load_config()?;
            let assets = trees.assets(&config);
            let structure = scan::scan_structure(&trees.optimized(&config));

            let ops = mirror::plan_moves(&assets, &structure);
            output::print_plan(OpKind::Move, &ops);
            if !ops.is_empty() {
                let results = fileops::apply(&ops, (&apply).into());
                output::print_apply_results(OpKind::Move, &results);
            }
        }
        Command::Metadata {
            mapping,
            trees,
            out,
            merge_into_mapping,
        } => {
            let config = load_config()?;
            let mapping = mapping.unwrap_or_else(|| config.paths.mapping.clone());
            let out = out.unwrap_or_else(|| config.paths.metadata.clone());
            let pairs = MappingDocument::load(&mapping)?.rename_pairs();

            let report = metadata::build_metadata(
                &RustBackend::new(),
                &pairs,
                &trees.assets(&config),
                &trees.optimized(&config),
            );
            metadata::write_metadata(&out, &report)?;
            println!("{}", output::format_metadata_written(report.len(), &out));

            if merge_into_mapping {
                metadata::merge_into_mapping(&mapping, &report)?;
                println!("{}", output::format_metadata_merged(&mapping));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` can narrow or widen per target.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
