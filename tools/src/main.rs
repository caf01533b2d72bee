use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use buildlink_tools::{format_decode_pretty, hex_dump, inspect_code, size_table, InspectReport};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{
    build_slug, decode_build, encode_build_as, Build, CodecLimits, SpecializationCatalog,
    WireVersion,
};
use glob::Pattern;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "buildlink", version, about = "Build code encoding and inspection tools")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a build JSON file into a code.
    Encode {
        /// Path to the build JSON.
        #[arg(long)]
        build: PathBuf,
        /// Specialization catalog JSON.
        #[arg(long)]
        catalog: PathBuf,
        /// Wire version to write.
        #[arg(long, default_value_t = WireVersion::CURRENT)]
        version: WireVersion,
        /// Expected catalog content hash, in hex.
        #[arg(long, value_parser = parse_hash)]
        expect_hash: Option<u64>,
    },
    /// Decode a code into a build.
    Decode {
        /// The build code.
        code: String,
        /// Specialization catalog JSON.
        #[arg(long)]
        catalog: PathBuf,
        /// Expected catalog content hash, in hex.
        #[arg(long, value_parser = parse_hash)]
        expect_hash: Option<u64>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Show transport sizes, version and payload bytes of a code.
    Inspect {
        /// A code, a file holding one, or a directory of such files.
        target: String,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected codes.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected codes (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the content hash of a catalog.
    CatalogHash {
        /// Specialization catalog JSON.
        #[arg(long)]
        catalog: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Encode {
            build,
            catalog,
            version,
            expect_hash,
        } => {
            let catalog = load_catalog(&catalog, expect_hash)?;
            let build = load_build(&build)?;
            let report = encode_build_as(&build, version, &catalog).context("encode build")?;
            println!("{}", report.code);

            eprintln!("slug: {}", build_slug(&build, &catalog));
            eprintln!(
                "{}: {} byte payload, {} char code",
                report.version,
                report.payload_len,
                report.code.len()
            );
            for row in size_table(&build, &catalog)? {
                eprintln!(
                    "  {:<12} payload {:>4}  code {:>4}  warnings {}",
                    row.version.to_string(),
                    row.payload_len,
                    row.code_len,
                    row.warnings
                );
            }
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
        }
        Command::Decode {
            code,
            catalog,
            expect_hash,
            format,
        } => {
            let catalog = load_catalog(&catalog, expect_hash)?;
            let report = decode_build(
                &code,
                &catalog,
                &wire::Limits::default(),
                &CodecLimits::default(),
            )
            .context("decode build")?;
            match format {
                DecodeFormat::Json => {
                    let json =
                        serde_json::to_string_pretty(&report.build).context("serialize json")?;
                    println!("{json}");
                    for warning in &report.warnings {
                        eprintln!("warning: {warning}");
                    }
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&report));
                }
            }
        }
        Command::Inspect {
            target,
            glob,
            sort,
            limit,
        } => {
            let path = Path::new(&target);
            if path.is_dir() {
                let entries = collect_code_entries(path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let code = read_code(&entry.path)?;
                    let report = inspect_code(&code, &wire::Limits::default())
                        .with_context(|| format!("inspect {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_inspect_report(&report);
                }
            } else {
                let code = if path.is_file() {
                    read_code(path)?
                } else {
                    target
                };
                let report = inspect_code(&code, &wire::Limits::default())?;
                print_inspect_report(&report);
            }
        }
        Command::CatalogHash { catalog } => {
            let catalog = load_catalog(&catalog, None)?;
            println!("{:016x}", catalog::catalog_hash(&catalog));
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_hash(value: &str) -> Result<u64, String> {
    let digits = value.trim_start_matches("0x");
    u64::from_str_radix(digits, 16).map_err(|err| format!("invalid catalog hash: {err}"))
}

fn load_catalog(path: &Path, expect_hash: Option<u64>) -> Result<SpecializationCatalog> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    let catalog = match expect_hash {
        Some(hash) => SpecializationCatalog::from_json_pinned(&contents, hash),
        None => SpecializationCatalog::from_json(&contents),
    };
    catalog.with_context(|| format!("load catalog {}", path.display()))
}

fn load_build(path: &Path) -> Result<Build> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read build {}", path.display()))?;
    serde_json::from_str(&contents).context("parse build json")
}

fn read_code(path: &Path) -> Result<String> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read code {}", path.display()))?;
    Ok(contents.trim().to_owned())
}

struct CodeEntry {
    path: PathBuf,
    size: u64,
}

fn collect_code_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<CodeEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(CodeEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<CodeEntry>, sort: Option<InspectSort>) -> Vec<CodeEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    let version = report
        .version
        .map_or_else(|| "empty".to_owned(), |version| version.to_string());
    println!("version: {version}");
    println!(
        "code: {} chars  compressed: {} bytes  payload: {} bytes",
        report.code_len, report.compressed_len, report.payload_len
    );
    if !report.sections.is_empty() {
        println!("sections: {}", report.sections.join(", "));
    }
    println!("{}", hex_dump(&report.payload));
}
