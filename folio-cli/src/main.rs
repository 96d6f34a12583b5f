// Command-line interface for folio
//
// This binary turns scraped HTML pages into the Markdown content collections a
// static site generator reads. The conversion itself lives in folio-babel; this
// crate only wires configuration, logging and file locations together.
//
// Usage:
//  folio batch [--collection <name>]... [--source <dir>] [--content <dir>]  - Convert a scraped site
//  folio convert <page.html> [--meta <json>] [--collection <name>] [-o <file> | --content <dir>]  - Convert one page
//  folio inspect <record.md>            - Print a record's front matter as JSON
//  folio --list-collections             - List available collections
//
// Extra Parameters:
//
// Any configuration key can be overridden with --extra-<key> <value>, where the key is
// the dotted path into folio.toml. Dashes in the key are read as underscores.
// Example:
//  folio batch --extra-describe.strategy title --extra-record.default-author "Someone"

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use folio_babel::collections::ListingThumbnails;
use folio_babel::publish::{display_path, publish, write_record, PublishArtifact};
use folio_babel::record::FrontMatter;
use folio_babel::source::{load_meta, SourceDocument};
use folio_babel::{BatchRun, BuildContext, Collection, CollectionRegistry, DocumentRecord};
use folio_config::{FolioConfig, Loader};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn collection_arg() -> Arg {
    Arg::new("collection")
        .long("collection")
        .short('c')
        .value_name("NAME")
        .help("Collection to convert into (blog, pages, artworks)")
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert scraped HTML pages into Markdown content collections")
        .long_about(
            "folio converts pages scraped from a hosted site builder into the\n\
            Markdown files, with front matter, that a static site generator reads.\n\n\
            Commands:\n  \
            - batch:   Convert every recognised page in the scrape directory\n  \
            - convert: Convert a single page\n  \
            - inspect: Print the front matter of a generated record\n\n\
            Configuration:\n  \
            Built-in defaults, then ./folio.toml, then --config <file>, then\n  \
            --extra-<key> <value> overrides (e.g. --extra-describe.max_len 120).\n\n\
            Logging:\n  \
            --verbose enables debug output; RUST_LOG takes precedence when set.\n\n\
            Examples:\n  \
            folio batch                                  # Convert the whole site\n  \
            folio batch -c blog                          # Blog posts only\n  \
            folio convert raw/blog-clotting.html         # Print the record to stdout\n  \
            folio inspect src/content/blog/he/clotting.md",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-collections")
                .long("list-collections")
                .help("List available collections")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a folio.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every document and skipped page")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("batch")
                .about("Convert every recognised page in a scrape directory")
                .long_about(
                    "Walk the scrape directory, assign each page to a collection and\n\
                    write its records under the content directory.\n\n\
                    Pages that belong to no collection are skipped. A page that fails\n\
                    to convert is reported and the run continues; the exit status is 1\n\
                    when any page failed.\n\n\
                    Examples:\n  \
                    folio batch                                   # Paths from folio.toml\n  \
                    folio batch -c artworks -c pages              # Two collections\n  \
                    folio batch --source scrape --content out     # Explicit paths",
                )
                .arg(collection_arg().action(ArgAction::Append))
                .arg(
                    Arg::new("source")
                        .long("source")
                        .value_name("DIR")
                        .help("Scrape directory (defaults to paths.source)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("content")
                        .long("content")
                        .value_name("DIR")
                        .help("Content directory (defaults to paths.content)")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a single scraped page")
                .long_about(
                    "Convert one scraped page and its <name>.meta.json sidecar.\n\n\
                    The collection is detected from the file name unless --collection\n\
                    is given. Output goes to stdout by default; use -o for a single\n\
                    file or --content to write into a content directory.\n\n\
                    Examples:\n  \
                    folio convert raw/about.html                        # stdout\n  \
                    folio convert raw/about.html -o about.md            # One file\n  \
                    folio convert raw/art-bw.html --content src/content # Every artwork",
                )
                .arg(
                    Arg::new("input")
                        .help("Scraped HTML page")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("meta")
                        .long("meta")
                        .value_name("JSON")
                        .help("Scrape sidecar to use instead of <name>.meta.json")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(collection_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath)
                        .conflicts_with("content"),
                )
                .arg(
                    Arg::new("content")
                        .long("content")
                        .value_name("DIR")
                        .help("Write records into this content directory")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the front matter of a generated record as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the record")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let matches = build_cli()
        .try_get_matches_from(&cleaned_args)
        .unwrap_or_else(|e| e.exit());

    init_logging(matches.get_flag("verbose"));

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &extra_params,
    );
    let registry = config.registry().unwrap_or_else(|err| {
        eprintln!("Invalid collection configuration: {err}");
        std::process::exit(1);
    });

    if matches.get_flag("list-collections") {
        handle_list_collections_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("batch", sub_matches)) => handle_batch_command(sub_matches, &config, &registry),
        Some(("convert", sub_matches)) => {
            handle_convert_command(sub_matches, &config, &registry)
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            handle_inspect_command(path);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    use log::LevelFilter::*;

    let level = if verbose { Debug } else { Info };
    let _ = env_logger::Builder::new()
        .filter_module("folio", level)
        .filter_module("folio_babel", level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

fn load_cli_config(explicit_path: Option<&str>, extra_params: &HashMap<String, String>) -> FolioConfig {
    let loader = Loader::new().with_optional_file("folio.toml");
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    for (key, value) in extra_params {
        loader = loader
            .set_override(&override_key(key), value.as_str())
            .unwrap_or_else(|err| {
                eprintln!("Invalid override --extra-{key}: {err}");
                std::process::exit(1);
            });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// `record.default-author` -> `record.default_author`
fn override_key(key: &str) -> String {
    key.replace('-', "_")
}

fn context(config: &FolioConfig) -> BuildContext {
    let options = config.pipeline_options().unwrap_or_else(|err| {
        eprintln!("Invalid configuration: {err}");
        std::process::exit(1);
    });
    BuildContext::dated_today(options)
}

/// Handle the batch command
fn handle_batch_command(matches: &ArgMatches, config: &FolioConfig, registry: &CollectionRegistry) {
    let source = path_arg(matches, "source").unwrap_or_else(|| config.paths.source.clone());
    let content = path_arg(matches, "content").unwrap_or_else(|| config.paths.content.clone());
    let collections: Vec<String> = matches
        .get_many::<String>("collection")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let run = BatchRun::new(&source, &content)
        .with_collections(collections)
        .with_listing(config.collections.blog.listing.clone());

    let report = run.execute(registry, context(config)).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let cwd = std::env::current_dir().unwrap_or_default();
    for path in &report.written {
        log::debug!("wrote {}", display_path(path, &cwd));
    }
    for failure in &report.failures {
        eprintln!("{}: {}", display_path(&failure.source, &cwd), failure.error);
    }

    println!(
        "{} records written, {} pages skipped, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failures.len()
    );
    if !report.is_success() {
        std::process::exit(1);
    }
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &FolioConfig, registry: &CollectionRegistry) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let mut source = SourceDocument::load(Path::new(input)).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    if let Some(meta_path) = path_arg(matches, "meta") {
        source.meta = match load_meta(&meta_path) {
            Ok(Some(meta)) => meta,
            Ok(None) => {
                eprintln!("Error: sidecar '{}' not found", meta_path.display());
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
    }

    let collection = resolve_collection(registry, &source, matches.get_one::<String>("collection"));
    let ctx = context(config).with_thumbnails(listing_thumbnails(Path::new(input), config));

    let records = collection.build(&source, &ctx).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });
    if records.is_empty() {
        eprintln!("No records produced from '{input}'");
        std::process::exit(1);
    }

    if let Some(content) = path_arg(matches, "content") {
        for record in &records {
            let path = write_record(&content, record).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });
            log::info!("wrote {}", path.display());
        }
        return;
    }

    let output = path_arg(matches, "output");
    if output.is_some() && records.len() > 1 {
        eprintln!(
            "'{input}' produced {} records; use --content <dir> to write them all",
            records.len()
        );
        std::process::exit(1);
    }
    for record in &records {
        emit(record, output.as_deref());
    }
}

fn emit(record: &DocumentRecord, output: Option<&Path>) {
    match publish(record, output) {
        Ok(PublishArtifact::InMemory(text)) => print!("{text}"),
        Ok(PublishArtifact::File(path)) => log::info!("wrote {}", path.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn resolve_collection<'a>(
    registry: &'a CollectionRegistry,
    source: &SourceDocument,
    explicit: Option<&String>,
) -> &'a dyn Collection {
    let found = match explicit {
        Some(name) => registry.get(name).ok(),
        None => registry.detect_collection(&source.name),
    };
    found.unwrap_or_else(|| {
        match explicit {
            Some(name) => eprintln!("Error: unknown collection '{name}'"),
            None => eprintln!(
                "Error: '{}' matches no collection; pass --collection explicitly",
                source.name
            ),
        }
        std::process::exit(1);
    })
}

/// Listing thumbnails from the listing sidecar next to `input`, if present.
fn listing_thumbnails(input: &Path, config: &FolioConfig) -> ListingThumbnails {
    let dir = input.parent().unwrap_or_else(|| Path::new("."));
    let path = dir.join(format!("{}.meta.json", config.collections.blog.listing));
    match load_meta(&path) {
        Ok(Some(meta)) => ListingThumbnails::from_meta(&meta),
        Ok(None) => ListingThumbnails::default(),
        Err(e) => {
            log::warn!("ignoring listing thumbnails: {e}");
            ListingThumbnails::default()
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str) {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    let (front, _) = FrontMatter::parse(&text).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    match serde_json::to_string_pretty(&front) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the list-collections command
fn handle_list_collections_command(registry: &CollectionRegistry) {
    println!("Available collections:\n");
    for name in registry.list_collections() {
        if let Ok(collection) = registry.get(&name) {
            println!("  {name:<10} {}", collection.description());
        }
    }
}

fn path_arg(matches: &ArgMatches, id: &str) -> Option<PathBuf> {
    matches.get_one::<String>(id).map(PathBuf::from)
}
