//! CLI harness around the symbol-link transform: rewrite mdast JSON
//! documents, inspect the symbol index, resolve single expressions, and
//! watch inputs for changes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use tsdoc_links::config::Config;
use tsdoc_links::diagnostics;
use tsdoc_links::error::Error;
use tsdoc_links::index::shadowed_expressions;
use tsdoc_links::kinds::SchemaProfile;
use tsdoc_links::mdast::MdNode;
use tsdoc_links::rewrite::{LinkTransformer, transformer};
use tsdoc_links::types::{Options, Reflection};
use tsdoc_links::watch;

/// Suffix identifying transformable documents in directory mode.
const DOCUMENT_SUFFIX: &str = ".mdast.json";

#[derive(Parser)]
#[command(
    name = "tsdoc-links",
    about = "Resolve [[symbol]] cross-references in markdown ASTs against a TypeDoc reflection tree"
)]
/// Top-level CLI definition.
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand; `.tsdoc-links.toml` supplies defaults.
#[derive(Args)]
struct CommonOpts {
    /// Path to the documentation-model JSON file
    #[arg(long, value_name = "FILE")]
    typedoc: Option<PathBuf>,

    /// URL prefix for generated documentation pages
    #[arg(long, value_name = "PATH")]
    base_path: Option<String>,

    /// Documentation-model schema profile
    #[arg(long, value_enum)]
    schema: Option<SchemaProfile>,

    /// Preserve symbol casing in generated paths
    #[arg(long)]
    no_fold_case: bool,

    /// Warn on stderr for every unresolved symbol
    #[arg(long)]
    development: bool,
}

#[derive(Subcommand)]
/// Available subcommands.
enum Commands {
    /// Rewrite symbol links in one mdast JSON document, or in every
    /// *.mdast.json file under a directory (in place)
    Transform {
        /// Document file or directory of documents
        doc: PathBuf,
        /// Write the rewritten document here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Overwrite the input document
        #[arg(long)]
        in_place: bool,
        /// Shared resolution flags.
        #[command(flatten)]
        common: CommonOpts,
    },
    /// Print every symbol expression in the index with its resolved URL
    Index {
        /// Shared resolution flags.
        #[command(flatten)]
        common: CommonOpts,
    },
    /// Resolve one symbol expression
    Link {
        /// Symbol expression, e.g. Engine.start
        symbol: String,
        /// Shared resolution flags.
        #[command(flatten)]
        common: CommonOpts,
    },
    /// Transform a directory, then re-transform on filesystem changes
    Watch {
        /// Directory of *.mdast.json documents
        dir: PathBuf,
        /// Shared resolution flags.
        #[command(flatten)]
        common: CommonOpts,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    return match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Dispatch the parsed command.
///
/// # Errors
///
/// Returns errors from config loading, input parsing, or the command itself.
fn run(command: Commands) -> Result<ExitCode, Error> {
    let config = Config::load(Path::new("."))?;

    return match command {
        Commands::Transform { doc, output, in_place, common } => {
            let session = transformer(build_options(&common, &config)?);
            cmd_transform(&session, &doc, output.as_deref(), in_place)
        },
        Commands::Index { common } => cmd_index(&common, &config),
        Commands::Link { symbol, common } => {
            let session = transformer(build_options(&common, &config)?);
            cmd_link(&session, &symbol)
        },
        Commands::Watch { dir, common } => cmd_watch(&dir, &common, &config),
    };
}

/// Merge CLI flags over config-file values into transform options.
///
/// # Errors
///
/// Returns `Error::ReflectionNotFound` or `Error::Json` when the
/// documentation-model file is missing or malformed.
fn build_options(common: &CommonOpts, config: &Config) -> Result<Options, Error> {
    let typedoc = common.typedoc.clone().or_else(|| config.typedoc.clone());
    let reflection = match typedoc {
        Some(path) => Some(load_reflection(&path)?),
        None => None,
    };

    let schema = common
        .schema
        .or(config.schema)
        .unwrap_or(SchemaProfile::Modern);
    let fold_case = if common.no_fold_case {
        false
    } else {
        config.fold_case.unwrap_or(true)
    };

    let defaults = Options::default();
    return Ok(Options {
        reflection,
        base_path: common
            .base_path
            .clone()
            .or_else(|| config.base_path.clone())
            .unwrap_or_else(|| "/".to_string()),
        profile: schema.kind_profile(),
        fold_case,
        link_class: config.style.link_class.clone().unwrap_or(defaults.link_class),
        aliased_class: config
            .style
            .aliased_class
            .clone()
            .unwrap_or(defaults.aliased_class),
        missing_class: config
            .style
            .missing_class
            .clone()
            .unwrap_or(defaults.missing_class),
        title_message: None,
        development: common.development || config.development.unwrap_or(false),
    });
}

/// Read and parse a documentation-model JSON file.
///
/// # Errors
///
/// Returns `Error::ReflectionNotFound` when the file is absent,
/// `Error::Io` for other read failures, or `Error::Json` on parse failure.
fn load_reflection(path: &Path) -> Result<Reflection, Error> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::ReflectionNotFound {
                path: path.to_path_buf(),
            });
        },
        Err(e) => return Err(Error::Io(e)),
    };

    return serde_json::from_str(&content).map_err(|source| Error::Json {
        file: path.to_path_buf(),
        source,
    });
}

/// Read and parse one mdast JSON document.
///
/// # Errors
///
/// Returns `Error::DocumentNotFound`, `Error::Io`, or `Error::Json`.
fn load_document(path: &Path) -> Result<MdNode, Error> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::DocumentNotFound {
                path: path.to_path_buf(),
            });
        },
        Err(e) => return Err(Error::Io(e)),
    };

    return serde_json::from_str(&content).map_err(|source| Error::Json {
        file: path.to_path_buf(),
        source,
    });
}

/// Serialize a rewritten document back to pretty JSON.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
fn render_document(tree: &MdNode, path: &Path) -> Result<String, Error> {
    let mut rendered = serde_json::to_string_pretty(tree).map_err(|source| Error::Json {
        file: path.to_path_buf(),
        source,
    })?;
    rendered.push('\n');
    return Ok(rendered);
}

/// Rewrite one document or a directory of documents.
///
/// # Errors
///
/// Returns errors from document loading, rewriting, or output writing.
fn cmd_transform(
    session: &LinkTransformer,
    doc: &Path,
    output: Option<&Path>,
    in_place: bool,
) -> Result<ExitCode, Error> {
    if doc.is_dir() {
        let count = transform_directory(session, doc)?;
        println!("Transformed {count} documents");
        return Ok(ExitCode::SUCCESS);
    }

    let mut tree = load_document(doc)?;
    session.transform(&mut tree);
    let rendered = render_document(&tree, doc)?;

    if let Some(out) = output {
        std::fs::write(out, rendered)?;
    } else if in_place {
        std::fs::write(doc, rendered)?;
    } else {
        print!("{rendered}");
    }

    return Ok(ExitCode::SUCCESS);
}

/// Rewrite every `*.mdast.json` under `dir` in place. Returns the number of
/// documents whose content changed.
///
/// Documents whose rendered output matches the file on disk are not
/// rewritten. Watch mode re-runs this over the directory it monitors, so an
/// unconditional write would feed the watcher its own events and re-transform
/// forever.
///
/// # Errors
///
/// Returns errors from document loading or writing.
fn transform_directory(session: &LinkTransformer, dir: &Path) -> Result<usize, Error> {
    let mut count = 0_usize;

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let is_document = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(DOCUMENT_SUFFIX));
        if !is_document {
            continue;
        }

        let original = std::fs::read_to_string(path)?;
        let mut tree: MdNode = serde_json::from_str(&original).map_err(|source| Error::Json {
            file: path.to_path_buf(),
            source,
        })?;
        session.transform(&mut tree);
        let rendered = render_document(&tree, path)?;
        if rendered != original {
            std::fs::write(path, rendered)?;
            count += 1;
        }
    }

    return Ok(count);
}

/// List every indexed expression with its resolved URL, sorted. Shadowed
/// duplicate expressions are reported on stderr.
///
/// # Errors
///
/// Returns errors from option building.
fn cmd_index(common: &CommonOpts, config: &Config) -> Result<ExitCode, Error> {
    let options = build_options(common, config)?;
    let shadowed = shadowed_expressions(options.reflection.as_ref(), &options.profile);
    let session = transformer(options);

    let mut expressions: Vec<&String> = session.index().keys().collect();
    expressions.sort();

    for expression in expressions {
        let url = session.resolve(expression).unwrap_or_default();
        let kind = session
            .index()
            .get(expression)
            .and_then(|path| path.last())
            .map_or("unknown", |item| item.kind.name());
        println!("{expression} [{kind}] -> {url}");
    }

    for expression in &shadowed {
        eprintln!("shadowed: {expression} (first occurrence wins)");
    }
    if !shadowed.is_empty() {
        let count = shadowed.len();
        eprintln!("{count} ambiguous expressions");
    }

    return Ok(ExitCode::SUCCESS);
}

/// Resolve a single expression and print its URL.
///
/// # Errors
///
/// Returns `Error::UnresolvedSymbol` when the expression is not indexed.
fn cmd_link(session: &LinkTransformer, symbol: &str) -> Result<ExitCode, Error> {
    let Some(url) = session.resolve(symbol) else {
        return Err(Error::UnresolvedSymbol {
            symbol: symbol.to_string(),
        });
    };

    println!("{url}");
    return Ok(ExitCode::SUCCESS);
}

/// Initial directory transform, then re-transform on changes to the
/// document directory or the documentation-model file.
///
/// # Errors
///
/// Returns errors from the initial pass or watcher setup. Failures during
/// re-transforms are printed and do not stop watching.
fn cmd_watch(dir: &Path, common: &CommonOpts, config: &Config) -> Result<ExitCode, Error> {
    eprintln!("watch: initial transform");
    let session = transformer(build_options(common, config)?);
    let count = transform_directory(&session, dir)?;
    eprintln!("watch: transformed {count} documents");

    let mut watch_paths = vec![dir.to_path_buf()];
    if let Some(typedoc) = common.typedoc.clone().or_else(|| config.typedoc.clone()) {
        watch_paths.push(typedoc);
    }

    watch::run_on_change(&watch_paths, || {
        // Rebuild the session each pass: the documentation model on disk
        // may be what changed.
        let rerun = build_options(common, config)
            .map(transformer)
            .and_then(|session| transform_directory(&session, dir));
        match rerun {
            Ok(count) => eprintln!("watch: transformed {count} documents"),
            Err(e) => diagnostics::print_error(&e),
        }
    })?;

    return Ok(ExitCode::SUCCESS);
}
