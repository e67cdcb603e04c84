/// Diagnostic output: unresolved-symbol warnings and CLI error rendering.
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Fixed prefix identifying this component in warning output.
pub const WARN_PREFIX: &str = "tsdoc-links:";

/// Report one unresolved symbol on stderr. Emitted only under a development
/// execution context; processing always continues.
pub fn warn_unresolved(symbol: &str) {
    eprintln!("{WARN_PREFIX} could not resolve symbol: {symbol}");
}

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ReflectionNotFound { path } => format!(
            "\
# Error: Documentation Model Not Found

`{}` does not exist.

## Fix

Point `--typedoc` (or the `typedoc` key in `.tsdoc-links.toml`) at the JSON
output of your documentation generator.
",
            path.display()
        ),

        Error::DocumentNotFound { path } => format!(
            "\
# Error: Document Not Found

`{}` does not exist.
",
            path.display()
        ),

        Error::Json { file, source } => format!(
            "\
# Error: Invalid JSON

Could not parse `{}`: {source}
",
            file.display()
        ),

        Error::UnresolvedSymbol { symbol } => format!(
            "\
# Error: Unresolved Symbol

`{symbol}` is not in the symbol index.

## Fix

Run `tsdoc-links index` to list every expression the documentation model
produces, and check the symbol spelling against it.
"
        ),

        Error::WatchSetup { reason } => format!(
            "\
# Error: Watch Setup Failed

{reason}
"
        ),

        Error::Io(e) => format!(
            "\
# Error: I/O

{e}
"
        ),

        Error::TomlDe(e) => format!(
            "\
# Error: Invalid TOML

{e}
"
        ),
    };
}
