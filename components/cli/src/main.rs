use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use odx_formatter::{format, is_likely_xml, validate, FormatterOptions, IndentKind};

mod config;

/// Formatter for Odoo-style XML files.
#[derive(Parser)]
#[command(name = "odxfmt", version, about)]
struct Args {
    /// Files to process; reads stdin when none are given.
    files: Vec<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Indent with tabs instead of spaces.
    #[arg(long)]
    tabs: bool,

    /// Line length above which attributes are wrapped.
    #[arg(long, value_name = "N")]
    max_line_length: Option<usize>,

    /// Split over-length tags to one attribute per line.
    #[arg(long)]
    format_attributes: bool,

    /// Sort attributes alphabetically inside wrapped tags.
    #[arg(long)]
    sort_attributes: bool,

    /// Emit `<tag></tag>` instead of `<tag/>` for empty elements.
    #[arg(long)]
    expand_empty: bool,

    /// Put the closing bracket of a wrapped tag on its own line.
    #[arg(long)]
    close_bracket_on_own_line: bool,

    /// Drop comments from the output.
    #[arg(long)]
    no_comments: bool,

    /// Maximum run of blank lines kept in the output.
    #[arg(long, value_name = "N")]
    max_blank_lines: Option<usize>,

    /// Do not surround record-style tags with blank lines.
    #[arg(long)]
    no_tag_spacing: bool,

    /// Validate only; report the first error and exit non-zero.
    #[arg(long)]
    check: bool,

    /// Rewrite files in place instead of printing to stdout.
    #[arg(long)]
    write: bool,
}

impl Args {
    fn apply(&self, options: &mut FormatterOptions) {
        if let Some(size) = self.indent {
            options.indent_size = size;
        }
        if self.tabs {
            options.indent_kind = IndentKind::Tabs;
        }
        if let Some(max) = self.max_line_length {
            options.max_line_length = max;
        }
        if self.format_attributes {
            options.format_attributes = true;
        }
        if self.sort_attributes {
            options.sort_attributes = true;
        }
        if self.expand_empty {
            options.self_closing = false;
        }
        if self.close_bracket_on_own_line {
            options.close_bracket_on_own_line = true;
        }
        if self.no_comments {
            options.preserve_comments = false;
        }
        if let Some(max) = self.max_blank_lines {
            options.max_blank_lines = max;
        }
        if self.no_tag_spacing {
            options.block_tag_spacing = false;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("odxfmt: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool, String> {
    let mut options = FormatterOptions::default();
    let cwd = std::env::current_dir().map_err(|err| err.to_string())?;
    if let Some(rc) = config::load(&cwd)? {
        rc.apply(&mut options);
    }
    args.apply(&mut options);

    if args.files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| format!("stdin: {}", err))?;
        return Ok(process(None, &text, args, &options));
    }

    let mut ok = true;
    for path in &args.files {
        match fs::read_to_string(path) {
            Ok(text) => ok &= process(Some(path), &text, args, &options),
            Err(err) => {
                eprintln!("odxfmt: {}: {}", path.display(), err);
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn process(path: Option<&Path>, text: &str, args: &Args, options: &FormatterOptions) -> bool {
    let name = path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

    if args.check {
        return check(&name, text);
    }

    if !is_likely_xml(text) && !text.trim().is_empty() {
        eprintln!("odxfmt: {}: does not look like XML, skipped", name);
        if path.is_none() {
            print!("{}", text);
        }
        return true;
    }

    match format(text, options) {
        Ok(formatted) => {
            match path {
                Some(path) if args.write => {
                    if formatted != text {
                        if let Err(err) = fs::write(path, &formatted) {
                            eprintln!("odxfmt: {}: {}", name, err);
                            return false;
                        }
                    }
                }
                _ => print!("{}", formatted),
            }
            true
        }
        Err(err) => {
            eprintln!("odxfmt: {}: {}", name, err);
            false
        }
    }
}

fn check(name: &str, text: &str) -> bool {
    let result = validate(text);
    if result.is_valid {
        return true;
    }

    let line = result.line.map_or(String::new(), |l| format!(":{}", l));
    let column = result.column.map_or(String::new(), |c| format!(":{}", c));
    let message = result.error.as_deref().unwrap_or("not well-formed");
    eprintln!("odxfmt: {}{}{}: {}", name, line, column, message);
    if let Some(excerpt) = &result.line_excerpt {
        eprintln!("    {}", excerpt);
    }
    false
}
