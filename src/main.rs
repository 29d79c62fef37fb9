mod formatter;
mod tokenizer;

use anyhow::Result;
use clap::Parser;
use formatter::{FormatOptions, IndentSpec, Mode, format_xml};
use rayon::prelude::*;
use similar::TextDiff;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "xmlfmt", version, about = "Pretty-print XML files for pre-commit checks")]
struct Cli {
    /// Files to check; directories are searched for .xml files
    filenames: Vec<PathBuf>,
    /// Automatically fixes encountered not-pretty-formatted files
    #[arg(long)]
    autofix: bool,
    /// The number of indent spaces or a string to be used as delimiter
    /// for indentation level e.g. 4 or "\t"
    #[arg(long, default_value = "4")]
    indent: IndentSpec,
}

/// Per-file result, reported after all files have been processed so
/// stdout stays ordered under parallel execution.
enum Outcome {
    Unchanged,
    Fixed,
    Diff(String),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = if cli.autofix { Mode::Fix } else { Mode::Diff };
    let opts = FormatOptions {
        indent: cli.indent,
        mode,
    };

    let mut xml_files = Vec::new();
    for p in &cli.filenames {
        collect_xml_files(p, &mut xml_files);
    }

    let results: Vec<_> = xml_files
        .par_iter()
        .map(|path| process_file(path, &opts))
        .collect();

    let mut status = 0;
    for (path, r) in xml_files.iter().zip(results) {
        match r {
            Ok(Outcome::Unchanged) => {}
            Ok(Outcome::Fixed) => {
                println!("Fixing file {}", path.display());
                status = 1;
            }
            Ok(Outcome::Diff(diff)) => {
                print!("{}", diff);
                status = 1;
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                status = 1;
            }
        }
    }
    if status != 0 {
        std::process::exit(status);
    }
    Ok(())
}

fn collect_xml_files(path: &Path, out: &mut Vec<PathBuf>) {
    if path.is_file() {
        out.push(path.to_path_buf());
        return;
    }
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("xml") {
            out.push(p.to_path_buf());
        }
    }
}

fn process_file(path: &Path, opts: &FormatOptions) -> Result<Outcome> {
    let contents = fs::read_to_string(path)?;
    let pretty = format_xml(&contents, &opts.indent);
    if pretty == contents {
        return Ok(Outcome::Unchanged);
    }
    match opts.mode {
        Mode::Fix => {
            write_replacing(path, &pretty)?;
            Ok(Outcome::Fixed)
        }
        Mode::Diff => Ok(Outcome::Diff(unified_diff(&contents, &pretty, path))),
    }
}

fn unified_diff(original: &str, formatted: &str, path: &Path) -> String {
    let name = path.display().to_string();
    let diff = TextDiff::from_lines(original, formatted);
    diff.unified_diff().header(&name, &name).to_string()
}

/// Write via a sibling temp file and rename, so an interrupted fix never
/// leaves a truncated file behind.
fn write_replacing(path: &Path, contents: &str) -> Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("xmlfmt"));
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
