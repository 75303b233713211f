//! Minimal CLI: convert | batch | format
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use serde_json::Value;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{Options, Style, DEFAULT_MAX_DEPTH, DEFAULT_ROOT_NAME};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate TypeScript interfaces or type aliases from JSON documents
#[derive(Parser, Debug)]
#[command(name = "json-former", version)]
pub struct CommandLineInterface {
    /// log synthesis details to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// convert one JSON document into TypeScript declarations
    Convert(ConvertOut),
    /// convert many JSON files in parallel, one .ts file each
    Batch(BatchOut),
    /// pretty-print a JSON document, keeping key order
    Format(FormatOut),
}

#[derive(Args, Debug, Clone)]
struct SelectSettings {
    /// JSON Pointer to select a subnode of the document (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq filter applied after the pointer; must yield exactly one value
    #[arg(long)]
    jq_expr: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct RenderSettings {
    /// declaration flavor
    #[arg(long, value_enum, default_value_t = Style::Interface)]
    style: Style,

    /// prefix every declaration with `export`
    #[arg(long, default_value_t = false)]
    export: bool,

    /// nesting limit before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(clap::Parser, Debug)]
struct ConvertOut {
    /// input .json file, or '-' for stdin
    #[arg(long, short, default_value = "-")]
    input: String,

    #[command(flatten)]
    select: SelectSettings,

    #[command(flatten)]
    render: RenderSettings,

    /// name the root type is derived from
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    root_name: String,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct BatchOut {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    #[command(flatten)]
    select: SelectSettings,

    #[command(flatten)]
    render: RenderSettings,

    /// directory receiving one <file-stem>.ts per input
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(clap::Parser, Debug)]
struct FormatOut {
    /// input .json file, or '-' for stdin
    #[arg(long, short, default_value = "-")]
    input: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SelectSettings {
    fn apply(&self, mut value: Value) -> Result<Value> {
        if let Some(pointer) = self.json_pointer.as_deref() {
            value = value
                .pointer(pointer)
                .cloned()
                .with_context(|| format!("JSON pointer `{pointer}` matched nothing"))?;
        }
        if let Some(jq_expr) = self.jq_expr.as_deref() {
            value = crate::jq_exec::run_jaq_single(jq_expr, &value)?;
        }
        Ok(value)
    }
}

impl RenderSettings {
    fn options(&self, root_name: &str) -> Options {
        Options::new()
            .root_name(root_name)
            .style(self.style)
            .export(self.export)
            .max_depth(self.max_depth)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);
        match &self.cmd {
            Command::Convert(target) => {
                let source = read_input(&target.input)?;
                let value = crate::parse::parse_json(&source)
                    .with_context(|| format!("failed to parse {}", display_input(&target.input)))?;
                let value = target.select.apply(value)?;
                let options = target.render.options(&target.root_name);
                let conversion = crate::convert_value(&value, &options)?;
                tracing::info!(
                    input = %display_input(&target.input),
                    root = %conversion.root,
                    declarations = conversion.declarations.len(),
                    "converted"
                );
                write_output(target.out.as_deref(), &conversion.to_source())
            }
            Command::Batch(target) => {
                let paths = resolve_file_path_patterns(&target.input)?;
                let jobs = plan_batch_outputs(paths)?;
                std::fs::create_dir_all(&target.out_dir)
                    .with_context(|| format!("failed to create {}", target.out_dir.display()))?;

                let results: Vec<(PathBuf, Result<PathBuf>)> = jobs
                    .par_iter()
                    .map(|(stem, path)| (path.clone(), convert_file(path, stem, target)))
                    .collect();

                let mut failed = 0usize;
                for (path, result) in &results {
                    match result {
                        Ok(out) => eprintln!("{} {} → {}", "ok".green(), path.display(), out.display()),
                        Err(error) => {
                            failed += 1;
                            eprintln!("{} {}: {error:#}", "failed".red(), path.display());
                        }
                    }
                }
                if failed > 0 {
                    bail!("{failed} of {} files failed to convert", results.len());
                }
                Ok(())
            }
            Command::Format(target) => {
                let source = read_input(&target.input)?;
                let pretty = crate::parse::format_json(&source)
                    .with_context(|| format!("failed to parse {}", display_input(&target.input)))?;
                write_output(target.out.as_deref(), &pretty)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Pair every input with the stem of its output file. The same file matched
/// twice is converted once; distinct files sharing a stem are rejected.
fn plan_batch_outputs(paths: Vec<PathBuf>) -> Result<Vec<(String, PathBuf)>> {
    let mut seen = IndexSet::<PathBuf>::new();
    let mut by_stem = IndexMap::<String, Vec<PathBuf>>::new();
    for path in paths {
        let identity = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if !seen.insert(identity) {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());
        by_stem.entry(stem).or_default().push(path);
    }

    let clashes: Vec<String> = by_stem
        .iter()
        .filter(|(_, inputs)| inputs.len() > 1)
        .map(|(stem, inputs)| {
            let inputs: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
            format!("{stem}.ts <- {}", inputs.join(", "))
        })
        .collect();
    if !clashes.is_empty() {
        bail!("inputs would overwrite each other's output: {}", clashes.join("; "));
    }

    Ok(by_stem
        .into_iter()
        .filter_map(|(stem, mut inputs)| inputs.pop().map(|path| (stem, path)))
        .collect())
}

fn convert_file(path: &Path, stem: &str, target: &BatchOut) -> Result<PathBuf> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = target.select.apply(crate::parse::parse_json(&source)?)?;
    let conversion = crate::convert_value(&value, &target.render.options(stem))?;
    let out = target.out_dir.join(format!("{stem}.ts"));
    std::fs::write(&out, conversion.to_source() + "\n")
        .with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(input = %path.display(), root = %conversion.root, "converted");
    Ok(out)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

fn display_input(input: &str) -> &str {
    if input == "-" { "<stdin>" } else { input }
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "json_former=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cli(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::try_parse_from(std::iter::once("json-former").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn convert_defaults() {
        let parsed = cli(&["convert"]);
        let Command::Convert(target) = parsed.cmd else { panic!("expected convert") };
        assert_eq!(target.input, "-");
        assert_eq!(target.root_name, "RootObject");
        assert_eq!(target.render.style, Style::Interface);
        assert_eq!(target.render.max_depth, DEFAULT_MAX_DEPTH);
        assert!(target.out.is_none());
    }

    #[test]
    fn style_flag_accepts_type() {
        let parsed = cli(&["convert", "--style", "type", "--export", "--root-name", "Payload"]);
        let Command::Convert(target) = parsed.cmd else { panic!("expected convert") };
        let options = target.render.options(&target.root_name);
        assert_eq!(options, Options::new().root_name("Payload").style(Style::TypeAlias).export(true));
    }

    #[test]
    fn pointer_then_jq() {
        let select = SelectSettings {
            json_pointer: Some("/data".into()),
            jq_expr: Some(".items[1]".into()),
        };
        let value = select.apply(json!({"data": {"items": [{"a": 1}, {"b": 2}]}})).unwrap();
        assert_eq!(value, json!({"b": 2}));
    }

    #[test]
    fn missing_pointer_is_an_error() {
        let select = SelectSettings { json_pointer: Some("/nope".into()), jq_expr: None };
        assert!(select.apply(json!({})).is_err());
    }

    #[test]
    fn convert_writes_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("user.json");
        std::fs::write(&input, r#"{"id": 1, "address": {"city": "x"}}"#).unwrap();
        let out = dir.path().join("nested/out/user.ts");

        cli(&[
            "convert",
            "-i", input.to_str().unwrap(),
            "--root-name", "User",
            "-o", out.to_str().unwrap(),
        ])
        .run()
        .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            text,
            "interface IAddress {\n  city: string;\n}\n\ninterface IUser {\n  id: number;\n  address: IAddress;\n}\n"
        );
    }

    #[test]
    fn batch_converts_every_match_and_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("orders.json"), r#"[{"sku": "a"}]"#).unwrap();
        std::fs::write(dir.path().join("profile.json"), r#"{"name": "n"}"#).unwrap();
        let out_dir = dir.path().join("types");
        let pattern = format!("{}/*.json", dir.path().display());

        cli(&["batch", "-i", &pattern, "--out-dir", out_dir.to_str().unwrap()]).run().unwrap();

        assert_eq!(
            std::fs::read_to_string(out_dir.join("orders.ts")).unwrap(),
            "type TOrder = IOrder[];\n\ninterface IOrder {\n  sku: string;\n}\n"
        );
        assert_eq!(
            std::fs::read_to_string(out_dir.join("profile.ts")).unwrap(),
            "interface IProfile {\n  name: string;\n}\n"
        );

        std::fs::write(dir.path().join("broken.json"), r#"{"a":}"#).unwrap();
        let err = cli(&["batch", "-i", &pattern, "--out-dir", out_dir.to_str().unwrap()])
            .run()
            .unwrap_err();
        assert!(err.to_string().contains("1 of 3 files failed"));
    }

    #[test]
    fn batch_rejects_inputs_sharing_a_stem() {
        let dir = tempfile::tempdir().unwrap();
        for (sub, body) in [("a", r#"{"alpha": 1}"#), ("b", r#"{"beta": 1}"#)] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
            std::fs::write(dir.path().join(sub).join("data.json"), body).unwrap();
        }
        let out_dir = dir.path().join("types");
        let pattern = format!("{}/*/data.json", dir.path().display());

        let err = cli(&["batch", "-i", &pattern, "--out-dir", out_dir.to_str().unwrap()])
            .run()
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("data.ts"), "{message}");
        assert!(message.contains("a/data.json") && message.contains("b/data.json"), "{message}");
        assert!(!out_dir.join("data.ts").exists());
    }

    #[test]
    fn batch_converts_a_file_matched_twice_once() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.json");
        std::fs::write(&input, r#"{"alpha": 1}"#).unwrap();
        let pattern = format!("{}/*.json", dir.path().display());

        let same_file_again = dir.path().join(".").join("data.json");
        let jobs = plan_batch_outputs(vec![input.clone(), same_file_again]).unwrap();
        assert_eq!(jobs, vec![("data".to_string(), input.clone())]);

        let out_dir = dir.path().join("types");
        cli(&["batch", "-i", &pattern, input.to_str().unwrap(), "--out-dir", out_dir.to_str().unwrap()])
            .run()
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(out_dir.join("data.ts")).unwrap(),
            "interface IData {\n  alpha: number;\n}\n"
        );
    }

    #[test]
    fn unmatched_glob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        assert!(resolve_file_path_patterns([pattern]).is_err());
    }

    #[test]
    fn format_rewrites_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(&input, r#"{"b":1,"a":[true]}"#).unwrap();
        let out = dir.path().join("out.json");
        cli(&["format", "-i", input.to_str().unwrap(), "-o", out.to_str().unwrap()]).run().unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}\n"
        );
    }
}
