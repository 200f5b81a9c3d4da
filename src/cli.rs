//! Minimal CLI: schema tree JSON → (object | text), or cross-check both.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use schema_bridge::{Converted, Format, source, target};

use crate::path_de;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// map source schema trees (JSON) onto the target schema library, as a live value or as constructor text
#[derive(Parser, Debug)]
#[command(name = "schema-bridge", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// convert each input and print the result
    Convert(ConvertOut),
    /// run both transforms and verify the text reads back as the object result
    Check(CheckOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the schema node in each document (e.g. /definitions/User)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ConvertOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// `text` emits constructor calls, `object` the debug form of the live value
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Read and decode every input, in input order.
    fn load(&self) -> Result<Vec<(PathBuf, source::Schema)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_par_iter()
            .map(|source_path| -> Result<(PathBuf, source::Schema)> {
                let source = std::fs::read_to_string(&source_path)
                    .with_context(|| format!("failed to read source file {}", source_path.display()))?;
                let schema = path_de::from_str_at_pointer(&source, self.json_pointer.as_deref())
                    .map_err(|error| anyhow!("failed to decode schema tree ({}): {error}", source_path.display()))?;
                Ok((source_path, schema))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Convert(args) => {
                // debug path
                if args.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let inputs = args.input_settings.load()?;
                tracing::info!(inputs = inputs.len(), format = ?args.format, "converting");

                let rendered = inputs
                    .par_iter()
                    .map(|(path, schema)| -> Result<String> {
                        let converted = schema_bridge::convert(schema, args.format)
                            .with_context(|| format!("failed to convert {}", path.display()))?;
                        Ok(match converted {
                            Converted::Text(text) => text,
                            Converted::Object(object) => format!("{object:#?}"),
                        })
                    })
                    .collect::<Result<Vec<String>>>()?;

                write_output(args.out.as_deref(), &rendered.join("\n"))
            }
            Command::Check(args) => {
                let inputs = args.input_settings.load()?;
                let outcomes = inputs
                    .par_iter()
                    .map(|(path, schema)| check_one(schema).with_context(|| format!("{}", path.display())))
                    .collect::<Vec<Result<()>>>();

                let mut failed = 0usize;
                for ((path, _), outcome) in inputs.iter().zip(outcomes) {
                    match outcome {
                        Ok(()) => println!("ok   {}", path.display()),
                        Err(error) => {
                            failed += 1;
                            tracing::error!("{error:#}");
                            println!("FAIL {}", path.display());
                        }
                    }
                }
                if failed > 0 {
                    bail!("{failed} of {} inputs failed the cross-transform check", inputs.len());
                }
                Ok(())
            }
        }
    }
}

/// Text output must read back as the object output.
fn check_one(schema: &source::Schema) -> Result<()> {
    let object = schema_bridge::to_object(schema)?;
    let text = schema_bridge::to_text(schema)?;
    let reread = target::parse(&text).with_context(|| format!("text output does not parse: {text}"))?;
    if reread != object {
        bail!("text output disagrees with object output\n  text:   {text}\n  object: {object:?}");
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{src}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
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
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
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
    use schema_bridge::source::Schema;

    #[test]
    fn check_accepts_supported_trees() {
        let s = Schema::intersection(
            Schema::object([("a", Schema::nullable(Schema::Nan))]),
            Schema::object([("b c", Schema::enumeration([("X", schema_bridge::value::EnumValue::String("x".into()))]))]),
        );
        check_one(&s).unwrap();
    }

    #[test]
    fn check_reports_refusals() {
        let err = check_one(&Schema::Custom).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported schema: custom"));
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn cli_parses_convert_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "schema-bridge", "convert", "--format", "object", "-i", "x.json", "y.json",
        ]).unwrap();
        let Command::Convert(args) = cli.cmd else { panic!("expected convert") };
        assert_eq!(args.format, Format::Object);
        assert_eq!(args.input_settings.input, ["x.json", "y.json"]);
    }
}
