//! CLI: model documents in, sample JSON (or a class listing) out.
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::{json, Value};
use tracing::debug;
use sample_json::model::ModelDocument;
use sample_json::render::render;
use sample_json::{ScalarDefaults, Sampler, Style, TypeModel};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate placeholder JSON payloads from declared class models
#[derive(Parser, Debug)]
#[command(name = "sample-json", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print a sample JSON document for each root type
    Sample(SampleOut),
    /// list the classes a model declares, with their fields
    Classes(ClassesOut),
}

#[derive(Args, Debug, Clone)]
struct ModelSettings {
    /// One or more model documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    model: Vec<String>,

    /// JSON Pointer selecting the model inside each document (e.g. /data/model)
    #[arg(long)]
    json_pointer: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct SampleOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    /// root type expressions, e.g. `com.example.Page<com.example.User>`
    #[arg(long, short, num_args = 1.., required = true)]
    root: Vec<String>,

    /// JQ post-process filter applied to each sample
    #[arg(long)]
    jq_expr: Option<String>,

    /// text used for string-like values
    #[arg(long)]
    string_placeholder: Option<String>,

    /// single-line output
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ClassesOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    /// include the built-in java.* classes
    #[arg(long, default_value_t = false)]
    all: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ModelSettings {
    fn load_model(&self) -> Result<TypeModel> {
        let source_paths = resolve_file_path_patterns(&self.model)
            .context("failed to resolve model file paths")?;
        let documents = source_paths
            .iter()
            .map(|path| {
                debug!(path = %path.display(), "loading model document");
                ModelDocument::read(path, self.json_pointer.as_deref())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeModel::from_documents(documents)?)
    }
}

impl SampleOut {
    fn run(&self) -> Result<String> {
        let model = self.model_settings.load_model()?;
        let defaults = match self.string_placeholder.as_deref() {
            Some(placeholder) => ScalarDefaults::new().with_string_placeholder(placeholder),
            None => ScalarDefaults::new(),
        };
        let style = if self.compact { Style::Compact } else { Style::Pretty };

        let roots = self
            .root
            .iter()
            .map(|text| model.parse_type(text))
            .collect::<Result<Vec<_>, _>>()?;

        // each root gets its own resolution; output keeps argument order
        let documents = roots
            .par_iter()
            .map(|ty| -> Result<String> {
                let sampler = Sampler::new(&model, &defaults).with_style(style);
                let Some(jq_expr) = self.jq_expr.as_deref() else {
                    return Ok(sampler.try_to_json_string(ty)?);
                };
                let sample = sampler.sample(ty).unwrap_or(Value::Null);
                let outputs = crate::jq_exec::apply_filter(jq_expr, &sample)
                    .with_context(|| format!("failed to apply jq expression to sample of `{ty}`"))?;
                let texts = outputs
                    .iter()
                    .map(|value| render(Some(value), style))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(texts.join("\n"))
            })
            .collect::<Result<Vec<String>>>()?;
        Ok(documents.join("\n"))
    }
}

impl ClassesOut {
    fn run(&self) -> Result<String> {
        let model = self.model_settings.load_model()?;
        let listing: Vec<Value> = model
            .classes()
            .filter(|def| self.all || !def.name.starts_with("java."))
            .map(|def| {
                let fields: Vec<Value> = def
                    .fields
                    .iter()
                    .map(|field| json!({ "name": field.name, "type": field.ty.to_string(), "static": field.is_static }))
                    .collect();
                json!({
                    "name": def.name,
                    "kind": def.kind,
                    "typeParameters": def.type_parameters,
                    "supertypes": def.supertypes.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "fields": fields,
                })
            })
            .collect();
        Ok(serde_json::to_string_pretty(&listing)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        let (no_op, out) = match &self.cmd {
            Command::Sample(target) => (target.no_op, target.out.as_deref()),
            Command::Classes(target) => (target.no_op, target.out.as_deref()),
        };
        // debug path
        if no_op {
            eprintln!("{self:#?}");
            return Ok(());
        }
        let output = match &self.cmd {
            Command::Sample(target) => target.run()?,
            Command::Classes(target) => target.run()?,
        };
        match out {
            Some(path) => write_output(path, &output),
            None => {
                println!("{output}");
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let before = out.len();
        for entry in glob::glob(pattern)? {
            out.push(entry?);
        }
        if out.len() == before {
            bail!("glob pattern matched no files: {pattern}");
        }
    }
    Ok(out)
}
