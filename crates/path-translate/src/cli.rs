//! Core logic behind the `path-translate` binary.
//!
//! ```text
//! path-translate <schema.json> [--wildcard] [--json] [--dump-rules] [--] [segments...]
//! ```
//!
//! Without flags the segments are translated with
//! [`PathTranslator::path_elem`] and printed as `/a/list[k=v]`. With
//! `--wildcard` each segment is a plain element name and the path is run
//! through [`PathTranslator::set_wildcard_keys`].

use std::fs;

use schema_tree::{SchemaError, SchemaTree};
use thiserror::Error;

use crate::elem::{format_path, PathElem};
use crate::translator::PathTranslator;
use crate::TranslateError;

pub const USAGE: &str =
    "Usage: path-translate <schema.json> [--wildcard] [--json] [--dump-rules] [--] [segments...]";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", USAGE)]
    Usage,
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub schema_path: String,
    pub wildcard: bool,
    pub json: bool,
    pub dump_rules: bool,
    pub segments: Vec<String>,
}

impl CliOptions {
    /// Parses arguments, program name excluded.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut iter = args.iter();
        let schema_path = match iter.next() {
            Some(p) if !p.starts_with("--") => p.clone(),
            _ => return Err(CliError::Usage),
        };
        let mut opts = CliOptions {
            schema_path,
            ..Default::default()
        };
        let mut only_segments = false;
        for arg in iter {
            if only_segments || !arg.starts_with("--") {
                opts.segments.push(arg.clone());
                continue;
            }
            match arg.as_str() {
                "--wildcard" => opts.wildcard = true,
                "--json" => opts.json = true,
                "--dump-rules" => opts.dump_rules = true,
                "--" => only_segments = true,
                other => return Err(CliError::UnknownOption(other.to_string())),
            }
        }
        Ok(opts)
    }
}

/// Reads the schema named in `args` and produces the text to print.
pub fn run(args: &[String]) -> Result<String, CliError> {
    let opts = CliOptions::parse(args)?;
    let src = fs::read_to_string(&opts.schema_path).map_err(|source| CliError::Io {
        path: opts.schema_path.clone(),
        source,
    })?;
    let schema = SchemaTree::from_json(&src)?;
    run_with_schema(&opts, &schema)
}

pub fn run_with_schema(opts: &CliOptions, schema: &SchemaTree) -> Result<String, CliError> {
    let translator = PathTranslator::new(schema)?;

    if opts.dump_rules {
        let rules = translator.rules();
        let lines: Vec<String> = rules
            .paths()
            .into_iter()
            .map(|p| format!("{p} {}", rules.get(p).unwrap_or_default().join(" ")))
            .collect();
        return Ok(lines.join("\n"));
    }

    let path = if opts.wildcard {
        let mut path: Vec<PathElem> = opts.segments.iter().map(PathElem::new).collect();
        translator.set_wildcard_keys(&mut path)?;
        path
    } else {
        translator.path_elem(opts.segments.as_slice())?
    };

    if opts.json {
        Ok(serde_json::to_string(&path)?)
    } else {
        Ok(format_path(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn schema() -> SchemaTree {
        SchemaTree::from_json(
            r#"{"name": "root", "children": [
                {"name": "lists", "children": [{"name": "list", "key": "k1 k2"}]}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_flags_and_segments() {
        let opts = CliOptions::parse(&args(&["s.json", "a", "--json", "--", "--x"])).unwrap();
        assert_eq!(opts.schema_path, "s.json");
        assert!(opts.json);
        assert!(!opts.wildcard);
        assert_eq!(opts.segments, vec!["a", "--x"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(CliOptions::parse(&[]), Err(CliError::Usage)));
        assert!(matches!(
            CliOptions::parse(&args(&["s.json", "--nope"])),
            Err(CliError::UnknownOption(o)) if o == "--nope"
        ));
    }

    #[test]
    fn test_translate_formatted() {
        let opts = CliOptions::parse(&args(&["s", "lists", "list", "x", "y", "leaf"])).unwrap();
        let out = run_with_schema(&opts, &schema()).unwrap();
        assert_eq!(out, "/lists/list[k1=x][k2=y]/leaf");
    }

    #[test]
    fn test_wildcard_json() {
        let opts = CliOptions::parse(&args(&["s", "--wildcard", "--json", "lists", "list"])).unwrap();
        let out = run_with_schema(&opts, &schema()).unwrap();
        assert_eq!(
            out,
            r#"[{"name":"lists"},{"name":"list","key":{"k1":"*","k2":"*"}}]"#
        );
    }

    #[test]
    fn test_dump_rules() {
        let opts = CliOptions::parse(&args(&["s", "--dump-rules"])).unwrap();
        assert_eq!(run_with_schema(&opts, &schema()).unwrap(), "/lists/list k1 k2");
    }

    #[test]
    fn test_missing_schema_file() {
        let err = run(&args(&["/nonexistent/schema.json"])).unwrap_err();
        assert!(err.to_string().starts_with("failed to read /nonexistent/schema.json"));
    }
}
