//! Command-line lookup of snippet translations.
//!
//! Usage:
//!   snippet-translator <tag> [language] [name=value ...]
//!   snippet-translator --all <tag>          # JSON with every direct translation
//!   snippet-translator --metrics <tag> ...  # also print lookup counters to stderr
//!
//! Configuration is read from the JSON file named by SNIPPET_CONFIG
//! (defaults to snippet.config.json in the working directory).

use anyhow::{bail, Context, Result};
use snippet_translator::Snippet;
use tracing::info;

struct Args {
    all: bool,
    metrics: bool,
    tag: String,
    language: Option<String>,
    variables: Vec<(String, String)>,
}

impl Args {
    fn parse(raw: impl Iterator<Item = String>) -> Result<Self> {
        let mut all = false;
        let mut metrics = false;
        let mut positional = Vec::new();

        for arg in raw {
            match arg.as_str() {
                "--all" => all = true,
                "--metrics" => metrics = true,
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let Some(tag) = positional.next() else {
            bail!(
                "Usage: snippet-translator [--all] [--metrics] <tag> [language] [name=value ...]"
            );
        };

        let mut language = None;
        let mut variables = Vec::new();
        for arg in positional {
            match arg.split_once('=') {
                Some((name, value)) => variables.push((name.to_string(), value.to_string())),
                None if language.is_none() && variables.is_empty() => language = Some(arg),
                None => bail!("Expected name=value, got '{}'", arg),
            }
        }

        Ok(Self {
            all,
            metrics,
            tag,
            language,
            variables,
        })
    }
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snippet_translator=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let snippet = Snippet::from_env().context("Failed to load snippet configuration")?;
    info!(
        "Resolving '{}' under {}",
        args.tag,
        snippet.config().root_path.display()
    );

    let outcome = if args.all {
        let collected = snippet.snippet(&args.tag);
        let found = !collected.translations.is_empty();
        println!(
            "{}",
            serde_json::to_string_pretty(&collected).context("Failed to serialize translations")?
        );
        found
    } else {
        let variables: Vec<(&str, &str)> = args
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        match snippet.translate(&args.tag, args.language.as_deref(), &variables) {
            Some(translation) => {
                println!("{}", translation);
                true
            }
            None => false,
        }
    };

    if args.metrics {
        let report = snippet.resolver().metrics().report();
        eprintln!(
            "{}",
            serde_json::to_string(&report).context("Failed to serialize metrics")?
        );
    }

    if !outcome {
        bail!("No translation found for '{}'", args.tag);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_tag_only() {
        let args = parse(&["greetings.hello"]).unwrap();
        assert_eq!(args.tag, "greetings.hello");
        assert!(args.language.is_none());
        assert!(!args.all);
    }

    #[test]
    fn test_parse_language_and_variables() {
        let args = parse(&["mail.greeting", "de", "name=Ada", "city=Bern"]).unwrap();
        assert_eq!(args.language.as_deref(), Some("de"));
        assert_eq!(
            args.variables,
            vec![
                ("name".to_string(), "Ada".to_string()),
                ("city".to_string(), "Bern".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_flags() {
        let args = parse(&["--all", "--metrics", "mail.greeting"]).unwrap();
        assert!(args.all);
        assert!(args.metrics);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--verbose", "tag"]).is_err());
        assert!(parse(&["tag", "de", "fr"]).is_err());
    }
}
