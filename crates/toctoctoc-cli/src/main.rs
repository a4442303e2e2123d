use anyhow::{Context, Result, bail};
use std::{env, fs, path::PathBuf, process};
use toctoctoc_config::Config;
use toctoctoc_engine::{
    AscentPolicy, Document, HeadlineSelector, NodeId, TocOptions, Toctoctoc, parse_markdown,
    to_html, to_outline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// Only the generated list, as HTML.
    Toc,
    /// Generated list followed by the converted document.
    Full,
    /// Plain bullet outline.
    Outline,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    input: PathBuf,
    mode: OutputMode,
    selector: Option<String>,
    strict: bool,
}

const USAGE: &str =
    "Usage: toctoctoc [--outline | --full] [--selector <tags>] [--strict] <file.md>";

fn parse_args(args: &[String]) -> Result<Args> {
    let mut input = None;
    let mut mode = OutputMode::Toc;
    let mut selector = None;
    let mut strict = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--outline" => mode = OutputMode::Outline,
            "--full" => mode = OutputMode::Full,
            "--strict" => strict = true,
            "--selector" => {
                let value = iter.next().context("--selector needs a value")?;
                selector = Some(value.clone());
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            path => {
                if input.is_some() {
                    bail!("Only one input file is supported");
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Args {
        input: input.context("No input file given")?,
        mode,
        selector,
        strict,
    })
}

/// Generate the requested output for one Markdown file.
fn render(args: &Args, config: &Config) -> Result<String> {
    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut doc = parse_markdown(&content)?;

    // Snapshot the content before the nav is added to the body.
    let content_nodes: Vec<NodeId> = doc.children(doc.body()).to_vec();

    let nav = doc.create_element("nav");
    doc.append_child(doc.body(), nav)?;

    let selector = args
        .selector
        .as_deref()
        .unwrap_or(&config.headline_selector);
    let policy = if args.strict || config.strict {
        AscentPolicy::Reject
    } else {
        AscentPolicy::ClampToRoot
    };
    let options = TocOptions::new(nav)
        .headline_selector(HeadlineSelector::parse(selector)?)
        .id_prefix(config.id_prefix.as_str())
        .list_class(config.list_class.as_str())
        .ascent_policy(policy);

    if Toctoctoc::run(&mut doc, options)?.is_none() {
        log::warn!("No headings found in {}", args.input.display());
    }

    Ok(match args.mode {
        OutputMode::Outline => to_outline(&doc, nav),
        OutputMode::Toc => to_html(&doc, nav),
        OutputMode::Full => {
            let toc = to_html(&doc, nav);
            let body = content_html(&doc, &content_nodes);
            match &config.template_path {
                Some(template_path) => {
                    let template = fs::read_to_string(template_path).with_context(|| {
                        format!("Failed to read template {}", template_path.display())
                    })?;
                    fill_template(&template, &toc, &body)
                }
                None => format!("{toc}\n{body}"),
            }
        }
    })
}

fn content_html(doc: &Document, nodes: &[NodeId]) -> String {
    nodes.iter().map(|&node| to_html(doc, node)).collect()
}

/// Substitute `{{toc}}` and `{{content}}` in a single left-to-right scan.
/// Substituted text is never scanned again, so placeholders appearing in
/// heading or body text stay literal.
fn fill_template(template: &str, toc: &str, content: &str) -> String {
    let mut out = String::with_capacity(template.len() + toc.len() + content.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let (before, tail) = rest.split_at(start);
        out.push_str(before);
        if let Some(after) = tail.strip_prefix("{{toc}}") {
            out.push_str(toc);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{{content}}") {
            out.push_str(content);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    log::debug!("Using config: {config:?}");

    match render(&args, &config) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
