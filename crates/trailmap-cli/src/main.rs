use std::io::Read;

use trailmap::layout::{LayoutOptions, RoadmapGraphLayout, layout};
use trailmap::{ExpansionState, NodeIndex, RoadmapDetail};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Roadmap(trailmap::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Roadmap(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<trailmap::Error> for CliError {
    fn from(value: trailmap::Error) -> Self {
        Self::Roadmap(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

const USAGE: &str = "\
Usage: trailmap-cli [OPTIONS] [INPUT]

Lays out a roadmap JSON document into a positioned visual graph.

Arguments:
  INPUT                 roadmap JSON file, or '-' for stdin (default)

Options:
  --expand <ID>         force a node expanded (repeatable)
  --collapse <ID>       force a node collapsed (repeatable)
  --origin <X,Y>        layout origin, default 0,0
  --summary             print an indented text summary instead of JSON
  -h, --help            print this help";

#[derive(Debug, Default)]
struct Options {
    input: Option<String>,
    expand: Vec<String>,
    collapse: Vec<String>,
    origin: Option<(f64, f64)>,
    summary: bool,
}

fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(CliError::Usage(USAGE)),
            "--summary" => options.summary = true,
            "--expand" => {
                let id = iter.next().ok_or(CliError::Usage("--expand needs a node id"))?;
                options.expand.push(id.clone());
            }
            "--collapse" => {
                let id = iter
                    .next()
                    .ok_or(CliError::Usage("--collapse needs a node id"))?;
                options.collapse.push(id.clone());
            }
            "--origin" => {
                let raw = iter
                    .next()
                    .ok_or(CliError::Usage("--origin needs X,Y coordinates"))?;
                let Some((x, y)) = raw.split_once(',') else {
                    return Err(CliError::Usage("--origin needs X,Y coordinates"));
                };
                let (Ok(x), Ok(y)) = (x.trim().parse::<f64>(), y.trim().parse::<f64>()) else {
                    return Err(CliError::Usage("--origin coordinates must be numbers"));
                };
                options.origin = Some((x, y));
            }
            other if other.starts_with("--") => {
                return Err(CliError::Usage("unknown option (see --help)"));
            }
            _ => {
                if options.input.is_some() {
                    return Err(CliError::Usage("only one INPUT is accepted"));
                }
                options.input = Some(arg.clone());
            }
        }
    }
    Ok(options)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn run(options: &Options) -> Result<RoadmapGraphLayout, CliError> {
    let text = read_input(options.input.as_deref())?;
    let detail = RoadmapDetail::from_json_str(&text)?;
    let index = NodeIndex::build(&detail.nodes);

    let mut expansion = ExpansionState::new();
    expansion.activate(&detail.id);
    for id in &options.expand {
        expansion.set(id, true);
    }
    for id in &options.collapse {
        expansion.set(id, false);
    }

    let layout_options = match options.origin {
        Some((x, y)) => LayoutOptions::with_origin(x, y),
        None => LayoutOptions::default(),
    };
    Ok(layout(&index, &expansion, &layout_options))
}

fn print_summary(graph: &RoadmapGraphLayout) {
    for node in &graph.nodes {
        let indent = "  ".repeat(node.payload.depth.max(0) as usize);
        let marker = if node.payload.has_children {
            if node.payload.expanded { "-" } else { "+" }
        } else {
            " "
        };
        println!(
            "{indent}{marker} {} [{}] ({}, {})",
            node.payload.title,
            node.payload.node_type.key(),
            node.x,
            node.y
        );
    }
    println!(
        "{} nodes, {} edges, height {}",
        graph.nodes.len(),
        graph.edges.len(),
        graph.subtree_height
    );
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    match run(&options) {
        Ok(graph) => {
            if options.summary {
                print_summary(&graph);
            } else {
                match serde_json::to_string_pretty(&graph) {
                    Ok(json) => println!("{json}"),
                    Err(err) => {
                        eprintln!("JSON error: {err}");
                        std::process::exit(1);
                    }
                }
            }
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
