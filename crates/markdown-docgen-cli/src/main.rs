use anyhow::{Context, Result, bail};
use markdown_docgen_config::{Config, Mode};
use markdown_docgen_engine::{ConversionRequest, DocumentService, TargetFormat};
use std::{
    env,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "\
Usage:
  markdown-docgen [--config PATH] render <input|-> --format docx|pdf [--title T] [--caller ID] [--out DIR] [--mode markdown|paragraphs]
  markdown-docgen [--config PATH] ir <input|-> [--mode markdown|paragraphs]
  markdown-docgen cleanup <path>";

#[derive(Debug, PartialEq)]
struct RenderArgs {
    input: String,
    format: TargetFormat,
    title: Option<String>,
    caller: Option<String>,
    out: Option<PathBuf>,
    mode: Option<Mode>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Render(RenderArgs),
    Ir { input: String, mode: Option<Mode> },
    Cleanup(PathBuf),
}

#[derive(Debug, PartialEq)]
struct Cli {
    config: Option<PathBuf>,
    command: Command,
}

fn parse_mode(s: &str) -> Result<Mode> {
    match s {
        "markdown" => Ok(Mode::Markdown),
        "paragraphs" => Ok(Mode::Paragraphs),
        other => bail!("Unknown mode: {other}"),
    }
}

fn value<'a>(it: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a String> {
    it.next()
        .with_context(|| format!("Missing value for {flag}"))
}

fn parse_args(args: &[String]) -> Result<Cli> {
    let mut it = args.iter();
    let mut config = None;
    let mut positional: Vec<&String> = vec![];
    let mut format = None;
    let mut title = None;
    let mut caller = None;
    let mut out = None;
    let mut mode = None;

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(value(&mut it, arg)?)),
            "--format" => format = Some(value(&mut it, arg)?.parse::<TargetFormat>()?),
            "--title" => title = Some(value(&mut it, arg)?.clone()),
            "--caller" => caller = Some(value(&mut it, arg)?.clone()),
            "--out" => out = Some(PathBuf::from(value(&mut it, arg)?)),
            "--mode" => mode = Some(parse_mode(value(&mut it, arg)?)?),
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            _ => positional.push(arg),
        }
    }

    let command = match positional.as_slice() {
        [cmd, input] if cmd.as_str() == "render" => Command::Render(RenderArgs {
            input: input.to_string(),
            format: format.context("render needs --format")?,
            title,
            caller,
            out,
            mode,
        }),
        [cmd, input] if cmd.as_str() == "ir" => Command::Ir {
            input: input.to_string(),
            mode,
        },
        [cmd, path] if cmd.as_str() == "cleanup" => Command::Cleanup(PathBuf::from(path)),
        _ => bail!("Invalid arguments"),
    };

    Ok(Cli { config, command })
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
}

fn default_title(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .filter(|_| input != "-")
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

fn render(mut config: Config, args: RenderArgs) -> Result<PathBuf> {
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(out) = args.out {
        config.output_dir = out;
    }

    let service = DocumentService::new(
        &config.output_dir,
        config.build_options(),
        config.render_settings(),
    )?;
    let request = ConversionRequest {
        content: read_input(&args.input)?,
        title: args.title.unwrap_or_else(|| default_title(&args.input)),
        format: args.format,
        caller_id: args.caller.unwrap_or_else(|| "cli".to_string()),
    };
    Ok(service.convert(&request)?)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Cleanup(path) => {
            if markdown_docgen_engine::cleanup(&path) {
                println!("removed");
            } else {
                println!("not found");
            }
        }
        Command::Ir { input, mode } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(mode) = mode {
                config.mode = mode;
            }
            let doc =
                markdown_docgen_engine::parse_document(&read_input(&input)?, &config.build_options());
            println!("{doc:#?}");
        }
        Command::Render(args) => {
            let config = load_config(cli.config.as_deref())?;
            let path = render(config, args)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
