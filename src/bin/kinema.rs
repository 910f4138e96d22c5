use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kinema", version)]
struct Cli {
    /// Log parser and encoder decisions to stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a template batch and print every issue.
    Validate(ValidateArgs),
    /// Compile one template against a part list and write the motion program as JSON.
    Compile(CompileArgs),
    /// Compile, then write the encoded 528-float buffer as JSON.
    Encode(CompileArgs),
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Input template batch (JSON array).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Input template batch (JSON array).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Template id to compile.
    #[arg(long, conflicts_with = "verb", required_unless_present = "verb")]
    template: Option<String>,

    /// Trigger word selecting the template.
    #[arg(long)]
    verb: Option<String>,

    /// Part list JSON (`[{"id": 1, "name": "head"}, ...]`).
    #[arg(long, conflicts_with = "noun", required_unless_present = "noun")]
    parts: Option<PathBuf>,

    /// Noun resolved to a skeleton preset instead of a part list file.
    #[arg(long)]
    noun: Option<String>,

    /// Adverb looked up in the template's adverb map.
    #[arg(long)]
    adverb: Option<String>,

    /// Explicit speed multiplier.
    #[arg(long)]
    speed: Option<f64>,

    /// Explicit amplitude multiplier.
    #[arg(long)]
    amplitude_scale: Option<f64>,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Compile(args) => cmd_compile(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_library(path: &Path) -> anyhow::Result<(kinema::TemplateLibrary, Vec<kinema::Issue>)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read templates '{}'", path.display()))?;
    let mut library = kinema::TemplateLibrary::new();
    let issues = library
        .load_json(&json)
        .with_context(|| format!("load templates '{}'", path.display()))?;
    Ok((library, issues))
}

fn read_parts(path: &Path) -> anyhow::Result<kinema::PartList> {
    let f = File::open(path).with_context(|| format!("open part list '{}'", path.display()))?;
    let parts: kinema::PartList =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse part list JSON")?;
    for issue in parts.validate() {
        eprintln!("{issue}");
    }
    Ok(parts)
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, text + "\n")
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let (library, issues) = read_library(&args.in_path)?;
    for issue in &issues {
        println!("{issue}");
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    println!(
        "{} template(s) loaded, {} error(s), {} warning(s)",
        library.len(),
        errors,
        issues.len() - errors
    );
    if errors > 0 {
        anyhow::bail!("{errors} template error(s)");
    }
    Ok(())
}

fn compile(args: &CompileArgs) -> anyhow::Result<kinema::MotionProgram> {
    let (library, issues) = read_library(&args.in_path)?;
    for issue in issues.iter().filter(|i| i.is_error()) {
        eprintln!("{issue}");
    }

    let template = match (&args.template, &args.verb) {
        (Some(id), _) => library
            .get(id)
            .with_context(|| format!("no template with id '{id}'"))?,
        (None, Some(verb)) => library
            .template_for_word(verb)
            .with_context(|| format!("no template for trigger word '{verb}'"))?,
        (None, None) => anyhow::bail!("pass --template or --verb"),
    };

    let parts = match (&args.parts, &args.noun) {
        (Some(path), _) => read_parts(path)?,
        (None, Some(noun)) => kinema::skeleton_for(noun).part_list(),
        (None, None) => anyhow::bail!("pass --parts or --noun"),
    };

    let overrides = kinema::ParseOverrides {
        adverb: args.adverb.clone(),
        speed: args.speed,
        amplitude_scale: args.amplitude_scale,
    };
    let program = kinema::TemplateParser::default()
        .parse(template, &parts, &overrides)
        .with_context(|| format!("compile template '{}'", template.id))?;
    eprintln!(
        "compiled '{}': {} part(s), fingerprint {}",
        template.id,
        program.part_count(),
        kinema::fingerprint_program(&program)
    );
    Ok(program)
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let program = compile(&args)?;
    write_json(args.out.as_deref(), &program)
}

fn cmd_encode(args: CompileArgs) -> anyhow::Result<()> {
    let program = compile(&args)?;
    let buf = kinema::encode_to_vec(&program);
    write_json(args.out.as_deref(), &buf)
}
