use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pilgen", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate Pillow source for a project.
    Generate(GenerateArgs),
    /// List the parameters the generated function would take.
    Params(ParamsArgs),
    /// Print the layer stack of a project.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output `.py` path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Function name. Defaults to the one stored in the project.
    #[arg(long)]
    function: Option<String>,

    /// How the generated function finishes.
    #[arg(long, value_enum, default_value_t = ModeChoice::Save)]
    mode: ModeChoice,

    /// Output path parameter name (save mode).
    #[arg(long, default_value = "output_path")]
    output_param: String,

    /// Refuse to generate when two parameters share a name.
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeChoice::Save)]
    mode: ModeChoice,

    #[arg(long, default_value = "output_path")]
    output_param: String,

    /// Print the records as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    /// Save the image to a path parameter.
    Save,
    /// Return the image object.
    Return,
}

impl ModeChoice {
    fn finish(self, output_param: &str) -> pilgen::Finish {
        match self {
            Self::Save => pilgen::Finish::save_to(output_param),
            Self::Return => pilgen::Finish::ReturnImage,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Params(args) => cmd_params(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_project(path: &Path) -> anyhow::Result<pilgen::ProjectModel> {
    pilgen::load_project(path).with_context(|| format!("load project '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let model = read_project(&args.in_path)?;

    let opts = pilgen::EmitOptions {
        function_name: args
            .function
            .unwrap_or_else(|| model.function_name.clone()),
        finish: args.mode.finish(&args.output_param),
        project_dir: Some(pilgen::project_file::project_dir(&args.in_path)),
        strict_parameters: args.strict,
    };

    let code = match pilgen::generate(&model, &opts) {
        Ok(code) => code,
        Err(e) if e.is_warning() => {
            eprintln!("warning: {e}");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, format!("{}\n", code.source))
                .with_context(|| format!("write source '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", code.source).context("write source to stdout")?;
        }
    }
    Ok(())
}

fn cmd_params(args: ParamsArgs) -> anyhow::Result<()> {
    let model = read_project(&args.in_path)?;
    let params = pilgen::collect_parameters(&model, &args.mode.finish(&args.output_param));

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &params).context("serialize parameters")?;
        writeln!(stdout)?;
        return Ok(());
    }

    if params.is_empty() {
        writeln!(stdout, "no parameters")?;
    }
    for p in &params {
        writeln!(
            stdout,
            "{} ({}) - {}",
            p.name,
            p.ty.annotation(),
            p.description
        )?;
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let model = read_project(&args.in_path)?;
    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "project:  {}", model.project_name)?;
    writeln!(stdout, "function: {}", model.function_name)?;
    match model.base_image().and_then(|l| l.as_base()) {
        Some(base) if base.is_parameter => {
            writeln!(stdout, "base:     <parameter {}>", base.parameter_name)?
        }
        Some(base) if !base.image_path.is_empty() => {
            writeln!(stdout, "base:     {}", base.image_path)?
        }
        Some(_) => writeln!(stdout, "base:     <blank canvas>")?,
        None => writeln!(stdout, "base:     <none>")?,
    }

    writeln!(stdout, "layers:")?;
    for (i, layer) in model.layers().iter().enumerate() {
        writeln!(
            stdout,
            "  [{i}] {:<5} {:<20} id={} pos=({}, {}){}",
            layer.layer_type().as_str(),
            layer.name,
            layer.id(),
            layer.position.x,
            layer.position.y,
            if layer.visible { "" } else { " hidden" }
        )?;
    }
    Ok(())
}
