pub mod builder;

use builder::{export_path, starter_definition, to_pretty_json, write_export};
use clap::{Parser, Subcommand};
use funnel_spec::{
    Answers, CompileOptions, Compiler, FormDefinition, Funnel, Ignored, RuntimeConfig, Screen,
    Transition, check, parse_definition,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Lead funnel compiler CLI",
    long_about = "Creates, checks and compiles lead funnel definitions into self-contained HTML documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a starter definition with the default lead questions.
    Init {
        /// Company name; the slug is derived from it.
        #[arg(long, value_name = "NAME")]
        company: String,
        /// Destination file (stdout when omitted).
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Parse and check a definition, listing warnings.
    Check {
        /// Path to the definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
    },
    /// Compile a definition into a single HTML document.
    Compile {
        /// Path to the definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Destination file (stdout when omitted).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Compile and write `formulario-<slug>.html` into the output root.
    Export {
        /// Path to the definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Output root (defaults to FUNNEL_OUTPUT_DIR or the current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Overwrite an existing export.
        #[arg(long)]
        force: bool,
    },
    /// Print the JSON Schema of the definition format.
    Schema,
    /// Replay answers through the funnel and print the submission plan.
    Simulate {
        /// Path to the definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// JSON object mapping question ids to answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Answer "no" on the commitment step.
        #[arg(long)]
        decline: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "funnel=info,funnel_spec=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init { company, out } => run_init(&company, out),
        Command::Check { form } => run_check(&form),
        Command::Compile { form, output } => run_compile(&form, output),
        Command::Export { form, out, force } => run_export(&form, out, force),
        Command::Schema => run_schema(),
        Command::Simulate {
            form,
            answers,
            decline,
        } => run_simulate(&form, &answers, decline),
    }
}

fn load_definition(path: &Path) -> CliResult<FormDefinition> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    Ok(parse_definition(&contents)?)
}

fn emit(contents: &str, output: Option<PathBuf>) -> CliResult<()> {
    match output {
        Some(path) => {
            fs::write(&path, contents)?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => io::stdout().write_all(contents.as_bytes())?,
    }
    Ok(())
}

fn run_init(company: &str, out: Option<PathBuf>) -> CliResult<()> {
    let definition = starter_definition(company)?;
    emit(&to_pretty_json(&definition)?, out)
}

fn run_check(form: &Path) -> CliResult<()> {
    let definition = load_definition(form)?;
    let report = check(&definition)?;
    println!(
        "Definition '{}' is valid ({} questions, {} rules)",
        definition.identity.slug,
        definition.questions.len(),
        definition.qualification_criteria.rules.len()
    );
    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }
    Ok(())
}

fn run_compile(form: &Path, output: Option<PathBuf>) -> CliResult<()> {
    let definition = load_definition(form)?;
    let compiler = Compiler::new(CompileOptions::default())?;
    let html = compiler.compile(&definition)?;
    emit(&html, output)
}

fn run_export(form: &Path, out: Option<PathBuf>, force: bool) -> CliResult<()> {
    let definition = load_definition(form)?;
    let out_root = resolve_output_root(out)?;
    let target = export_path(&definition, &out_root);
    if target.exists() && !force {
        return Err(format!(
            "export {} already exists; rerun with --force to overwrite",
            target.display()
        )
        .into());
    }

    let compiler = Compiler::new(CompileOptions::default())?;
    let html = compiler.compile(&definition)?;
    let path = write_export(&definition, &html, &out_root)?;
    println!("Exported funnel to {}", path.display());
    Ok(())
}

fn run_schema() -> CliResult<()> {
    let schema = schemars::schema_for!(FormDefinition);
    emit(&to_pretty_json(&schema)?, None)
}

fn resolve_output_root(out: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match out {
        Some(path) => path,
        None => env::var_os("FUNNEL_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("output directory cannot be empty".into());
    }
    Ok(candidate)
}

/// Outcome of a replayed session, printed by `simulate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport {
    qualified: bool,
    status: &'static str,
    final_step: usize,
    webhook: Option<String>,
    redirect: Option<String>,
    payload: Map<String, Value>,
}

fn run_simulate(form: &Path, answers_path: &Path, decline: bool) -> CliResult<()> {
    let definition = load_definition(form)?;
    let answers: Answers = serde_json::from_str(&fs::read_to_string(answers_path)?)?;
    let report = check(&definition)?;
    for warning in &report.warnings {
        tracing::warn!(%warning, "definition warning");
    }
    let config = Compiler::new(CompileOptions::default())?.runtime_config(&definition);

    let report = simulate(&config, &answers, decline)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Drive a funnel through every question, the review and the commitment step.
fn simulate(
    config: &RuntimeConfig,
    answers: &Answers,
    decline: bool,
) -> CliResult<SimulationReport> {
    let mut funnel = Funnel::new(config);
    replay_questions(&mut funnel, answers)?;

    let qualified = funnel.is_qualified();
    let transition = if qualified {
        expect_moved(funnel.confirm_review(), "review")?;
        funnel.commit(!decline)
    } else {
        funnel.confirm_review()
    };
    let submission = match transition {
        Transition::Submitted(submission) => submission,
        other => return Err(format!("funnel did not submit: {:?}", other).into()),
    };
    Ok(SimulationReport {
        qualified,
        status: submission.status.as_str(),
        final_step: funnel.current_step(),
        webhook: submission.webhook,
        redirect: submission.redirect,
        payload: submission.payload,
    })
}

fn replay_questions(funnel: &mut Funnel<'_>, answers: &Answers) -> CliResult<()> {
    while let Screen::Question(question) = funnel.screen() {
        let answer = answers.get(&question.id).map(String::as_str).unwrap_or("");
        let transition = if question.kind.is_choice() {
            funnel.choose(answer)
        } else {
            funnel.input(answer);
            funnel.advance()
        };
        match transition {
            Transition::Moved { .. } => {}
            Transition::Ignored(Ignored::Invalid) => {
                return Err(format!("answer for '{}' is invalid: '{}'", question.id, answer).into());
            }
            Transition::Ignored(Ignored::UnknownOption) => {
                return Err(format!(
                    "answer for '{}' is not one of its options: '{}'",
                    question.id, answer
                )
                .into());
            }
            other => {
                return Err(format!("question '{}' did not advance: {:?}", question.id, other).into());
            }
        }
    }
    Ok(())
}

fn expect_moved(transition: Transition, stage: &str) -> CliResult<()> {
    match transition {
        Transition::Moved { .. } => Ok(()),
        other => Err(format!("{} did not advance: {:?}", stage, other).into()),
    }
}
