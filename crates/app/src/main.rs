use std::collections::BTreeMap;
use std::fmt;

use services::{AppServices, ModuleView, ProgressStore, SaveStatus, module_overview, module_view};
use tracing_subscriber::EnvFilter;
use vark_core::content::{self, survey_questions};
use vark_core::model::{LearningStyle, ParseStyleError};
use vark_core::{Clock, Phase};

const DEFAULT_LOG_FILTER: &str = "app=info,services=info,storage=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { what: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidStyle(ParseStyleError),
    InvalidNumber { what: &'static str, raw: String },
    InvalidSurveyAnswer { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { what } => write!(f, "missing {what}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidStyle(err) => write!(f, "{err}"),
            ArgsError::InvalidNumber { what, raw } => write!(f, "invalid {what}: {raw}"),
            ArgsError::InvalidSurveyAnswer { raw } => {
                write!(f, "invalid survey answer `{raw}`, expected <question>=<option>")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ParseStyleError> for ArgsError {
    fn from(err: ParseStyleError) -> Self {
        ArgsError::InvalidStyle(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  vark [--db <sqlite_url>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status                         show the current screen and progress (default)");
    eprintln!("  topics                         list available topics");
    eprintln!("  topic <id>                     select a topic");
    eprintln!("  survey <q>=<option>...         submit survey answers, e.g. q1=b q2=a");
    eprintln!("  study <style>                  start studying a module");
    eprintln!("  time <style> <seconds>         record study time");
    eprintln!("  notes <style> <text>...        save notes for a module");
    eprintln!("  test <style> <answer>...       submit recall answers as option indices");
    eprintln!("  reset                          discard all progress");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://vark.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VARK_DB_URL, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Status,
    Topics,
    Topic(String),
    Survey(BTreeMap<String, String>),
    Study(LearningStyle),
    Time(LearningStyle, u64),
    Notes(LearningStyle, String),
    Test(LearningStyle, Vec<usize>),
    Reset,
}

impl Command {
    fn parse(name: &str, rest: Vec<String>) -> Result<Self, ArgsError> {
        let mut rest = rest.into_iter();
        let command = match name {
            "status" => Self::Status,
            "topics" => Self::Topics,
            "topic" => Self::Topic(next_arg(&mut rest, "topic id")?),
            "survey" => Self::Survey(parse_survey(rest.by_ref())?),
            "study" => Self::Study(next_style(&mut rest)?),
            "time" => {
                let style = next_style(&mut rest)?;
                let raw = next_arg(&mut rest, "seconds")?;
                Self::Time(style, parse_number(&raw, "seconds")?)
            }
            "notes" => {
                let style = next_style(&mut rest)?;
                let text: Vec<String> = rest.by_ref().collect();
                Self::Notes(style, text.join(" "))
            }
            "test" => {
                let style = next_style(&mut rest)?;
                let answers = rest
                    .by_ref()
                    .map(|raw| parse_number(&raw, "answer index"))
                    .collect::<Result<Vec<usize>, _>>()?;
                Self::Test(style, answers)
            }
            "reset" => Self::Reset,
            other => return Err(ArgsError::UnknownArg(other.to_string())),
        };

        if let Some(extra) = rest.next() {
            return Err(ArgsError::UnknownArg(extra));
        }
        Ok(command)
    }
}

fn next_arg(
    args: &mut impl Iterator<Item = String>,
    what: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingArgument { what })
}

fn next_style(args: &mut impl Iterator<Item = String>) -> Result<LearningStyle, ArgsError> {
    Ok(next_arg(args, "learning style")?.parse()?)
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &'static str) -> Result<T, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidNumber {
        what,
        raw: raw.to_string(),
    })
}

fn parse_survey(
    args: impl Iterator<Item = String>,
) -> Result<BTreeMap<String, String>, ArgsError> {
    args.map(|raw| match raw.split_once('=') {
        Some((question, option)) if !question.is_empty() && !option.is_empty() => {
            Ok((question.to_string(), option.to_string()))
        }
        _ => Err(ArgsError::InvalidSurveyAnswer { raw }),
    })
    .collect()
}

struct Args {
    db_url: String,
    command: Command,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("VARK_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://vark.sqlite3".into(), normalize_sqlite_url);
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") && positional.is_empty() => {
                    return Err(ArgsError::UnknownArg(arg));
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next() {
            None => Command::Status,
            Some(name) => Command::parse(&name, positional.collect())?,
        };

        Ok(Self { db_url, command })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn execute(store: &mut ProgressStore, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Status => {}
        Command::Topics => {
            for topic in content::topics() {
                println!("{:<24} {}", topic.id, topic.name);
                println!("{:<24} {}", "", topic.description);
            }
            return Ok(());
        }
        Command::Topic(id) => {
            store.select_topic(&id)?;
        }
        Command::Survey(answers) => {
            store.complete_survey(&answers);
        }
        Command::Study(style) => {
            store.start_module(style);
            if let ModuleView::Authored(module) = module_view(store.snapshot(), style) {
                println!("{}", module.title);
                println!("{}", module.summary);
                println!();
            }
        }
        Command::Time(style, seconds) => {
            store.record_study_time(style, seconds);
        }
        Command::Notes(style, text) => {
            store.save_notes(style, &text);
        }
        Command::Test(style, indices) => {
            let answers = recall_answers(store, style, &indices);
            let score = store.complete_module_test(style, &answers)?;
            println!("{} recall score: {score}", style.module_name());
        }
        Command::Reset => {
            store.reset();
        }
    }

    print_status(store);
    Ok(())
}

/// Pair positional answer indices with the module's question ids.
fn recall_answers(
    store: &ProgressStore,
    style: LearningStyle,
    indices: &[usize],
) -> BTreeMap<String, usize> {
    match module_view(store.snapshot(), style) {
        ModuleView::Authored(module) => module
            .questions
            .iter()
            .zip(indices)
            .map(|(question, index)| (question.id.to_string(), *index))
            .collect(),
        ModuleView::Placeholder { .. } => BTreeMap::new(),
    }
}

fn print_status(store: &ProgressStore) {
    let snapshot = store.snapshot();
    let phase = store.current_phase();
    println!("screen: {phase}");

    match phase {
        Phase::Welcome => println!("run `vark topics` and `vark topic <id>` to begin"),
        Phase::TopicSelection => println!("run `vark topic <id>` to choose a topic"),
        Phase::Survey => {
            for question in survey_questions() {
                println!("{}: {}", question.id, question.prompt);
                for option in &question.options {
                    println!("    {}) {}", option.id, option.text);
                }
            }
        }
        Phase::ModuleSelection => {
            if let Some(tally) = snapshot.vark_results() {
                let counts: Vec<String> = tally
                    .iter()
                    .map(|(style, count)| format!("{style}={count}"))
                    .collect();
                println!("survey: {}", counts.join(" "));
            }
            for card in module_overview(snapshot) {
                let score = card.score.map(|s| s.to_string()).unwrap_or_default();
                println!(
                    "  {:<12} {:<28} {:<12} {:>5} {}s",
                    card.style.as_str(),
                    card.title,
                    format!("{:?}", card.status),
                    score,
                    card.time_spent
                );
            }
        }
        Phase::Results => {
            if let Some(results) = snapshot.final_results() {
                let primary = results.primary_learning_style();
                println!("You are a {}", primary.learner_label());
                for (style, score) in results.ranked_performance() {
                    println!("  {:<12} {score}", style.as_str());
                }
                println!("Recommended strategies:");
                for line in results.recommendations() {
                    println!("  - {line}");
                }
                println!("completed at {}", results.completed_at().to_rfc3339());
            }
        }
    }

    if let SaveStatus::Error(message) = store.save_status() {
        eprintln!("warning: progress could not be saved: {message}");
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    tracing::debug!(db = %parsed.db_url, command = ?parsed.command, "opening progress database");
    let mut store = AppServices::open_sqlite(&parsed.db_url, Clock::system()).await?;

    let outcome = execute(&mut store, parsed.command);
    store.flush().await;
    outcome
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
