use std::fmt;
use std::path::PathBuf;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;
use services::config::{SECONDS_VAR, parse_seconds};
use services::{AppServices, Clock, QuizConfig};
use ui::{App, AppContext};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeconds { raw: String },
    InvalidQuestionsPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeconds { raw } => write!(f, "invalid --seconds value: {raw}"),
            ArgsError::InvalidQuestionsPath { raw } => {
                write!(f, "invalid --questions value: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path.json>] [--seconds <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions  bundled question set");
    eprintln!("  --seconds    30");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS_PATH, QUIZ_SECONDS_PER_QUESTION");
    eprintln!("  QUIZ_EMAILJS_SERVICE_ID, QUIZ_EMAILJS_TEMPLATE_ID, QUIZ_EMAILJS_PUBLIC_KEY");
    eprintln!("  QUIZ_EMAILJS_URL, RUST_LOG");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    questions_path: Option<PathBuf>,
    seconds: Option<u32>,
    help: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidQuestionsPath { raw: value });
                    }
                    parsed.questions_path = Some(PathBuf::from(value));
                }
                "--seconds" => {
                    let value = require_value(args, "--seconds")?;
                    let seconds = parse_seconds(SECONDS_VAR, &value)
                        .map_err(|_| ArgsError::InvalidSeconds { raw: value.clone() })?;
                    parsed.seconds = Some(seconds);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    /// Flags win over environment variables.
    fn apply(self, mut config: QuizConfig) -> QuizConfig {
        if let Some(path) = self.questions_path {
            config = config.with_questions_path(path);
        }
        if let Some(seconds) = self.seconds {
            config = config.with_seconds_per_question(seconds);
        }
        config
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let config = args.apply(QuizConfig::from_env()?);
    if config.delivery.is_none() {
        info!("EmailJS is not configured; results will only be logged");
    }
    let services = AppServices::from_config(&config, Clock::system()).await?;
    let context = AppContext::new(services);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
