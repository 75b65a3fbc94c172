mod catalog;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use services::surface::{LocationBar, SectionView};
use services::{Clock, ContinuousPlayer, NavigationController, SteppedPlayer};
use storage::sqlite::SqliteProgressStore;
use tutor_core::model::{
    ContinuousAnimation, CycleMode, SectionId, SteppedAnimation, SteppedFrame,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownTutorial { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownTutorial { raw } => write!(f, "unknown tutorial: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

struct Args {
    db_url: String,
    tutorial: String,
    reset: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--tutorial <key>] [--reset]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:progress.sqlite3");
    eprintln!("  --tutorial transformer");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_DB_URL    overrides the default database url");
    eprintln!("  TUTOR_SECTION   deep-links into a section, like a #fragment");
    eprintln!();
    eprintln!("Tutorials:");
    for t in catalog::all() {
        eprintln!("  {:<12} {}", t.key.as_str(), t.title);
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("TUTOR_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://progress.sqlite3".into(), normalize_sqlite_url);
        let mut tutorial = "transformer".to_owned();
        let mut reset = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--tutorial" => {
                    tutorial = require_value(args, "--tutorial")?;
                }
                "--reset" => reset = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            tutorial,
            reset,
        })
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

/// Section view that narrates transitions on stdout.
struct ConsoleView;

impl SectionView for ConsoleView {
    fn activate(&self, section: &SectionId) {
        println!("── section: {section}");
    }

    fn deactivate(&self, _section: &SectionId) {}

    fn highlight_nav_item(&self, _section: &SectionId) {}

    fn mark_completed(&self, section: &SectionId) {
        println!("   visited: {section}");
    }

    fn clear_completed(&self) {
        println!("   progress cleared");
    }

    fn set_progress_percent(&self, percent: f64) {
        println!("   progress: {percent:.1}%");
    }

    fn scroll_to_top(&self) {}
}

/// Location backed by the `TUTOR_SECTION` environment variable, standing in
/// for the page's address fragment.
struct EnvLocation;

impl LocationBar for EnvLocation {
    fn fragment(&self) -> Option<String> {
        std::env::var("TUTOR_SECTION").ok()
    }

    fn set_fragment(&self, section: &SectionId) {
        println!("   address: #{section}");
    }
}

/// The attention visualization's looping cycle: four illustrated phases,
/// each one full progress sweep.
async fn run_attention_demo() -> Result<(), Box<dyn std::error::Error>> {
    const PHASES: [&str; 4] = ["Q/K/V", "dot product", "softmax", "weighted sum"];

    println!("attention animation (looping, 4 phases):");
    let anim = ContinuousAnimation::new(0.01, CycleMode::Loop { phases: 4 })?;

    let mut last_phase = usize::MAX;
    let player = ContinuousPlayer::new(
        anim,
        Duration::from_millis(16),
        Box::new(move |frame| {
            if frame.phase != last_phase {
                last_phase = frame.phase;
                println!("   phase {}: {}", frame.phase + 1, PHASES[frame.phase]);
            }
        }),
    );

    player.play();
    // let it wrap through a bit more than one full phase, then freeze
    tokio::time::sleep(Duration::from_millis(16 * 110)).await;
    player.pause();
    println!("   paused at progress {:.2}", player.frame().progress);
    player.reset();
    Ok(())
}

/// The backpropagation narration, paced faster than the page's 1.5 s
/// reading delay so the demo stays snappy.
async fn run_backprop_demo() -> Result<(), Box<dyn std::error::Error>> {
    println!("backprop animation (5 steps):");
    let anim = SteppedAnimation::from_labels([
        "Loss computed at root",
        "Gradient flows to internal nodes",
        "Gradient propagates to children",
        "Leaf gradients computed",
        "Parameters updated",
    ])?;

    let player = SteppedPlayer::new(
        anim,
        Duration::from_millis(400),
        Box::new(|frame| match frame {
            SteppedFrame::Step { index, label, .. } => println!("   step {}: {label}", index + 1),
            SteppedFrame::Complete => println!("   backprop complete"),
        }),
    );

    player.play();
    while !player.is_complete() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let tutorial = catalog::find(&args.tutorial).ok_or(ArgsError::UnknownTutorial {
        raw: args.tutorial.clone(),
    })?;

    prepare_sqlite_file(&args.db_url)?;
    let store = Arc::new(SqliteProgressStore::open(&args.db_url).await?);

    info!(tutorial = %tutorial.key, sections = tutorial.sections.len(), "opening tutorial");
    println!("{}", tutorial.title);

    let mut nav = NavigationController::start(
        tutorial.key.clone(),
        tutorial.sections.clone(),
        Clock::default(),
        store,
        Arc::new(ConsoleView),
        Arc::new(EnvLocation),
    )
    .await;

    if args.reset {
        nav.reset_progress().await;
    }
    println!(
        "at '{}' with {:.1}% of sections visited",
        nav.current_section(),
        nav.percent_complete()
    );

    // step through the next two sections, as the page's Next button would
    nav.next().await;
    nav.next().await;

    run_attention_demo().await?;
    run_backprop_demo().await?;

    println!(
        "progress saved; run again to resume at '{}'",
        nav.current_section()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
