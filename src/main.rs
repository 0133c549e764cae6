use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use userreg::{cli, config, journal::Journal, UserRegistry};

#[derive(Parser)]
#[command(name = "userreg", about = "In-memory user registry")]
pub struct Args {
    #[arg(
        short,
        long = "exec",
        value_name = "COMMAND",
        action = clap::ArgAction::Append,
        help = "Run a command and exit (repeatable, e.g. -e 'create Ann ann@x.com 30' -e report)"
    )]
    pub exec: Vec<String>,

    #[arg(long, help = "Config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "USERREG_JOURNAL_DIR", help = "Session journal directory")]
    pub journal_dir: Option<PathBuf>,

    #[arg(long, help = "Do not write a session journal")]
    pub no_journal: bool,

    #[arg(long, help = "Verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Debug output (print commands and settings)")]
    pub debug: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut cfg = if let Some(config_path) = &args.config {
        config::Config::load_from(config_path)?
    } else {
        config::Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: failed to load config, using defaults: {}", e);
            config::Config::default()
        })
    };

    // CLI overrides
    if let Some(dir) = &args.journal_dir {
        cfg.journal.dir = Some(dir.clone());
    }
    if args.no_journal {
        cfg.journal.enabled = Some(false);
    }

    if let Err(errors) = cfg.validate() {
        for err in &errors {
            eprintln!("Config error [{}]: {}", err.field, err);
        }
        return Err(anyhow::anyhow!(
            "Invalid configuration ({} error(s))",
            errors.len()
        ));
    }

    if args.debug {
        eprintln!("[DEBUG] Journal enabled: {}", cfg.journal.enabled());
    }

    let root = std::env::current_dir()?;
    let session_id = uuid::Uuid::new_v4().to_string();

    let journal = if cfg.journal.enabled() {
        let dir = cfg.journal.dir(&root);
        let mut journal = Journal::open(&dir, &session_id)?;
        journal.session_start()?;
        if args.debug {
            eprintln!("[DEBUG] Journal: {}", journal.path.display());
        }
        Some(journal)
    } else {
        None
    };

    let registry = UserRegistry::new();
    let mut ctx = cli::Context::new(registry, journal, session_id);
    ctx.verbose = args.verbose || args.debug;
    ctx.debug = args.debug;

    if args.exec.is_empty() {
        cli::run_repl(ctx)
    } else {
        cli::run_once(&ctx, &args.exec)
    }
}
