use crate::commands::{self, Command};
use crate::journal::Journal;
use crate::registry::UserRegistry;
use crate::report;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cell::RefCell;
use std::io::Write;

pub struct Context {
    pub registry: RefCell<UserRegistry>,
    pub journal: Option<RefCell<Journal>>,
    pub session_id: String,
    pub verbose: bool,
    pub debug: bool,
}

/// What the caller should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl Context {
    pub fn new(registry: UserRegistry, journal: Option<Journal>, session_id: String) -> Self {
        Self {
            registry: RefCell::new(registry),
            journal: journal.map(RefCell::new),
            session_id,
            verbose: false,
            debug: false,
        }
    }

    /// Append to the journal if one is open; write failures are only warned about
    fn record(&self, f: impl FnOnce(&mut Journal) -> Result<()>) {
        if let Some(journal) = &self.journal {
            if let Err(e) = f(&mut *journal.borrow_mut()) {
                eprintln!("Warning: journal write failed: {}", e);
            }
        }
    }
}

/// Run a single command line, writing output to `out`
pub fn execute_line(ctx: &Context, line: &str, out: &mut dyn Write) -> Result<Flow> {
    match commands::parse(line)? {
        Some(cmd) => execute(ctx, cmd, out),
        None => Ok(Flow::Continue),
    }
}

pub fn execute(ctx: &Context, cmd: Command, out: &mut dyn Write) -> Result<Flow> {
    if ctx.debug {
        eprintln!("[DEBUG] Command: {:?}", cmd);
    }

    match cmd {
        Command::Create(input) => {
            let result = ctx.registry.borrow_mut().create_user_with(input);
            match result {
                Ok(user) => {
                    ctx.record(|j| j.user_created(&user));
                    if ctx.verbose {
                        eprintln!("Created user {}", user.id());
                    }
                    writeln!(out, "{}", serde_json::to_string(&user)?)?;
                }
                Err(err) => {
                    ctx.record(|j| j.validation_failed(&err.field, &err.message));
                    return Err(err.into());
                }
            }
        }
        Command::Get(id) => {
            let registry = ctx.registry.borrow();
            let user = registry.get_user_by_id(id);
            ctx.record(|j| j.user_lookup(id, user.is_some()));
            match user {
                Some(user) => writeln!(out, "{}", serde_json::to_string(user)?)?,
                None => writeln!(out, "User {} not found", id)?,
            }
        }
        Command::Deactivate(id) => {
            let ok = ctx.registry.borrow_mut().deactivate_user(id);
            ctx.record(|j| j.user_deactivated(id, ok));
            if ctx.verbose && !ok {
                eprintln!("User {} is unknown, an administrator, or already inactive", id);
            }
            writeln!(out, "{}", if ok { "deactivated" } else { "not deactivated" })?;
        }
        Command::Report => {
            let registry = ctx.registry.borrow();
            let text = registry.generate_user_report();
            ctx.record(|j| j.report_generated(registry.len()));
            write!(out, "{}", text)?;
        }
        Command::Clear => {
            let removed = ctx.registry.borrow_mut().clear_all();
            ctx.record(|j| j.registry_cleared(removed));
            writeln!(out, "Removed {} user(s)", removed)?;
        }
        Command::List => {
            let registry = ctx.registry.borrow();
            if registry.is_empty() {
                writeln!(out, "{}", report::EMPTY_REPORT_MESSAGE)?;
            }
            for user in registry.users() {
                writeln!(out, "{}", serde_json::to_string(user)?)?;
            }
        }
        Command::Session => {
            writeln!(out, "Session: {}", ctx.session_id)?;
            match &ctx.journal {
                Some(journal) => writeln!(out, "Journal: {}", journal.borrow().path.display())?,
                None => writeln!(out, "Journal: disabled")?,
            }
        }
        Command::Help => writeln!(out, "{}", commands::HELP)?,
        Command::Exit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

/// Run each line in order, stopping at the first error or `exit`
pub fn run_once(ctx: &Context, lines: &[String]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        if execute_line(ctx, line, &mut out)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

pub fn run_repl(ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("userreg - type help for commands, exit to quit");

    loop {
        match rl.readline("userreg> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                let mut out = std::io::stdout();
                match execute_line(&ctx, line, &mut out) {
                    Ok(Flow::Exit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}
