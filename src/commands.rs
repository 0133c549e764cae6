//! Registry commands typed at the prompt or passed with `--exec`.
//!
//! A line is split with shell quoting rules, so names containing spaces
//! can be given as `create "Ada Lovelace" ada@example.com 36`.

use crate::user::{NewUser, UserId};
use anyhow::{anyhow, bail, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(NewUser),
    Get(UserId),
    Deactivate(UserId),
    Report,
    Clear,
    List,
    Session,
    Help,
    Exit,
}

pub const HELP: &str = "\
Commands:
  create <name> <email> <age> [--admin] - register a user
  get <id>                              - show a user
  deactivate <id>                       - deactivate a non-admin user
  report                                - print the user report
  list                                  - print every user as JSON
  clear                                 - remove all users
  session                               - show session info
  help                                  - show commands
  exit                                  - quit";

/// Parse one input line. Returns `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let words = shell_words::split(line).map_err(|e| anyhow!("Invalid input: {}", e))?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(None);
    };

    // Allow REPL-style "/report" as well as "report"
    let name = head.strip_prefix('/').unwrap_or(head.as_str());

    let cmd = match name {
        "create" => Command::Create(parse_create(rest)?),
        "get" => Command::Get(parse_id(name, rest)?),
        "deactivate" => Command::Deactivate(parse_id(name, rest)?),
        "report" => no_args(name, rest, Command::Report)?,
        "clear" => no_args(name, rest, Command::Clear)?,
        "list" => no_args(name, rest, Command::List)?,
        "session" => no_args(name, rest, Command::Session)?,
        "help" => no_args(name, rest, Command::Help)?,
        "exit" | "quit" => no_args(name, rest, Command::Exit)?,
        other => bail!("Unknown command: {}. Type help for commands.", other),
    };

    Ok(Some(cmd))
}

fn parse_create(args: &[String]) -> Result<NewUser> {
    let mut is_admin = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--admin" => is_admin = true,
            _ => positional.push(arg),
        }
    }

    let [name, email, age] = positional.as_slice() else {
        bail!("Usage: create <name> <email> <age> [--admin]");
    };

    let age = age
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid age '{}': expected a non-negative integer", age))?;

    Ok(NewUser {
        name: name.to_string(),
        email: email.to_string(),
        age,
        is_admin,
    })
}

fn parse_id(cmd: &str, args: &[String]) -> Result<UserId> {
    let [id] = args else {
        bail!("Usage: {} <id>", cmd);
    };
    id.parse::<UserId>()
        .map_err(|_| anyhow!("Invalid id '{}'", id))
}

fn no_args(cmd: &str, args: &[String], command: Command) -> Result<Command> {
    if !args.is_empty() {
        bail!("{} takes no arguments", cmd);
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_create_quoted_name() {
        let cmd = parse(r#"create "Fulano de Tal" fulano@teste.com 25"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Create(NewUser::new("Fulano de Tal", "fulano@teste.com", 25))
        );
    }

    #[test]
    fn test_create_admin_flag_anywhere() {
        let Some(Command::Create(args)) = parse("create --admin Admin admin@teste.com 40").unwrap()
        else {
            panic!("expected create");
        };
        assert!(args.is_admin);
        assert_eq!(args.name, "Admin");
        assert_eq!(args.age, 40);
    }

    #[test]
    fn test_create_bad_input() {
        assert!(parse("create Bob bob@email.com").is_err());
        let err = parse("create Bob bob@email.com -3").unwrap_err();
        assert!(err.to_string().contains("Invalid age"));
        assert!(parse("create Bob bob@email.com old").is_err());
    }

    #[test]
    fn test_id_commands() {
        assert_eq!(parse("get 3").unwrap(), Some(Command::Get(3)));
        assert_eq!(parse("/deactivate 7").unwrap(), Some(Command::Deactivate(7)));
        assert!(parse("get").is_err());
        assert!(parse("get x").is_err());
        assert!(parse("get 1 2").is_err());
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("report").unwrap(), Some(Command::Report));
        assert_eq!(parse("/clear").unwrap(), Some(Command::Clear));
        assert_eq!(parse("quit").unwrap(), Some(Command::Exit));
        assert!(parse("report now").is_err());
        assert!(parse("help me").is_err());
        assert!(parse("exit now").is_err());
    }

    #[test]
    fn test_unknown_and_unbalanced() {
        let err = parse("delete 1").unwrap_err();
        assert!(err.to_string().contains("Unknown command: delete"));
        assert!(parse(r#"create "Bob bob@email.com 30"#).is_err());
    }
}
