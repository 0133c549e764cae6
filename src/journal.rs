//! Per-session JSONL journal of registry events.

use crate::user::{User, UserId};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Journal {
    pub path: PathBuf,
    session_id: String,
    file: File,
}

#[derive(Serialize)]
struct Event<'a> {
    ts: DateTime<Utc>,
    session_id: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl Journal {
    /// Open (or create) `<dir>/<session_id>.jsonl` for appending
    pub fn open(dir: &Path, session_id: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.jsonl", session_id));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            session_id: session_id.to_string(),
            file,
        })
    }

    pub fn log(&mut self, event_type: &str, data: serde_json::Value) -> Result<()> {
        let event = Event {
            ts: Utc::now(),
            session_id: &self.session_id,
            event_type,
            data,
        };
        let line = serde_json::to_string(&event)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }

    pub fn session_start(&mut self) -> Result<()> {
        self.log(
            "session_start",
            serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }),
        )
    }

    pub fn user_created(&mut self, user: &User) -> Result<()> {
        self.log("user_created", serde_json::json!({ "user": user }))
    }

    /// Log a rejected creation
    pub fn validation_failed(&mut self, field: &str, message: &str) -> Result<()> {
        self.log(
            "validation_failed",
            serde_json::json!({ "field": field, "message": message }),
        )
    }

    pub fn user_lookup(&mut self, id: UserId, found: bool) -> Result<()> {
        self.log(
            "user_lookup",
            serde_json::json!({ "id": id, "found": found }),
        )
    }

    pub fn user_deactivated(&mut self, id: UserId, ok: bool) -> Result<()> {
        self.log(
            "user_deactivated",
            serde_json::json!({ "id": id, "ok": ok }),
        )
    }

    pub fn report_generated(&mut self, users: usize) -> Result<()> {
        self.log("report_generated", serde_json::json!({ "users": users }))
    }

    pub fn registry_cleared(&mut self, removed: usize) -> Result<()> {
        self.log(
            "registry_cleared",
            serde_json::json!({ "removed": removed }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UserRegistry;
    use serde_json::Value;
    use tempfile::TempDir;

    fn read_events(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_creates_dir_and_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("sessions");
        let journal = Journal::open(&dir, "abc").unwrap();
        assert_eq!(journal.path, dir.join("abc.jsonl"));
        assert!(journal.path.exists());
    }

    #[test]
    fn test_event_shape() {
        let tmp = TempDir::new().unwrap();
        let mut journal = Journal::open(tmp.path(), "s1").unwrap();
        let mut registry = UserRegistry::new();
        let user = registry.create_user("Alice", "alice@email.com", 28).unwrap();

        journal.session_start().unwrap();
        journal.user_created(&user).unwrap();
        journal.user_deactivated(user.id(), true).unwrap();
        journal.registry_cleared(1).unwrap();

        let events = read_events(&journal.path);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0]["type"], "session_start");
        assert_eq!(events[0]["session_id"], "s1");
        assert!(events[0]["ts"].is_string());
        assert_eq!(events[1]["user"]["name"], "Alice");
        assert_eq!(events[1]["user"]["status"], "active");
        assert_eq!(events[2]["ok"], true);
        assert_eq!(events[3]["removed"], 1);
    }

    #[test]
    fn test_appends_across_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let mut journal = Journal::open(tmp.path(), "s2").unwrap();
            journal.report_generated(0).unwrap();
        }
        let mut journal = Journal::open(tmp.path(), "s2").unwrap();
        journal.validation_failed("age", "the user must be of legal age").unwrap();

        let events = read_events(&journal.path);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["type"], "validation_failed");
        assert_eq!(events[1]["field"], "age");
    }
}
