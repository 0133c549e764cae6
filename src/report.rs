//! Plain-text user report.

use crate::user::User;

pub const REPORT_HEADER: &str = "--- User Report ---";
pub const EMPTY_REPORT_MESSAGE: &str = "No users registered.";

/// Render the report for the given users, in the order supplied
pub fn render<'a>(users: impl IntoIterator<Item = &'a User>) -> String {
    let mut out = String::new();
    out.push_str(REPORT_HEADER);
    out.push('\n');

    let mut active = 0usize;
    let mut inactive = 0usize;

    for user in users {
        if user.is_active() {
            active += 1;
        } else {
            inactive += 1;
        }
        out.push_str(&line(user));
        out.push('\n');
    }

    if active + inactive == 0 {
        out.push_str(EMPTY_REPORT_MESSAGE);
        out.push('\n');
    } else {
        out.push_str(&format!(
            "Total: {} ({} active, {} inactive)\n",
            active + inactive,
            active,
            inactive
        ));
    }

    out
}

/// Format a single report line. Name and email are quoted and escaped so a
/// user always occupies exactly one line.
pub fn line(user: &User) -> String {
    let admin = if user.is_admin() { " (admin)" } else { "" };
    format!(
        "#{} {:?} <{}> age {} [{}]{}",
        user.id(),
        user.name(),
        user.email().escape_debug(),
        user.age(),
        user.status(),
        admin
    )
}
