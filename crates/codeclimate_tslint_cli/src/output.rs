//! Issue stream framing.
//!
//! The platform reads issues from the engine's stdout as a sequence of JSON
//! documents, each terminated by a NUL byte.

use std::io::{self, Write};

use codeclimate_tslint_schema::Issue;

/// Writes one issue as compact JSON followed by the NUL terminator.
pub fn write_issue(out: &mut impl Write, issue: &Issue) -> io::Result<()> {
    let json = serde_json::to_string(issue)?;
    writeln!(out, "{json}\u{0}")
}
