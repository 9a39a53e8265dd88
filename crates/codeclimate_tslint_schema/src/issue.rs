//! Issue types from the Code Climate engine specification.

use serde::{Deserialize, Serialize};

/// Discriminator for emitted records. Engines only ever emit `issue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    #[default]
    Issue,
}

/// Issue categories defined by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Bug Risk")]
    BugRisk,
    Clarity,
    Compatibility,
    Complexity,
    Duplication,
    Performance,
    Security,
    Style,
}

/// Issue severity levels defined by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Normal,
    Critical,
}

/// Markdown content attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    pub body: String,
}

impl Contents {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// A single point in a source file, either line/column or byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    LineColumn { line: u32, column: u32 },
    Offset { offset: u32 },
}

impl Position {
    pub fn line_column(line: u32, column: u32) -> Self {
        Self::LineColumn { line, column }
    }
}

/// Inclusive line range for the line-based location form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub begin: u32,
    pub end: u32,
}

/// Begin/end pair for the position-based location form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRange {
    pub begin: Position,
    pub end: Position,
}

/// Where an issue occurred. The platform accepts a line-range form and a
/// position-range form; this engine always emits the position form.
///
/// `path` must be relative to the analysis root, never absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Lines { path: String, lines: LineRange },
    Positions { path: String, positions: PositionRange },
}

impl Location {
    pub fn lines(path: impl Into<String>, begin: u32, end: u32) -> Self {
        Self::Lines {
            path: path.into(),
            lines: LineRange { begin, end },
        }
    }

    pub fn positions(path: impl Into<String>, begin: Position, end: Position) -> Self {
        Self::Positions {
            path: path.into(),
            positions: PositionRange { begin, end },
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Lines { path, .. } | Self::Positions { path, .. } => path,
        }
    }
}

/// Machine-readable execution trace attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<bool>,
}

/// One issue record as emitted on the engine's output stream.
///
/// Field order matches the platform documentation so the serialized form
/// reads the same as the reference engines' output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub check_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Contents>,
    pub categories: Vec<Category>,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_locations: Option<Vec<Location>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Trace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_points: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}
