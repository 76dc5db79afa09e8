// SPDX-License-Identifier: Apache-2.0

//! Issue formatting for log events.
//!
//! Pure functions that turn a log value, an auxiliary data map, and a route
//! history into the `{title, body}` pair posted to the backend. The body uses
//! a fixed Markdown layout: free text, then an `## Important Data` table,
//! then a `## Routes` table.

use std::fmt::Write;

use serde_json::Value;

/// Auxiliary data attached to a report, rendered as a Markdown table.
///
/// Column order follows the map's iteration order. An empty map renders
/// nothing.
pub type AuxData = serde_json::Map<String, Value>;

/// One breadcrumb of application navigation/state at failure time.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Route or screen name.
    pub name: String,
    /// Parameters active for this route.
    pub params: Value,
}

impl RouteEntry {
    /// Creates a route entry from a name and its parameters.
    pub fn new(name: impl Into<String>, params: Value) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// A fully derived issue title/body pair, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContent {
    /// Issue title.
    pub title: String,
    /// Issue body (Markdown).
    pub body: String,
}

/// A log value as accepted by the reporter entry points.
///
/// Always reducible to a `(title, body)` pair via [`LogValue::issue_parts`].
#[derive(Debug, Clone)]
pub enum LogValue {
    /// Plain text; becomes the title, with an empty body.
    Text(String),
    /// A structured failure: message plus a captured trace/chain.
    Failure {
        /// Short failure message.
        message: String,
        /// Error chain or stack-like trace.
        trace: String,
    },
    /// An explicit title/body pair, passed through untouched.
    Record {
        /// Issue title.
        title: String,
        /// Issue body.
        body: String,
    },
    /// Any other structured value; coerced to a string for both parts.
    Other(Value),
}

impl LogValue {
    /// Creates a [`LogValue::Failure`] from a message and trace.
    pub fn failure(message: impl Into<String>, trace: impl Into<String>) -> Self {
        LogValue::Failure {
            message: message.into(),
            trace: trace.into(),
        }
    }

    /// Reduces the value to an issue `(title, body)` pair.
    ///
    /// Failures become `Error {message}` with the trace as body; plain text
    /// becomes the title with an empty body; anything else is coerced with
    /// [`coerce`] into both parts.
    #[must_use]
    pub fn issue_parts(&self) -> (String, String) {
        match self {
            LogValue::Text(text) => (text.clone(), String::new()),
            LogValue::Failure { message, trace } => {
                (format!("Error {message}"), format!("{trace}\n"))
            }
            LogValue::Record { title, body } => (title.clone(), body.clone()),
            LogValue::Other(value) => {
                let text = coerce(value);
                (text.clone(), text)
            }
        }
    }
}

impl From<&str> for LogValue {
    fn from(text: &str) -> Self {
        LogValue::Text(text.to_string())
    }
}

impl From<String> for LogValue {
    fn from(text: String) -> Self {
        LogValue::Text(text)
    }
}

impl From<&anyhow::Error> for LogValue {
    /// Captures the display message and the full error chain as the trace.
    fn from(err: &anyhow::Error) -> Self {
        LogValue::Failure {
            message: err.to_string(),
            trace: format!("{err:?}"),
        }
    }
}

impl From<Value> for LogValue {
    /// Objects carrying a `title` or `body` key become a [`LogValue::Record`];
    /// everything else is kept as an arbitrary value.
    fn from(value: Value) -> Self {
        if let Value::Object(map) = &value
            && (map.contains_key("title") || map.contains_key("body"))
        {
            return LogValue::Record {
                title: map.get("title").map(coerce).unwrap_or_default(),
                body: map.get("body").map(coerce).unwrap_or_default(),
            };
        }
        LogValue::Other(value)
    }
}

/// Coerces a JSON value to the string form used in titles, bodies, and table
/// cells.
///
/// Falsy values pass through unchanged rather than being re-encoded: an empty
/// string stays empty, `0` renders as `0`, `null` renders as `null`. Strings
/// keep their natural form (no surrounding quotes); arrays and objects are
/// JSON-serialized.
#[must_use]
pub fn coerce(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Renders auxiliary data as a pipe-delimited Markdown table.
///
/// One header row of keys, one divider row, one value row. An empty map
/// renders as an empty string with no stray header or divider.
#[must_use]
pub fn data_table(data: &AuxData) -> String {
    if data.is_empty() {
        return String::new();
    }
    let mut headers = String::new();
    let mut dividers = String::new();
    let mut row = String::new();
    for (key, value) in data {
        let _ = write!(headers, "|{key}");
        dividers.push_str("|---");
        let _ = write!(row, "|{}", coerce(value));
    }
    format!("{headers}|\n{dividers}|\n{row}|\n")
}

/// Renders route history as a two-column Markdown table.
///
/// One row per entry in input order. Header and divider are emitted even for
/// an empty slice; [`render_parts`] omits the whole section in that case.
#[must_use]
pub fn routes_table(routes: &[RouteEntry]) -> String {
    let mut table = String::from("\n|name|params|\n|---|---|\n");
    for route in routes {
        let _ = writeln!(table, "|{}|{}|", route.name, coerce(&route.params));
    }
    table
}

/// Assembles the final issue content from already-coerced title and body.
///
/// Output ordering is fixed: body text, then the data table, then the routes
/// table. Empty inputs degrade to nothing.
#[must_use]
pub fn render_parts(
    title: &str,
    body: &str,
    data: &AuxData,
    routes: &[RouteEntry],
) -> IssueContent {
    let mut body = body.to_string();
    if !data.is_empty() {
        body.push_str("\n## Important Data\n");
        body.push_str(&data_table(data));
    }
    if !routes.is_empty() {
        body.push_str("\n## Routes\n");
        body.push_str(&routes_table(routes));
    }
    IssueContent {
        title: title.to_string(),
        body,
    }
}

/// Assembles issue content from raw values, coercing title and body with
/// [`coerce`].
#[must_use]
pub fn render(title: &Value, body: &Value, data: &AuxData, routes: &[RouteEntry]) -> IssueContent {
    render_parts(&coerce(title), &coerce(body), data, routes)
}
