//! Request validation for the task API.
//!
//! Four surfaces gate every operation: the task body (create/update), the
//! `:id` path parameter, the `:level` path parameter and the list query.
//! Body checks collect every failing field into a [`ValidationResult`];
//! callers that need a single error surface the first one.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Result, TaskError};
use crate::task::{Priority, TaskDraft};

/// `dd/mm/yyyy`.
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/\d{4}$").expect("valid date regex")
});

const ID_NOT_NUMBER: &str = "Task id should be of type \"number\"";
const ID_NOT_POSITIVE: &str = "ID must be greater than 0";
const ID_NOT_INTEGER: &str = "Task id should be an integer";
const ID_TOO_LARGE: &str = "Task id is too large";
const COMPLETED_QUERY: &str = "This 'completed' query value should be either 'true' or 'false'";

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

/// A single failing field.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field name, empty for whole-document problems.
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// The error surfaced to API clients.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    fn into_error(self) -> TaskError {
        TaskError::validation(
            self.first_message()
                .unwrap_or("Invalid task body")
                .to_string(),
        )
    }
}

// ── Body schema ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// Required-ness aside, empty strings are treated as missing.
    NonEmptyString,
    /// JSON `true`/`false` only; no coercion from strings or numbers.
    StrictBool,
    PriorityLevel,
    /// String matching [`DAY_MONTH_YEAR`].
    DayMonthYear,
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    name: &'static str,
    required: bool,
    kind: FieldKind,
}

const TASK_BODY_SCHEMA: &[FieldRule] = &[
    FieldRule {
        name: "title",
        required: true,
        kind: FieldKind::NonEmptyString,
    },
    FieldRule {
        name: "description",
        required: true,
        kind: FieldKind::NonEmptyString,
    },
    FieldRule {
        name: "completed",
        required: true,
        kind: FieldKind::StrictBool,
    },
    FieldRule {
        name: "priority",
        required: false,
        kind: FieldKind::PriorityLevel,
    },
    // Accepted for compatibility; creation time is always assigned by the store.
    FieldRule {
        name: "createdAt",
        required: false,
        kind: FieldKind::DayMonthYear,
    },
];

enum FieldValue {
    Text(String),
    Flag(bool),
    Level(Priority),
    Ignored,
}

fn check_field(
    rule: &FieldRule,
    value: Option<&Value>,
    result: &mut ValidationResult,
) -> Option<FieldValue> {
    let value = match value {
        None | Some(Value::Null) => {
            if rule.required {
                result.error(rule.name, format!("{} is a required field", rule.name));
            }
            return None;
        }
        Some(v) => v,
    };

    match rule.kind {
        FieldKind::NonEmptyString => match value {
            Value::String(s) if s.is_empty() && rule.required => {
                result.error(rule.name, format!("{} is a required field", rule.name));
                None
            }
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            other => {
                result.error(rule.name, type_message(rule.name, "string", other));
                None
            }
        },
        FieldKind::StrictBool => match value {
            Value::Bool(b) => Some(FieldValue::Flag(*b)),
            other => {
                result.error(rule.name, type_message(rule.name, "boolean", other));
                None
            }
        },
        FieldKind::PriorityLevel => match value.as_str().map(str::parse::<Priority>) {
            Some(Ok(level)) => Some(FieldValue::Level(level)),
            _ => {
                result.error(rule.name, Priority::membership_message());
                None
            }
        },
        FieldKind::DayMonthYear => match value {
            Value::String(s) if DAY_MONTH_YEAR.is_match(s) => Some(FieldValue::Ignored),
            Value::String(_) => {
                result.error(rule.name, "Date must be in the format dd/mm/yyyy");
                None
            }
            other => {
                result.error(rule.name, type_message(rule.name, "string", other));
                None
            }
        },
    }
}

fn type_message(name: &str, expected: &str, got: &Value) -> String {
    format!("{name} must be a `{expected}` type, but the final value was: `{got}`.")
}

#[derive(Default)]
struct DraftFields {
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    priority: Option<Priority>,
}

fn run_body_schema(body: &Value) -> (ValidationResult, DraftFields) {
    let mut result = ValidationResult::new();
    let mut fields = DraftFields::default();

    let empty = Map::new();
    let object = match body {
        Value::Object(map) => map,
        other => {
            result.error("", format!("Task body must be a JSON object, got `{other}`"));
            &empty
        }
    };

    for rule in TASK_BODY_SCHEMA {
        match (rule.name, check_field(rule, object.get(rule.name), &mut result)) {
            ("title", Some(FieldValue::Text(s))) => fields.title = Some(s),
            ("description", Some(FieldValue::Text(s))) => fields.description = Some(s),
            (_, Some(FieldValue::Flag(b))) => fields.completed = Some(b),
            (_, Some(FieldValue::Level(p))) => fields.priority = Some(p),
            _ => {}
        }
    }

    (result, fields)
}

/// Run the body schema and report every failing field.
pub fn check_task_body(body: &Value) -> ValidationResult {
    run_body_schema(body).0
}

/// Validate a task body and convert it into a [`TaskDraft`].
///
/// Missing `priority` becomes [`Priority::Low`]; `createdAt` is checked but
/// never carried into the draft.
pub fn validate_task_body(body: &Value) -> Result<TaskDraft> {
    let (result, fields) = run_body_schema(body);
    if !result.valid {
        return Err(result.into_error());
    }

    match (fields.title, fields.description, fields.completed) {
        (Some(title), Some(description), Some(completed)) => Ok(TaskDraft {
            title,
            description,
            completed,
            priority: fields.priority.unwrap_or_default(),
        }),
        _ => Err(result.into_error()),
    }
}

/// Parse raw request bytes as JSON and validate them as a task body.
pub fn parse_task_body(raw: &[u8]) -> Result<TaskDraft> {
    let body: Value = serde_json::from_slice(raw)
        .map_err(|e| TaskError::validation(format!("Request body is not valid JSON: {e}")))?;
    validate_task_body(&body)
}

// ── Path parameters ─────────────────────────────────────────────────

/// Validate the `:id` path parameter: a whole number greater than zero that
/// fits in a `u64`.
pub fn validate_task_id(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskError::validation(ID_NOT_POSITIVE));
    }
    if let Ok(id) = trimmed.parse::<u64>() {
        return match id {
            0 => Err(TaskError::validation(ID_NOT_POSITIVE)),
            id => Ok(id),
        };
    }

    // Not a plain integer: classify signs, fractions, exponents and overflow.
    let number: f64 = trimmed
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or_else(|| TaskError::validation(ID_NOT_NUMBER))?;

    if number <= 0.0 {
        return Err(TaskError::validation(ID_NOT_POSITIVE));
    }
    // `u64::MAX as f64` rounds up to 2^64, the first value that does not fit.
    if number >= u64::MAX as f64 {
        return Err(TaskError::validation(ID_TOO_LARGE));
    }
    if number.fract() != 0.0 {
        return Err(TaskError::validation(ID_NOT_INTEGER));
    }
    Ok(number as u64)
}

/// Validate the `:level` path parameter against the priority enum.
pub fn validate_priority_level(raw: &str) -> Result<Priority> {
    raw.parse()
}

// ── Query ───────────────────────────────────────────────────────────

/// Validate the optional `completed` list filter.
///
/// Absent or empty means no filter.
pub fn validate_list_query(completed: Option<&str>) -> Result<Option<bool>> {
    match completed {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(_) => Err(TaskError::validation(COMPLETED_QUERY)),
    }
}
