//! Parse-and-validate layer for task payloads.
//!
//! Request bodies arrive as raw JSON so that every problem in a payload is
//! reported at once, keyed by field name:
//!
//! ```json
//! {"title": ["Missing data for required field."], "done": ["Not a valid boolean."]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, TaskPatch};

/// Key used for errors about the payload as a whole
pub const SCHEMA_KEY: &str = "_schema";

const INVALID_INPUT: &str = "Invalid input type.";
const MISSING_FIELD: &str = "Missing data for required field.";
const NULL_FIELD: &str = "Field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_A_BOOLEAN: &str = "Not a valid boolean.";
const NOT_AN_INTEGER: &str = "Not a valid integer.";
const UNKNOWN_FIELD: &str = "Unknown field.";

/// Field name to error messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors = FieldErrors::new();
        for (field, errors) in errors.field_errors() {
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                field_errors.add(field.to_string(), message);
            }
        }
        field_errors
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Create or replace: `title` is required
    Full,
    /// Patch: every field is optional
    Partial,
}

/// Length rules shared by both modes
#[derive(Validate)]
struct TextFields {
    #[validate(length(max = 150, message = "Longer than maximum length 150."))]
    title: Option<String>,
    #[validate(length(max = 500, message = "Longer than maximum length 500."))]
    description: Option<String>,
}

/// Values that passed type checks, before mode-specific assembly
struct Loaded {
    title: Option<String>,
    description: Option<Option<String>>,
    done: Option<bool>,
}

/// Parse a create/replace payload. `title` is required, `done` defaults to false.
pub fn parse_new_task(body: Value) -> TaskResult<NewTask> {
    let loaded = load(body, Mode::Full)?;

    let Some(title) = loaded.title else {
        let mut errors = FieldErrors::new();
        errors.add("title", MISSING_FIELD);
        return Err(TaskError::Validation(errors));
    };

    Ok(NewTask {
        title,
        description: loaded.description.flatten(),
        done: loaded.done.unwrap_or(false),
    })
}

/// Parse a patch payload. Only keys present in `body` are carried.
pub fn parse_task_patch(body: Value) -> TaskResult<TaskPatch> {
    let loaded = load(body, Mode::Partial)?;

    Ok(TaskPatch {
        title: loaded.title,
        description: loaded.description,
        done: loaded.done,
    })
}

fn load(body: Value, mode: Mode) -> TaskResult<Loaded> {
    let mut errors = FieldErrors::new();

    let Value::Object(mut fields) = body else {
        errors.add(SCHEMA_KEY, INVALID_INPUT);
        return Err(TaskError::Validation(errors));
    };

    if mode == Mode::Full && !fields.contains_key("title") {
        errors.add("title", MISSING_FIELD);
    }

    let title = take_title(&mut fields, &mut errors);
    let description = take_description(&mut fields, &mut errors);
    let done = take_done(&mut fields, &mut errors);

    // Ids are assigned by the server; a well-typed client id is ignored.
    check_id(&mut fields, &mut errors);
    for unknown in fields.keys() {
        errors.add(unknown.as_str(), UNKNOWN_FIELD);
    }

    let lengths = TextFields {
        title: title.clone(),
        description: description.clone().flatten(),
    };
    if let Err(e) = lengths.validate() {
        errors.merge(e.into());
    }

    if !errors.is_empty() {
        return Err(TaskError::Validation(errors));
    }

    Ok(Loaded {
        title,
        description,
        done,
    })
}

fn check_id(fields: &mut Map<String, Value>, errors: &mut FieldErrors) {
    match fields.remove("id") {
        None => {}
        Some(Value::Null) => errors.add("id", NULL_FIELD),
        Some(Value::Number(_)) => {}
        Some(Value::String(s)) if is_integer_text(&s) => {}
        Some(_) => errors.add("id", NOT_AN_INTEGER),
    }
}

/// Optional sign then digits, surrounding whitespace allowed
fn is_integer_text(s: &str) -> bool {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn take_title(fields: &mut Map<String, Value>, errors: &mut FieldErrors) -> Option<String> {
    match fields.remove("title")? {
        Value::String(title) => Some(title),
        Value::Null => {
            errors.add("title", NULL_FIELD);
            None
        }
        _ => {
            errors.add("title", NOT_A_STRING);
            None
        }
    }
}

fn take_description(
    fields: &mut Map<String, Value>,
    errors: &mut FieldErrors,
) -> Option<Option<String>> {
    match fields.remove("description")? {
        Value::String(description) => Some(Some(description)),
        Value::Null => Some(None),
        _ => {
            errors.add("description", NOT_A_STRING);
            None
        }
    }
}

fn take_done(fields: &mut Map<String, Value>, errors: &mut FieldErrors) -> Option<bool> {
    match fields.remove("done")? {
        Value::Null => {
            errors.add("done", NULL_FIELD);
            None
        }
        value => {
            let done = coerce_bool(&value);
            if done.is_none() {
                errors.add("done", NOT_A_BOOLEAN);
            }
            done
        }
    }
}

/// Booleans plus the usual truthy and falsy spellings: `1`/`0`, `"true"`/`"false"`,
/// `"yes"`/`"no"`, `"on"`/`"off"`, `"t"`/`"f"`, `"y"`/`"n"` and `"1"`/`"0"`.
/// Words match in lower, capitalized or upper case only.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Some(true),
            Some(x) if x == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "t" | "T" | "true" | "True" | "TRUE" | "on" | "On" | "ON" | "y" | "Y" | "yes"
            | "Yes" | "YES" | "1" => Some(true),
            "f" | "F" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" | "n" | "N" | "no"
            | "No" | "NO" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
