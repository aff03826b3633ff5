// SPDX-License-Identifier: MPL-2.0
//! Textual operation specs for scripted editing.
//!
//! A spec is one of:
//! - `name` - apply with the current values (`gray`, `negative`, ...)
//! - `name:key=value,key=value` - apply with overrides (`rotate:angle=90`)
//! - `perspective:x,y;x,y;x,y;x,y` - four normalized corners
//! - `undo`, `redo`, `reset` - history navigation

use crate::domain::editing::{NormalizedPoint, Operation, ParamValue, PERSPECTIVE_POINTS};
use crate::domain::error::ParameterError;
use crate::session::Message;
use thiserror::Error;

/// Why a spec could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("empty operation spec")]
    Empty,

    #[error("malformed parameter `{0}`, expected key=value")]
    MalformedParameter(String),

    #[error("malformed point `{0}`, expected x,y")]
    MalformedPoint(String),

    #[error("perspective needs {expected} points, got {found}")]
    PointCount { expected: usize, found: usize },

    #[error(transparent)]
    Point(#[from] ParameterError),
}

/// Translates one spec into the messages a user would produce for it.
///
/// # Errors
///
/// Returns a [`ScriptError`] for malformed specs. Parameter names and values
/// are checked later by the session.
pub fn parse(spec: &str) -> Result<Vec<Message>, ScriptError> {
    let spec = spec.trim();
    let (name, args) = match spec.split_once(':') {
        Some((name, args)) => (name.trim(), Some(args.trim())),
        None => (spec, None),
    };
    if name.is_empty() {
        return Err(ScriptError::Empty);
    }

    match (name, args) {
        ("undo", None) => return Ok(vec![Message::Undo]),
        ("redo", None) => return Ok(vec![Message::Redo]),
        ("reset", None) => return Ok(vec![Message::Reset]),
        _ => {}
    }

    let operation = Operation::from(name);
    if operation.is_perspective() {
        let points = parse_points(args.unwrap_or_default())?;
        let mut messages = vec![apply(operation, Vec::new())];
        messages.extend(points.into_iter().map(Message::AddPerspectivePoint));
        return Ok(messages);
    }

    let overrides = match args {
        Some(args) if !args.is_empty() => args
            .split(',')
            .map(parse_override)
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };
    Ok(vec![apply(operation, overrides)])
}

fn apply(operation: Operation, overrides: Vec<(String, ParamValue)>) -> Message {
    Message::ApplyOperation {
        operation,
        overrides,
    }
}

fn parse_override(pair: &str) -> Result<(String, ParamValue), ScriptError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ScriptError::MalformedParameter(pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ScriptError::MalformedParameter(pair.to_string()));
    }
    Ok((key.to_string(), ParamValue::from(value.trim())))
}

fn parse_points(args: &str) -> Result<Vec<NormalizedPoint>, ScriptError> {
    let points = args
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;
    if points.len() != PERSPECTIVE_POINTS {
        return Err(ScriptError::PointCount {
            expected: PERSPECTIVE_POINTS,
            found: points.len(),
        });
    }
    Ok(points)
}

fn parse_point(part: &str) -> Result<NormalizedPoint, ScriptError> {
    let malformed = || ScriptError::MalformedPoint(part.trim().to_string());
    let (x, y) = part.split_once(',').ok_or_else(malformed)?;
    let x: f64 = x.trim().parse().map_err(|_| malformed())?;
    let y: f64 = y.trim().parse().map_err(|_| malformed())?;
    Ok(NormalizedPoint::new(x, y)?)
}
