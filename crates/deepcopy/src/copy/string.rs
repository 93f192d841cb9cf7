//! String copier

use std::sync::Arc;

use crate::context::CopyOptions;
use crate::error::{CopyError, Result};
use crate::value::{Kind, Value};

use super::VisitedTable;

/// Copy `s` into a newly allocated buffer.
pub fn duplicate_string(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    buf.push_str(s);
    buf
}

/// Copy a string value onto fresh backing storage.
pub(super) fn copy_string(
    value: &Value,
    _visited: &mut VisitedTable,
    _options: &CopyOptions,
) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(Arc::new(duplicate_string(s)))),
        other => Err(CopyError::TypeMismatch {
            expected: Kind::String,
            got: other.type_name(),
        }),
    }
}
