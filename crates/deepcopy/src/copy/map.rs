//! Map copier

use crate::context::CopyOptions;
use crate::error::{CopyError, Element, Result};
use crate::value::{Kind, MapKey, MapValue, Value};

use super::{copy_value, VisitedTable};

fn entry_failed(key: &MapKey, map: &Value, err: CopyError) -> CopyError {
    CopyError::ElementCopyFailed {
        element: Element::Key(format!("{:?}", key.value())),
        container: map.type_name(),
        source: Box::new(err),
    }
}

/// Copy a map, copying every key and value independently.
pub(super) fn copy_map(
    value: &Value,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Value> {
    let Value::Map(map) = value else {
        return Err(CopyError::TypeMismatch {
            expected: Kind::Map,
            got: value.type_name(),
        });
    };
    let key_type = map.key_type().clone();
    let value_type = map.value_type().clone();

    let Some(entries) = map.entries() else {
        return Ok(Value::Map(MapValue::nil(key_type, value_type)));
    };

    let copy = MapValue::with_capacity(key_type, value_type, entries.len());
    for (key, item) in &entries {
        let fail = |e| entry_failed(key, value, e);
        let new_item = copy_value(item, visited, options).map_err(fail)?;
        let new_key = copy_value(key.value(), visited, options).map_err(fail)?;
        copy.insert(new_key, new_item).map_err(fail)?;
    }
    Ok(Value::Map(copy))
}
