//! Array and slice copiers

use crate::context::CopyOptions;
use crate::error::{CopyError, Element, Result};
use crate::value::{ArrayValue, Kind, SliceValue, Type, Value};

use super::{copy_value, VisitedTable};

/// Copy each element in index order, stopping at the first failure.
fn copy_elements(
    items: &[Value],
    container: impl Fn() -> String,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Vec<Value>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            copy_value(item, visited, options).map_err(|err| CopyError::ElementCopyFailed {
                element: Element::Index(index),
                container: container(),
                source: Box::new(err),
            })
        })
        .collect()
}

/// Copy an array's elements into a new array of the same type and length.
pub(super) fn copy_array_items(
    array: &ArrayValue,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<ArrayValue> {
    let container = || Type::array(array.elem_type().clone(), array.len()).to_string();
    let items = copy_elements(array.items(), container, visited, options)?;
    Ok(ArrayValue::new(array.elem_type().clone(), items))
}

pub(super) fn copy_array(
    value: &Value,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Value> {
    match value {
        Value::Array(array) => Ok(Value::Array(copy_array_items(array, visited, options)?)),
        other => Err(CopyError::TypeMismatch {
            expected: Kind::Array,
            got: other.type_name(),
        }),
    }
}

pub(super) fn copy_slice(
    value: &Value,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Value> {
    let Value::Slice(slice) = value else {
        return Err(CopyError::TypeMismatch {
            expected: Kind::Slice,
            got: value.type_name(),
        });
    };
    let elem = slice.elem_type().clone();
    match slice.to_vec() {
        // nil stays nil: no backing buffer is allocated
        None => Ok(Value::Slice(SliceValue::nil(elem))),
        Some(items) => {
            let items = copy_elements(&items, || value.type_name(), visited, options)?;
            Ok(Value::Slice(SliceValue::new(elem, items)))
        }
    }
}
