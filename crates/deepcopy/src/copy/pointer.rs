//! Reference copier: the cycle- and sharing-aware core

use crate::context::CopyOptions;
use crate::error::{CopyError, Result};
use crate::value::{Kind, Pointer, Value};

use super::record::populate_record;
use super::sequence::copy_array_items;
use super::{copy_value, VisitedTable};

/// Copy a reference, reusing the copy already made for its target if any.
///
/// The new referent is registered under the source identity before it is
/// populated, so a reference cycle reached while populating it links back
/// to the new allocation instead of recursing.
pub(super) fn copy_pointer(
    value: &Value,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Value> {
    let Value::Ref(source) = value else {
        return Err(CopyError::TypeMismatch {
            expected: Kind::Ref,
            got: value.type_name(),
        });
    };
    let elem = source.elem_type();
    let (Some(identity), Some(referent)) = (source.identity(), source.load()) else {
        return Ok(Value::Ref(Pointer::nil(elem.clone())));
    };

    if let Some(copy) = visited.lookup(identity) {
        tracing::trace!(%identity, "reference already copied");
        return Ok(Value::Ref(copy.clone()));
    }

    let copy = Pointer::typed(elem.clone(), referent.type_of().zero_value());
    visited.register(identity, copy.clone());

    match &referent {
        Value::Record(record) => populate_record(record, &copy, visited, options)?,
        Value::Array(array) => {
            let items = copy_array_items(array, visited, options)?;
            copy.replace(Value::Array(items));
        }
        other => {
            let inner = copy_value(other, visited, options)?;
            copy.replace(inner);
        }
    }
    Ok(Value::Ref(copy))
}
