//! Record copiers and the destination-populating entry point

use crate::context::{CopyOptions, PrivateFields};
use crate::error::{CopyError, Precondition, Result};
use crate::value::{Kind, Pointer, RecordValue, Type, Value};

use super::{copy_value, VisitedTable};

/// Copy the public fields of `source`, in declaration order.
///
/// Private fields are skipped, or rejected when non-zero under
/// `PrivateFields::Reject`. Nothing is returned unless every field copies.
fn copy_fields(
    source: &RecordValue,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Vec<(String, Value)>> {
    let mut copies = Vec::with_capacity(source.record_type().fields().len());
    for def in source.record_type().fields() {
        let Some(value) = source.get(&def.name) else {
            continue;
        };
        if !def.is_exported() {
            if options.private_fields == PrivateFields::Reject && !value.is_zero() {
                return Err(CopyError::UnexportedField {
                    field: def.name.clone(),
                    record: source.type_name().to_string(),
                });
            }
            continue;
        }
        let copy = copy_value(value, visited, options).map_err(|err| CopyError::FieldCopyFailed {
            field: def.name.clone(),
            record: source.type_name().to_string(),
            source: Box::new(err),
        })?;
        copies.push((def.name.clone(), copy));
    }
    Ok(copies)
}

/// Copy a record into a newly allocated record of the same type.
pub(super) fn copy_record(
    value: &Value,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Value> {
    let Value::Record(source) = value else {
        return Err(CopyError::TypeMismatch {
            expected: Kind::Record,
            got: value.type_name(),
        });
    };
    let mut copy = RecordValue::new(source.record_type().clone());
    for (name, field) in copy_fields(source, visited, options)? {
        copy.set(&name, field);
    }
    Ok(Value::Record(copy))
}

/// Copy the public fields of `source` into the record behind `destination`.
///
/// All copies are made before the destination is touched, so on failure
/// it keeps its previous contents.
pub(super) fn populate_record(
    source: &RecordValue,
    destination: &Pointer,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<()> {
    let copies = copy_fields(source, visited, options)?;
    destination
        .update(|target| match target {
            Value::Record(record) => {
                for (name, field) in copies {
                    record.set(&name, field);
                }
                Ok(())
            }
            other => Err(CopyError::TypeMismatch {
                expected: Kind::Record,
                got: other.type_name(),
            }),
        })
        .unwrap_or_else(|| {
            Err(CopyError::InvalidArgument {
                reason: Precondition::NilReference,
                detail: "cannot populate a nil reference".to_string(),
            })
        })
}

fn invalid(reason: Precondition, detail: String) -> CopyError {
    CopyError::InvalidArgument { reason, detail }
}

/// Validate the arguments, then populate `destination` from `source` with
/// `destination` standing in for `source` in the visited table.
pub(super) fn copy_into(source: &Value, destination: &Value, options: &CopyOptions) -> Result<()> {
    let (Value::Ref(src), Value::Ref(dst)) = (source, destination) else {
        return Err(invalid(
            Precondition::NotReference,
            format!(
                "must pass values of kind ref; got {}, {}",
                source.kind(),
                destination.kind()
            ),
        ));
    };
    let (Some(identity), Some(referent), false) = (src.identity(), src.load(), dst.is_nil()) else {
        return Err(invalid(
            Precondition::NilReference,
            format!("must pass non-nil references; got {:?}, {:?}", source, destination),
        ));
    };
    if src.elem_type() != dst.elem_type() {
        return Err(invalid(
            Precondition::TypeMismatch,
            format!(
                "must pass references of the same type; got {}, {}",
                source.type_name(),
                destination.type_name()
            ),
        ));
    }
    let (Type::Record(_), Value::Record(record)) = (src.elem_type(), &referent) else {
        return Err(invalid(
            Precondition::NotRecord,
            format!("must pass references to records; got {}", source.type_name()),
        ));
    };
    let target = match dst.load() {
        Some(Value::Record(target)) => target,
        held => {
            return Err(invalid(
                Precondition::NotRecord,
                format!(
                    "must pass references to records; destination holds {}",
                    held.map_or_else(|| "nil".to_string(), |v| v.type_name())
                ),
            ))
        }
    };
    if target.record_type() != record.record_type() {
        return Err(invalid(
            Precondition::TypeMismatch,
            format!(
                "must pass records of the same type; got {}, {}",
                record.type_name(),
                target.type_name()
            ),
        ));
    }

    let mut visited = VisitedTable::new();
    visited.register(identity, dst.clone());
    populate_record(record, dst, &mut visited, options)
}
