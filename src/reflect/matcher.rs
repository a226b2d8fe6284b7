//! Parameter-type compatibility used to pick among overloads.

use super::value::{TypeRef, Value};

/// Decides whether a parameter declared as `declared` accepts an argument
/// whose runtime type is `supplied` and whose value is `value`.
///
/// Rules, first match wins:
///
/// 1. no declared type rejects;
/// 2. null satisfies any non-primitive parameter;
/// 3. `Object` accepts anything;
/// 4. an instance of the declared type (or a subtype) is accepted;
/// 5. scalars match their own kind, boxed or unboxed, and no other kind;
/// 6. otherwise the two types must be equal.
pub fn accepts(declared: Option<&TypeRef>, supplied: Option<&TypeRef>, value: &Value) -> bool {
    let Some(declared) = declared else {
        return false;
    };

    if !declared.is_primitive() && (supplied.is_none() || value.is_null()) {
        return true;
    }

    if *declared == TypeRef::Object {
        return true;
    }

    if value.is_instance_of(declared) {
        return true;
    }

    let Some(supplied) = supplied else {
        return false;
    };

    match declared.kind() {
        Some(kind) => supplied.kind() == Some(kind),
        None => declared == supplied,
    }
}

/// True when every argument is accepted by the parameter at its position
/// and the counts agree.
pub fn signature_accepts(params: &[TypeRef], args: &[Value]) -> bool {
    params.len() == args.len()
        && params
            .iter()
            .zip(args)
            .all(|(param, arg)| accepts(Some(param), arg.runtime_type().as_ref(), arg))
}
