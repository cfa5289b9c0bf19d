//! Open record type
//!
//! Synchronized records (tables, customers, payments, cancellations, order
//! headers and their line items) carry no enforced schema. They are stored and
//! returned verbatim as ordered field maps.

use serde_json::{Map, Value};

/// Ordered field name → value mapping
pub type Record = Map<String, Value>;

/// Return `record` with `field` set to `value`, overriding any client-sent value.
pub fn with_field(mut record: Record, field: &str, value: impl Into<Value>) -> Record {
    record.insert(field.to_string(), value.into());
    record
}
