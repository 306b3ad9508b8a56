mod column;
pub(crate) use column::Column;

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::Field;

mod record;
pub(crate) use record::Record;

mod record_attr;
pub(crate) use record_attr::RecordAttr;

/// Must stay in sync with `chartbridge_core::schema::RESERVED_NAMES`.
const RESERVED_NAMES: &[&str] = &["pk", "rowid", "oid", "_rowid_"];

fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}
