//! Literal protocol constants shared by the builder and its callers.

/// 5 digit code meaning "successful completion/no error".
pub const SQLSTATE_SUCCESS: &str = "00000";

/// 5 digit code meaning "no data"; e.g. an UPDATE/DELETE whose WHERE clause
/// matched no rows at all.
pub const SQLSTATE_NO_DATA: &str = "02000";

/// 5 digit code meaning a table referenced in the SQL does not exist.
pub const SQLSTATE_TABLE_DOES_NOT_EXIST: &str = "42S02";

/// The SQL element meaning ascending order when sorting.
pub const ORDER_BY_ASCENDING: &str = "ASC";

/// The SQL element meaning descending order when sorting.
pub const ORDER_BY_DESCENDING: &str = "DESC";

/// Comment hint placed right after `SELECT` when the field list contains a
/// nested `SELECT ... FROM`, so the field list can still be located.
pub const FIELD_LIST_HINT_START: &str = "/* FIELDLIST */";

/// Comment hint placed right before `FROM` to close a hinted field list.
pub const FIELD_LIST_HINT_END: &str = "/* /FIELDLIST */";

/// Standard SQL spelling of NOT EQUAL.
pub const OPERATOR_NOT_EQUAL: &str = "<>";

/// The default comparison operator.
pub const OPERATOR_EQUAL: &str = "=";
