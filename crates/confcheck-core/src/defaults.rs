//! # Default Application
//!
//! Helpers that fill a field with a default only when it still holds its
//! type's zero value. Callers run these after loading and before
//! validation, for fields where zero means "not configured".
//!
//! Integers that must distinguish "not configured" from an explicit `0` use
//! the [`INT_UNSET`] sentinel instead: pre-populate them with
//! [`unset_int`] (for example via `#[serde(default = "unset_int")]`) and
//! validate them with the checker's integer-mandatory rules.

use std::time::Duration;

/// Reserved "unset" integer. Distinct from `0`, so `0` stays a legitimate
/// explicit setting.
pub const INT_UNSET: i64 = -1;

/// Returns [`INT_UNSET`]; usable as a serde default function.
pub fn unset_int() -> i64 {
    INT_UNSET
}

/// Overwrite `entry` with `default` when it equals `T::default()`.
pub fn set_default<T: Default + PartialEq>(entry: &mut T, default: T) {
    if *entry == T::default() {
        *entry = default;
    }
}

/// Default for an empty string.
pub fn set_default_string(entry: &mut String, default: &str) {
    if entry.is_empty() {
        *entry = default.to_string();
    }
}

/// Default for a zero `i64`. Does not treat [`INT_UNSET`] as zero.
pub fn set_default_int(entry: &mut i64, default: i64) {
    set_default(entry, default);
}

/// Default for a zero `u16` (ports and the like).
pub fn set_default_u16(entry: &mut u16, default: u16) {
    set_default(entry, default);
}

/// Default for a zero `u64`.
pub fn set_default_uint(entry: &mut u64, default: u64) {
    set_default(entry, default);
}

/// Default for a zero `f64`. Both `0.0` and `-0.0` count as zero; NaN does not.
pub fn set_default_float(entry: &mut f64, default: f64) {
    set_default(entry, default);
}

/// Default for a zero `Duration`.
pub fn set_default_duration(entry: &mut Duration, default: Duration) {
    set_default(entry, default);
}
