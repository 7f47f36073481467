//! Entity tags for conditional GET.
//!
//! A tag is an xxh3 digest over every field of a car, so it is stable for
//! as long as the record is unchanged and differs after any update. It does
//! not depend on time or on the running process.

use xxhash_rust::xxh3::Xxh3;

use crate::domain::Car;

/// Compute the strong entity tag for `car`, quoted as sent in `ETag`.
pub fn compute(car: &Car) -> String {
    let mut hasher = Xxh3::new();
    hasher.update(&car.id.to_le_bytes());
    write_field(&mut hasher, car.model.as_bytes());
    write_field(&mut hasher, car.name.as_bytes());
    // 2450.8 and 2450.80 are the same price.
    write_field(&mut hasher, car.price.normalize().to_string().as_bytes());
    format!("\"{:016x}\"", hasher.digest())
}

/// Length-prefix each field so adjacent fields cannot alias.
fn write_field(hasher: &mut Xxh3, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Whether an `If-None-Match` header value matches `current`.
///
/// Accepts `*`, comma-separated lists, and weak tags (weak comparison).
pub fn matches(if_none_match: &str, current: &str) -> bool {
    let current = strip_weak(current);
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || strip_weak(tag) == current)
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}
