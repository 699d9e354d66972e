//! ID generation utilities.

use uuid::Uuid;

/// Length of a run tag.
pub const RUN_TAG_LEN: usize = 8;

/// Generates a short tag that keeps data created by one run apart from
/// data created by earlier runs (usernames, staff emails).
///
/// Taken from the random tail of a UUID v7 so two runs started in the same
/// millisecond still differ.
#[must_use]
pub fn generate_run_tag() -> String {
    let simple = Uuid::now_v7().simple().to_string();
    simple[simple.len() - RUN_TAG_LEN..].to_string()
}
