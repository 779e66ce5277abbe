use crate::catalog::TrackedEntry;

/// Whether an artist named `display_name` is already tracked.
///
/// Compares names case-insensitively and exactly. Tracked entries do not
/// reliably carry the catalog identifier, so two different artists sharing a
/// name are treated as the same one.
pub fn is_tracked(display_name: &str, tracked: &[TrackedEntry]) -> bool {
    let wanted = display_name.to_lowercase();
    tracked.iter().any(|entry| {
        entry
            .display_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == wanted)
    })
}
