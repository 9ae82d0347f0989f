//! Final title list: threshold filter, ordering and numbering.

use std::cmp::Ordering;

use super::report::Title;

/// Keep titles lasting at least `min_duration_secs`, longest first, and
/// number them `0..n`.
///
/// Equal durations are ordered by playlist file name. Incoming ids are
/// ignored.
pub fn assemble_titles(mut titles: Vec<Title>, min_duration_secs: f64) -> Vec<Title> {
    titles.retain(|t| t.duration_seconds >= min_duration_secs);
    titles.sort_by(compare_titles);

    for (id, title) in titles.iter_mut().enumerate() {
        title.id = id;
    }

    titles
}

fn compare_titles(a: &Title, b: &Title) -> Ordering {
    b.duration_seconds
        .total_cmp(&a.duration_seconds)
        .then_with(|| a.source_filename.cmp(&b.source_filename))
}
