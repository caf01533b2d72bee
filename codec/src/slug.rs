//! Human-readable label shown next to a build code.

use catalog::SpecializationCatalog;

use crate::types::Build;

/// Returns a URL-friendly label for `build`.
///
/// Uses the name of the first selected elite specialization, falling back to
/// the profession name. The result is lower-cased with runs of anything other
/// than ASCII letters and digits collapsed into a single `-`.
#[must_use]
pub fn build_slug(build: &Build, catalog: &SpecializationCatalog) -> String {
    let elite = build
        .specializations
        .iter()
        .filter_map(|choice| catalog.get(choice.id))
        .find(|spec| spec.elite && !spec.name.is_empty());
    let label = elite.map_or(build.profession.name(), |spec| spec.name.as_str());
    slugify(label)
}

fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
