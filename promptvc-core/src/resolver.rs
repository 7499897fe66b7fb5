//! Turns user supplied version references into stored version ids.

use crate::parser::{VersionRef, parse_version_ref};
use crate::storage::PromptStorage;

/// Resolves `reference` for `prompt_id`.
///
/// `v<N>` (any case) resolves to the id of the version numbered `N`, or `None` when
/// the prompt has no such version. Any other string is returned unchanged as a
/// version id; whether it exists is left to the caller.
pub fn resolve<S: PromptStorage>(
    storage: &S,
    prompt_id: &str,
    reference: &str,
) -> Result<Option<String>, S::Error> {
    match parse_version_ref(reference) {
        VersionRef::Number(number) => {
            let resolved = storage
                .get_all_versions(prompt_id)?
                .into_iter()
                .find(|version| version.version == number)
                .map(|version| version.id);
            tracing::debug!(prompt_id, reference, resolved = ?resolved, "resolved version ordinal");
            Ok(resolved)
        }
        VersionRef::Id(id) => Ok(Some(id.to_string())),
    }
}
