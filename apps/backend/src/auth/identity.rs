//! Mapping of session-store user ids into the realtime platform's accepted
//! identifier alphabet.
//!
//! The platform rejects `-` in user ids, so the UUIDs handed out by the
//! session store are rewritten with `_`. Over UUID-form input the mapping is
//! injective; the batch variant guards against collisions anyway.

use std::collections::HashSet;

use crate::error::AppError;

/// Rewrite an opaque user id into the platform's accepted alphabet.
/// Idempotent: an already-normalized id comes back unchanged.
pub fn normalize(id: &str) -> String {
    id.replace('-', "_")
}

/// Normalize a batch of ids, failing if two distinct inputs collapse to the
/// same output. Not expected for UUID-form ids; the check exists for bulk
/// provisioning paths where ids originate elsewhere.
pub fn normalize_unique<I, S>(ids: I) -> Result<Vec<String>, AppError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for id in ids {
        let normalized = normalize(id.as_ref());
        if !seen.insert(normalized.clone()) {
            return Err(AppError::identity_collision(format!(
                "{} collides after normalization",
                id.as_ref()
            )));
        }
        out.push(normalized);
    }

    Ok(out)
}
