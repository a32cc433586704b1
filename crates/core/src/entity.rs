//! Entity trait: identity + continuity across state changes.

use crate::error::{DomainError, DomainResult};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Check that `derived` is a one-to-one, order-preserving image of `source`.
///
/// Both sequences must have the same length and carry the same identifier at
/// every position.
pub fn verify_alignment<S, D>(source: &[S], derived: &[D]) -> DomainResult<()>
where
    S: Entity,
    D: Entity<Id = S::Id>,
{
    if source.len() != derived.len() {
        return Err(DomainError::invariant(format!(
            "row count mismatch (source: {}, derived: {})",
            source.len(),
            derived.len()
        )));
    }

    for (index, (s, d)) in source.iter().zip(derived).enumerate() {
        if s.id() != d.id() {
            return Err(DomainError::invariant(format!(
                "identifier mismatch at row {index} (source: {:?}, derived: {:?})",
                s.id(),
                d.id()
            )));
        }
    }

    Ok(())
}
