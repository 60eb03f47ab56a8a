use crate::model::Identified;

/// Identity equality between two optional values.
///
/// True only when both sides are present and carry the same identity. Two
/// values without identity are never equal, not even to themselves. Either
/// side may be an entity or one of its references, since both share the
/// identity type.
pub fn same_identity<A, B>(a: Option<&A>, b: Option<&B>) -> bool
where
    A: Identified + ?Sized,
    B: Identified<Id = A::Id> + ?Sized,
{
    match (a.and_then(Identified::id), b.and_then(Identified::id)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}
