use crate::model::Entity;
use crate::service::traits::{EntityLookup, ServiceError};

/// Resolve the routing context of an edit or detail view.
///
/// No id means "create new" and yields `None`; an id that does not resolve
/// is an error rather than a silent draft.
pub async fn resolve_route<E, L>(lookup: &L, id: Option<&E::Id>) -> Result<Option<E>, ServiceError>
where
    E: Entity,
    L: EntityLookup<E> + ?Sized,
{
    match id {
        Some(id) => lookup.find(id).await.map(Some),
        None => Ok(None),
    }
}
