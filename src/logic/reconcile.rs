use std::collections::HashSet;

use crate::model::{Identified, Referenceable};

/// Merge `additional` entities into a copy of `collection`.
///
/// Additional entities whose identity is not yet present are placed ahead of
/// the collection, in the order given. When an identity is already present
/// the collection's element wins and the additional one is dropped. Entities
/// without identity are always kept and absent (`None`) values are skipped.
pub fn add_to_collection_if_missing<T, I>(collection: &[T], additional: I) -> Vec<T>
where
    T: Identified + Clone,
    I: IntoIterator<Item = Option<T>>,
{
    let mut known: HashSet<T::Id> = collection
        .iter()
        .filter_map(|item| item.id().cloned())
        .collect();

    let mut merged = Vec::with_capacity(collection.len());
    for item in additional.into_iter().flatten() {
        match item.id() {
            Some(id) if known.contains(id) => continue,
            Some(id) => {
                known.insert(id.clone());
            }
            None => {}
        }
        merged.push(item);
    }

    merged.extend(collection.iter().cloned());
    merged
}

/// Reconcile a fetched candidate list with the reference attached to the
/// entity being edited, widening the reference into a full entity.
pub fn reconcile_reference<T>(fetched: &[T], attached: Option<&T::Reference>) -> Vec<T>
where
    T: Referenceable,
{
    add_to_collection_if_missing(fetched, [attached.cloned().map(T::from_reference)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Project, ProjectRef};

    fn project(id: i64) -> Project {
        Project {
            id: Some(id),
            ..Project::draft()
        }
    }

    fn ids(items: &[Project]) -> Vec<Option<i64>> {
        items.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_missing_entity_is_prepended() {
        let fetched = vec![project(1)];
        let merged = add_to_collection_if_missing(&fetched, [Some(project(2))]);
        assert_eq!(ids(&merged), vec![Some(2), Some(1)]);
    }

    #[test]
    fn test_present_entity_keeps_fetched_copy() {
        let mut fetched_copy = project(1);
        fetched_copy.reference = Some("FROM-SERVER".to_string());
        let fetched = vec![fetched_copy.clone()];

        let mut stale = project(1);
        stale.reference = Some("LOCAL".to_string());

        let merged = add_to_collection_if_missing(&fetched, [Some(stale)]);
        assert_eq!(merged, vec![fetched_copy]);
    }

    #[test]
    fn test_no_additional_returns_collection() {
        let fetched = vec![project(3), project(1), project(2)];
        let merged = add_to_collection_if_missing(&fetched, std::iter::empty());
        assert_eq!(merged, fetched);
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let fetched = vec![project(1)];
        let merged = add_to_collection_if_missing(&fetched, [None, Some(project(2)), None]);
        assert_eq!(ids(&merged), vec![Some(2), Some(1)]);
    }

    #[test]
    fn test_additional_order_is_preserved_and_deduplicated() {
        let fetched = vec![project(10), project(11)];
        let additional = vec![
            Some(project(3)),
            Some(project(11)),
            Some(project(1)),
            Some(project(3)),
        ];
        let merged = add_to_collection_if_missing(&fetched, additional);
        assert_eq!(
            ids(&merged),
            vec![Some(3), Some(1), Some(10), Some(11)]
        );
    }

    #[test]
    fn test_entities_without_identity_are_always_included() {
        let fetched = vec![project(1)];
        let merged = add_to_collection_if_missing(
            &fetched,
            [Some(Project::draft()), Some(Project::draft())],
        );
        assert_eq!(ids(&merged), vec![None, None, Some(1)]);
    }

    #[test]
    fn test_merge_is_idempotent_for_identified_entities() {
        let fetched = vec![project(1), project(2)];
        let once = add_to_collection_if_missing(&fetched, [Some(project(7))]);
        let twice = add_to_collection_if_missing(&once, [Some(project(7))]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fetched_input_is_untouched() {
        let fetched = vec![project(1)];
        let before = fetched.clone();
        let _ = add_to_collection_if_missing(&fetched, [Some(project(2))]);
        assert_eq!(fetched, before);
    }

    #[test]
    fn test_reconcile_reference_widens_attached_reference() {
        let fetched = vec![project(9)];
        let attached = ProjectRef {
            id: Some(5),
            reference: Some("PRJ-5".to_string()),
        };

        let merged = reconcile_reference(&fetched, Some(&attached));
        assert_eq!(ids(&merged), vec![Some(5), Some(9)]);
        assert_eq!(merged[0].reference.as_deref(), Some("PRJ-5"));
        assert_eq!(merged[0].description, None);

        let untouched = reconcile_reference::<Project>(&fetched, None);
        assert_eq!(untouched, fetched);
    }
}
