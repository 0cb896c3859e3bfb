//! Checks run before a custom type is saved.
//!
//! Compilation tolerates cycles through its depth bound. These checks exist
//! so an application's stored graph stays acyclic in the first place.

use crate::graph::TypeGraph;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;
use toolbridge_core::{AppId, CustomTypeField, FieldKind, TypeId};

/// Id standing in for a type that has not been stored yet
pub const PENDING_TYPE_ID: TypeId = TypeId::new(0);

/// Error validating a type's references
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A `custom` field has no reference
    #[error("field reference must be provided for custom type field: {field}")]
    MissingReference {
        /// Field name
        field: String,
    },

    /// The referenced type does not exist
    #[error("invalid field reference: custom type not found: {target}")]
    UnknownReference {
        /// Field name
        field: String,
        /// Referenced type
        target: TypeId,
    },

    /// The referenced type belongs to another application
    #[error("field reference must belong to the same application: {field} -> {target}")]
    ForeignReference {
        /// Field name
        field: String,
        /// Referenced type
        target: TypeId,
    },

    /// Saving the fields would close a reference cycle
    #[error("circular reference detected in custom type fields: {involved:?}")]
    CycleDetected {
        /// Types left over by the topological sort
        involved: Vec<TypeId>,
    },
}

/// Verify every `custom` field points at an existing type of `app_id`
///
/// # Errors
///
/// Returns error for the first field with a missing, unknown or foreign reference
pub fn check_references(graph: &TypeGraph, app_id: AppId, fields: &[CustomTypeField]) -> Result<(), GraphError> {
    for field in fields.iter().filter(|f| f.kind == FieldKind::Custom) {
        let target = field.reference.ok_or_else(|| GraphError::MissingReference {
            field: field.name.clone(),
        })?;
        let referenced = graph.custom_type(target).ok_or_else(|| GraphError::UnknownReference {
            field: field.name.clone(),
            target,
        })?;
        if referenced.app_id != app_id {
            return Err(GraphError::ForeignReference {
                field: field.name.clone(),
                target,
            });
        }
    }
    Ok(())
}

/// Verify the application's reference graph stays acyclic once `fields`
/// are saved for `pending`.
///
/// `pending` is the type being updated, or `None` for a type being created.
/// Its stored fields are replaced by `fields` for the purpose of the check.
///
/// # Errors
///
/// Returns `CycleDetected` if the resulting graph has a cycle
pub fn check_acyclic(
    graph: &TypeGraph,
    app_id: AppId,
    pending: Option<TypeId>,
    fields: &[CustomTypeField],
) -> Result<(), GraphError> {
    let pending = pending.unwrap_or(PENDING_TYPE_ID);

    let mut app_types: Vec<TypeId> = graph.types_of_app(app_id).map(|t| t.id).collect();
    app_types.sort_unstable();

    let mut edges: IndexMap<TypeId, Vec<TypeId>> = app_types.iter().map(|id| (*id, Vec::new())).collect();
    edges.entry(pending).or_default();

    for &owner in &app_types {
        if owner == pending {
            continue;
        }
        let targets = references(graph.fields(owner));
        if let Some(list) = edges.get_mut(&owner) {
            list.extend(targets);
        }
    }
    if let Some(list) = edges.get_mut(&pending) {
        list.extend(references(fields));
    }

    let involved = unsorted(&edges);
    if involved.is_empty() {
        Ok(())
    } else {
        tracing::debug!(%app_id, ?involved, "reference cycle rejected");
        Err(GraphError::CycleDetected { involved })
    }
}

fn references(fields: &[CustomTypeField]) -> impl Iterator<Item = TypeId> + '_ {
    fields
        .iter()
        .filter(|f| f.kind == FieldKind::Custom)
        .filter_map(|f| f.reference)
}

/// Kahn's algorithm. Returns the nodes that never reach in-degree zero,
/// which is empty exactly when the graph is acyclic. Edges to nodes outside
/// the graph are ignored.
fn unsorted(edges: &IndexMap<TypeId, Vec<TypeId>>) -> Vec<TypeId> {
    let mut in_degree: IndexMap<TypeId, usize> = edges.keys().map(|id| (*id, 0)).collect();
    for target in edges.values().flatten() {
        if let Some(degree) = in_degree.get_mut(target) {
            *degree += 1;
        }
    }

    let mut queue: VecDeque<TypeId> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut sorted: IndexSet<TypeId> = IndexSet::with_capacity(edges.len());

    while let Some(current) = queue.pop_front() {
        sorted.insert(current);
        for target in edges.get(&current).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(target) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(*target);
                }
            }
        }
    }

    edges.keys().filter(|id| !sorted.contains(*id)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphRecords;
    use toolbridge_core::{CustomType, FieldId};

    fn adjacency(pairs: &[(i64, &[i64])]) -> IndexMap<TypeId, Vec<TypeId>> {
        pairs
            .iter()
            .map(|(from, to)| (TypeId::new(*from), to.iter().map(|t| TypeId::new(*t)).collect()))
            .collect()
    }

    fn ids(raw: &[i64]) -> Vec<TypeId> {
        raw.iter().map(|id| TypeId::new(*id)).collect()
    }

    fn link(id: i64, owner: i64, target: i64) -> CustomTypeField {
        CustomTypeField::custom(FieldId::new(id), TypeId::new(owner), format!("f{id}"), TypeId::new(target))
    }

    /// App 1 owns 1 -> 2 -> 3; app 2 owns type 10.
    fn stored() -> TypeGraph {
        TypeGraph::from(GraphRecords {
            types: vec![
                CustomType::new(TypeId::new(1), AppId::new(1), "A"),
                CustomType::new(TypeId::new(2), AppId::new(1), "B"),
                CustomType::new(TypeId::new(3), AppId::new(1), "C"),
                CustomType::new(TypeId::new(10), AppId::new(2), "Other"),
            ],
            fields: vec![link(1, 1, 2), link(2, 2, 3)],
        })
    }

    #[test]
    fn test_kahn_acyclic() {
        assert!(unsorted(&adjacency(&[(1, &[2, 3]), (2, &[4]), (3, &[4]), (4, &[])])).is_empty());
        assert!(unsorted(&adjacency(&[])).is_empty());
        assert!(unsorted(&adjacency(&[(1, &[])])).is_empty());
    }

    #[test]
    fn test_kahn_cycles() {
        assert_eq!(unsorted(&adjacency(&[(1, &[2]), (2, &[1])])), ids(&[1, 2]));
        assert_eq!(unsorted(&adjacency(&[(1, &[1])])), ids(&[1]));
        assert_eq!(unsorted(&adjacency(&[(1, &[2]), (2, &[3]), (3, &[1])])), ids(&[1, 2, 3]));
    }

    #[test]
    fn test_kahn_partial_cycle() {
        let edges = adjacency(&[(1, &[2]), (2, &[3]), (3, &[4]), (4, &[2]), (5, &[6]), (6, &[])]);
        assert_eq!(unsorted(&edges), ids(&[2, 3, 4]));
    }

    #[test]
    fn test_kahn_ignores_outside_targets() {
        assert!(unsorted(&adjacency(&[(1, &[99])])).is_empty());
    }

    #[test]
    fn test_new_type_referencing_existing_is_fine() {
        let fields = vec![link(9, 0, 1)];
        assert!(check_acyclic(&stored(), AppId::new(1), None, &fields).is_ok());
    }

    #[test]
    fn test_update_closing_cycle_rejected() {
        let fields = vec![link(9, 3, 1)];
        let err = check_acyclic(&stored(), AppId::new(1), Some(TypeId::new(3)), &fields).unwrap_err();
        assert_eq!(
            err,
            GraphError::CycleDetected {
                involved: ids(&[1, 2, 3])
            }
        );
    }

    #[test]
    fn test_update_replaces_stored_fields() {
        // Stored: 1 -> 2 -> 3. Replacing a type's fields drops its stored edges.
        let graph = stored();
        assert!(check_acyclic(&graph, AppId::new(1), Some(TypeId::new(2)), &[link(9, 2, 1)]).is_err());
        assert!(check_acyclic(&graph, AppId::new(1), Some(TypeId::new(1)), &[]).is_ok());
        assert!(check_acyclic(&graph, AppId::new(1), Some(TypeId::new(2)), &[]).is_ok());
    }

    #[test]
    fn test_self_reference_rejected() {
        let err = check_acyclic(&stored(), AppId::new(1), Some(TypeId::new(3)), &[link(9, 3, 3)]).unwrap_err();
        assert_eq!(err, GraphError::CycleDetected { involved: ids(&[3]) });
    }

    #[test]
    fn test_other_apps_not_considered() {
        assert!(check_acyclic(&stored(), AppId::new(2), Some(TypeId::new(10)), &[link(9, 10, 1)]).is_ok());
    }

    #[test]
    fn test_references_valid() {
        let fields = vec![
            CustomTypeField::new(FieldId::new(1), TypeId::new(0), "name", FieldKind::String),
            link(2, 0, 3),
        ];
        assert!(check_references(&stored(), AppId::new(1), &fields).is_ok());
    }

    #[test]
    fn test_references_missing() {
        let fields = vec![CustomTypeField::new(FieldId::new(1), TypeId::new(0), "owner", FieldKind::Custom)];
        assert_eq!(
            check_references(&stored(), AppId::new(1), &fields),
            Err(GraphError::MissingReference {
                field: "owner".to_string()
            })
        );
    }

    #[test]
    fn test_references_unknown() {
        let err = check_references(&stored(), AppId::new(1), &[link(7, 0, 404)]).unwrap_err();
        assert!(matches!(err, GraphError::UnknownReference { target, .. } if target == TypeId::new(404)));
    }

    #[test]
    fn test_references_foreign() {
        let err = check_references(&stored(), AppId::new(1), &[link(7, 0, 10)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::ForeignReference {
                field: "f7".to_string(),
                target: TypeId::new(10)
            }
        );
    }
}
