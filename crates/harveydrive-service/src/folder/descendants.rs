//! Subtree collection for recursive file search.

use std::collections::{HashMap, HashSet, VecDeque};

use uuid::Uuid;

use harveydrive_entity::folder::{FolderEdge, SearchScope};

/// Compute the search scope of `root` over one dataroom's folder edges.
///
/// With a root, the result is the root plus everything reachable below it.
/// A root absent from `edges` yields [`SearchScope::Exact`]. Without a root,
/// every folder of the dataroom is in scope, as are unfiled files.
pub fn collect_search_scope(root: Option<Uuid>, edges: &[FolderEdge]) -> SearchScope {
    let Some(root) = root else {
        return SearchScope::Dataroom(edges.iter().map(|e| e.id).collect());
    };

    let reached = collect_descendants(root, edges);
    if reached.is_empty() {
        SearchScope::Exact(root)
    } else {
        SearchScope::Subtree(reached)
    }
}

/// Breadth-first walk from `root` over `edges`, including `root` itself.
///
/// Only ids present in `edges` are collected; each is visited once, so
/// corrupted cyclic input still terminates.
pub fn collect_descendants(root: Uuid, edges: &[FolderEdge]) -> HashSet<Uuid> {
    let mut known = HashSet::with_capacity(edges.len());
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for edge in edges {
        known.insert(edge.id);
        if let Some(parent_id) = edge.parent_id {
            children.entry(parent_id).or_default().push(edge.id);
        }
    }

    let mut visited = HashSet::new();
    if !known.contains(&root) {
        return visited;
    }

    let mut queue = VecDeque::from([root]);
    visited.insert(root);
    while let Some(id) = queue.pop_front() {
        for &child in children.get(&id).into_iter().flatten() {
            if visited.insert(child) {
                queue.push_back(child);
            }
        }
    }
    visited
}
