//! Group nesting must form a forest.
//!
//! Each live element's `groupIds` (innermost first) asserts a chain of
//! `child ⊂ parent` edges. A group may have at most one parent and the edges
//! may not loop. Conflicts resolve the same way on every peer:
//!
//! - A group with several parents keeps the parent asserted by the most
//!   elements, the lexicographically smaller parent on a tie.
//! - Each remaining cycle loses its weakest edge (fewest asserting elements),
//!   the lexicographically greatest edge on a tie.
//!
//! Elements asserting a dropped edge are truncated just after the child
//! group, so they leave the outer groups of that chain.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use scene_core::element::GroupId;
use scene_core::models::{Invariant, Repair, Violation};
use scene_core::scene::{distinct_groups, GroupEdge};
use scene_core::{Scene, SceneGraph};

type EdgeKey<'a> = (&'a GroupId, &'a GroupId);

pub fn check(scene: &Scene, graph: &SceneGraph<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for element in scene.non_deleted() {
        let groups = &element.base.group_ids;
        if distinct_groups(groups).len() != groups.len() {
            violations.push(Violation::new(
                Invariant::GroupForest,
                vec![element.id().clone()],
                format!("{} repeats a group in groupIds", element.id()),
                Repair::DedupeGroups {
                    element: element.id().clone(),
                },
            ));
        }
    }

    let edges: Vec<GroupEdge<'_>> = graph.group_edges().collect();
    let mut dropped: BTreeMap<EdgeKey<'_>, String> = BTreeMap::new();

    let surviving = resolve_multiple_parents(&edges, &mut dropped);
    resolve_cycles(&surviving, &mut dropped);

    let by_key: HashMap<EdgeKey<'_>, &GroupEdge<'_>> = edges
        .iter()
        .map(|edge| ((edge.child, edge.parent), edge))
        .collect();

    for (key, reason) in &dropped {
        let Some(edge) = by_key.get(key) else {
            continue;
        };
        for &member in &edge.asserted_by {
            let Some(element) = scene.get(member.as_str()) else {
                continue;
            };
            let keep = distinct_groups(&element.base.group_ids)
                .iter()
                .position(|group| *group == edge.child)
                .map_or(0, |index| index + 1);
            violations.push(Violation::new(
                Invariant::GroupForest,
                vec![member.clone()],
                format!("{member}: {reason}"),
                Repair::TruncateGroups {
                    element: member.clone(),
                    keep,
                },
            ));
        }
    }

    violations
}

/// Keep one parent per group. Returns child → surviving edge.
fn resolve_multiple_parents<'e, 'a>(
    edges: &'e [GroupEdge<'a>],
    dropped: &mut BTreeMap<EdgeKey<'a>, String>,
) -> BTreeMap<&'a GroupId, &'e GroupEdge<'a>> {
    let mut by_child: BTreeMap<&'a GroupId, Vec<&'e GroupEdge<'a>>> = BTreeMap::new();
    for edge in edges {
        by_child.entry(edge.child).or_default().push(edge);
    }

    let mut surviving = BTreeMap::new();
    for (child, candidates) in by_child {
        let Some(keeper) = candidates.iter().copied().max_by(|a, b| {
            a.asserted_by
                .len()
                .cmp(&b.asserted_by.len())
                .then_with(|| b.parent.cmp(a.parent))
        }) else {
            continue;
        };
        for loser in candidates.iter().filter(|edge| edge.parent != keeper.parent) {
            dropped.insert(
                (child, loser.parent),
                format!(
                    "group {child} is nested in both {} and {}; keeping {}",
                    keeper.parent, loser.parent, keeper.parent
                ),
            );
        }
        surviving.insert(child, keeper);
    }
    surviving
}

/// With one parent per group the edges form a functional graph, so each
/// cycle is found by walking parent links from every unvisited group.
fn resolve_cycles<'a>(
    parent_of: &BTreeMap<&'a GroupId, &GroupEdge<'a>>,
    dropped: &mut BTreeMap<EdgeKey<'a>, String>,
) {
    let mut finished: BTreeSet<&GroupId> = BTreeSet::new();

    for &start in parent_of.keys() {
        let mut path: Vec<&GroupId> = Vec::new();
        let mut current = start;
        loop {
            if finished.contains(current) {
                break;
            }
            if let Some(pos) = path.iter().position(|group| *group == current) {
                break_cycle(&path[pos..], parent_of, dropped);
                break;
            }
            path.push(current);
            match parent_of.get(current) {
                Some(edge) => current = edge.parent,
                None => break,
            }
        }
        finished.extend(path);
    }
}

fn break_cycle<'a>(
    cycle: &[&'a GroupId],
    parent_of: &BTreeMap<&'a GroupId, &GroupEdge<'a>>,
    dropped: &mut BTreeMap<EdgeKey<'a>, String>,
) {
    let weakest = cycle
        .iter()
        .filter_map(|group| parent_of.get(group))
        .min_by(|a, b| {
            a.asserted_by
                .len()
                .cmp(&b.asserted_by.len())
                .then_with(|| (b.child, b.parent).cmp(&(a.child, a.parent)))
        });
    let Some(weakest) = weakest else {
        return;
    };

    let mut rendered: Vec<&str> = cycle.iter().map(|group| group.as_str()).collect();
    rendered.push(cycle[0].as_str());
    dropped.insert(
        (weakest.child, weakest.parent),
        format!(
            "group nesting cycle {}; dropping {} inside {}",
            rendered.join(" -> "),
            weakest.child,
            weakest.parent
        ),
    );
}
