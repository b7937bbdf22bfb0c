//! Generic best-first graph search shared by every solver.
//!
//! The search is a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! where the expansion order is delegated to a [Frontier]: a FIFO queue gives breadth-first
//! search, a LIFO stack gives depth-first search and a priority queue on `cost + heuristic`
//! gives A*. Every expansion and every neighbour check is reported to a [SearchObserver], which
//! keeps presentation concerns out of the search loop.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A neighbour produced by a successor function. Impassable candidates are still reported to the
/// observer as checked, but never enter the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<N, C> {
    pub node: N,
    pub cost: C,
    pub passable: bool,
}

impl<N, C> Candidate<N, C> {
    pub fn new(node: N, cost: C, passable: bool) -> Self {
        Candidate {
            node,
            cost,
            passable,
        }
    }
}

/// Receives the steps of a running search.
pub trait SearchObserver<N> {
    /// `node` was popped from the frontier and is now part of the visited set.
    fn expanded(&mut self, _node: &N) {}
    /// The neighbour `to` of the expanded node `from` was checked.
    fn probed(&mut self, _from: &N, _to: &N, _passable: bool) {}
}

impl<N> SearchObserver<N> for () {}

/// What happens when a node that is already discovered (but not yet expanded) is reached again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rediscovery {
    /// The first parent sticks.
    Ignore,
    /// The parent is replaced only along a strictly cheaper route.
    ReplaceIfCheaper,
}

pub struct FrontierEntry<C> {
    pub estimated_cost: C,
    pub cost: C,
    pub index: usize,
    /// Insertion counter, used to break ties.
    pub order: u64,
}

/// Ordering of the nodes that are waiting to be expanded.
pub trait Frontier<C> {
    const REDISCOVERY: Rediscovery;

    fn push(&mut self, entry: FrontierEntry<C>);
    fn pop(&mut self) -> Option<FrontierEntry<C>>;
}

/// First in, first out: breadth-first search.
pub struct FifoFrontier<C>(VecDeque<FrontierEntry<C>>);

impl<C> Default for FifoFrontier<C> {
    fn default() -> Self {
        FifoFrontier(VecDeque::new())
    }
}

impl<C> Frontier<C> for FifoFrontier<C> {
    const REDISCOVERY: Rediscovery = Rediscovery::Ignore;

    fn push(&mut self, entry: FrontierEntry<C>) {
        self.0.push_back(entry);
    }
    fn pop(&mut self) -> Option<FrontierEntry<C>> {
        self.0.pop_front()
    }
}

/// Last in, first out: depth-first search.
pub struct LifoFrontier<C>(Vec<FrontierEntry<C>>);

impl<C> Default for LifoFrontier<C> {
    fn default() -> Self {
        LifoFrontier(Vec::new())
    }
}

impl<C> Frontier<C> for LifoFrontier<C> {
    const REDISCOVERY: Rediscovery = Rediscovery::Ignore;

    fn push(&mut self, entry: FrontierEntry<C>) {
        self.0.push(entry);
    }
    fn pop(&mut self) -> Option<FrontierEntry<C>> {
        self.0.pop()
    }
}

struct SmallestCostHolder<C>(FrontierEntry<C>);

impl<C: PartialEq> Eq for SmallestCostHolder<C> {}

impl<C: PartialEq> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.0.estimated_cost.eq(&other.0.estimated_cost) && self.0.order == other.0.order
    }
}

impl<C: Ord> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest estimated cost first, then earliest insertion
        match other.0.estimated_cost.cmp(&self.0.estimated_cost) {
            Ordering::Equal => other.0.order.cmp(&self.0.order),
            s => s,
        }
    }
}

/// Smallest `cost + heuristic` first, ties broken by insertion order: A*.
pub struct PriorityFrontier<C>(BinaryHeap<SmallestCostHolder<C>>);

impl<C: Ord> Default for PriorityFrontier<C> {
    fn default() -> Self {
        PriorityFrontier(BinaryHeap::new())
    }
}

impl<C: Ord> Frontier<C> for PriorityFrontier<C> {
    const REDISCOVERY: Rediscovery = Rediscovery::ReplaceIfCheaper;

    fn push(&mut self, entry: FrontierEntry<C>) {
        self.0.push(SmallestCostHolder(entry));
    }
    fn pop(&mut self) -> Option<FrontierEntry<C>> {
        self.0.pop().map(|holder| holder.0)
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds for an expanded node, returning the path to it
/// (start and goal inclusive) and its cost, or [None] once the frontier is exhausted.
pub fn graph_search<N, C, FR, FN, IN, FH, FS, O>(
    start: &N,
    mut frontier: FR,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    observer: &mut O,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FR: Frontier<C>,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = Candidate<N, C>>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
    O: SearchObserver<N>,
{
    let mut order = 0u64;
    frontier.push(FrontierEntry {
        estimated_cost: Zero::zero(),
        cost: Zero::zero(),
        index: 0,
        order,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut visited: FxHashSet<usize> = FxHashSet::default();
    while let Some(FrontierEntry { cost, index, .. }) = frontier.pop() {
        let node = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            // A node may sit in the frontier several times if a better way to reach it was
            // found. Only the entry matching the recorded cost is expanded.
            if cost > c || !visited.insert(index) {
                continue;
            }
            observer.expanded(node);
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            node.clone()
        };
        for candidate in successors(&node) {
            observer.probed(&node, &candidate.node, candidate.passable);
            if !candidate.passable {
                continue;
            }
            let new_cost = cost + candidate.cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(candidate.node) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if visited.contains(&e.index()) {
                        continue;
                    }
                    let replace = match FR::REDISCOVERY {
                        Rediscovery::Ignore => false,
                        Rediscovery::ReplaceIfCheaper => e.get().1 > new_cost,
                    };
                    if !replace {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
            }
            order += 1;
            frontier.push(FrontierEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
                order,
            });
        }
    }
    None
}
