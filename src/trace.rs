use crate::point::Point;
use crate::search::SearchObserver;

/// A single step taken by a solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// The cell was popped from the frontier and added to the visited set.
    Expanded(Point),
    /// The in-bounds neighbour `to` of the expanded cell `from` was checked.
    Probed {
        from: Point,
        to: Point,
        passable: bool,
    },
}

/// [SearchObserver] that records every step of a search, so it can be replayed later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTrace {
    pub events: Vec<SearchEvent>,
}

impl SearchTrace {
    pub fn new() -> SearchTrace {
        SearchTrace::default()
    }

    /// Cells in the order they were expanded.
    pub fn expanded(&self) -> impl Iterator<Item = Point> + '_ {
        self.events.iter().filter_map(|e| match e {
            SearchEvent::Expanded(p) => Some(*p),
            SearchEvent::Probed { .. } => None,
        })
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded().count()
    }
}

impl SearchObserver<Point> for SearchTrace {
    fn expanded(&mut self, node: &Point) {
        self.events.push(SearchEvent::Expanded(*node));
    }

    fn probed(&mut self, from: &Point, to: &Point, passable: bool) {
        self.events.push(SearchEvent::Probed {
            from: *from,
            to: *to,
            passable,
        });
    }
}
