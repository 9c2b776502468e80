use crate::error::PuzzleError;
use crate::puzzle_sliding::heuristic::Heuristic;
use crate::puzzle_sliding::state::Board;
use crate::stats::SearchStatsCollector;
use arrayvec::ArrayVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// Index of the node in the arena of its lane.
type NodeId = usize;

/// Node of the search tree.
struct SearchNode {
    board: Board,
    /// Number of moves from the root.
    moves: u32,
    /// Heuristic value of `board`, computed once.
    heuristic: u32,
    parent: Option<NodeId>
}

/// Frontier item. Nodes with lower priority (moves + heuristic) are taken first,
/// ties are broken by lower heuristic value and then by the order of insertion.
#[derive(Copy, Clone, PartialEq, Eq)]
struct FrontierEntry {
    priority: u32,
    heuristic: u32,
    node: NodeId
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed, as BinaryHeap is a max-heap
        (other.priority, other.heuristic, other.node).cmp(&(self.priority, self.heuristic, self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a single expansion made by a lane.
enum Step {
    /// The goal is taken from the frontier.
    Goal(NodeId),
    Expanded,
    /// Frontier is empty.
    Exhausted,
    /// Statistics collector has cancelled the search.
    Cancelled
}

/// One of two independent A* searches: from the initial board or from its twin.
struct Lane {
    /// Nodes ever created; parents are referred by indices to this vector.
    nodes: Vec<SearchNode>,
    frontier: BinaryHeap<FrontierEntry>,
    heuristic: Heuristic,
    expanded: u64
}

impl Lane {
    fn new(root: Board, heuristic: Heuristic) -> Self {
        let mut lane = Self { nodes: Vec::new(), frontier: BinaryHeap::new(), heuristic, expanded: 0 };
        lane.push(root, 0, None);
        lane
    }

    fn push(&mut self, board: Board, moves: u32, parent: Option<NodeId>) {
        let heuristic = self.heuristic.evaluate(&board);
        let node = self.nodes.len();
        self.frontier.push(FrontierEntry { priority: moves + heuristic, heuristic, node });
        self.nodes.push(SearchNode { board, moves, heuristic, parent });
    }

    #[inline] fn is_exhausted(&self) -> bool { self.frontier.is_empty() }

    /// Takes the best node from the frontier and either reports it as the goal or
    /// pushes its successors. Only the board of the node's parent is skipped;
    /// other repeated boards are searched again.
    fn step(&mut self, stats: &mut impl SearchStatsCollector) -> Step {
        let Some(entry) = self.frontier.pop() else { return Step::Exhausted };
        if !stats.expanded() { return Step::Cancelled; }
        self.expanded += 1;
        let current = &self.nodes[entry.node];
        trace!(node = entry.node, priority = entry.priority, moves = current.moves, heuristic = current.heuristic, "expand");
        if current.board.is_goal() { return Step::Goal(entry.node); }
        let moves = current.moves + 1;
        let predecessor = current.parent.map(|parent| &self.nodes[parent].board);
        let successors: ArrayVec<Board, 4> = current.board.neighbors().into_iter()
            .filter(|board| predecessor != Some(board))
            .collect();
        for board in successors {
            stats.generated();
            self.push(board, moves, Some(entry.node));
        }
        Step::Expanded
    }

    /// Returns boards on the path from the root to `node` (both included).
    fn path_to(&self, node: NodeId) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.nodes[node].moves as usize + 1);
        let mut current = Some(node);
        while let Some(id) = current {
            path.push(self.nodes[id].board.clone());
            current = self.nodes[id].parent;
        }
        path.reverse();
        path
    }
}

/// Settings of the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConf {
    pub heuristic: Heuristic
}

impl SolverConf {
    pub fn with_heuristic(heuristic: Heuristic) -> Self { Self { heuristic } }
}

/// Solves the sliding puzzle with A* search.
///
/// The initial board and its twin are searched in lockstep, one expansion each per round,
/// until one of them reaches the goal. Exactly one of them is solvable, so the search
/// always terminates and the lane that succeeds tells whether the initial board is solvable.
#[derive(Clone, Debug)]
pub struct Solver {
    /// Boards from the initial one to the goal, `None` if the initial board is unsolvable.
    solution: Option<Vec<Board>>
}

impl Solver {
    /// Solves `initial` using Manhattan heuristic.
    pub fn new(initial: &Board) -> Self {
        Self::with_conf(initial, SolverConf::default(), &mut ())
            .unwrap_or_else(|_| unreachable!("search without limits cannot be cancelled"))
    }

    /// Solves `initial` with given settings. Collects statistics during search.
    ///
    /// Fails with [`PuzzleError::SearchAborted`] only if `stats` cancels the search.
    pub fn with_conf(initial: &Board, conf: SolverConf, stats: &mut impl SearchStatsCollector) -> Result<Self, PuzzleError> {
        let mut primary = Lane::new(initial.clone(), conf.heuristic);
        let mut twin = Lane::new(initial.twin(), conf.heuristic);
        let aborted = |primary: &Lane, twin: &Lane| PuzzleError::SearchAborted { expanded: primary.expanded + twin.expanded };
        let solution = loop {
            if primary.is_exhausted() || twin.is_exhausted() { break None; }
            match primary.step(stats) {
                Step::Goal(node) => break Some(primary.path_to(node)),
                Step::Cancelled => return Err(aborted(&primary, &twin)),
                Step::Exhausted => break None,
                Step::Expanded => {}
            }
            match twin.step(stats) {
                Step::Goal(_) | Step::Exhausted => break None,
                Step::Cancelled => return Err(aborted(&primary, &twin)),
                Step::Expanded => {}
            }
        };
        debug!(
            solvable = solution.is_some(),
            moves = solution.as_ref().map(|path| path.len() - 1),
            primary_expanded = primary.expanded,
            primary_nodes = primary.nodes.len(),
            twin_expanded = twin.expanded,
            twin_nodes = twin.nodes.len(),
            "search finished"
        );
        Ok(Self { solution })
    }

    /// Checks whether the initial board can be solved.
    #[inline] pub fn is_solvable(&self) -> bool { self.solution.is_some() }

    /// Returns the minimal number of moves to solve the initial board or `None` if it is unsolvable.
    #[inline] pub fn moves(&self) -> Option<u32> {
        self.solution.as_ref().map(|path| (path.len() - 1) as u32)
    }

    /// Returns boards of the shortest solution, from the initial board to the goal,
    /// or `None` if the initial board is unsolvable.
    #[inline] pub fn solution(&self) -> Option<&[Board]> { self.solution.as_deref() }

    #[inline] pub fn into_solution(self) -> Option<Vec<Board>> { self.solution }
}
