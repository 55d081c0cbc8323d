// Copyright (C) 2020-2026 Andy Kurnia.

use super::{game_state::GameState, move_picker, movegen::Move};
use rand::prelude::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::{RwLock, Semaphore};

thread_local! {
    static RNG: std::cell::RefCell<Box<dyn RngCore>> =
        std::cell::RefCell::new(Box::new(rand_chacha::ChaCha20Rng::from_os_rng()));
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MctsParams {
    // rollouts per decision
    pub iterations: usize,
    pub pick_top: usize,
    pub exploration: f64,
    // rollouts in flight at once
    pub concurrency: usize,
}

impl Default for MctsParams {
    fn default() -> Self {
        Self {
            iterations: 30,
            pick_top: 10,
            exploration: std::f64::consts::SQRT_2,
            concurrency: num_cpus::get().max(1),
        }
    }
}

const ROOT: usize = 0;

struct TreeNode {
    play: Option<Move>,
    state: GameState,
    reward: i64,
    visits: u64,
    // rollouts that started here rather than in a child
    direct: u64,
    parent: Option<usize>,
    children: Vec<usize>,
}

struct SearchTree {
    nodes: Vec<TreeNode>,
}

impl SearchTree {
    fn ucb1(&self, idx: usize, exploration: f64) -> f64 {
        let node = &self.nodes[idx];
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let parent_visits = node.parent.map_or(node.visits, |p| self.nodes[p].visits);
        let visits = node.visits as f64;
        node.reward as f64 / visits + exploration * ((parent_visits as f64).ln() / visits).sqrt()
    }

    // Unvisited children win immediately.
    fn select_child(&self, idx: usize, exploration: f64) -> usize {
        let mut best = idx;
        let mut best_ucb1 = f64::NEG_INFINITY;
        for &child in &self.nodes[idx].children {
            let ucb1 = self.ucb1(child, exploration);
            if ucb1 == f64::INFINITY {
                return child;
            }
            if best == idx || ucb1 > best_ucb1 {
                best = child;
                best_ucb1 = ucb1;
            }
        }
        best
    }

    fn select_leaf(&self, mut idx: usize, exploration: f64) -> usize {
        while !self.nodes[idx].children.is_empty() {
            idx = self.select_child(idx, exploration);
        }
        idx
    }

    fn attach(&mut self, parent: usize, children: Vec<(Move, GameState)>) {
        for (play, state) in children {
            let idx = self.nodes.len();
            self.nodes.push(TreeNode {
                play: Some(play),
                state,
                reward: 0,
                visits: 0,
                direct: 0,
                parent: Some(parent),
                children: Vec::new(),
            });
            self.nodes[parent].children.push(idx);
        }
    }

    fn backpropagate(&mut self, leaf: usize, outcome: i32) {
        self.nodes[leaf].direct += 1;
        let mut cur = Some(leaf);
        while let Some(idx) = cur {
            let node = &mut self.nodes[idx];
            node.reward += outcome as i64;
            node.visits += 1;
            cur = node.parent;
        }
    }

    // Most visited; the earlier child wins ties.
    fn best_child(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &child in &self.nodes[ROOT].children {
            if best.is_none_or(|b| self.nodes[child].visits > self.nodes[b].visits) {
                best = Some(child);
            }
        }
        best
    }
}

// One child state per move, each with the move applied. A generated move
// that fails to apply means the engine is broken.
fn make_children(state: &GameState, moves: Vec<Move>) -> Vec<(Move, GameState)> {
    moves
        .into_iter()
        .map(|play| {
            let mut child = state.clone();
            if let Err(e) = child.play(&play) {
                panic!("generated move {play} could not be applied: {e}");
            }
            child.check_game_ended();
            (play, child)
        })
        .collect()
}

fn expand(state: &mut GameState, pick_top: usize) -> Vec<(Move, GameState)> {
    let moves = state.legal_moves();
    let mut top = move_picker::top_moves(state, moves, pick_top);
    if top.is_empty() {
        top.push(Move::Skip);
    }
    make_children(state, top)
}

// Plays to the end with the copy's own pickers. +1 win, 0 tie, -1 loss.
fn rollout(state: &mut GameState, player_idx: usize) -> i32 {
    RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        let rng: &mut dyn RngCore = &mut **rng;
        state.bag.shuffle(rng);
        while !state.check_game_ended() {
            let play = state.pick_move(rng).unwrap_or(Move::Skip);
            if let Err(e) = state.play(&play) {
                panic!("rollout move {play} could not be applied: {e}");
            }
        }
    });
    state.outcome_for(player_idx)
}

fn iterate(tree: &RwLock<SearchTree>, player_idx: usize, params: &MctsParams) {
    let (mut leaf, needs_expansion) = {
        let tree = tree.blocking_read();
        let leaf = tree.select_leaf(ROOT, params.exploration);
        let node = &tree.nodes[leaf];
        (leaf, node.visits > 0 && !node.state.is_over())
    };
    if needs_expansion {
        let mut state = tree.blocking_read().nodes[leaf].state.clone();
        let children = expand(&mut state, params.pick_top);
        let mut tree = tree.blocking_write();
        if tree.nodes[leaf].children.is_empty() {
            tracing::debug!(node = leaf, children = children.len(), "expanded");
            tree.attach(leaf, children);
        }
        leaf = tree.select_child(leaf, params.exploration);
    }
    let mut state = tree.blocking_read().nodes[leaf].state.clone();
    let outcome = rollout(&mut state, player_idx);
    tree.blocking_write().backpropagate(leaf, outcome);
}

#[derive(Clone, Debug)]
pub struct ChildStats {
    pub play: Move,
    pub visits: u64,
    pub reward: i64,
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    pub best: Move,
    pub root_visits: u64,
    pub root_direct: u64,
    pub children: Vec<ChildStats>,
    // most rollouts seen running at the same time
    pub peak_in_flight: usize,
}

// Searches from the current player's point of view. The root's children are
// the top `pick_top` of `moves`. Returns after every rollout has been
// backpropagated.
pub async fn search(state: &GameState, moves: Vec<Move>, params: &MctsParams) -> SearchReport {
    let player_idx = state.turn();
    let root_state = state.automated_copy(move_picker::MovePicker::MostPoints);
    let top = move_picker::top_moves(&root_state, moves, params.pick_top.max(1));
    let children = make_children(&root_state, top);
    let mut tree = SearchTree {
        nodes: vec![TreeNode {
            play: None,
            state: root_state,
            reward: 0,
            visits: 0,
            direct: 0,
            parent: None,
            children: Vec::new(),
        }],
    };
    tree.attach(ROOT, children);
    let tree = Arc::new(RwLock::new(tree));
    let semaphore = Arc::new(Semaphore::new(params.concurrency.max(1)));
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak_in_flight = Arc::new(AtomicUsize::new(0));
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..params.iterations {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let tree = Arc::clone(&tree);
        let params = params.clone();
        let in_flight = Arc::clone(&in_flight);
        let peak_in_flight = Arc::clone(&peak_in_flight);
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak_in_flight.fetch_max(now, Ordering::SeqCst);
            iterate(&tree, player_idx, &params);
            // released before the permit
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            if e.is_panic() {
                std::panic::resume_unwind(e.into_panic());
            }
        }
    }

    let tree = tree.read().await;
    let root = &tree.nodes[ROOT];
    let peak_in_flight = peak_in_flight.load(Ordering::SeqCst);
    tracing::info!(
        rollouts = root.visits,
        nodes = tree.nodes.len(),
        peak_in_flight,
        "search done"
    );
    SearchReport {
        best: tree
            .best_child()
            .and_then(|idx| tree.nodes[idx].play.clone())
            .unwrap_or(Move::Skip),
        root_visits: root.visits,
        root_direct: root.direct,
        children: root
            .children
            .iter()
            .map(|&idx| ChildStats {
                play: tree.nodes[idx].play.clone().unwrap_or(Move::Skip),
                visits: tree.nodes[idx].visits,
                reward: tree.nodes[idx].reward,
            })
            .collect(),
        peak_in_flight,
    }
}

// For callers outside any runtime. Falls back to the highest scoring move if
// a runtime cannot be started.
pub fn search_blocking(state: &GameState, moves: Vec<Move>, params: &MctsParams) -> Move {
    match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime.block_on(search(state, moves, params)).best,
        Err(e) => {
            tracing::warn!("cannot start search runtime: {e}");
            move_picker::most_points(state, moves).unwrap_or(Move::Skip)
        }
    }
}
