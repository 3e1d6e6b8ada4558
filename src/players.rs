use crate::core::Move;
use crate::driver::GameDriver;
use rand::seq::SliceRandom;

/// Which strategy chooses moves for one side, grounded in the original engine's
/// `PlayerType` enum (`Human = 0, RandomAI = 1, GreedyAI = 2`) and persisted in that
/// numeric order by §6.4 item 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    RandomAi,
    GreedyAi,
}

impl PlayerKind {
    pub fn to_ordinal(self) -> i32 {
        match self {
            PlayerKind::Human => 0,
            PlayerKind::RandomAi => 1,
            PlayerKind::GreedyAi => 2,
        }
    }

    pub fn from_ordinal(n: i32) -> Option<PlayerKind> {
        Some(match n {
            0 => PlayerKind::Human,
            1 => PlayerKind::RandomAi,
            2 => PlayerKind::GreedyAi,
            _ => return None,
        })
    }
}

/// Picks uniformly among all legal moves, grounded in `makeRandomMove`.
pub fn choose_random_move(driver: &GameDriver) -> Option<Move> {
    let moves = driver.legal_moves();
    moves.choose(&mut rand::thread_rng()).copied()
}

/// Picks uniformly among the legal moves that leave the best material score for the
/// mover, grounded in `makeGreedyMove`'s tie-break-via-random-among-best-scored
/// behavior.
pub fn choose_greedy_move(driver: &GameDriver) -> Option<Move> {
    let side = driver.side_to_move();
    let moves = driver.legal_moves();
    if moves.is_empty() {
        return None;
    }

    let mut best_score = i32::MIN;
    let mut scored: Vec<(Move, i32)> = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut probe = driver.clone();
        probe.apply(mv);
        let score = probe.material_score(side);
        best_score = best_score.max(score);
        scored.push((mv, score));
    }

    let best: Vec<Move> = scored
        .into_iter()
        .filter(|&(_, score)| score == best_score)
        .map(|(mv, _)| mv)
        .collect();
    best.choose(&mut rand::thread_rng()).copied()
}
