use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::*;

/// How an autonomous playthrough ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlayOutcome {
    Won,
    Lost { triggered_mine: Cell },
    /// No eligible cell was left while the game was still running. Cannot
    /// happen while every unrevealed safe cell stays recommendable.
    Stalled,
}

/// Result of one autonomous game, with the final agent kept for inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct Playthrough {
    pub outcome: PlayOutcome,
    pub moves: u32,
    pub agent: InferenceAgent,
}

/// Plays one full game without rendering or input: a cell proven safe when
/// one is known, a uniform random pick otherwise, feeding every clue back
/// into the knowledge base.
pub fn play_game(field: MineField, seed: u64) -> Result<Playthrough> {
    let size = field.size();
    let mut game = Game::new(field);
    let mut agent = InferenceAgent::new(size);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut moves = 0u32;

    while game.state() == GameState::InProgress {
        let Some(cell) = agent
            .recommend_safe_move()
            .or_else(|| agent.recommend_random_move(&mut rng))
        else {
            break;
        };

        moves += 1;
        match game.reveal(cell)? {
            RevealOutcome::HitMine => {
                log::debug!("hit a mine at ({}, {}) after {} moves", cell.0, cell.1, moves);
                return Ok(Playthrough {
                    outcome: PlayOutcome::Lost {
                        triggered_mine: cell,
                    },
                    moves,
                    agent,
                });
            }
            RevealOutcome::Clue(clue) => agent.observe(cell, clue)?,
        }
    }

    let outcome = match game.state() {
        GameState::Won => PlayOutcome::Won,
        _ => PlayOutcome::Stalled,
    };
    log::debug!("playthrough finished after {} moves: {:?}", moves, outcome);
    Ok(Playthrough {
        outcome,
        moves,
        agent,
    })
}
