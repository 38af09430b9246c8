use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashSet;
use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Sentence;
use crate::{neighbors, Cell, Dims, GameError, Result};

/// Snapshot of the knowledge base size, for logs and diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub sentence_count: usize,
    pub safe_count: usize,
    pub mine_count: usize,
    pub moves_made: usize,
}

/// Knowledge-base owner: ingests one `(cell, clue)` observation per revealed
/// cell and derives, with certainty only, which cells are safe or mined.
///
/// The certainty sets are append-only and never overlap; a deduction that
/// would cross them is rejected as [`GameError::ContradictoryKnowledge`]
/// before anything is inserted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InferenceAgent {
    bounds: Dims,
    moves_made: HashSet<Cell>,
    safes: HashSet<Cell>,
    mines: HashSet<Cell>,
    knowledge: Vec<Sentence>,
}

impl InferenceAgent {
    pub fn new(bounds: Dims) -> Self {
        Self {
            bounds,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Dims {
        self.bounds
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.knowledge
    }

    pub fn stats(&self) -> KnowledgeStats {
        KnowledgeStats {
            sentence_count: self.knowledge.len(),
            safe_count: self.safes.len(),
            mine_count: self.mines.len(),
            moves_made: self.moves_made.len(),
        }
    }

    /// Ingests the clue reported for a freshly revealed cell and settles the
    /// knowledge base: the observed cell is recorded and marked safe, the
    /// undetermined part of its neighborhood becomes a new sentence, and both
    /// deduction rules run until neither yields anything new.
    ///
    /// Re-observing a cell, a clue above 8, or a clue impossible for the
    /// remaining neighborhood is rejected with a diagnostic.
    pub fn observe(&mut self, cell: Cell, clue: u8) -> Result<()> {
        if cell.0 >= self.bounds.0 || cell.1 >= self.bounds.1 {
            return Err(GameError::InvalidCoords);
        }
        if clue > 8 {
            return Err(GameError::CountOutOfRange);
        }
        if self.moves_made.contains(&cell) {
            return Err(GameError::DuplicateObservation);
        }
        if self.mines.contains(&cell) {
            return Err(GameError::ContradictoryKnowledge);
        }

        // Undetermined neighborhood; known mines among the neighbors are
        // deducted from the clue instead of joining the sentence. Nothing is
        // recorded until the observation has passed every check.
        let mut working_clue = i16::from(clue);
        let mut candidates: SmallVec<[Cell; 8]> = SmallVec::new();
        for neighbor in neighbors(cell, self.bounds) {
            if self.mines.contains(&neighbor) {
                working_clue -= 1;
                continue;
            }
            if self.safes.contains(&neighbor) || self.moves_made.contains(&neighbor) {
                continue;
            }
            candidates.push(neighbor);
        }
        if working_clue < 0 || working_clue as usize > candidates.len() {
            return Err(GameError::InconsistentObservation);
        }

        self.moves_made.insert(cell);
        self.mark_safe(cell)?;

        if working_clue == 0 {
            for neighbor in candidates {
                self.mark_safe(neighbor)?;
            }
        } else if working_clue == 1 && candidates.len() == 1 {
            self.mark_mine(candidates[0])?;
        } else {
            self.insert_sentence(Sentence::new(
                candidates.into_iter().collect(),
                working_clue as u8,
            ));
        }

        self.settle()?;
        log::debug!("observed ({}, {}) clue {}: {:?}", cell.0, cell.1, clue, self.stats());
        Ok(())
    }

    /// Some cell proven safe that has not been played yet. Read-only; callers
    /// may probe this speculatively.
    pub fn recommend_safe_move(&self) -> Option<Cell> {
        self.safes
            .iter()
            .find(|cell| !self.moves_made.contains(*cell))
            .copied()
    }

    /// Uniform choice among every cell that is neither played nor a known
    /// mine. Candidates are enumerated rather than rejection-sampled, so the
    /// pick terminates even when few cells remain.
    pub fn recommend_random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let (rows, cols) = self.bounds;
        let mut eligible: Vec<Cell> = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let cell = (row, col);
                if !self.moves_made.contains(&cell) && !self.mines.contains(&cell) {
                    eligible.push(cell);
                }
            }
        }
        if eligible.is_empty() {
            None
        } else {
            Some(eligible[rng.random_range(0..eligible.len())])
        }
    }

    fn mark_safe(&mut self, cell: Cell) -> Result<()> {
        if self.mines.contains(&cell) {
            return Err(GameError::ContradictoryKnowledge);
        }
        if self.safes.insert(cell) {
            for sentence in &mut self.knowledge {
                sentence.resolve_safe(cell);
            }
        }
        Ok(())
    }

    fn mark_mine(&mut self, cell: Cell) -> Result<()> {
        if self.safes.contains(&cell) {
            return Err(GameError::ContradictoryKnowledge);
        }
        if self.mines.insert(cell) {
            for sentence in &mut self.knowledge {
                sentence.resolve_mine(cell);
            }
        }
        Ok(())
    }

    fn insert_sentence(&mut self, sentence: Sentence) -> bool {
        if sentence.is_spent() || self.knowledge.contains(&sentence) {
            return false;
        }
        self.knowledge.push(sentence);
        true
    }

    /// Runs both deduction rules until neither changes the knowledge base or
    /// the certainty sets. Every derived sentence has strictly fewer cells
    /// than its superset parent, so the loop is finite.
    fn settle(&mut self) -> Result<()> {
        self.prune();
        loop {
            let mut progressed = self.resolve_trivial()?;
            progressed |= self.infer_subsets()?;
            if !progressed {
                return Ok(());
            }
        }
    }

    /// Trivial-rule sweeps to quiescence. Conclusions are collected from a
    /// snapshot before any marking, since marking one cell can turn another
    /// sentence into a trivial case on the next sweep.
    fn resolve_trivial(&mut self) -> Result<bool> {
        let mut progressed = false;
        loop {
            let mut found_safes: BTreeSet<Cell> = BTreeSet::new();
            let mut found_mines: BTreeSet<Cell> = BTreeSet::new();
            for sentence in &self.knowledge {
                found_safes.extend(sentence.known_safes());
                found_mines.extend(sentence.known_mines());
            }
            found_safes.retain(|cell| !self.safes.contains(cell));
            found_mines.retain(|cell| !self.mines.contains(cell));
            if found_safes.is_empty() && found_mines.is_empty() {
                return Ok(progressed);
            }

            for cell in found_safes {
                self.mark_safe(cell)?;
            }
            for cell in found_mines {
                self.mark_mine(cell)?;
            }
            self.prune();
            progressed = true;
        }
    }

    /// Full pairwise subset inference: for `A.cells ⊂ B.cells`, the cells of
    /// `B` outside `A` hold exactly `B.count - A.count` mines. Equal sets are
    /// duplicates and are left to pruning instead.
    fn infer_subsets(&mut self) -> Result<bool> {
        let mut derived: Vec<Sentence> = Vec::new();
        for (i, a) in self.knowledge.iter().enumerate() {
            for b in self.knowledge.iter().skip(i + 1) {
                let (sub, sup) = match a.cells().len().cmp(&b.cells().len()) {
                    Ordering::Less => (a, b),
                    Ordering::Greater => (b, a),
                    Ordering::Equal => continue,
                };
                if !sub.cells().is_subset(sup.cells()) {
                    continue;
                }

                let Some(count) = sup.count().checked_sub(sub.count()) else {
                    return Err(GameError::ContradictoryKnowledge);
                };
                let cells: BTreeSet<Cell> =
                    sup.cells().difference(sub.cells()).copied().collect();
                if usize::from(count) > cells.len() {
                    return Err(GameError::ContradictoryKnowledge);
                }

                let sentence = Sentence::new(cells, count);
                if !self.knowledge.contains(&sentence) && !derived.contains(&sentence) {
                    derived.push(sentence);
                }
            }
        }

        let mut progressed = false;
        for sentence in derived {
            progressed |= self.insert_sentence(sentence);
        }
        Ok(progressed)
    }

    /// Spent and duplicate sentences carry no information.
    fn prune(&mut self) {
        let mut seen: Vec<Sentence> = Vec::with_capacity(self.knowledge.len());
        self.knowledge.retain(|sentence| {
            if sentence.is_spent() || seen.contains(sentence) {
                false
            } else {
                seen.push(sentence.clone());
                true
            }
        });
    }
}
