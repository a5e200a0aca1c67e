//! Exercise session controller.
//!
//! Walks the resolved exercise list one slot at a time:
//! `Showing(i) -> Transition(i) -> Showing(i + 1) -> ... -> Finished`.
//! Progress has two sources. Organic completion reports the share of
//! completed exercises; jumping through the menu reports the share of
//! exercises before the target index.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ResolvedExercise;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Showing(usize),
    Transition(usize),
    Finished,
}

impl SessionPhase {
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Showing(index) | Self::Transition(index) => Some(index),
            Self::Finished => None,
        }
    }
}

/// Result of feeding one completion signal to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionOutcome {
    /// The exercise needs more signals before it counts.
    Pending { received: u8, required: u8 },
    /// The exercise counted; the transition screen is up.
    Transition { index: usize, percent: f32 },
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a session needs at least one exercise")]
    NoExercises,
    #[error("exercise {index} is out of range (session has {total})")]
    OutOfRange { index: usize, total: usize },
    #[error("no exercise is being shown (phase {0:?})")]
    NotShowing(SessionPhase),
    #[error("no transition screen is up (phase {0:?})")]
    NotInTransition(SessionPhase),
    #[error("the session has finished")]
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionController {
    exercises: Vec<ResolvedExercise>,
    phase: SessionPhase,
    completed: BTreeSet<usize>,
    percent: f32,
    signals: u8,
    attempt: u32,
}

#[allow(clippy::cast_precision_loss)]
fn share(part: usize, total: usize) -> f32 {
    part as f32 / total as f32 * 100.0
}

impl SessionController {
    /// Start at the first exercise with no progress.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoExercises`] for an empty list.
    pub fn new(exercises: Vec<ResolvedExercise>) -> Result<Self, SessionError> {
        if exercises.is_empty() {
            return Err(SessionError::NoExercises);
        }
        Ok(Self {
            exercises,
            phase: SessionPhase::Showing(0),
            completed: BTreeSet::new(),
            percent: 0.0,
            signals: 0,
            attempt: 0,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished)
    }

    #[must_use]
    pub fn exercises(&self) -> &[ResolvedExercise] {
        &self.exercises
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.phase.index()
    }

    #[must_use]
    pub fn current(&self) -> Option<&ResolvedExercise> {
        self.current_index().and_then(|index| self.exercises.get(index))
    }

    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.exercises.len()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub const fn percent_complete(&self) -> f32 {
        self.percent
    }

    /// Signals received for the exercise on screen that have not counted yet.
    #[must_use]
    pub const fn pending_signals(&self) -> u8 {
        self.signals
    }

    /// Bumped whenever the same slot must restart from scratch (replay, jump).
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Feed a "done" signal from the exercise on screen.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotShowing`] unless an exercise is on screen.
    pub fn on_exercise_complete(&mut self) -> Result<CompletionOutcome, SessionError> {
        let SessionPhase::Showing(index) = self.phase else {
            return Err(SessionError::NotShowing(self.phase));
        };
        let required = self.exercises[index].kind.completions_required();
        self.signals = self.signals.saturating_add(1);
        if self.signals < required {
            log::debug!(
                "exercise {index} signalled {}/{required}",
                self.signals
            );
            return Ok(CompletionOutcome::Pending {
                received: self.signals,
                required,
            });
        }

        self.signals = 0;
        self.completed.insert(index);
        let organic = share(self.completed.len(), self.exercises.len());
        self.percent = self.percent.max(organic);
        self.phase = SessionPhase::Transition(index);
        log::info!(
            "exercise {index} ({}) complete, progress {:.0}%",
            self.exercises[index].kind,
            self.percent
        );
        Ok(CompletionOutcome::Transition {
            index,
            percent: self.percent,
        })
    }

    /// Leave the transition screen for the next exercise, or finish after
    /// the last one. Progress is unchanged.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotInTransition`] unless the transition screen is up.
    pub fn continue_session(&mut self) -> Result<SessionPhase, SessionError> {
        let SessionPhase::Transition(index) = self.phase else {
            return Err(SessionError::NotInTransition(self.phase));
        };
        self.phase = if self.is_last(index) {
            log::info!("session finished at {:.0}%", self.percent);
            SessionPhase::Finished
        } else {
            SessionPhase::Showing(index + 1)
        };
        Ok(self.phase)
    }

    /// Play the same exercise again without touching progress.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotInTransition`] unless the transition screen is up.
    pub fn replay(&mut self) -> Result<SessionPhase, SessionError> {
        let SessionPhase::Transition(index) = self.phase else {
            return Err(SessionError::NotInTransition(self.phase));
        };
        self.signals = 0;
        self.attempt = self.attempt.wrapping_add(1);
        self.phase = SessionPhase::Showing(index);
        Ok(self.phase)
    }

    /// Jump straight to `index`; progress becomes `index / total * 100`.
    ///
    /// # Errors
    ///
    /// [`SessionError::OutOfRange`] for a bad index and
    /// [`SessionError::Finished`] once the session is over.
    pub fn go_to_exercise(&mut self, index: usize) -> Result<SessionPhase, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        let total = self.exercises.len();
        if index >= total {
            return Err(SessionError::OutOfRange { index, total });
        }
        self.signals = 0;
        self.attempt = self.attempt.wrapping_add(1);
        self.percent = share(index, total);
        self.phase = SessionPhase::Showing(index);
        log::info!("jumped to exercise {index}, progress {:.0}%", self.percent);
        Ok(self.phase)
    }

    /// End the training from the transition screen or mid-exercise.
    pub fn finish_early(&mut self) -> SessionPhase {
        if !self.is_finished() {
            log::info!(
                "training ended early after {} of {} exercises",
                self.completed.len(),
                self.exercises.len()
            );
        }
        self.signals = 0;
        self.phase = SessionPhase::Finished;
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ExerciseDescriptor, ExerciseKind};

    fn exercise(kind: ExerciseKind) -> ResolvedExercise {
        ResolvedExercise {
            descriptor: ExerciseDescriptor {
                title: kind.slug().to_string(),
                component_name: kind.component_name().to_string(),
                duration: 60,
                min_level: 1,
            },
            kind,
        }
    }

    fn session(kinds: &[ExerciseKind]) -> SessionController {
        SessionController::new(kinds.iter().copied().map(exercise).collect()).unwrap()
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(
            SessionController::new(Vec::new()).unwrap_err(),
            SessionError::NoExercises
        );
    }

    #[test]
    fn completion_then_continue_walks_the_list() {
        let mut s = session(&[ExerciseKind::Arithmetic, ExerciseKind::Sudoku]);
        assert_eq!(s.phase(), SessionPhase::Showing(0));
        let outcome = s.on_exercise_complete().unwrap();
        assert_eq!(outcome, CompletionOutcome::Transition { index: 0, percent: 50.0 });
        assert_eq!(s.phase(), SessionPhase::Transition(0));
        assert_eq!(s.continue_session().unwrap(), SessionPhase::Showing(1));
        assert!((s.percent_complete() - 50.0).abs() < f32::EPSILON);

        s.on_exercise_complete().unwrap();
        assert!((s.percent_complete() - 100.0).abs() < f32::EPSILON);
        assert_eq!(s.continue_session().unwrap(), SessionPhase::Finished);
        assert!(s.current().is_none());
        assert!(matches!(
            s.on_exercise_complete(),
            Err(SessionError::NotShowing(SessionPhase::Finished))
        ));
    }

    #[test]
    fn replay_does_not_add_progress() {
        let mut s = session(&[ExerciseKind::Arithmetic, ExerciseKind::Sudoku, ExerciseKind::Tangram]);
        s.on_exercise_complete().unwrap();
        let before = s.percent_complete();
        let attempt = s.attempt();
        assert_eq!(s.replay().unwrap(), SessionPhase::Showing(0));
        assert_eq!(s.attempt(), attempt + 1);
        s.on_exercise_complete().unwrap();
        assert!((s.percent_complete() - before).abs() < f32::EPSILON);
        assert_eq!(s.completed_count(), 1);
    }

    #[test]
    fn match_games_need_two_signals() {
        let mut s = session(&[ExerciseKind::TicTacToe, ExerciseKind::Arithmetic]);
        assert_eq!(
            s.on_exercise_complete().unwrap(),
            CompletionOutcome::Pending { received: 1, required: 2 }
        );
        assert_eq!(s.phase(), SessionPhase::Showing(0));
        assert!(matches!(
            s.on_exercise_complete().unwrap(),
            CompletionOutcome::Transition { index: 0, .. }
        ));
        assert_eq!(s.pending_signals(), 0);

        s.replay().unwrap();
        assert!(matches!(
            s.on_exercise_complete().unwrap(),
            CompletionOutcome::Pending { received: 1, .. }
        ));
    }

    #[test]
    fn go_to_is_index_proportional() {
        let kinds = [ExerciseKind::Arithmetic; 5];
        let mut s = session(&kinds);
        s.go_to_exercise(2).unwrap();
        assert_eq!(s.go_to_exercise(4).unwrap(), SessionPhase::Showing(4));
        assert_eq!(s.current_index(), Some(4));
        assert!((s.percent_complete() - 80.0).abs() < f32::EPSILON);
        assert_eq!(
            s.go_to_exercise(5).unwrap_err(),
            SessionError::OutOfRange { index: 5, total: 5 }
        );
    }

    #[test]
    fn go_to_resets_pending_signals() {
        let mut s = session(&[ExerciseKind::Minesweeper, ExerciseKind::Arithmetic]);
        s.on_exercise_complete().unwrap();
        assert_eq!(s.pending_signals(), 1);
        s.go_to_exercise(0).unwrap();
        assert_eq!(s.pending_signals(), 0);
    }

    #[test]
    fn progress_never_drops_on_completion() {
        let kinds = [ExerciseKind::Arithmetic; 4];
        let mut s = session(&kinds);
        s.go_to_exercise(3).unwrap();
        s.on_exercise_complete().unwrap();
        assert!((s.percent_complete() - 75.0).abs() < f32::EPSILON);
    }

    #[test]
    fn transition_actions_require_transition_phase() {
        let mut s = session(&[ExerciseKind::Arithmetic]);
        assert!(matches!(s.continue_session(), Err(SessionError::NotInTransition(_))));
        assert!(matches!(s.replay(), Err(SessionError::NotInTransition(_))));
    }

    #[test]
    fn finish_early_is_terminal() {
        let mut s = session(&[ExerciseKind::Arithmetic, ExerciseKind::Sudoku]);
        assert_eq!(s.finish_early(), SessionPhase::Finished);
        assert_eq!(s.go_to_exercise(0).unwrap_err(), SessionError::Finished);
    }
}
