//! Exercise catalog (`data/exercises.json`) and the closed set of exercise
//! kinds the app knows how to host.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path of the catalog document relative to the data root.
pub const CATALOG_PATH: &str = "data/exercises.json";

/// Every exercise the app can render, keyed by its catalog `componentName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    Arithmetic,
    MemoryCards,
    SequenceRecall,
    Minesweeper,
    Sudoku,
    WordSearch,
    PatternRecognition,
    ReadingComprehension,
    TicTacToe,
    GuessTheDate,
    Tangram,
    Writing,
    Cups,
    Balloons,
}

/// External document an exercise needs before it can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentSource {
    HistoricalEvents,
    MonthlyReading,
    WritingPrompts,
}

impl ContentSource {
    /// Resource path for the document; reading passages are split by month.
    #[must_use]
    pub fn path(self, month: u32) -> String {
        match self {
            Self::HistoricalEvents => "events/events.json".to_string(),
            Self::MonthlyReading => format!("lecturas/{month}.json"),
            Self::WritingPrompts => "escrituras/writing-instructions.json".to_string(),
        }
    }
}

impl ExerciseKind {
    pub const ALL: [Self; 14] = [
        Self::Arithmetic,
        Self::MemoryCards,
        Self::SequenceRecall,
        Self::Minesweeper,
        Self::Sudoku,
        Self::WordSearch,
        Self::PatternRecognition,
        Self::ReadingComprehension,
        Self::TicTacToe,
        Self::GuessTheDate,
        Self::Tangram,
        Self::Writing,
        Self::Cups,
        Self::Balloons,
    ];

    #[must_use]
    pub const fn component_name(self) -> &'static str {
        match self {
            Self::Arithmetic => "MathExercise",
            Self::MemoryCards => "MemoryCardGame",
            Self::SequenceRecall => "RecuerdaSecuencia",
            Self::Minesweeper => "BuscaMinas",
            Self::Sudoku => "SudokuGame",
            Self::WordSearch => "WordSearchGame",
            Self::PatternRecognition => "PatternRecognitionGame",
            Self::ReadingComprehension => "ReadingComprehension",
            Self::TicTacToe => "TresEnRaya",
            Self::GuessTheDate => "GuessTheDateGame",
            Self::Tangram => "TangramGame",
            Self::Writing => "WritingExercise",
            Self::Cups => "VasosExercise",
            Self::Balloons => "JuegoGlobos",
        }
    }

    /// Short identifier used for translation keys and DOM test ids.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Arithmetic => "math",
            Self::MemoryCards => "memory",
            Self::SequenceRecall => "sequence",
            Self::Minesweeper => "minesweeper",
            Self::Sudoku => "sudoku",
            Self::WordSearch => "word_search",
            Self::PatternRecognition => "patterns",
            Self::ReadingComprehension => "reading",
            Self::TicTacToe => "tic_tac_toe",
            Self::GuessTheDate => "guess_date",
            Self::Tangram => "tangram",
            Self::Writing => "writing",
            Self::Cups => "cups",
            Self::Balloons => "balloons",
        }
    }

    /// Completion signals needed before the session moves on. Match-based
    /// games report once per match and are played twice.
    #[must_use]
    pub const fn completions_required(self) -> u8 {
        match self {
            Self::TicTacToe | Self::Minesweeper => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub const fn content(self) -> Option<ContentSource> {
        match self {
            Self::GuessTheDate => Some(ContentSource::HistoricalEvents),
            Self::ReadingComprehension => Some(ContentSource::MonthlyReading),
            Self::Writing => Some(ContentSource::WritingPrompts),
            _ => None,
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown exercise component {0:?}")]
pub struct UnknownExercise(pub String);

impl FromStr for ExerciseKind {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.component_name() == wanted)
            .ok_or_else(|| UnknownExercise(wanted.to_string()))
    }
}

/// One catalog entry as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDescriptor {
    pub title: String,
    #[serde(rename = "componentName")]
    pub component_name: String,
    /// Advisory length in seconds.
    #[serde(default)]
    pub duration: u32,
    /// Lowest user level that may play this entry. Required.
    #[serde(rename = "minLevel")]
    pub min_level: u32,
}

impl ExerciseDescriptor {
    #[must_use]
    pub const fn is_available_at(&self, level: u32) -> bool {
        self.min_level <= level
    }
}

/// A catalog entry bound to the exercise kind that renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExercise {
    pub descriptor: ExerciseDescriptor,
    pub kind: ExerciseKind,
}

impl ResolvedExercise {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.descriptor.title
    }

    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.descriptor.duration
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not fetch {path}: {message}")]
    Fetch { path: String, message: String },
    #[error("malformed exercise catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no exercises available for level {level}")]
    NoneForLevel { level: u32 },
}

impl CatalogError {
    /// True for the "nothing to play at this level" outcome, as opposed to a
    /// load failure.
    #[must_use]
    pub const fn is_empty_for_level(&self) -> bool {
        matches!(self, Self::NoneForLevel { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    pub exercises: Vec<ExerciseDescriptor>,
}

impl ExerciseCatalog {
    /// Parse the catalog document.
    ///
    /// # Errors
    ///
    /// Fails when the JSON is malformed or the `exercises` list is missing.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Entries open to `level`, in catalog order.
    pub fn filter_for_level(&self, level: u32) -> impl Iterator<Item = &ExerciseDescriptor> {
        self.exercises
            .iter()
            .filter(move |entry| entry.is_available_at(level))
    }
}

/// Bind descriptors to exercise kinds, dropping (and logging) unknown ones.
pub fn resolve<'a, I>(descriptors: I) -> Vec<ResolvedExercise>
where
    I: IntoIterator<Item = &'a ExerciseDescriptor>,
{
    descriptors
        .into_iter()
        .filter_map(|descriptor| match descriptor.component_name.parse() {
            Ok(kind) => Some(ResolvedExercise {
                descriptor: descriptor.clone(),
                kind,
            }),
            Err(err) => {
                log::warn!("dropping catalog entry {:?}: {err}", descriptor.title);
                None
            }
        })
        .collect()
}

/// Parse, filter and resolve the catalog for one learner.
///
/// # Errors
///
/// [`CatalogError::Malformed`] when the document cannot be parsed and
/// [`CatalogError::NoneForLevel`] when nothing playable remains.
pub fn load_for_level(json: &str, level: u32) -> Result<Vec<ResolvedExercise>, CatalogError> {
    let catalog = ExerciseCatalog::from_json(json)?;
    let exercises = resolve(catalog.filter_for_level(level));
    if exercises.is_empty() {
        return Err(CatalogError::NoneForLevel { level });
    }
    log::info!(
        "catalog ready: {} of {} exercises for level {level}",
        exercises.len(),
        catalog.exercises.len()
    );
    Ok(exercises)
}
