//! Per-exercise content documents: historical events, monthly reading
//! passages and writing prompts.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::history::{Identified, RecentHistory, pick_fresh};

/// Writing prompts shown per session.
pub const PROMPTS_PER_SESSION: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDateKind {
    #[serde(rename = "completa")]
    Full,
    #[serde(rename = "mes-dia")]
    MonthDay,
    #[serde(rename = "año")]
    Year,
}

/// A dated historical event for the date-guessing exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub id: u32,
    #[serde(rename = "evento")]
    pub event: String,
    /// `dd/mm/yyyy`.
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "pista")]
    pub hint: String,
    #[serde(rename = "tipoFecha")]
    pub date_kind: EventDateKind,
}

impl Identified for HistoricalEvent {
    fn id(&self) -> u32 {
        self.id
    }
}

impl HistoricalEvent {
    /// Day, month and year the learner is asked for, without leading zeros.
    /// Parts the event's date kind does not ask for are empty.
    #[must_use]
    pub fn expected_answer(&self) -> (String, String, String) {
        let mut parts = self
            .date
            .split('/')
            .map(|part| part.trim_start_matches('0').to_string());
        let day = parts.next().unwrap_or_default();
        let month = parts.next().unwrap_or_default();
        let year = parts.next().unwrap_or_default();
        match self.date_kind {
            EventDateKind::Full => (day, month, year),
            EventDateKind::MonthDay => (day, month, String::new()),
            EventDateKind::Year => (String::new(), String::new(), year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingQuestion {
    pub id: u32,
    #[serde(rename = "pregunta")]
    pub question: String,
    #[serde(rename = "opciones")]
    pub options: Vec<String>,
    #[serde(rename = "respuestaCorrecta")]
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPassage {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "preguntas", default)]
    pub questions: Vec<ReadingQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingPrompt {
    pub id: u32,
    pub title: String,
    pub description: String,
}

impl Identified for WritingPrompt {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Today's passage: the month's list indexed by day of month.
#[must_use]
pub fn passage_for_day(passages: &[ReadingPassage], day_of_month: u32) -> Option<&ReadingPassage> {
    if passages.is_empty() {
        return None;
    }
    let index = usize::try_from(day_of_month).unwrap_or(0) % passages.len();
    passages.get(index)
}

/// Choose an event not yet shown in this session. Once all were shown the
/// used list restarts with the chosen event.
pub fn next_event<'a, R>(
    events: &'a [HistoricalEvent],
    used: &mut RecentHistory,
    rng: &mut R,
) -> Option<&'a HistoricalEvent>
where
    R: Rng + ?Sized,
{
    let exhausted = events.iter().all(|event| used.contains(event.id));
    if exhausted {
        *used = RecentHistory::with_capacity(events.len().max(1));
    }
    let picked = pick_fresh(events, used, 1, rng).into_iter().next()?;
    used.record([picked.id]);
    Some(picked)
}

/// Choose this session's writing prompts, avoiding `history`, and record
/// the choice in it.
pub fn select_prompts<R>(
    prompts: &[WritingPrompt],
    history: &mut RecentHistory,
    rng: &mut R,
) -> Vec<WritingPrompt>
where
    R: Rng + ?Sized,
{
    let picked: Vec<WritingPrompt> = pick_fresh(prompts, history, PROMPTS_PER_SESSION, rng)
        .into_iter()
        .cloned()
        .collect();
    history.record(picked.iter().map(|prompt| prompt.id).collect::<Vec<_>>());
    picked
}
