use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use rand::rngs::SmallRng;

use crate::engine::facts::{
    DRILL_QUESTION_CAP, MissRecord, Question, RoundMode, WeightedFact, adjust_weights, fact_pool,
    miss_drill_questions, pick_question,
};
use crate::store::session_store::SessionStore;

pub const ROUND_SECS: u64 = 60;
pub const DRILL_SECS: u64 = 30;
pub const COUNTDOWN_STEP_MS: u64 = 800;
pub const WRONG_FLASH_MS: u64 = 1000;

const ANSWER_BUFFER_CAP: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FastPhase {
    ModeSelect,
    Countdown,
    Playing,
    RoundEnd,
    MissDrill,
    DrillEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
}

#[derive(Clone, Debug)]
pub struct WrongFlash {
    pub text: String,
    pub answer: u32,
    until: Instant,
}

#[derive(Clone, Copy, Debug)]
enum CountdownTarget {
    Round,
    Drill,
}

#[derive(Clone, Copy, Debug)]
struct Countdown {
    started: Instant,
    target: CountdownTarget,
}

#[derive(Clone, Debug)]
pub struct RoundSummary {
    pub score: u32,
    pub total_answered: u32,
    pub correct_count: u32,
    pub best_streak: u32,
    pub tokens_earned: u32,
    pub is_new_best: bool,
    pub miss_count: usize,
}

#[derive(Clone, Debug)]
struct Miss {
    question: Question,
    wrong_answer: u32,
}

/// One visit to the fast-multiplication screen. The pool and the round's
/// misses live here exclusively until `end_round` folds them into the session
/// store as a single write.
pub struct FastRound {
    phase: FastPhase,
    mode: RoundMode,
    pool: Vec<WeightedFact>,
    question: Option<Question>,
    answer: String,
    score: u32,
    streak: u32,
    best_streak: u32,
    correct_count: u32,
    total_answered: u32,
    misses: Vec<Miss>,
    flash: Option<WrongFlash>,
    countdown: Option<Countdown>,
    deadline: Option<Instant>,
    drill_questions: Vec<Question>,
    drill_index: usize,
    drill_corrected: usize,
    summary: Option<RoundSummary>,
    rng: SmallRng,
}

impl FastRound {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            phase: FastPhase::ModeSelect,
            mode: RoundMode::Mixed,
            pool: Vec::new(),
            question: None,
            answer: String::new(),
            score: 0,
            streak: 0,
            best_streak: 0,
            correct_count: 0,
            total_answered: 0,
            misses: Vec::new(),
            flash: None,
            countdown: None,
            deadline: None,
            drill_questions: Vec::new(),
            drill_index: 0,
            drill_corrected: 0,
            summary: None,
            rng,
        }
    }

    pub fn phase(&self) -> FastPhase {
        self.phase
    }

    pub fn mode(&self) -> RoundMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn flash(&self) -> Option<&WrongFlash> {
        self.flash.as_ref()
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn drill_progress(&self) -> (usize, usize) {
        (self.drill_corrected, self.drill_questions.len())
    }

    /// The question currently shown: the round question while playing, the
    /// drill question during a miss drill.
    pub fn question(&self) -> Option<&Question> {
        match self.phase {
            FastPhase::MissDrill => self.drill_questions.get(self.drill_index),
            _ => self.question.as_ref(),
        }
    }

    /// 3, 2, 1, then 0 for "GO", stepping on a fixed cadence from countdown
    /// start.
    pub fn countdown_value(&self, now: Instant) -> Option<i64> {
        let countdown = self.countdown?;
        let steps =
            (now.duration_since(countdown.started).as_millis() / COUNTDOWN_STEP_MS as u128) as i64;
        Some(3 - steps)
    }

    pub fn time_remaining(&self, now: Instant) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Start a round. Boss mode without any miss history builds an empty pool
    /// and is silently refused.
    pub fn select_mode(&mut self, mode: RoundMode, miss_history: &[MissRecord], now: Instant) {
        if self.phase != FastPhase::ModeSelect {
            return;
        }
        let pool = fact_pool(mode, miss_history);
        if pool.is_empty() {
            return;
        }

        self.mode = mode;
        self.pool = pool;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.correct_count = 0;
        self.total_answered = 0;
        self.misses.clear();
        self.flash = None;
        self.answer.clear();
        self.summary = None;

        self.question = Some(pick_question(&self.pool, &mut self.rng));
        self.countdown = Some(Countdown {
            started: now,
            target: CountdownTarget::Round,
        });
        self.phase = FastPhase::Countdown;
    }

    /// Clock callback. Phases are checked before acting; ticks that arrive
    /// after a transition already happened are no-ops.
    pub fn tick(&mut self, store: &mut SessionStore, now: Instant) -> Result<()> {
        match self.phase {
            FastPhase::Countdown => {
                if let Some(value) = self.countdown_value(now)
                    && value < 0
                {
                    let target = self.countdown.take().map(|c| c.target);
                    match target {
                        Some(CountdownTarget::Round) => {
                            self.deadline = Some(now + Duration::from_secs(ROUND_SECS));
                            self.phase = FastPhase::Playing;
                        }
                        Some(CountdownTarget::Drill) => {
                            self.deadline = Some(now + Duration::from_secs(DRILL_SECS));
                            self.phase = FastPhase::MissDrill;
                        }
                        None => {}
                    }
                }
            }
            FastPhase::Playing => {
                if self.deadline.is_some_and(|d| now >= d) {
                    self.end_round(store)?;
                    return Ok(());
                }
                if self.flash.as_ref().is_some_and(|f| now >= f.until) {
                    self.flash = None;
                    self.question = Some(pick_question(&self.pool, &mut self.rng));
                }
            }
            FastPhase::MissDrill => {
                if self.deadline.is_some_and(|d| now >= d) {
                    self.phase = FastPhase::DrillEnd;
                    return Ok(());
                }
                // The drill re-asks the same question after its flash.
                if self.flash.as_ref().is_some_and(|f| now >= f.until) {
                    self.flash = None;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn push_digit(&mut self, digit: char) {
        let accepting = matches!(self.phase, FastPhase::Playing | FastPhase::MissDrill);
        if accepting
            && self.flash.is_none()
            && digit.is_ascii_digit()
            && self.answer.len() < ANSWER_BUFFER_CAP
        {
            self.answer.push(digit);
        }
    }

    pub fn backspace(&mut self) {
        if self.flash.is_none() {
            self.answer.pop();
        }
    }

    /// Evaluate the entered answer. No-ops while the flash window is open or
    /// when there is nothing to answer.
    pub fn submit(&mut self, store: &mut SessionStore, now: Instant) -> Result<Option<AnswerOutcome>> {
        if self.flash.is_some() || self.answer.is_empty() {
            return Ok(None);
        }
        let Ok(entered) = self.answer.parse::<u32>() else {
            self.answer.clear();
            return Ok(None);
        };
        self.answer.clear();

        match self.phase {
            FastPhase::Playing => Ok(Some(self.answer_round(store, entered, now)?)),
            FastPhase::MissDrill => Ok(self.answer_drill(entered, now)),
            _ => Ok(None),
        }
    }

    fn answer_round(
        &mut self,
        store: &mut SessionStore,
        entered: u32,
        now: Instant,
    ) -> Result<AnswerOutcome> {
        let Some(question) = self.question.clone() else {
            return Ok(AnswerOutcome::Wrong);
        };
        self.total_answered += 1;

        if entered == question.answer {
            self.score += 1;
            self.correct_count += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.pool = adjust_weights(&self.pool, question.key(), true);
            self.question = Some(pick_question(&self.pool, &mut self.rng));
            // Deadline may have passed between ticks; close the round now
            // rather than hand out one more question.
            if self.deadline.is_some_and(|d| now >= d) {
                self.end_round(store)?;
            }
            Ok(AnswerOutcome::Correct)
        } else {
            self.streak = 0;
            self.misses.push(Miss {
                question: question.clone(),
                wrong_answer: entered,
            });
            self.pool = adjust_weights(&self.pool, question.key(), false);
            self.flash = Some(WrongFlash {
                text: question.text.clone(),
                answer: question.answer,
                until: now + Duration::from_millis(WRONG_FLASH_MS),
            });
            Ok(AnswerOutcome::Wrong)
        }
    }

    fn answer_drill(&mut self, entered: u32, now: Instant) -> Option<AnswerOutcome> {
        let question = self.drill_questions.get(self.drill_index)?.clone();

        if entered == question.answer {
            self.drill_corrected += 1;
            self.drill_index += 1;
            if self.drill_index >= self.drill_questions.len() {
                self.phase = FastPhase::DrillEnd;
            }
            Some(AnswerOutcome::Correct)
        } else {
            self.flash = Some(WrongFlash {
                text: question.text.clone(),
                answer: question.answer,
                until: now + Duration::from_millis(WRONG_FLASH_MS),
            });
            Some(AnswerOutcome::Wrong)
        }
    }

    fn end_round(&mut self, store: &mut SessionStore) -> Result<()> {
        let tokens_earned = self.score / 3;

        let mut mult = store.data().multiplication.clone();
        let previous_best = match self.mode {
            RoundMode::Single { table } => mult.best_scores.single.get(&table).copied().unwrap_or(0),
            RoundMode::Mixed => mult.best_scores.mixed,
            RoundMode::Boss => mult.best_scores.boss,
        };
        let is_new_best = self.score > previous_best;
        if is_new_best {
            match self.mode {
                RoundMode::Single { table } => {
                    mult.best_scores.single.insert(table, self.score);
                }
                RoundMode::Mixed => mult.best_scores.mixed = self.score,
                RoundMode::Boss => mult.best_scores.boss = self.score,
            }
        }

        let timestamp = Utc::now();
        mult.push_misses(self.misses.iter().map(|miss| MissRecord {
            fact: miss.question.key(),
            wrong_answer: miss.wrong_answer,
            timestamp,
        }));

        store.finish_round(tokens_earned, mult)?;

        self.summary = Some(RoundSummary {
            score: self.score,
            total_answered: self.total_answered,
            correct_count: self.correct_count,
            best_streak: self.best_streak,
            tokens_earned,
            is_new_best,
            miss_count: self.misses.len(),
        });
        self.flash = None;
        self.answer.clear();
        self.deadline = None;
        self.phase = FastPhase::RoundEnd;
        Ok(())
    }

    /// Leave the round summary: into a miss drill when the round had misses,
    /// otherwise back to mode selection.
    pub fn continue_after_round(&mut self, now: Instant) {
        if self.phase != FastPhase::RoundEnd {
            return;
        }
        if self.misses.is_empty() {
            self.phase = FastPhase::ModeSelect;
            return;
        }
        let questions: Vec<Question> = self.misses.iter().map(|m| m.question.clone()).collect();
        self.drill_questions = miss_drill_questions(&questions, DRILL_QUESTION_CAP);
        self.drill_index = 0;
        self.drill_corrected = 0;
        self.flash = None;
        self.answer.clear();
        self.countdown = Some(Countdown {
            started: now,
            target: CountdownTarget::Drill,
        });
        self.phase = FastPhase::Countdown;
    }

    pub fn continue_after_drill(&mut self) {
        if self.phase == FastPhase::DrillEnd {
            self.phase = FastPhase::ModeSelect;
        }
    }
}
