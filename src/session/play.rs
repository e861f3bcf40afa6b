use anyhow::Result;

use crate::catalog::{REWARD_FIRST_TRY, REWARD_RETRY};
use crate::content::client::ContentError;
use crate::content::fallback::{fallback_explanation, fallback_problem};
use crate::content::{ExplainRequest, Explanation, Problem};
use crate::engine::difficulty::update_difficulty;
use crate::store::schema::MathSection;
use crate::store::session_store::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayPhase {
    Loading,
    Answering,
    Correct,
    FirstWrong,
    Wrong,
}

/// Issues background fetches for the play session. Results are delivered back
/// through `PlaySession::on_problem_ready` / `on_explanation_ready` tagged
/// with the sequence number the request was issued under.
pub trait ProblemFetcher {
    fn fetch_problem(&mut self, seq: u64, section: MathSection, level: u8);
    fn fetch_explanation(&mut self, seq: u64, request: ExplainRequest);
}

/// The dedicated pending-next-problem slot. Holding the in-flight seq here
/// (instead of re-deriving it from render state) is what keeps a stale
/// pre-fetch from overwriting a newer fetch.
enum Prefetch {
    InFlight(u64),
    Ready(Problem),
}

const ANSWER_BUFFER_CAP: usize = 9;

/// Turn-by-turn quiz flow for one screen visit. Transient; all durable effects
/// go through the session store at the moment they happen.
pub struct PlaySession {
    section: MathSection,
    phase: PlayPhase,
    problem: Option<Problem>,
    answer: String,
    streak: u32,
    is_retry: bool,
    explanation: Option<Explanation>,
    reward_tokens: u32,
    next_seq: u64,
    awaiting: Option<u64>,
    prefetch: Option<Prefetch>,
    explain_seq: Option<u64>,
}

impl PlaySession {
    pub fn begin<F: ProblemFetcher>(section: MathSection, level: u8, fetcher: &mut F) -> Self {
        let mut session = Self {
            section,
            phase: PlayPhase::Loading,
            problem: None,
            answer: String::new(),
            streak: 0,
            is_retry: false,
            explanation: None,
            reward_tokens: 0,
            next_seq: 0,
            awaiting: None,
            prefetch: None,
            explain_seq: None,
        };
        let seq = session.issue_problem_fetch(level, fetcher);
        session.awaiting = Some(seq);
        session
    }

    pub fn section(&self) -> MathSection {
        self.section
    }

    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_retry(&self) -> bool {
        self.is_retry
    }

    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }

    pub fn reward_tokens(&self) -> u32 {
        self.reward_tokens
    }

    pub fn push_digit(&mut self, digit: char) {
        if self.phase == PlayPhase::Answering
            && digit.is_ascii_digit()
            && self.answer.len() < ANSWER_BUFFER_CAP
        {
            self.answer.push(digit);
        }
    }

    pub fn backspace(&mut self) {
        if self.phase == PlayPhase::Answering {
            self.answer.pop();
        }
    }

    /// Evaluate the entered answer. Empty input is a guard no-op, not a
    /// transition.
    pub fn submit<F: ProblemFetcher>(
        &mut self,
        store: &mut SessionStore,
        fetcher: &mut F,
    ) -> Result<()> {
        if self.phase != PlayPhase::Answering || self.answer.is_empty() {
            return Ok(());
        }
        let Some(problem) = self.problem.clone() else {
            return Ok(());
        };
        let Ok(entered) = self.answer.parse::<i64>() else {
            self.answer.clear();
            return Ok(());
        };

        if entered == problem.answer {
            let reward = if self.is_retry {
                REWARD_RETRY
            } else {
                REWARD_FIRST_TRY
            };
            self.reward_tokens = reward;
            store.add_tokens(reward)?;
            self.streak += 1;

            let next = update_difficulty(store.data().sections.get(self.section), true);
            store.set_section(self.section, next)?;

            self.phase = PlayPhase::Correct;
            // Pre-fetch at the possibly-promoted level so dismissing the
            // celebration is instant when the response has already landed.
            let seq = self.issue_problem_fetch(next.level, fetcher);
            self.prefetch = Some(Prefetch::InFlight(seq));
        } else if !self.is_retry {
            // First miss on this problem: a nudge to retry, nothing fetched.
            self.streak = 0;
            let next = update_difficulty(store.data().sections.get(self.section), false);
            store.set_section(self.section, next)?;
            self.phase = PlayPhase::FirstWrong;
        } else {
            // Second miss: show the full explanation flow. The difficulty hit
            // was already taken on the first miss of this problem.
            self.phase = PlayPhase::Wrong;

            let seq = self.alloc_seq();
            self.explain_seq = Some(seq);
            fetcher.fetch_explanation(
                seq,
                ExplainRequest {
                    question: problem.question.clone(),
                    correct_answer: problem.answer,
                    wrong_answer: entered,
                },
            );

            let level = store.data().sections.get(self.section).level;
            let prefetch_seq = self.issue_problem_fetch(level, fetcher);
            self.prefetch = Some(Prefetch::InFlight(prefetch_seq));
        }
        Ok(())
    }

    /// "Try again" from the first-wrong nudge: same problem, retry flag set.
    pub fn try_again(&mut self) {
        if self.phase == PlayPhase::FirstWrong {
            self.is_retry = true;
            self.enter_answering();
        }
    }

    /// Dismiss the celebration or move on from the explanation. Uses the
    /// pre-fetched problem when it already resolved; adopts the in-flight
    /// pre-fetch without issuing a second request; fetches fresh only when no
    /// pre-fetch exists.
    pub fn advance<F: ProblemFetcher>(&mut self, store: &SessionStore, fetcher: &mut F) {
        if self.phase != PlayPhase::Correct && self.phase != PlayPhase::Wrong {
            return;
        }
        self.is_retry = false;
        match self.prefetch.take() {
            Some(Prefetch::Ready(problem)) => {
                self.problem = Some(problem);
                self.enter_answering();
            }
            Some(Prefetch::InFlight(seq)) => {
                self.awaiting = Some(seq);
                self.phase = PlayPhase::Loading;
                self.explanation = None;
                self.answer.clear();
            }
            None => {
                let level = store.data().sections.get(self.section).level;
                let seq = self.issue_problem_fetch(level, fetcher);
                self.awaiting = Some(seq);
                self.phase = PlayPhase::Loading;
                self.explanation = None;
                self.answer.clear();
            }
        }
    }

    /// Problem fetch resolved. Failures collapse to the per-section fallback;
    /// responses for sequence numbers no slot is waiting on are dropped.
    pub fn on_problem_ready(&mut self, seq: u64, result: Result<Problem, ContentError>) {
        let problem = result.unwrap_or_else(|_| fallback_problem(self.section));
        if self.awaiting == Some(seq) {
            self.awaiting = None;
            self.problem = Some(problem);
            self.enter_answering();
        } else if matches!(self.prefetch, Some(Prefetch::InFlight(s)) if s == seq) {
            self.prefetch = Some(Prefetch::Ready(problem));
        }
    }

    pub fn on_explanation_ready(&mut self, seq: u64, result: Result<Explanation, ContentError>) {
        if self.explain_seq == Some(seq) {
            self.explain_seq = None;
            self.explanation = Some(result.unwrap_or_else(|_| fallback_explanation()));
        }
    }

    fn enter_answering(&mut self) {
        self.answer.clear();
        self.explanation = None;
        self.explain_seq = None;
        self.phase = PlayPhase::Answering;
    }

    fn alloc_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn issue_problem_fetch<F: ProblemFetcher>(&mut self, level: u8, fetcher: &mut F) -> u64 {
        let seq = self.alloc_seq();
        fetcher.fetch_problem(seq, self.section, level);
        seq
    }
}
