use floe::content::client::ContentError;
use floe::content::{ExplainRequest, Explanation, Problem};
use floe::session::play::{PlayPhase, PlaySession, ProblemFetcher};
use floe::store::kv::MemoryStore;
use floe::store::schema::MathSection;
use floe::store::session_store::SessionStore;

/// Records every fetch the session issues so tests can assert on request
/// counts/levels and feed back responses in any order.
#[derive(Default)]
struct ScriptedFetcher {
    problems: Vec<(u64, MathSection, u8)>,
    explanations: Vec<(u64, ExplainRequest)>,
}

impl ProblemFetcher for ScriptedFetcher {
    fn fetch_problem(&mut self, seq: u64, section: MathSection, level: u8) {
        self.problems.push((seq, section, level));
    }

    fn fetch_explanation(&mut self, seq: u64, request: ExplainRequest) {
        self.explanations.push((seq, request));
    }
}

fn problem(answer: i64) -> Problem {
    Problem {
        question: format!("what makes {answer}?"),
        answer,
        hint: None,
        shape: None,
    }
}

fn type_answer(session: &mut PlaySession, value: i64) {
    for c in value.to_string().chars() {
        session.push_digit(c);
    }
}

/// Serve the most recent outstanding problem request with a fixed answer.
fn serve_latest(session: &mut PlaySession, fetcher: &ScriptedFetcher, answer: i64) {
    let (seq, _, _) = *fetcher.problems.last().expect("a problem request exists");
    session.on_problem_ready(seq, Ok(problem(answer)));
}

#[test]
fn five_correct_answers_promote_the_next_request_to_level_two() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    let mut fetcher = ScriptedFetcher::default();
    let mut session = PlaySession::begin(MathSection::Addition, 1, &mut fetcher);

    serve_latest(&mut session, &fetcher, 10);
    assert_eq!(fetcher.problems[0].2, 1);

    for _ in 0..5 {
        type_answer(&mut session, 10);
        session.submit(&mut store, &mut fetcher).unwrap();
        assert_eq!(session.phase(), PlayPhase::Correct);
        serve_latest(&mut session, &fetcher, 10);
        session.advance(&store, &mut fetcher);
        assert_eq!(session.phase(), PlayPhase::Answering);
    }

    // Five in a row promoted the section, so the 6th request (the pre-fetch
    // issued by the 5th correct answer) went out at level 2.
    assert_eq!(store.data().sections.addition.level, 2);
    assert_eq!(fetcher.problems.len(), 6);
    assert_eq!(fetcher.problems[5].2, 2);

    // Rewards accumulated: 5 first-try answers.
    assert_eq!(store.data().tokens, 15);
}

#[test]
fn explanation_fires_only_on_the_second_wrong_answer() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    let mut fetcher = ScriptedFetcher::default();
    let mut session = PlaySession::begin(MathSection::Multiplication, 1, &mut fetcher);
    serve_latest(&mut session, &fetcher, 42);

    type_answer(&mut session, 40);
    session.submit(&mut store, &mut fetcher).unwrap();
    assert_eq!(session.phase(), PlayPhase::FirstWrong);
    assert!(fetcher.explanations.is_empty());

    session.try_again();
    type_answer(&mut session, 41);
    session.submit(&mut store, &mut fetcher).unwrap();
    assert_eq!(session.phase(), PlayPhase::Wrong);
    assert_eq!(fetcher.explanations.len(), 1);

    let (seq, request) = &fetcher.explanations[0];
    assert_eq!(request.correct_answer, 42);
    assert_eq!(request.wrong_answer, 41);

    session.on_explanation_ready(
        *seq,
        Ok(Explanation {
            steps: vec!["count by sixes".to_string()],
            encouragement: "almost!".to_string(),
        }),
    );
    assert_eq!(session.explanation().unwrap().steps[0], "count by sixes");
}

#[test]
fn demotion_after_three_wrong_problems() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    store
        .set_section(
            MathSection::Subtraction,
            floe::engine::difficulty::DifficultyState {
                level: 3,
                consecutive_correct: 0,
                consecutive_wrong: 0,
            },
        )
        .unwrap();

    let mut fetcher = ScriptedFetcher::default();
    let mut session = PlaySession::begin(MathSection::Subtraction, 3, &mut fetcher);
    serve_latest(&mut session, &fetcher, 7);

    // Each problem takes one first-attempt difficulty hit; three problems in
    // a row missed on the first try demote the section.
    for _ in 0..3 {
        type_answer(&mut session, 1);
        session.submit(&mut store, &mut fetcher).unwrap();
        assert_eq!(session.phase(), PlayPhase::FirstWrong);
        session.try_again();
        type_answer(&mut session, 2);
        session.submit(&mut store, &mut fetcher).unwrap();
        assert_eq!(session.phase(), PlayPhase::Wrong);
        serve_latest(&mut session, &fetcher, 7);
        session.advance(&store, &mut fetcher);
        assert_eq!(session.phase(), PlayPhase::Answering);
    }

    assert_eq!(store.data().sections.subtraction.level, 2);
    assert_eq!(store.data().sections.subtraction.consecutive_wrong, 0);
}

#[test]
fn token_credit_and_difficulty_are_visible_before_the_next_transition() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    let mut fetcher = ScriptedFetcher::default();
    let mut session = PlaySession::begin(MathSection::SkipCounting, 1, &mut fetcher);
    serve_latest(&mut session, &fetcher, 15);

    type_answer(&mut session, 15);
    session.submit(&mut store, &mut fetcher).unwrap();

    // Both writes landed before the phase changed to Correct was observed.
    assert_eq!(session.phase(), PlayPhase::Correct);
    store.reload();
    assert_eq!(store.data().tokens, 3);
    assert_eq!(store.data().sections.skip_counting.consecutive_correct, 1);
}

#[test]
fn fetch_failure_never_reaches_the_learner() {
    let mut store = SessionStore::new(Box::new(MemoryStore::new()));
    let mut fetcher = ScriptedFetcher::default();
    let mut session = PlaySession::begin(MathSection::AreaPerimeter, 1, &mut fetcher);

    let (seq, _, _) = fetcher.problems[0];
    session.on_problem_ready(seq, Err(ContentError::Request("timed out".to_string())));

    // The fallback problem is answerable like any other.
    assert_eq!(session.phase(), PlayPhase::Answering);
    let answer = session.problem().unwrap().answer;
    type_answer(&mut session, answer);
    session.submit(&mut store, &mut fetcher).unwrap();
    assert_eq!(session.phase(), PlayPhase::Correct);
}
