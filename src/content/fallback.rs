use std::collections::BTreeMap;

use crate::content::{Explanation, GeometryQuestion, Problem, ShapeData, ShapeKind};
use crate::store::schema::MathSection;

/// Served whenever the problem source fails; a learner always gets a problem.
pub fn fallback_problem(section: MathSection) -> Problem {
    match section {
        MathSection::Addition => Problem {
            question: "47 + 83 = ?".to_string(),
            answer: 130,
            hint: Some("Add the ones first, then the tens!".to_string()),
            shape: None,
        },
        MathSection::Subtraction => Problem {
            question: "83 - 47 = ?".to_string(),
            answer: 36,
            hint: Some("Subtract the ones first, then the tens!".to_string()),
            shape: None,
        },
        MathSection::Multiplication => Problem {
            question: "34 × 7 = ?".to_string(),
            answer: 238,
            hint: Some("Break it into 30×7 and 4×7!".to_string()),
            shape: None,
        },
        MathSection::SkipCounting => Problem {
            question: "12, 15, 18, ?".to_string(),
            answer: 21,
            hint: Some("Count by 3s!".to_string()),
            shape: None,
        },
        MathSection::AreaPerimeter => Problem {
            question: "A penguin's ice raft is 8 steps long and 5 steps wide. What is its area?"
                .to_string(),
            answer: 40,
            hint: Some("Area = length × width!".to_string()),
            shape: Some(ShapeData {
                kind: ShapeKind::Rectangle,
                dimensions: BTreeMap::from([("length".to_string(), 8), ("width".to_string(), 5)]),
                question_type: GeometryQuestion::Area,
            }),
        },
    }
}

pub fn fallback_explanation() -> Explanation {
    Explanation {
        steps: vec!["Let's try again!".to_string()],
        encouragement: "You can do it!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_a_fallback() {
        for section in MathSection::ALL {
            let problem = fallback_problem(section);
            assert!(!problem.question.is_empty());
            assert!(problem.hint.is_some());
        }
    }

    #[test]
    fn fallback_answers_are_consistent() {
        assert_eq!(fallback_problem(MathSection::Addition).answer, 130);
        assert_eq!(fallback_problem(MathSection::Subtraction).answer, 36);
        assert_eq!(fallback_problem(MathSection::Multiplication).answer, 238);
        assert_eq!(fallback_problem(MathSection::SkipCounting).answer, 21);
        assert_eq!(fallback_problem(MathSection::AreaPerimeter).answer, 40);
    }

    #[test]
    fn fallback_explanation_is_encouraging() {
        let explanation = fallback_explanation();
        assert_eq!(explanation.steps, vec!["Let's try again!"]);
        assert_eq!(explanation.encouragement, "You can do it!");
    }
}
