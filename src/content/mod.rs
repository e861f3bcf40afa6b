pub mod client;
pub mod fallback;
pub mod prompts;
pub mod tts;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One generated problem. `shape` only accompanies area-perimeter questions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub question: String,
    pub answer: i64,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub shape: Option<ShapeData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub dimensions: BTreeMap<String, u32>,
    #[serde(rename = "questionType")]
    pub question_type: GeometryQuestion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    Square,
    Triangle,
    LShape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryQuestion {
    Area,
    Perimeter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub steps: Vec<String>,
    pub encouragement: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplainRequest {
    pub question: String,
    pub correct_answer: i64,
    pub wrong_answer: i64,
}
