use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::difficulty::DifficultyState;
use crate::engine::facts::MissRecord;

pub const MISS_HISTORY_CAP: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MathSection {
    Addition,
    Subtraction,
    Multiplication,
    SkipCounting,
    AreaPerimeter,
}

impl MathSection {
    pub const ALL: [MathSection; 5] = [
        MathSection::Addition,
        MathSection::Subtraction,
        MathSection::Multiplication,
        MathSection::SkipCounting,
        MathSection::AreaPerimeter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MathSection::Addition => "addition",
            MathSection::Subtraction => "subtraction",
            MathSection::Multiplication => "multiplication",
            MathSection::SkipCounting => "skip-counting",
            MathSection::AreaPerimeter => "area-perimeter",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CosmeticCategory {
    Hat,
    Scarf,
    Background,
    Accessory,
}

/// Currently worn cosmetic per slot. New slots added in later builds backfill
/// as empty on load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipped {
    #[serde(default)]
    pub hat: Option<String>,
    #[serde(default)]
    pub scarf: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub accessory: Option<String>,
}

impl Equipped {
    pub fn slot_mut(&mut self, category: CosmeticCategory) -> &mut Option<String> {
        match category {
            CosmeticCategory::Hat => &mut self.hat,
            CosmeticCategory::Scarf => &mut self.scarf,
            CosmeticCategory::Background => &mut self.background,
            CosmeticCategory::Accessory => &mut self.accessory,
        }
    }

    pub fn slot(&self, category: CosmeticCategory) -> Option<&str> {
        match category {
            CosmeticCategory::Hat => self.hat.as_deref(),
            CosmeticCategory::Scarf => self.scarf.as_deref(),
            CosmeticCategory::Background => self.background.as_deref(),
            CosmeticCategory::Accessory => self.accessory.as_deref(),
        }
    }
}

/// Per-section difficulty, one named field per section so records written
/// before a section existed still load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    #[serde(default)]
    pub addition: DifficultyState,
    #[serde(default)]
    pub subtraction: DifficultyState,
    #[serde(default)]
    pub multiplication: DifficultyState,
    #[serde(default, rename = "skip-counting")]
    pub skip_counting: DifficultyState,
    #[serde(default, rename = "area-perimeter")]
    pub area_perimeter: DifficultyState,
}

impl Sections {
    pub fn get(&self, section: MathSection) -> DifficultyState {
        match section {
            MathSection::Addition => self.addition,
            MathSection::Subtraction => self.subtraction,
            MathSection::Multiplication => self.multiplication,
            MathSection::SkipCounting => self.skip_counting,
            MathSection::AreaPerimeter => self.area_perimeter,
        }
    }

    pub fn set(&mut self, section: MathSection, state: DifficultyState) {
        match section {
            MathSection::Addition => self.addition = state,
            MathSection::Subtraction => self.subtraction = state,
            MathSection::Multiplication => self.multiplication = state,
            MathSection::SkipCounting => self.skip_counting = state,
            MathSection::AreaPerimeter => self.area_perimeter = state,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BestScores {
    /// Per-table bests for single-table rounds, keyed by table number.
    #[serde(default)]
    pub single: BTreeMap<u8, u32>,
    #[serde(default)]
    pub mixed: u32,
    #[serde(default)]
    pub boss: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MultiplicationData {
    #[serde(default)]
    pub best_scores: BestScores,
    #[serde(default)]
    pub miss_history: Vec<MissRecord>,
}

impl MultiplicationData {
    /// Append a round's misses, evicting oldest entries beyond the cap.
    pub fn push_misses(&mut self, misses: impl IntoIterator<Item = MissRecord>) {
        self.miss_history.extend(misses);
        if self.miss_history.len() > MISS_HISTORY_CAP {
            let excess = self.miss_history.len() - MISS_HISTORY_CAP;
            self.miss_history.drain(..excess);
        }
    }
}

/// The whole per-learner record. Persisted as one JSON document under a single
/// storage key; unknown-to-old-builds fields simply backfill from defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub tokens: u32,
    #[serde(default)]
    pub purchased_items: Vec<String>,
    #[serde(default)]
    pub equipped: Equipped,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub multiplication: MultiplicationData,
}
