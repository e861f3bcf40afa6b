use crate::store::schema::{CosmeticCategory, MathSection};

pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u32,
    pub category: CosmeticCategory,
    pub emoji: &'static str,
}

pub const SHOP_ITEMS: &[ShopItem] = &[
    ShopItem {
        id: "arctic-explorer-hat",
        name: "Arctic Explorer Hat",
        cost: 5,
        category: CosmeticCategory::Hat,
        emoji: "🧊",
    },
    ShopItem {
        id: "polar-bear-hat",
        name: "Polar Bear Hat",
        cost: 8,
        category: CosmeticCategory::Hat,
        emoji: "🐻‍❄️",
    },
    ShopItem {
        id: "snowflake-scarf",
        name: "Snowflake Scarf",
        cost: 4,
        category: CosmeticCategory::Scarf,
        emoji: "❄️",
    },
    ShopItem {
        id: "aurora-scarf",
        name: "Aurora Scarf",
        cost: 6,
        category: CosmeticCategory::Scarf,
        emoji: "🌈",
    },
    ShopItem {
        id: "northern-lights",
        name: "Northern Lights",
        cost: 10,
        category: CosmeticCategory::Background,
        emoji: "🌌",
    },
    ShopItem {
        id: "snowy-mountain",
        name: "Snowy Mountain",
        cost: 7,
        category: CosmeticCategory::Background,
        emoji: "🏔️",
    },
];

pub fn shop_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

pub struct SectionInfo {
    pub id: MathSection,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub const SECTIONS: &[SectionInfo] = &[
    SectionInfo {
        id: MathSection::Addition,
        name: "Addition",
        emoji: "➕",
        description: "Practice adding numbers together",
    },
    SectionInfo {
        id: MathSection::Subtraction,
        name: "Subtraction",
        emoji: "➖",
        description: "Practice taking numbers away",
    },
    SectionInfo {
        id: MathSection::Multiplication,
        name: "Multiplication",
        emoji: "✖️",
        description: "Practice multiplying numbers",
    },
    SectionInfo {
        id: MathSection::SkipCounting,
        name: "Skip Counting",
        emoji: "🔢",
        description: "Practice counting by 2s, 5s, and 10s",
    },
    SectionInfo {
        id: MathSection::AreaPerimeter,
        name: "Area & Perimeter",
        emoji: "📐",
        description: "Measure shapes on the ice",
    },
];

/// Tokens granted for a correct answer in the quiz mode.
pub const REWARD_FIRST_TRY: u32 = 3;
pub const REWARD_RETRY: u32 = 1;

pub struct ArcticAnimal {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub fun_facts: &'static [&'static str],
    pub habitat: &'static str,
    pub diet: &'static str,
}

pub const ARCTIC_ANIMALS: &[ArcticAnimal] = &[
    ArcticAnimal {
        id: "emperor-penguin",
        name: "Emperor Penguin",
        emoji: "🐧",
        fun_facts: &[
            "Emperor penguins are the tallest of all penguins, standing nearly 4 feet tall!",
            "They can hold their breath for over 20 minutes while diving.",
            "Male penguins keep eggs warm on their feet for 2 months without eating.",
        ],
        habitat: "Antarctica",
        diet: "Fish, squid, and krill",
    },
    ArcticAnimal {
        id: "polar-bear",
        name: "Polar Bear",
        emoji: "🐻‍❄️",
        fun_facts: &[
            "Polar bear fur is not white — it is actually transparent and hollow!",
            "Their skin underneath is black to absorb heat from the sun.",
            "They can swim for days at a time without resting.",
        ],
        habitat: "Arctic sea ice",
        diet: "Seals and fish",
    },
    ArcticAnimal {
        id: "arctic-fox",
        name: "Arctic Fox",
        emoji: "🦊",
        fun_facts: &[
            "Arctic foxes change coat color with the seasons, white in winter and brown in summer.",
            "Their thick tails double as blankets when they curl up to sleep.",
            "They can hear lemmings moving under deep snow.",
        ],
        habitat: "Arctic tundra",
        diet: "Lemmings, birds, and eggs",
    },
    ArcticAnimal {
        id: "narwhal",
        name: "Narwhal",
        emoji: "🐋",
        fun_facts: &[
            "A narwhal's tusk is really a tooth that can grow 10 feet long!",
            "They are called the unicorns of the sea.",
            "Narwhals can dive more than a mile deep.",
        ],
        habitat: "Arctic ocean",
        diet: "Fish and shrimp",
    },
];
