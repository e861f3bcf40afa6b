use crate::store::schema::MathSection;

/// Difficulty descriptions steer the model toward the right number ranges for
/// each level. Indexed by level - 1.
fn level_descriptions(section: MathSection) -> [&'static str; 5] {
    match section {
        MathSection::Addition => [
            "Add two numbers, each between 10 and 100 (two-digit numbers). Example: 47 + 83",
            "Add two or three numbers, each between 100 and 999 (three-digit numbers). Example: 372 + 263",
            "Add two or three numbers, each between 100 and 999 (three-digit numbers), with carrying. Example: 372 + 263 + 873",
            "Add three or four 3-digit numbers (100-999) with carries. Example: 487 + 653 + 291",
            "Add two 4-digit numbers (1000-9999). Example: 3456 + 7891",
        ],
        MathSection::Subtraction => [
            "Subtract two numbers, each between 10 and 100 (two-digit numbers). The result must be positive. Example: 83 - 47",
            "Subtract two numbers, each between 100 and 999 (three-digit numbers). The result must be positive. Example: 847 - 263",
            "Subtract two numbers, each between 100 and 999 (three-digit numbers), with borrowing. Example: 903 - 467",
            "Subtract with borrows across zeros. The first number should contain zeros (e.g. 1000, 3004). The result must be positive. Example: 1000 - 467",
            "Subtract two 4-digit numbers (1000-9999). The result must be positive. Example: 8234 - 5671",
        ],
        MathSection::Multiplication => [
            "Multiply a two-digit number (10-99) by a one-digit number (2-9). Example: 34 × 7",
            "Multiply two two-digit numbers, each between 10 and 99 (three-digit products). Example: 23 × 45",
            "Multiply a three-digit number (100-999) by a one-digit number (2-9). Example: 372 × 8",
            "Multiply two 2-digit numbers where the product is 1000 or more. Example: 47 × 38",
            "Multiply a 3-digit number (100-999) by a 2-digit number (10-99). Example: 234 × 56",
        ],
        MathSection::SkipCounting => [
            "Count by 3s, 4s, or 5s starting from a two-digit number. Give 3 numbers in the sequence, ask for the 4th. Example: 12, 15, 18, ?",
            "Count by 6s, 7s, or 8s starting from a two-digit number. Give 3 numbers in the sequence, ask for the 4th. Example: 24, 31, 38, ?",
            "Count by 9s, 11s, or 12s starting from a three-digit number. Give 3 numbers, ask for the 4th. Example: 108, 119, 130, ?",
            "Count by 13s, 15s, or 17s starting from a two-digit number. Give 3 numbers, ask for the 4th. Example: 22, 35, 48, ?",
            "Count by 25s or 50s starting from a 3-digit number. Give 3 numbers, ask for the 4th. Example: 150, 175, 200, ?",
        ],
        MathSection::AreaPerimeter => [
            "Area or perimeter of a rectangle with whole-number sides up to 10. Example: a 6 by 4 rectangle",
            "Area or perimeter of a rectangle or square with sides up to 15. Example: a square with side 9",
            "Perimeter of a triangle, or area of a rectangle with sides up to 20. Example: sides 7, 9, 12",
            "Area of an L-shape made of two rectangles with sides up to 12. Example: 8x4 joined with 4x3",
            "Mixed area and perimeter with sides up to 25, including L-shapes. Example: a 14 by 23 rectangle",
        ],
    }
}

pub fn build_problem_prompt(section: MathSection, level: u8) -> String {
    let idx = level.clamp(1, 5) as usize - 1;
    let description = level_descriptions(section)[idx];

    [
        format!("Generate a {} math problem.", section.as_str()),
        format!("Difficulty: {description}"),
        "IMPORTANT: Generate a UNIQUE problem with RANDOM numbers. Do NOT repeat the example. Use different numbers every time.".to_string(),
        "Theme: arctic penguins (brief, fun context).".to_string(),
        "Respond ONLY with JSON: { \"question\": \"<equation> = ?\", \"answer\": <number>, \"hint\": \"<short hint>\" }".to_string(),
        "The question should show the math equation clearly (e.g. \"372 + 263 = ?\").".to_string(),
    ]
    .join("\n")
}

pub fn build_explanation_prompt(question: &str, correct_answer: i64, wrong_answer: i64) -> String {
    [
        format!("A student was asked: \"{question}\""),
        format!("The correct answer is {correct_answer}, but they answered {wrong_answer}."),
        "Provide a step-by-step explanation suitable for a 2nd grader.".to_string(),
        "Be encouraging and supportive.".to_string(),
        "Respond with JSON in this format: { \"steps\": string[], \"encouragement\": string }".to_string(),
    ]
    .join("\n")
}
