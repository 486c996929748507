use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub story: String, // narrative shown in story mode
    pub difficulty: Difficulty,
    pub topic: String,
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            id: "1".to_string(),
            question: "What happens when plants perform photosynthesis?".to_string(),
            options: vec![
                "They consume oxygen and produce carbon dioxide".to_string(),
                "They consume carbon dioxide and produce oxygen".to_string(),
                "They consume water and produce sugar".to_string(),
                "They consume light and produce chlorophyll".to_string(),
            ],
            correct_answer: 1,
            explanation: "During photosynthesis, plants use carbon dioxide from the air and water from their roots, combined with sunlight, to produce glucose (sugar) and release oxygen as a byproduct.".to_string(),
            story: "Imagine a tiny green factory inside every leaf. The workers (chlorophyll) capture sunlight like solar panels. They take in CO₂ through tiny doors (stomata) and water through underground pipes (roots). In the factory, they combine these ingredients to make sugar for food and release fresh oxygen for us to breathe. It's like a magical recipe: Light + CO₂ + Water = Sugar + Oxygen!".to_string(),
            difficulty: Difficulty::Medium,
            topic: "Biology".to_string(),
        },
        Question {
            id: "2".to_string(),
            question: "Which mathematical operation should be performed first in the expression: 3 + 4 × 2?".to_string(),
            options: vec![
                "Addition: 3 + 4 = 7, then 7 × 2 = 14".to_string(),
                "Multiplication: 4 × 2 = 8, then 3 + 8 = 11".to_string(),
                "Left to right: 3 + 4 = 7, then 7 × 2 = 14".to_string(),
                "It doesn't matter, both give the same result".to_string(),
            ],
            correct_answer: 1,
            explanation: "According to the order of operations (PEMDAS/BODMAS), multiplication comes before addition. So we calculate 4 × 2 = 8 first, then add 3 to get 11.".to_string(),
            story: "Picture a busy kitchen where chefs must follow a strict order to create the perfect dish. The head chef (Parentheses) goes first, then the sauce expert (Exponents), followed by the grill masters (Multiplication and Division, working left to right), and finally the garnish team (Addition and Subtraction, also left to right). In our math kitchen, multiplication must happen before addition, or our 'equation dish' won't turn out right.".to_string(),
            difficulty: Difficulty::Easy,
            topic: "Mathematics".to_string(),
        },
        Question {
            id: "3".to_string(),
            question: "What was a major cause of World War I?".to_string(),
            options: vec![
                "The invention of the airplane".to_string(),
                "The assassination of Archduke Franz Ferdinand".to_string(),
                "The discovery of oil in the Middle East".to_string(),
                "The Russian Revolution".to_string(),
            ],
            correct_answer: 1,
            explanation: "The assassination of Archduke Franz Ferdinand of Austria-Hungary in Sarajevo on June 28, 1914, was the immediate trigger that led to the outbreak of World War I due to the complex alliance system in Europe.".to_string(),
            story: "Imagine Europe in 1914 as a powder keg, with nations bound by secret alliances like a complex web. When a young Serbian nationalist shot Archduke Franz Ferdinand in Sarajevo, it was like dropping a lit match into this powder keg. Austria-Hungary declared war on Serbia, Russia backed Serbia, Germany backed Austria-Hungary, France backed Russia, and Britain joined to help France. A regional conflict exploded into a world war because of these intertwined promises.".to_string(),
            difficulty: Difficulty::Medium,
            topic: "History".to_string(),
        },
    ]
}
