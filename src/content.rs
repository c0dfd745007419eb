//! Static greeting content: the quiz deck and the message copy.
//!
//! Everything here is read-only input to the journey. The deck ships
//! with a built-in question set and can be replaced from a JSON file
//! (an array of question records) for a personalized run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read deck: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse deck: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("deck has no questions")]
    Empty,

    #[error("question {index}: correct answer {correct} is out of range")]
    AnswerOutOfRange { index: usize, correct: usize },
}

// ============================================================================
// QUESTIONS
// ============================================================================

/// One quiz question record. Exactly four options; `correct` indexes
/// into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: [String; 4],
    pub correct: usize,
    pub explanation: String,
    /// Decorative marker shown beside the prompt (language flag).
    #[serde(default = "default_glyph")]
    pub glyph: String,
}

fn default_glyph() -> String {
    "✨".to_string()
}

/// Ordered, read-only question sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizDeck {
    questions: Vec<Question>,
}

impl QuizDeck {
    /// The built-in five-question deck.
    pub fn builtin() -> Self {
        let q = |prompt: &str, options: [&str; 4], correct: usize, explanation: &str, glyph: &str| {
            Question {
                prompt: prompt.to_string(),
                options: options.map(str::to_string),
                correct,
                explanation: explanation.to_string(),
                glyph: glyph.to_string(),
            }
        };

        QuizDeck {
            questions: vec![
                q(
                    "Which of the following English sentences uses the subjunctive mood correctly?",
                    [
                        "If I was you, I would go.",
                        "If I were you, I would go.",
                        "If I am you, I would go.",
                        "If I be you, I would go.",
                    ],
                    1,
                    "The correct use of the English subjunctive mood is 'If I were you' when expressing hypothetical situations.",
                    "🇬🇧",
                ),
                q(
                    "What is the German equivalent of the English idiom \"to beat around the bush\"?",
                    [
                        "Um den heißen Brei herumreden",
                        "Die Katze im Sack kaufen",
                        "Den Nagel auf den Kopf treffen",
                        "Jemandem Honig ums Maul schmieren",
                    ],
                    0,
                    "'Um den heißen Brei herumreden' literally means 'to talk around the hot porridge', and is used just like 'beat around the bush'.",
                    "🇩🇪",
                ),
                q(
                    "What does the English expression \"to take something with a grain of salt\" mean?",
                    [
                        "To believe something completely",
                        "To consider something lightly or skeptically",
                        "To cook something with caution",
                        "To season something carefully",
                    ],
                    1,
                    "To 'take something with a grain of salt' means to be skeptical about the truth of a statement.",
                    "🇬🇧",
                ),
                q(
                    "Which German phrase best conveys the idea of feeling awkward or out of place?",
                    [
                        "Sich wie ein Fisch im Wasser fühlen",
                        "Sich wie ein Elefant im Porzellanladen fühlen",
                        "Sich den Kopf zerbrechen",
                        "Da steppt der Bär",
                    ],
                    1,
                    "'Sich wie ein Elefant im Porzellanladen fühlen' means feeling clumsy or out of place, like a bull in a china shop.",
                    "🇩🇪",
                ),
                q(
                    "What is the best English synonym for the word \"ubiquitous\"?",
                    [
                        "Rare",
                        "Present everywhere",
                        "Unique",
                        "Obsolete",
                    ],
                    1,
                    "'Ubiquitous' means something that is present, appearing, or found everywhere.",
                    "🇬🇧",
                ),
            ],
        }
    }

    /// Load a deck from a JSON file and validate it.
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let data = std::fs::read_to_string(path)?;
        let deck: QuizDeck = serde_json::from_str(&data)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.questions.is_empty() {
            return Err(ContentError::Empty);
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.correct >= question.options.len() {
                return Err(ContentError::AnswerOutOfRange {
                    index,
                    correct: question.correct,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

// ============================================================================
// GREETING COPY
// ============================================================================

/// Headline typed out on the intro section.
pub fn headline(recipient: Option<&str>) -> String {
    match recipient {
        Some(name) => format!("🎉 Happy Birthday, {name}! 💖"),
        None => "🎉 Happy Birthday, Love! 💖".to_string(),
    }
}

pub const INTRO_SUBTITLE: &str = "Get ready for an interactive journey filled with surprises, \
games, and lots of love! 🎁✨";

pub const QUIZ_TITLE: &str = "🌍 Language Challenge 💫";

pub const QUIZ_COMPLETE_TITLE: &str = "Amazing! You're a Language Master!";

pub const GIFT_TITLE: &str = "🎁 Your Special Surprise! 🎁";

pub const GIFT_INSTRUCTION: &str = "You've proven your amazing language skills! \
Now it's time for your special gift...";

pub const VIDEO_TITLE: &str = "🎬 Special Video 🎭";

pub const VIDEO_CAPTION: &str = "A special message just for you! 💖 \
Watch and feel all the love I have for you.";

pub const FINAL_TITLE: &str = "💖 Thank You for Being You 💖";

/// Messages cycled by the final section's typewriter loop.
pub const FINAL_MESSAGES: [&str; 4] = [
    "Thank You for Being You ❤️",
    "Дякую тобі за те, що ти є 💙💛",
    "Danke, dass du du bist 🇩🇪",
    "I love you more than words can say 💕",
];

pub const FINAL_BODY: [&str; 2] = [
    "You're the light of my life, my greatest joy, and my sweetest dream come true. \
Every day with you is a celebration, and today is extra special because it's YOUR day!",
    "I hope this little journey brought a smile to your beautiful face. \
Your linguistic skills are incredible, just like everything else about you!",
];

pub const FINAL_GREETINGS: [&str; 3] = [
    "🇺🇦 З Днем народження, кохана! 💙💛",
    "🇩🇪 Alles Gute zum Geburtstag, meine Liebe! 🎂",
    "🇬🇧 Happy Birthday, My Love! 🎉",
];

pub const SIGNATURE: [&str; 2] = ["Always yours,", "Your Loving Partner 💕"];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_deck_has_five_valid_questions() {
        let deck = QuizDeck::builtin();
        assert_eq!(deck.len(), 5);
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn builtin_answers_are_in_range() {
        let deck = QuizDeck::builtin();
        for i in 0..deck.len() {
            let q = deck.get(i).unwrap();
            assert!(q.correct < 4);
        }
    }

    #[test]
    fn deck_round_trips_through_json() {
        let deck = QuizDeck::builtin();
        let json = serde_json::to_string(&deck).unwrap();
        let back: QuizDeck = serde_json::from_str(&json).unwrap();
        assert_eq!(deck, back);
    }

    #[test]
    fn load_deck_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"[{
            "prompt": "Two plus two?",
            "options": ["3", "4", "5", "22"],
            "correct": 1,
            "explanation": "Basic arithmetic."
        }]"#;
        file.write_all(json.as_bytes()).unwrap();

        let deck = QuizDeck::from_path(file.path()).unwrap();
        assert_eq!(deck.len(), 1);
        // Glyph falls back to the default marker.
        assert_eq!(deck.get(0).unwrap().glyph, "✨");
    }

    #[test]
    fn empty_deck_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        assert!(matches!(
            QuizDeck::from_path(file.path()),
            Err(ContentError::Empty)
        ));
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"[{
            "prompt": "Broken?",
            "options": ["a", "b", "c", "d"],
            "correct": 9,
            "explanation": "nope"
        }]"#;
        file.write_all(json.as_bytes()).unwrap();
        assert!(matches!(
            QuizDeck::from_path(file.path()),
            Err(ContentError::AnswerOutOfRange { index: 0, correct: 9 })
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = QuizDeck::from_path(Path::new("/nonexistent/deck.json")).unwrap_err();
        assert!(matches!(err, ContentError::Io(_)));
    }

    #[test]
    fn headline_personalizes() {
        assert!(headline(Some("Ana")).contains("Ana"));
        assert!(headline(None).contains("Love"));
    }
}
