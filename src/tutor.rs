use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TutorPersonality {
    #[default]
    Coach,
    Philosopher,
    Comedian,
    Drill,
}

impl TutorPersonality {
    pub const ALL: [TutorPersonality; 4] = [
        TutorPersonality::Coach,
        TutorPersonality::Philosopher,
        TutorPersonality::Comedian,
        TutorPersonality::Drill,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TutorPersonality::Coach => "Coach",
            TutorPersonality::Philosopher => "Philosopher",
            TutorPersonality::Comedian => "Comedian",
            TutorPersonality::Drill => "Drill Sergeant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TutorPersonality::Coach => "Motivational and encouraging, focuses on building confidence",
            TutorPersonality::Philosopher => "Deep thinker who connects concepts to bigger ideas",
            TutorPersonality::Comedian => "Uses humor and fun examples to make learning memorable",
            TutorPersonality::Drill => "Direct and disciplined approach for rapid skill building",
        }
    }

    pub fn responses(&self) -> &'static [&'static str] {
        match self {
            TutorPersonality::Coach => &[
                "Great question! You're showing real curiosity, and that's the foundation of all learning. Let me break this down in a way that builds your confidence...",
                "I love your enthusiasm! You're on the right track. Here's how we can tackle this step by step...",
                "Fantastic! You're asking exactly the right questions. Let's work through this together and celebrate each victory along the way!",
            ],
            TutorPersonality::Philosopher => &[
                "Ah, this touches on something profound about the nature of knowledge itself. Consider this: when we truly understand something, we see its connections to the greater tapestry of understanding...",
                "Your question reveals a deeper inquiry into the very essence of this subject. Socrates once said 'I know that I know nothing' - let us explore this unknown together...",
                "This is not merely a question about facts, but about the fundamental patterns that govern our reality. Let me illuminate the deeper principles at work here...",
            ],
            TutorPersonality::Comedian => &[
                "Ha! That's like asking why pizza is round but comes in a square box and we eat it in triangles - life's full of mysteries! But seriously, let me explain this in a way that'll stick...",
                "You know what? This reminds me of that joke about the mathematician, the physicist, and the engineer... But in all seriousness, here's what's really going on...",
                "If this concept were a sitcom character, it would definitely be the quirky neighbor everyone loves! Let me show you why it's actually pretty amusing...",
            ],
            TutorPersonality::Drill => &[
                "Listen up! No time for dawdling - we're going to master this concept and we're going to do it RIGHT NOW. Here's exactly what you need to know...",
                "Drop and give me your full attention! This is mission-critical information. I'm going to drill this into your head until it's second nature...",
                "Soldier! You came here to learn, so let's get to work. No excuses, no confusion - just pure, focused knowledge acquisition. Ready? Here we go...",
            ],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Tutor,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConversationMessage {
    pub role: Role,
    pub message: String,
}

pub struct TutorSession<R: Rng> {
    active: TutorPersonality,
    conversation: Vec<ConversationMessage>,
    rng: R,
}

impl<R: Rng> TutorSession<R> {
    pub fn new(rng: R) -> Self {
        Self {
            active: TutorPersonality::default(),
            conversation: Vec::new(),
            rng,
        }
    }

    pub fn active(&self) -> TutorPersonality {
        self.active
    }

    /// Switching persona keeps the conversation so far.
    pub fn set_active(&mut self, personality: TutorPersonality) {
        self.active = personality;
    }

    pub fn conversation(&self) -> &[ConversationMessage] {
        &self.conversation
    }

    /// Appends the question and the active tutor's reply. Blank questions are ignored.
    pub fn ask(&mut self, question: &str) -> Option<&str> {
        if question.trim().is_empty() {
            return None;
        }

        let reply = self
            .active
            .responses()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();

        let preview: String = question.chars().take(50).collect();
        info!("💬 {} answering: {}", self.active.name(), preview);

        self.conversation.push(ConversationMessage {
            role: Role::User,
            message: question.to_string(),
        });
        self.conversation.push(ConversationMessage {
            role: Role::Tutor,
            message: reply.to_string(),
        });

        self.conversation.last().map(|m| m.message.as_str())
    }

    pub fn clear(&mut self) {
        self.conversation.clear();
    }
}
