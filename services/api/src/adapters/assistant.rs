//! services/api/src/adapters/assistant.rs
//!
//! This module contains the scripted study assistant. It implements the
//! `AssistantService` port from the `core` crate by picking a canned reply
//! from keywords in the prompt, after a fixed delay.

use async_trait::async_trait;
use std::time::Duration;
use uniclass_core::ports::{AssistantService, PortResult};

const MENU_REPLY: &str = "I'm your AI assistant for this subject. I can help you with:\n\n\
• Summarizing your notes and documents\n\
• Creating practice questions\n\
• Explaining difficult concepts\n\
• Developing personalized study plans\n\n\
What would you like help with today?";

const QUIZ_REPLY: &str = "Here are 3 practice questions based on your materials:\n\n\
1. Explain the core concepts discussed in the lecture and how they relate to the course objectives.\n\n\
2. Compare and contrast the different methodologies presented in the course materials.\n\n\
3. How would you apply these concepts to solve a real-world problem in this field?";

const PLAN_REPLY: &str = "Here's a personalized study plan for you:\n\n\
1. Review your lecture notes (2 hours)\n\
2. Complete practice problems from chapters 3-5 (3 hours)\n\
3. Create flashcards for key terms (1 hour)\n\
4. Join a study group to discuss complex topics (2 hours)\n\
5. Take a practice exam under timed conditions (1.5 hours)\n\n\
Would you like me to break this down into a daily schedule?";

const EXPLAIN_REPLY: &str = "I'd be happy to explain this topic! Based on your course materials, \
this concept involves several important principles that build upon each other.\n\n\
The key thing to understand is how these elements work together in a system. \
Think of it like building blocks where each concept supports the next.\n\n\
Would you like me to provide some examples to make this clearer?";

/// The kind of canned reply a prompt asks for. Earlier variants win when several match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTopic {
    Summary,
    Quiz,
    StudyPlan,
    Explanation,
    Menu,
}

impl ReplyTopic {
    pub fn classify(prompt: &str) -> Self {
        let prompt = prompt.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| prompt.contains(w));

        if has(&["summarize", "summary"]) {
            ReplyTopic::Summary
        } else if has(&["question", "quiz"]) {
            ReplyTopic::Quiz
        } else if has(&["plan", "study"]) {
            ReplyTopic::StudyPlan
        } else if has(&["explain", "help"]) {
            ReplyTopic::Explanation
        } else {
            ReplyTopic::Menu
        }
    }
}

/// Builds the reply text for a prompt. Pure, so it can be checked without waiting.
pub fn scripted_reply(prompt: &str, subject_notes: &str) -> String {
    match ReplyTopic::classify(prompt) {
        ReplyTopic::Summary => {
            let body = if subject_notes.trim().is_empty() {
                "You don't have any notes for this subject yet. Add some notes to get a meaningful summary!"
            } else {
                "Based on your notes, the key points are..."
            };
            format!(
                "Here's a summary of your notes:\n\n{}\n\nWould you like me to help you organize these points into a study guide?",
                body
            )
        }
        ReplyTopic::Quiz => QUIZ_REPLY.to_string(),
        ReplyTopic::StudyPlan => PLAN_REPLY.to_string(),
        ReplyTopic::Explanation => EXPLAIN_REPLY.to_string(),
        ReplyTopic::Menu => MENU_REPLY.to_string(),
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AssistantService` with keyword-triggered canned replies.
#[derive(Clone, Debug)]
pub struct ScriptedAssistant {
    delay: Duration,
}

impl ScriptedAssistant {
    /// Creates a new `ScriptedAssistant` that answers after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// An assistant that answers immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

//=========================================================================================
// `AssistantService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AssistantService for ScriptedAssistant {
    async fn reply(&self, prompt: &str, subject_notes: &str) -> PortResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(scripted_reply(prompt, subject_notes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_pick_topics_case_insensitively() {
        assert_eq!(ReplyTopic::classify("Can you SUMMARIZE this?"), ReplyTopic::Summary);
        assert_eq!(ReplyTopic::classify("give me a quiz"), ReplyTopic::Quiz);
        assert_eq!(ReplyTopic::classify("Make a study schedule"), ReplyTopic::StudyPlan);
        assert_eq!(ReplyTopic::classify("please explain limits"), ReplyTopic::Explanation);
        assert_eq!(ReplyTopic::classify("hello"), ReplyTopic::Menu);
    }

    #[test]
    fn summary_wins_over_later_keywords() {
        assert_eq!(
            ReplyTopic::classify("summary of questions to study"),
            ReplyTopic::Summary
        );
        assert_eq!(ReplyTopic::classify("help me plan"), ReplyTopic::StudyPlan);
    }

    #[test]
    fn summary_depends_on_notes() {
        let without = scripted_reply("summary", "   ");
        assert!(without.contains("You don't have any notes for this subject yet."));
        let with = scripted_reply("summary", "integration by parts");
        assert!(with.contains("Based on your notes, the key points are..."));
    }

    #[tokio::test]
    async fn instant_assistant_replies_with_script() {
        let assistant = ScriptedAssistant::instant();
        let reply = assistant.reply("quiz me", "").await.unwrap();
        assert_eq!(reply, QUIZ_REPLY);
    }

    #[tokio::test]
    async fn reply_waits_for_the_configured_delay() {
        let assistant = ScriptedAssistant::new(Duration::from_millis(30));
        let start = tokio::time::Instant::now();
        let reply = assistant.reply("hi", "").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(reply, MENU_REPLY);
    }
}
