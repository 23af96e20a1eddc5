//! Prompt assembly and the generate-then-persist flow behind
//! `POST /api/insights/generate`.

use crate::db::{ActivityStore, StoreResult};
use crate::models::habit::HabitEntry;
use crate::models::insight::{AiInsight, ContentSource, InsightType};
use crate::models::journal::JournalEntry;
use crate::services::gemini::{GenerationError, TextGenerator};

const RECENT_JOURNAL_LIMIT: u32 = 3;
const RECENT_HABIT_LIMIT: u32 = 5;
const EXCERPT_CHARS: usize = 100;

const STORY_INSTRUCTION: &str = "You are a sci-fi storyteller for SourceSpace, a galactic productivity app. \
Create short, inspiring sci-fi stories (100-150 words) that motivate users based on their activities. \
Use space themes, cosmic metaphors, and futuristic elements. Keep it uplifting and actionable.";

const ANALYSIS_INSTRUCTION: &str = "You are an AI mentor from the future helping users optimize their productivity. \
Provide brief, insightful analysis (50-75 words) with sci-fi metaphors. \
Focus on patterns, growth, and cosmic perspective on their journey.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The API answered but returned no candidates.
    NoCandidates,
    /// Missing key, transport failure, non-2xx, undecodable body, or a
    /// candidate without text.
    Unavailable,
}

impl FallbackReason {
    pub fn message(&self) -> &'static str {
        match self {
            FallbackReason::NoCandidates => {
                "The cosmic networks are processing your request. Try again in a moment."
            }
            FallbackReason::Unavailable => {
                "The cosmic networks are experiencing interference. Try again later."
            }
        }
    }
}

impl From<&GenerationError> for FallbackReason {
    fn from(err: &GenerationError) -> Self {
        match err {
            GenerationError::NoCandidates => FallbackReason::NoCandidates,
            _ => FallbackReason::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    Generated(String),
    Fallback(FallbackReason),
}

impl InsightOutcome {
    pub fn content(&self) -> &str {
        match self {
            InsightOutcome::Generated(text) => text,
            InsightOutcome::Fallback(reason) => reason.message(),
        }
    }

    pub fn source(&self) -> ContentSource {
        match self {
            InsightOutcome::Generated(_) => ContentSource::Generated,
            InsightOutcome::Fallback(_) => ContentSource::Fallback,
        }
    }
}

/// Summarizes recent activity into the user-context part of the prompt.
pub fn build_context(
    entries: &[JournalEntry],
    habits: &[HabitEntry],
    insight_type: InsightType,
) -> String {
    if entries.is_empty() && habits.is_empty() {
        return match insight_type {
            InsightType::Story => {
                "Create an inspiring sci-fi story about beginning a new journey in the cosmos of productivity."
            }
            InsightType::Analysis => {
                "Provide motivation for starting a new productivity journey in the galaxy of self-improvement."
            }
        }
        .to_string();
    }

    let mut context = String::from("Based on the user's recent activity:\n");

    if !entries.is_empty() {
        context.push_str("Recent journal entries:\n");
        for entry in entries {
            let excerpt: String = entry.content.chars().take(EXCERPT_CHARS).collect();
            context.push_str(&format!(
                "- {}: {}... (Mood: {}/10)\n",
                entry.title, excerpt, entry.mood
            ));
        }
    }

    if !habits.is_empty() {
        let completed = habits.iter().filter(|h| h.completed).count();
        context.push_str(&format!(
            "\nCompleted {} out of {} recent habits.\n",
            completed,
            habits.len()
        ));
    }

    context.push('\n');
    context.push_str(match insight_type {
        InsightType::Story => {
            "Create an inspiring sci-fi story that reflects their journey and motivates continued growth."
        }
        InsightType::Analysis => {
            "Provide insightful analysis with cosmic perspective on their progress and patterns."
        }
    });
    context
}

/// Full prompt sent to the generator: system instruction plus user context.
pub fn build_prompt(context: &str, insight_type: InsightType) -> String {
    let instruction = match insight_type {
        InsightType::Story => STORY_INSTRUCTION,
        InsightType::Analysis => ANALYSIS_INSTRUCTION,
    };
    format!("{instruction}\n\nUser context: {context}")
}

/// Calls the generator, converting any failure into a fallback.
pub async fn run_generator(generator: &dyn TextGenerator, prompt: &str) -> InsightOutcome {
    match generator.generate(prompt).await {
        Ok(text) => InsightOutcome::Generated(text),
        Err(e) => {
            tracing::warn!(error = %e, "Text generation unavailable, using fallback content");
            InsightOutcome::Fallback(FallbackReason::from(&e))
        }
    }
}

/// Gathers recent activity, generates text and stores the resulting insight.
/// Only store failures are returned as errors.
pub async fn generate_insight(
    store: &dyn ActivityStore,
    generator: &dyn TextGenerator,
    user_id: &str,
    insight_type: InsightType,
) -> StoreResult<(AiInsight, InsightOutcome)> {
    let entries = store
        .recent_journal_entries(user_id, RECENT_JOURNAL_LIMIT)
        .await?;
    let habits = store.recent_habit_entries(user_id, RECENT_HABIT_LIMIT).await?;

    let context = build_context(&entries, &habits, insight_type);
    let prompt = build_prompt(&context, insight_type);

    let outcome = run_generator(generator, &prompt).await;

    let insight = AiInsight::new(
        user_id.to_string(),
        outcome.content().to_string(),
        insight_type,
    );
    store.insert_insight(&insight).await?;

    tracing::info!(
        user_id = %user_id,
        insight_id = %insight.insight_id,
        insight_type = insight_type.as_str(),
        source = ?outcome.source(),
        "Insight stored"
    );

    Ok((insight, outcome))
}
