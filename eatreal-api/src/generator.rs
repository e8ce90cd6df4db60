use async_trait::async_trait;
use eatreal_model::plan::{personalized_prompt, PlanRequest};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;

const SYSTEM_PROMPT: &str =
    "You are a precise nutritionist. Respond only in the exact format requested.";
const TEMPERATURE: f32 = 0.7;

const TARGETS_PROMPT: &str = "Create daily nutritional targets in this exact format:
CALORIES: [range]
PROTEIN: [percentage]
CARBS: [percentage]
FATS: [percentage]";

const PREP_TIPS_PROMPT: &str = "Create 5 specific meal prep tips for this meal plan. \
Format each tip on a new line starting with a number. \
Focus on time-saving and storage tips.";

pub const TARGETS_MAX_TOKENS: u32 = 500;
pub const MEAL_PLAN_MAX_TOKENS: u32 = 2000;
pub const GROCERY_LIST_MAX_TOKENS: u32 = 1000;
pub const PREP_TIPS_MAX_TOKENS: u32 = 1000;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("Error: generation service unreachable")]
    CommunicationError,
    #[error("Error: generation service returned status {0}")]
    StatusError(u16),
    #[error("Error: Invalid API response structure")]
    InvalidResponse,
    #[error("Error: Empty response from API")]
    EmptyResponse,
}

#[mockall::automock]
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Runs one prompt and returns the trimmed reply.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible services.
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PlanGenerator for OpenAiGenerator {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        debug!("Sending prompt (length: {})", prompt.len());
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let resp = self
            .client
            .post(format!(
                "{}/v1/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Generation request failed: {}", e);
                GenerationError::CommunicationError
            })?;
        if !resp.status().is_success() {
            error!("Generation service returned {}", resp.status());
            return Err(GenerationError::StatusError(resp.status().as_u16()));
        }

        let content = resp
            .json::<ChatResponse>()
            .await
            .map_err(|_| GenerationError::InvalidResponse)?
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::InvalidResponse)?
            .message
            .content
            .unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            error!("Generation service returned empty content");
            return Err(GenerationError::EmptyResponse);
        }

        debug!("Received response (length: {})", content.len());
        Ok(content.to_owned())
    }
}

/// The generated parts of a plan email.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanContent {
    pub daily_targets: String,
    pub meal_plan: String,
    pub grocery_list: String,
    pub prep_tips: String,
}

fn grocery_list_prompt(meal_plan: &str) -> String {
    format!(
        "Based on this meal plan, create a categorized grocery list:\n{}\n\n\
Format as:\nPRODUCE:\n- [item] (quantity)\nPROTEINS:\n- [item] (quantity)\n\
PANTRY:\n- [item] (quantity)",
        meal_plan
    )
}

/// Generates daily targets, the meal plan, a grocery list for that plan and
/// prep tips, stopping at the first failure. An empty prompt is rebuilt from
/// the submitted profile.
pub async fn generate_plan(
    generator: &dyn PlanGenerator,
    request: &PlanRequest,
) -> Result<PlanContent, GenerationError> {
    let meal_plan_prompt = if request.prompt.trim().is_empty() {
        personalized_prompt(&request.user_profile)
    } else {
        request.prompt.clone()
    };

    info!("Generating daily targets");
    let daily_targets = generator.complete(TARGETS_PROMPT, TARGETS_MAX_TOKENS).await?;
    info!("Generating meal plan");
    let meal_plan = generator
        .complete(&meal_plan_prompt, MEAL_PLAN_MAX_TOKENS)
        .await?;
    info!("Generating grocery list");
    let grocery_list = generator
        .complete(&grocery_list_prompt(&meal_plan), GROCERY_LIST_MAX_TOKENS)
        .await?;
    info!("Generating prep tips");
    let prep_tips = generator
        .complete(PREP_TIPS_PROMPT, PREP_TIPS_MAX_TOKENS)
        .await?;

    Ok(PlanContent {
        daily_targets,
        meal_plan,
        grocery_list,
        prep_tips,
    })
}
