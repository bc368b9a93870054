//! Fixed prompts and sampling parameters for the two model calls.
//!
//! The analysis prompt is load-bearing: the normalizer's field names
//! (`sentiment`, `sentimentScore`, `topics`, `actionItems`, `riskFlags`,
//! `summary`) must match what it instructs the model to emit.

/// System prompt for the structured-analysis step.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are an advanced conversation insights engine. \
Your task is to analyze the text of a conversation and produce a structured JSON output. \
The analysis should include the following fields:\n\n\
1. sentiment: overall tone of the conversation (Positive, Neutral, Negative)\n\
2. sentimentScore: confidence as a float between 0 and 1\n\
3. topics: list of main topics discussed\n\
4. actionItems: list of actionable items mentioned in the conversation\n\
5. riskFlags: list of potential risks or issues, each with severity (Low, Medium, High) and reason\n\
6. summary: a brief 2-3 sentence summary of the conversation\n\
7. keyQuotes: up to 3 important quotes or phrases that illustrate the conversation's main points\n\n\
Output:\n\
Return ONLY a valid JSON object with the exact fields above. \
Do not include any explanation or extra text. \
Ensure all lists are present, even if empty.";

/// System prompt for the short-reply step.
pub const REPLY_SYSTEM_PROMPT: &str = "You are a concise, helpful support assistant. \
Respond naturally as a chat assistant, but keep your reply under about 50 words \
(no more than 2-3 short sentences).";

/// Low temperature keeps the analysis output close to strict JSON.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Slightly warmer for the conversational reply.
pub const REPLY_TEMPERATURE: f32 = 0.4;
