// All LLM prompt constants. Replace the {placeholder} fields before sending.

/// Question generation. Replace `{interview_type}` and `{document_text}`.
pub const QUESTION_PROMPT_TEMPLATE: &str = "As an expert {interview_type} interviewer, \
ask one relevant, open-ended question based on this document:\n\n---\n{document_text}\n---";

/// Answer evaluation. Replace `{question}` and `{answer}`.
///
/// The score-breakdown format is load-bearing: `scores::parse_scores` matches
/// the exact category labels and the `[SCORE]/10` shape demanded here.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are a meticulous and insightful interview coach. Your task is to provide a highly detailed evaluation of a candidate's answer.

**INTERVIEW QUESTION:**
"{question}"
---
**CANDIDATE'S ANSWER:**
"{answer}"
---
**YOUR TASK:**
Provide a detailed, multi-part evaluation. You MUST include scores and written analysis for each section.

**1. Score Breakdown (Format: `Category: [SCORE]/10`)**
You must provide a score for each of the following:
- Factual Accuracy: [SCORE]/10
- Relevance & Directness: [SCORE]/10
- Structure & Clarity (STAR Method): [SCORE]/10

**2. Detailed Written Evaluation**
- **Strengths:** What did the candidate do well? (e.g., "Good use of a specific example...")
- **Areas for Improvement:** What were the key weaknesses? (e.g., "The result of the action was unclear...")

**3. Concrete Suggestion**
- **Example Rephrasing:** Provide a short example of how they could have phrased a key part of their answer more effectively.
"#;

/// Holistic end-of-interview feedback. Replace `{interview_log}`.
pub const HOLISTIC_PROMPT_TEMPLATE: &str = r#"You are a senior career strategist reviewing a candidate's full interview performance.
Based on the entire Q&A log, provide a detailed "Overall Performance Summary" and an "Actionable Improvement Plan".

**FULL INTERVIEW LOG:**
---
{interview_log}
---
**YOUR TASK:**
1.  **Overall Performance Summary:** Write a detailed paragraph summarizing the candidate's performance. Analyze their communication style, confidence, and consistency. Identify the most significant recurring strengths and weaknesses across all answers.
2.  **Actionable Improvement Plan:** Provide a bulleted list of the top 3 most critical and specific actions the candidate must take. For each action, explain *why* it's important and provide a *concrete example*. (e.g., "- Action: Quantify your achievements. Why: It demonstrates impact. Example: Instead of 'improved the system,' say 'reduced server response time by 15%.'").
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_carry_their_placeholders() {
        assert!(QUESTION_PROMPT_TEMPLATE.contains("{interview_type}"));
        assert!(QUESTION_PROMPT_TEMPLATE.contains("{document_text}"));
        assert!(EVALUATION_PROMPT_TEMPLATE.contains("{question}"));
        assert!(EVALUATION_PROMPT_TEMPLATE.contains("{answer}"));
        assert!(HOLISTIC_PROMPT_TEMPLATE.contains("{interview_log}"));
    }

    #[test]
    fn evaluation_prompt_demands_all_three_score_labels() {
        for label in [
            "Factual Accuracy",
            "Relevance & Directness",
            "Structure & Clarity (STAR Method)",
        ] {
            assert!(EVALUATION_PROMPT_TEMPLATE.contains(label), "missing {label}");
        }
    }
}
