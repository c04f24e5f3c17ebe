//! Prompt templates for question generation, answering, judging and debate

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt asking for `num_questions` questions about a document.
    ///
    /// Ends with an open `1.` so the model continues a numbered list.
    pub fn question_generation(document: &str, num_questions: usize) -> String {
        format!(
            r#"You are an analyst preparing probing questions about the document below.
Read it carefully. Using only what the document contains, write {num_questions} specific questions that examine its key topics, figures, claims or ambiguities. Each question should deepen understanding of the document or invite a critical look at it.

Avoid generic questions. Every question must be answerable, at least in principle, from the document itself.

Write the questions as a numbered list, one per line.

--- BEGIN DOCUMENT CONTENT ---

{document}

--- END DOCUMENT CONTENT ---

Generated Questions:
1."#
        )
    }

    /// Prompt for an answer drawn strictly from one document.
    pub fn answer(document: &str, question: &str) -> String {
        format!(
            r#"You are a senior analyst answering questions about the report below.
Answer only from the report content. Do not rely on outside knowledge or assumptions. If the report does not contain the answer, say clearly that the information is not available in the report.

--- BEGIN REPORT CONTENT ---

{document}

--- END REPORT CONTENT ---

Using only the report content above, answer the following question.

Question: {question}

Answer:"#
        )
    }

    /// Prompt asking whether an answer resolves a question.
    ///
    /// The expected reply carries `Assessment:` and `Reason:` lines.
    pub fn satisfaction(question: &str, answer: &str) -> String {
        format!(
            r#"You are an evaluator. Decide whether the Answer fully and adequately addresses the Original Question. Judge only from the text of the Answer, without outside knowledge.

Original Question:
{question}

Answer:
{answer}

Does the Answer satisfy the Original Question?
Reply with "Satisfied" or "Unsatisfied", then briefly explain why, based only on the question and answer text.

Assessment: [Satisfied/Unsatisfied]
Reason: [Brief explanation]"#
        )
    }

    /// Prompt asking for one refined question targeting an inadequate answer.
    pub fn follow_up(question: &str, answer: &str) -> String {
        format!(
            r#"You refine questions. The Unsatisfactory Answer below did not fully address the Original Question.
Write a single, specific follow-up question aimed at exactly what the answer is missing, so that the next answer fully resolves the Original Question.

Original Question:
{question}

Unsatisfactory Answer:
{answer}

Write one follow-up question that asks for the missing information.

Follow-up Question:"#
        )
    }

    /// Synthesis prompt over independent answers from a panel.
    pub fn panel_synthesis(question: &str, answers: &[String]) -> String {
        let mut rendered = String::new();
        for (i, answer) in answers.iter().enumerate() {
            rendered.push_str(&format!(
                "--- Agent {n} Answer ---\n{answer}\n--- END Agent {n} Answer ---\n\n",
                n = i + 1
            ));
        }

        format!(
            r#"You are a neutral moderator. Several agents answered the same question, each from its own source document. Combine their answers into one objective final answer.

The original question was:
"{question}"

Answers from {count} agents:

{answers}

--- Analysis Task ---
1. Identify where the answers agree and where they disagree.
2. Weigh the evidence or reasoning each answer gives, keeping in mind that each was based on a different document.
3. Combine these perspectives into one final answer to the original question.
4. If answers conflict or look unreliable (for example, they contain error messages), say so instead of inventing agreement.
5. Do not add information that is not present in the answers.

--- Final Synthesized Answer ---"#,
            count = answers.len(),
            answers = rendered.trim()
        )
    }

    /// Prompt for a history-aware debate contribution in `round`.
    pub fn debate_participation(
        question: &str,
        document: &str,
        history: &str,
        round: u32,
    ) -> String {
        format!(
            r#"You are an analyst taking part in a multi-round debate about the question below. Base your response only on Your Document Context and the Debate History So Far. Do not use outside knowledge.

Original Question:
"{question}"

--- Your Document Context ---
{document}
--- End Document Context ---

--- Debate History So Far ---
{history}
--- End Debate History ---

Your Task for this Round ({round}):
Consider the question, your document and the debate so far, then make a concise contribution for this round. You may:
- Restate or sharpen your earlier points, citing your document.
- Respond to other agents' points, agreeing or disagreeing with support from your document.
- Add new, relevant insights from your document.
- State plainly if your document has nothing further to offer.

Stay focused on answering the Original Question from your own context and the earlier turns.

Your Response for Round {round}:"#
        )
    }

    /// Synthesis prompt over a full multi-round debate history.
    pub fn debate_synthesis(question: &str, history: &str) -> String {
        format!(
            r#"You are a neutral summarizer. Write a final answer to the Original Question using only the Full Debate History.

The history holds several rounds in which agents answered and argued from their own source documents.

Original Question:
"{question}"

--- Full Debate History ---
{history}
--- End Full Debate History ---

Your Synthesis Task:
1. Review the whole history: how the discussion developed, where agents agreed, disagreed or corrected themselves.
2. Write one complete final answer reflecting everything that was established.
3. Prefer later rounds where they clearly refine or correct earlier points, while keeping the whole context in view.
4. If real disagreements remain unresolved, state them objectively rather than inventing consensus.
5. Do not add outside information or opinions.
6. Answer the Original Question directly.

--- Final Synthesized Answer ---"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_generation_format() {
        let prompt = PromptTemplate::question_generation("Revenue was $10M.", 3);
        assert!(prompt.contains("write 3 specific questions"));
        assert!(prompt.contains("Revenue was $10M."));
        assert!(prompt.ends_with("1."));
    }

    #[test]
    fn test_answer_format() {
        let prompt = PromptTemplate::answer("Revenue was $10M in Q1.", "What was the revenue?");
        assert!(prompt.contains("Revenue was $10M in Q1."));
        assert!(prompt.contains("Question: What was the revenue?"));
    }

    #[test]
    fn test_satisfaction_requests_structured_reply() {
        let prompt = PromptTemplate::satisfaction("Q?", "A.");
        assert!(prompt.contains("Assessment:"));
        assert!(prompt.contains("Reason:"));
    }

    #[test]
    fn test_follow_up_ends_with_marker() {
        assert!(PromptTemplate::follow_up("Q?", "A.").ends_with("Follow-up Question:"));
    }

    #[test]
    fn test_panel_synthesis_lists_each_answer() {
        let answers = vec!["Ten million.".to_string(), "Not stated.".to_string()];
        let prompt = PromptTemplate::panel_synthesis("Revenue?", &answers);
        assert!(prompt.contains("Answers from 2 agents"));
        assert!(prompt.contains("--- Agent 1 Answer ---\nTen million.\n--- END Agent 1 Answer ---"));
        assert!(prompt.contains("--- Agent 2 Answer ---\nNot stated.\n--- END Agent 2 Answer ---"));
    }

    #[test]
    fn test_debate_participation_format() {
        let prompt =
            PromptTemplate::debate_participation("Revenue?", "Doc body", "No debate history yet.", 2);
        assert!(prompt.contains("Doc body"));
        assert!(prompt.contains("No debate history yet."));
        assert!(prompt.contains("Your Task for this Round (2)"));
        assert!(prompt.ends_with("Your Response for Round 2:"));
    }

    #[test]
    fn test_debate_synthesis_format() {
        let prompt = PromptTemplate::debate_synthesis("Revenue?", "Round 0 - Answer Agent 1:\n$10M\n---");
        assert!(prompt.contains("Round 0 - Answer Agent 1"));
        assert!(prompt.contains("inventing consensus"));
    }
}
