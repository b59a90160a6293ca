//! Prompt template and instruction selection.

use faq_index::RetrievalResult;

/// Entries scoring below this are considered unable to answer the question.
pub const RELEVANCE_THRESHOLD: f32 = 0.5;

/// Which instruction closes the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Answer from the retrieved FAQ entries.
    Grounded,
    /// Send the student to the faculty office.
    Fallback,
}

impl Instruction {
    pub fn text(self) -> &'static str {
        match self {
            Instruction::Grounded => "Based on the FAQs above, solve the inquiry for the student.",
            Instruction::Fallback => {
                "None of the FAQs above solve the user query. Please suggest the user to contact the faculty office for further inquiries."
            }
        }
    }
}

/// Fallback when every entry scores below [`RELEVANCE_THRESHOLD`], including
/// when nothing was retrieved.
pub fn choose_instruction(faq: &[RetrievalResult]) -> Instruction {
    if faq.iter().all(|r| r.relevance_score < RELEVANCE_THRESHOLD) {
        Instruction::Fallback
    } else {
        Instruction::Grounded
    }
}

/// One block per entry, separated by a blank line.
pub fn format_faq_results(faq: &[RetrievalResult]) -> String {
    faq.iter()
        .map(|r| {
            format!(
                "Relevance score: {:.2}\nQ: {}\nA: {}",
                r.relevance_score, r.question, r.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Fills the fixed template. Substitution is single-pass, so placeholders
/// inside the question are left untouched.
pub fn render(query: &str, faq_result: &str, instruction: Instruction) -> String {
    format!(
        r#"
You are an online assistance at Hong Kong University of Science and Technology (HKUST).
Students will ask questions about a new course, FINA3001, and you will answer their inquiries with relevant information.

Question:
{query}

Below are relevant information from the website FAQ.
{faq_result}

{instruction}
"#,
        instruction = instruction.text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(score: f32, q: &str, a: &str) -> RetrievalResult {
        RetrievalResult {
            relevance_score: score,
            question: q.into(),
            answer: a.into(),
        }
    }

    #[test]
    fn all_below_threshold_falls_back() {
        let faq = vec![hit(0.49, "q1", "a1"), hit(0.1, "q2", "a2"), hit(0.0, "q3", "a3")];
        assert_eq!(choose_instruction(&faq), Instruction::Fallback);
    }

    #[test]
    fn one_at_threshold_is_grounded() {
        let faq = vec![hit(0.2, "q1", "a1"), hit(0.5, "q2", "a2")];
        assert_eq!(choose_instruction(&faq), Instruction::Grounded);
    }

    #[test]
    fn empty_retrieval_falls_back() {
        assert_eq!(choose_instruction(&[]), Instruction::Fallback);
    }

    #[test]
    fn blocks_are_joined_with_blank_line() {
        let faq = vec![hit(0.8, "What is the deadline?", "March 1."), hit(0.5, "q", "a")];
        assert_eq!(
            format_faq_results(&faq),
            "Relevance score: 0.80\nQ: What is the deadline?\nA: March 1.\n\nRelevance score: 0.50\nQ: q\nA: a"
        );
        assert_eq!(format_faq_results(&[]), "");
    }

    #[test]
    fn render_places_sections_in_order() {
        let p = render("When is the deadline?", "FAQ-BLOCK", Instruction::Grounded);
        let q = p.find("Question:\nWhen is the deadline?").unwrap();
        let f = p.find("FAQ-BLOCK").unwrap();
        let i = p.find(Instruction::Grounded.text()).unwrap();
        assert!(q < f && f < i);
        assert!(!p.contains(Instruction::Fallback.text()));
    }

    #[test]
    fn render_does_not_expand_placeholders_in_query() {
        let p = render("{faq_result}", "X", Instruction::Fallback);
        assert!(p.contains("Question:\n{faq_result}\n"));
    }
}
