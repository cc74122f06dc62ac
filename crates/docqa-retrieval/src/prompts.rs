//! Prompt templates for chunk summaries, the merge pass and answers.

use std::fmt;
use std::str::FromStr;

const BRIEF_SUMMARY: &str = "\
You are an expert research analyst. Write a short plain-English summary (3-4 sentences) of the text below.
Do not output JSON or code fences. Stay concise and high-level.

Text:
{paper_text}
";

const DETAILED_SUMMARY: &str = "\
You are an expert research analyst. Write a detailed, human-readable summary of the text below under the headings
Overview, Problem Statement, Methodology, Key Findings, Conclusion.
Use clear paragraphs under each heading. Do not output JSON or code fences.

Text:
{paper_text}
";

const EXAM_SUMMARY: &str = "\
You are an academic tutor. Turn the text below into concise exam notes: short bullets with key facts and definitions,
followed by 5 short question and one-line answer pairs. Do not output JSON or code fences.

Text:
{paper_text}
";

const ANSWER: &str = "\
You are an expert research assistant. Answer the user's question using the context passages below, each labelled CONTEXT #n.

Context:
{contexts}

User question:
{question}

Guidelines:
- Use only the provided contexts. If the answer is not there, say: \"I could not find the answer in the document.\"
- Cite contexts inline, e.g. (Context #2).
- Keep a neutral, academic tone.
";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryMode {
    Brief,
    #[default]
    Detailed,
    Exam,
}

impl SummaryMode {
    fn template(self) -> &'static str {
        match self {
            SummaryMode::Brief => BRIEF_SUMMARY,
            SummaryMode::Detailed => DETAILED_SUMMARY,
            SummaryMode::Exam => EXAM_SUMMARY,
        }
    }

    pub fn prompt(self, paper_text: &str) -> String { self.template().replace("{paper_text}", paper_text) }
}

impl FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brief" => Ok(SummaryMode::Brief),
            "detailed" => Ok(SummaryMode::Detailed),
            "exam" | "exam-oriented" => Ok(SummaryMode::Exam),
            other => Err(format!("unknown summary mode '{other}' (expected brief, detailed or exam)")),
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SummaryMode::Brief => "brief",
            SummaryMode::Detailed => "detailed",
            SummaryMode::Exam => "exam",
        })
    }
}

pub fn answer_prompt(contexts: &str, question: &str) -> String {
    ANSWER.replace("{contexts}", contexts).replace("{question}", question)
}
