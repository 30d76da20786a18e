//! Rule-based fallback responder.
//!
//! A [`CannedResponseTable`] is an ordered list of keyword groups, each with a
//! fixed answer. Lookup lower-cases the question and returns the answer of the
//! **first** entry (in definition order) that has a keyword contained in the
//! question as a substring. Later entries never override earlier ones, even
//! when their keyword is longer or more specific.
//!
//! ```rust
//! use portfolio_chat::fallback::CannedResponseTable;
//!
//! let table = CannedResponseTable::builtin();
//! assert!(table.respond("Which languages does he speak?").contains("Spanish"));
//! assert_eq!(table.respond(""), table.default_answer());
//! ```

/// Reply used when no entry matches.
pub const BUILTIN_DEFAULT_ANSWER: &str = "I'd be happy to help you learn more about Hector! You can ask me about:\n\n\
         • His work experience and achievements\n\
         • Education and certifications\n\
         • Technical and soft skills\n\
         • Language proficiency\n\
         • Contact information\n\
         • Availability and location\n\n\
         What would you like to know?";

/// One keyword group and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedEntry {
    keywords: Vec<String>,
    answer: String,
}

impl CannedEntry {
    /// Keywords are lower-cased; blank keywords are dropped.
    pub fn new(keywords: Vec<String>, answer: impl Into<String>) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            keywords,
            answer: answer.into(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    fn matches(&self, normalized_question: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| normalized_question.contains(k.as_str()))
    }
}

/// Ordered keyword → answer table with a default message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedResponseTable {
    entries: Vec<CannedEntry>,
    default_answer: String,
}

impl CannedResponseTable {
    /// Entries without keywords or with a blank answer are dropped, and a
    /// blank default falls back to [`BUILTIN_DEFAULT_ANSWER`], so
    /// [`respond`](Self::respond) always returns non-empty text.
    pub fn new(entries: Vec<CannedEntry>, default_answer: impl Into<String>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| !e.keywords.is_empty() && !e.answer.trim().is_empty())
            .collect();
        let mut default_answer = default_answer.into();
        if default_answer.trim().is_empty() {
            default_answer = BUILTIN_DEFAULT_ANSWER.to_string();
        }
        Self {
            entries,
            default_answer,
        }
    }

    /// The table shipped with the site.
    pub fn builtin() -> Self {
        let entry = |keywords: &[&str], answer: &str| {
            CannedEntry::new(keywords.iter().map(|k| k.to_string()).collect(), answer)
        };

        let entries = vec![
            entry(
                &["experience", "work", "job"],
                "Hector has extensive experience in data science and AI:\n\n\
                 • Senior Data Scientist at a leading tech company (March 2024 - Present)\n\
                 • Data Analyst at an analytics firm (June 2022 - Feb 2024)\n\
                 • Junior Developer at a startup (Jan 2021 - May 2022)\n\n\
                 He has led teams, developed ML models, and improved business metrics by 25%.",
            ),
            entry(
                &["education", "degree", "study", "university"],
                "Hector holds advanced degrees in data science and AI:\n\n\
                 • MSc in Management of Data and Artificial Intelligence (2022-2024)\n\
                 • Bachelor's Degree in Computer Science (2018-2022) - Top 5% of class\n\
                 • Professional Certification in AI (2024)\n\n\
                 His education focused on machine learning, neural networks, and AI applications.",
            ),
            entry(
                &["skill", "technology", "technical"],
                "Hector's technical expertise includes:\n\n\
                 Hard skills:\n\
                 • Python (95%) - Expert level\n\
                 • Machine Learning (90%)\n\
                 • SQL & Databases (85%)\n\
                 • Cloud Computing (80%)\n\n\
                 Soft skills:\n\
                 • Communication (95%)\n\
                 • Leadership (90%)\n\
                 • Problem Solving (92%)\n\
                 • Teamwork (88%)",
            ),
            entry(
                &["language", "speak", "multilingual"],
                "Hector is multilingual with proficiency in:\n\n\
                 • English - C2 (Proficient)\n\
                 • Spanish - C2 (Native)\n\
                 • French - C1 (Advanced)\n\
                 • German - B2 (Intermediate)\n\n\
                 This allows him to work effectively in international environments.",
            ),
            entry(
                &["contact", "reach", "email", "phone"],
                "You can contact Hector through:\n\n\
                 Email: hector.rodriguez@email.com\n\
                 Phone: +33 1 23 45 67 89\n\
                 LinkedIn: linkedin.com/in/hector-rodriguez\n\
                 GitHub: github.com/hectorrodriguez\n\
                 Location: Paris, France",
            ),
            entry(
                &["available", "start", "hire"],
                "Hector is available immediately! He's ready to start on new projects and \
                 opportunities right away. Based in Paris, France, he's open to both on-site \
                 and remote positions.",
            ),
            entry(
                &["project", "portfolio", "work sample"],
                "Hector has worked on various data science and AI projects including:\n\n\
                 • Developing ML models for business optimization\n\
                 • Leading data science initiatives for Fortune 500 clients\n\
                 • Building predictive models that improved metrics by 25%\n\
                 • Creating web applications and backend services\n\n\
                 For detailed project information, please contact him directly.",
            ),
            entry(
                &["salary", "compensation"],
                "Salary expectations are not listed on the CV; Hector is happy to discuss \
                 compensation directly.",
            ),
            entry(
                &["relocation", "relocate", "remote"],
                "Hector is based in Paris, France. Relocation is not specified on the CV; \
                 he is used to hybrid setups and international teams.",
            ),
        ];

        Self::new(entries, BUILTIN_DEFAULT_ANSWER)
    }

    pub fn entries(&self) -> &[CannedEntry] {
        &self.entries
    }

    pub fn default_answer(&self) -> &str {
        &self.default_answer
    }

    /// Answer a question from the table. Never fails.
    pub fn respond(&self, question: &str) -> &str {
        let normalized = question.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.matches(&normalized))
            .map(CannedEntry::answer)
            .unwrap_or(self.default_answer.as_str())
    }
}

impl Default for CannedResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}
