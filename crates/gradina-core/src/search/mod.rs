//! Library search with diacritic folding and synonym expansion.
//!
//! Search and category browsing are separate display modes: a blank query
//! returns nothing here and the caller shows the categorized library
//! instead.

mod normalize;
mod synonyms;

pub use normalize::normalize;
pub use synonyms::{expand_query, SynonymTable};

use crate::catalog::{Category, Message};

impl SynonymTable {
    /// Messages whose content, category label, or category description
    /// contains any expanded query term. Input order is preserved and
    /// there is no result cap.
    pub fn search<'a>(&self, messages: &'a [Message], query: &str) -> Vec<&'a Message> {
        let terms = self.expand(query);
        if terms.is_empty() || messages.is_empty() {
            return Vec::new();
        }

        let category_text: Vec<(Category, String, String)> = Category::ALL
            .iter()
            .map(|c| (*c, normalize(c.label()), normalize(c.description())))
            .collect();

        let results: Vec<&Message> = messages
            .iter()
            .filter(|message| {
                let content = normalize(&message.content);
                let (label, description) = category_text
                    .iter()
                    .find(|(c, _, _)| *c == message.category)
                    .map(|(_, l, d)| (l.as_str(), d.as_str()))
                    .unwrap_or(("", ""));

                terms.iter().any(|term| {
                    content.contains(term.as_str())
                        || label.contains(term.as_str())
                        || description.contains(term.as_str())
                })
            })
            .collect();

        tracing::debug!(
            query,
            candidates = messages.len(),
            matches = results.len(),
            "searched message library"
        );
        results
    }
}

/// [`SynonymTable::search`] over the built-in synonym table.
pub fn search<'a>(messages: &'a [Message], query: &str) -> Vec<&'a Message> {
    SynonymTable::builtin().search(messages, query)
}
