use rand::Rng;
use regex::{Regex, RegexBuilder};

use crate::models::{Category, KeywordRule};

/// Built-in keyword table. Scanned in declaration order; the first keyword
/// found anywhere in the lowercased description wins.
pub(crate) const BUILTIN_KEYWORDS: &[(&str, Category)] = &[
    ("housing", Category::Housing),
    ("rent", Category::Housing),
    ("mortgage", Category::Housing),
    ("food", Category::Food),
    ("grocery", Category::Food),
    ("restaurant", Category::Food),
    ("meal", Category::Food),
    ("car", Category::Transportation),
    ("uber", Category::Transportation),
    ("bus", Category::Transportation),
    ("train", Category::Transportation),
    ("movie", Category::Entertainment),
    ("game", Category::Entertainment),
    ("concert", Category::Entertainment),
    ("subscription", Category::Subscriptions),
    ("eth", Category::CryptoInvestment),
    ("btc", Category::CryptoInvestment),
    ("gas", Category::SustainableSpending),
    ("flight", Category::Travel),
    ("shopping", Category::Shopping),
    ("doctor", Category::Health),
];

/// How a category was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Keyword,
    Random,
}

pub(crate) struct Categorizer {
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    pattern: String,
    regex: Option<Regex>,
    category: Category,
    is_regex: bool,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Categorizer {
    /// User rules are consulted first, then the built-in keyword table.
    pub(crate) fn new(user_rules: &[KeywordRule]) -> Self {
        let mut compiled: Vec<CompiledRule> = user_rules
            .iter()
            .map(|r| {
                let regex = if r.is_regex {
                    match RegexBuilder::new(&r.pattern).case_insensitive(true).build() {
                        Ok(re) => Some(re),
                        Err(e) => {
                            tracing::warn!(pattern = %r.pattern, error = %e, "ignoring invalid regex rule");
                            None
                        }
                    }
                } else {
                    None
                };
                CompiledRule {
                    pattern: r.pattern.to_lowercase(),
                    regex,
                    category: r.category,
                    is_regex: r.is_regex,
                }
            })
            .collect();

        compiled.extend(BUILTIN_KEYWORDS.iter().map(|(kw, cat)| CompiledRule {
            pattern: (*kw).to_string(),
            regex: None,
            category: *cat,
            is_regex: false,
        }));

        Self { rules: compiled }
    }

    /// Deterministic half of categorization: the first matching rule, if any.
    pub(crate) fn match_rule(&self, description: &str) -> Option<Category> {
        let desc_lower = description.to_lowercase();

        for rule in &self.rules {
            let matched = if rule.is_regex {
                rule.regex
                    .as_ref()
                    .is_some_and(|re| re.is_match(description))
            } else {
                desc_lower.contains(&rule.pattern)
            };

            if matched {
                return Some(rule.category);
            }
        }

        None
    }

    /// Always yields a category. Descriptions that match no rule get a
    /// uniformly random one, so repeated calls may disagree.
    pub(crate) fn categorize<R: Rng + ?Sized>(&self, description: &str, rng: &mut R) -> Category {
        self.categorize_with_source(description, rng).0
    }

    pub(crate) fn categorize_with_source<R: Rng + ?Sized>(
        &self,
        description: &str,
        rng: &mut R,
    ) -> (Category, Source) {
        match self.match_rule(description) {
            Some(cat) => (cat, Source::Keyword),
            None => (Category::random(rng), Source::Random),
        }
    }

    pub(crate) fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests;
