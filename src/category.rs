use crate::model::Category;

const INFRASTRUCTURE_KEYWORDS: &[&str] = &[
    "setup",
    "set up",
    "initialize",
    "configure",
    "install",
    "create config",
];
const BUGFIX_KEYWORDS: &[&str] = &["test", "fix", "bug"];
const REFACTOR_KEYWORDS: &[&str] = &["refactor", "clean", "optimize"];
const DOCS_KEYWORDS: &[&str] = &["documentation", "readme", "agents.md"];

/// Guess a category from free-text by lower-cased substring matching.
/// Keyword groups are checked in a fixed order, so a description matching
/// both a bugfix and a docs keyword lands on bugfix. This is a CLI default
/// only; the engine never enforces it.
pub fn infer_category(description: &str) -> Category {
    let lower = description.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(INFRASTRUCTURE_KEYWORDS) {
        Category::Infrastructure
    } else if contains_any(BUGFIX_KEYWORDS) {
        Category::Bugfix
    } else if contains_any(REFACTOR_KEYWORDS) {
        Category::Refactor
    } else if contains_any(DOCS_KEYWORDS) {
        Category::Docs
    } else {
        Category::Feature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_bugfix_from_fix_keyword() {
        assert_eq!(infer_category("Fix the login bug"), Category::Bugfix);
    }

    #[test]
    fn infers_docs_from_readme_keyword() {
        assert_eq!(infer_category("Update README"), Category::Docs);
    }

    #[test]
    fn defaults_to_feature() {
        assert_eq!(infer_category("Add export feature"), Category::Feature);
    }

    #[test]
    fn infers_infrastructure_before_other_groups() {
        assert_eq!(
            infer_category("Set up the test harness"),
            Category::Infrastructure
        );
    }

    #[test]
    fn bugfix_group_wins_over_docs_group() {
        assert_eq!(infer_category("Fix typos in README"), Category::Bugfix);
    }

    #[test]
    fn infers_refactor_from_cleanup() {
        assert_eq!(infer_category("Clean up the parser"), Category::Refactor);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(infer_category("INSTALL dependencies"), Category::Infrastructure);
    }
}
