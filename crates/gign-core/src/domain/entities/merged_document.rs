//! The merge engine.
//!
//! A [`MergedDocument`] is derived from a [`TemplateSet`] and never edited
//! afterwards. First-seen wins: a later template contributes only rules that
//! no earlier group emitted. Negations are never deduplicated, since their
//! effect depends on the rules before them; a group whose rules and
//! negations all appeared earlier is dropped as a whole.

use std::collections::HashSet;

use crate::domain::entities::pattern::{Pattern, PatternKind, normalize};
use crate::domain::entities::template_set::TemplateSet;
use crate::domain::value_objects::TechnologyId;

/// Lines contributed by one technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    technology: TechnologyId,
    header: Option<Pattern>,
    patterns: Vec<Pattern>,
}

impl PatternGroup {
    pub fn technology(&self) -> &TechnologyId {
        &self.technology
    }

    /// `# <id>`, absent for the existing user file.
    pub fn header(&self) -> Option<&Pattern> {
        self.header.as_ref()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Number of rules and negations in the group.
    pub fn rule_count(&self) -> usize {
        self.patterns
            .iter()
            .filter(|p| matches!(p.kind(), PatternKind::Rule | PatternKind::Negation))
            .count()
    }

    fn lines(&self) -> impl Iterator<Item = &Pattern> {
        self.header.iter().chain(self.patterns.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedDocument {
    groups: Vec<PatternGroup>,
}

impl MergedDocument {
    pub fn merge(set: &TemplateSet) -> Self {
        let mut seen_rules: HashSet<String> = HashSet::new();
        let mut emitted_negations: HashSet<String> = HashSet::new();
        let mut groups = Vec::with_capacity(set.len());

        for entry in set.iter() {
            let custom = entry.id.is_custom();
            let mut kept: Vec<Pattern> = Vec::new();
            let mut novel = 0usize;

            for pattern in Pattern::parse_all(&entry.text, &entry.id) {
                match pattern.kind() {
                    PatternKind::Rule => {
                        if seen_rules.insert(pattern.normalized().to_owned()) {
                            novel += 1;
                            kept.push(pattern);
                        }
                    }
                    PatternKind::Negation => {
                        // Always emitted; only a first occurrence keeps the group alive.
                        if emitted_negations.insert(pattern.normalized().to_owned()) {
                            novel += 1;
                        }
                        kept.push(pattern);
                    }
                    PatternKind::Comment => kept.push(pattern),
                    PatternKind::Blank => {
                        if kept.last().is_some_and(|p| !p.is_blank()) {
                            kept.push(pattern);
                        }
                    }
                }
            }

            while kept.last().is_some_and(Pattern::is_blank) {
                kept.pop();
            }

            let keep_group = if custom { !kept.is_empty() } else { novel > 0 };
            if !keep_group {
                continue;
            }

            groups.push(PatternGroup {
                header: (!custom).then(|| Pattern::header(&entry.id)),
                technology: entry.id.clone(),
                patterns: kept,
            });
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Technologies that contributed at least one line, in order.
    pub fn technologies(&self) -> impl Iterator<Item = &TechnologyId> {
        self.groups.iter().map(PatternGroup::technology)
    }

    /// Total number of rules and negations across groups.
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(PatternGroup::rule_count).sum()
    }

    /// Whether a rule with the same normalized form is already present.
    pub fn contains_rule(&self, rule: &str) -> bool {
        let wanted = normalize(rule);
        self.groups
            .iter()
            .flat_map(|g| g.patterns.iter())
            .any(|p| {
                matches!(p.kind(), PatternKind::Rule | PatternKind::Negation)
                    && p.normalized() == wanted
            })
    }

    /// Serialize: groups separated by one blank line, single trailing `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for line in group.lines() {
                out.push_str(line.raw());
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TechnologyId {
        TechnologyId::parse(s).unwrap()
    }

    fn set(entries: &[(&str, &str)]) -> TemplateSet {
        entries
            .iter()
            .map(|(id, text)| (tid(id), (*text).to_string()))
            .collect()
    }

    #[test]
    fn python_then_node_drops_duplicate_pyc() {
        let doc = MergedDocument::merge(&set(&[
            ("python", "*.pyc\n__pycache__/\n"),
            ("node", "node_modules/\n*.pyc\n"),
        ]));

        assert_eq!(
            doc.to_text(),
            "# python\n*.pyc\n__pycache__/\n\n# node\nnode_modules/\n"
        );
    }

    #[test]
    fn group_without_novel_rules_is_omitted() {
        let doc = MergedDocument::merge(&set(&[
            ("python", "*.pyc\n"),
            ("jupyternotebooks", "# notebooks\n\n*.pyc\n"),
        ]));

        assert_eq!(doc.groups().len(), 1);
        assert_eq!(doc.to_text(), "# python\n*.pyc\n");
    }

    #[test]
    fn negations_are_distinct_from_rules() {
        let doc = MergedDocument::merge(&set(&[
            ("a", "build/\n"),
            ("b", "!build/important\nbuild/\nout/\n"),
        ]));

        assert_eq!(
            doc.to_text(),
            "# a\nbuild/\n\n# b\n!build/important\nout/\n"
        );
    }

    #[test]
    fn repeated_negation_after_reignored_rule_is_kept() {
        let doc = MergedDocument::merge(&set(&[
            ("a", "*.log\n!keep.log\n"),
            ("b", "keep.log\n!keep.log\n"),
        ]));

        assert_eq!(
            doc.to_text(),
            "# a\n*.log\n!keep.log\n\n# b\nkeep.log\n!keep.log\n"
        );
    }

    #[test]
    fn negations_alone_do_not_keep_a_group() {
        let doc = MergedDocument::merge(&set(&[
            ("a", "*.log\n!keep.log\n"),
            ("b", "*.log\n!keep.log\n"),
        ]));
        assert_eq!(doc.to_text(), "# a\n*.log\n!keep.log\n");
    }

    #[test]
    fn regenerating_with_repeated_negation_is_identical() {
        let templates = set(&[
            ("a", "*.log\n!keep.log\n"),
            ("b", "keep.log\n!keep.log\n"),
        ]);
        let first = MergedDocument::merge(&templates).to_text();

        let mut again = templates.clone();
        again.prepend_custom(first.clone());
        assert_eq!(MergedDocument::merge(&again).to_text(), first);
    }

    #[test]
    fn custom_group_has_no_header_and_wins() {
        let mut s = set(&[("python", "*.pyc\n.env\n")]);
        s.prepend_custom("# mine\n.env\n");

        let doc = MergedDocument::merge(&s);
        assert_eq!(doc.to_text(), "# mine\n.env\n\n# python\n*.pyc\n");
    }

    #[test]
    fn custom_group_with_only_comments_is_kept() {
        let mut s = TemplateSet::new();
        s.prepend_custom("# just a note\n");
        let doc = MergedDocument::merge(&s);
        assert_eq!(doc.to_text(), "# just a note\n");
    }

    #[test]
    fn blanks_are_collapsed_and_trimmed() {
        let doc = MergedDocument::merge(&set(&[("rust", "\n\n# build\n\n\n\ntarget/\n\n\n")]));
        assert_eq!(doc.to_text(), "# rust\n# build\n\ntarget/\n");
    }

    #[test]
    fn normalized_duplicates_are_removed() {
        let doc = MergedDocument::merge(&set(&[
            ("a", "./dist/\n"),
            ("b", "dist/   \nout\\\n"),
        ]));
        assert_eq!(doc.to_text(), "# a\n./dist/\n\n# b\nout\\\n");
    }

    #[test]
    fn regenerating_over_own_output_is_identical() {
        let templates = set(&[
            ("python", "# Byte-compiled\n*.pyc\n__pycache__/\n"),
            ("node", "node_modules/\n*.pyc\n\n# logs\nnpm-debug.log*\n"),
        ]);

        let first = MergedDocument::merge(&templates).to_text();

        let mut again = templates.clone();
        again.prepend_custom(first.clone());
        let second = MergedDocument::merge(&again).to_text();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_set_serializes_to_empty_string() {
        assert_eq!(MergedDocument::merge(&TemplateSet::new()).to_text(), "");
    }

    #[test]
    fn contains_rule_uses_normalized_form() {
        let doc = MergedDocument::merge(&set(&[("a", "./build/\n")]));
        assert!(doc.contains_rule("build/"));
        assert!(!doc.contains_rule("!build/"));
    }
}
