use serde::Serialize;
use std::fmt;

use crate::domain::value_objects::TechnologyId;

/// Classification of one ignore-file line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Comment,
    Blank,
    Negation,
    Rule,
}

/// One line of an ignore file.
///
/// Two patterns are duplicates iff both are rules with
/// byte-equal `normalized` forms. Comments and blanks are never duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    raw: String,
    normalized: String,
    kind: PatternKind,
    source: TechnologyId,
}

impl Pattern {
    /// Classify and normalize a single line.
    ///
    /// A trailing `\r` is dropped from `raw`.
    pub fn parse(line: &str, source: TechnologyId) -> Self {
        let raw = line.strip_suffix('\r').unwrap_or(line).to_owned();
        let kind = classify(&raw);
        let normalized = match kind {
            PatternKind::Rule | PatternKind::Negation => normalize(&raw),
            PatternKind::Comment => raw.trim_end().to_owned(),
            PatternKind::Blank => String::new(),
        };

        Self {
            raw,
            normalized,
            kind,
            source,
        }
    }

    /// Split a whole template into patterns, in order.
    pub fn parse_all(text: &str, source: &TechnologyId) -> Vec<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        text.lines()
            .map(|line| Self::parse(line, source.clone()))
            .collect()
    }

    /// Synthetic `# <id>` group header.
    pub fn header(id: &TechnologyId) -> Self {
        Self::parse(&format!("# {id}"), id.clone())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn source(&self) -> &TechnologyId {
        &self.source
    }

    pub fn is_blank(&self) -> bool {
        self.kind == PatternKind::Blank
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn classify(raw: &str) -> PatternKind {
    if raw.trim().is_empty() {
        PatternKind::Blank
    } else if raw.starts_with('#') {
        PatternKind::Comment
    } else if raw.starts_with('!') {
        PatternKind::Negation
    } else {
        PatternKind::Rule
    }
}

/// Characters a backslash escapes rather than separates.
const ESCAPABLE: &[char] = &['#', '!', ' ', '*', '?', '[', ']', '\\'];

/// Canonical form of a rule or negation used for duplicate detection.
///
/// - unescaped trailing whitespace is stripped (`foo\ ` keeps its space)
/// - a leading `./` is removed, also right after a leading `!`
/// - `\` used as a path separator becomes `/`
pub fn normalize(raw: &str) -> String {
    let mut body = raw.trim_end();
    let escaped_space = body.ends_with('\\') && body.len() < raw.len() && !ends_with_escaped_backslash(body);

    let negated = body.starts_with('!');
    if negated {
        body = &body[1..];
    }

    let mut out = String::with_capacity(raw.len());
    if negated {
        out.push('!');
    }

    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(next) if ESCAPABLE.contains(next) => {
                out.push('\\');
                out.push(*next);
                chars.next();
            }
            None if escaped_space => out.push('\\'),
            _ => out.push('/'),
        }
    }
    if escaped_space {
        out.push(' ');
    }

    let prefix = usize::from(negated);
    while out[prefix..].starts_with("./") {
        out.replace_range(prefix..prefix + 2, "");
    }

    out
}

fn ends_with_escaped_backslash(s: &str) -> bool {
    let trailing = s.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 0
}
