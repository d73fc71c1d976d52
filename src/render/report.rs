//! Per-element and per-rule outcomes of best-effort rewrites.

use std::fmt;

/// The outcome of rewriting a single element or rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The rewrite took place.
    Applied,
    /// The subject was left untouched, with the reason why.
    Skipped(String),
}

impl RewriteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// A single entry of a [`RewriteReport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewrite {
    subject: String,
    outcome: RewriteOutcome,
}

impl Rewrite {
    /// What was rewritten: a selector list, an at-rule name, or an image `src`.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn outcome(&self) -> &RewriteOutcome {
        &self.outcome
    }
}

impl fmt::Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            RewriteOutcome::Applied => write!(f, "applied: {}", self.subject),
            RewriteOutcome::Skipped(reason) => write!(f, "skipped: {} ({reason})", self.subject),
        }
    }
}

/// Aggregated outcomes of a rewrite pass, in the order they occurred.
///
/// # Examples
/// ```
/// use epub_ingest::render::CssScoper;
/// use epub_ingest::IngestOptions;
///
/// let scoper = CssScoper::new(&IngestOptions::default());
/// let scoped = scoper.scope("p { margin: 0 } @page { margin: 1em }");
///
/// assert_eq!(1, scoped.report.applied().count());
/// assert_eq!(1, scoped.report.skipped().count());
/// assert!(!scoped.report.is_clean());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteReport {
    entries: Vec<Rewrite>,
}

impl RewriteReport {
    pub(crate) fn record(&mut self, subject: impl Into<String>, outcome: RewriteOutcome) {
        self.entries.push(Rewrite {
            subject: subject.into(),
            outcome,
        });
    }

    /// Every entry whose rewrite took place.
    pub fn applied(&self) -> impl Iterator<Item = &Rewrite> + '_ {
        self.iter().filter(|entry| entry.outcome.is_applied())
    }

    /// Every entry that was left untouched.
    pub fn skipped(&self) -> impl Iterator<Item = &Rewrite> + '_ {
        self.iter().filter(|entry| entry.outcome.is_skipped())
    }

    /// Returns `true` if no entry was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped().next().is_none()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rewrite> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RewriteReport {
    type Item = &'a Rewrite;
    type IntoIter = std::slice::Iter<'a, Rewrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
