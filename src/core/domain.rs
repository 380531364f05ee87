use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::error::{ChartError, ChartResult};

/// Ordered source rank of a proposed range. Higher ranks win conflicts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum DomainPriority {
    /// Fallback range computed before anything better is known.
    #[default]
    Placeholder,
    /// Range set by host code (initial load, external API call).
    Programmatic,
    /// Range chosen by the user through a gesture or brush.
    UserGenerated,
}

/// Closed time interval tagged with the priority of whoever proposed it.
///
/// Domains are immutable values: every transformation returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    start: f64,
    end: f64,
    priority: DomainPriority,
}

impl Domain {
    pub fn new(start: f64, end: f64, priority: DomainPriority) -> ChartResult<Self> {
        let start = ensure_finite(start, "domain start")?;
        let end = ensure_finite(end, "domain end")?;
        if start > end {
            return Err(ChartError::InvalidRange { start, end });
        }

        Ok(Self {
            start,
            end,
            priority,
        })
    }

    pub fn from_range(range: (f64, f64), priority: DomainPriority) -> ChartResult<Self> {
        Self::new(range.0, range.1, priority)
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn priority(self) -> DomainPriority {
        self.priority
    }

    #[must_use]
    pub fn as_range(self) -> (f64, f64) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    #[must_use]
    pub fn with_priority(self, priority: DomainPriority) -> Self {
        Self { priority, ..self }
    }
}

/// Picks the candidate with the highest priority.
///
/// `None` entries are skipped. On equal priorities the earliest candidate wins,
/// so callers list the source they prefer on ties first.
#[must_use]
pub fn highest_priority_domain<I>(candidates: I) -> Option<Domain>
where
    I: IntoIterator<Item = Option<Domain>>,
{
    candidates
        .into_iter()
        .flatten()
        .fold(None, |best: Option<Domain>, candidate| match best {
            Some(current) if current.priority >= candidate.priority => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_ordered() {
        assert!(DomainPriority::Placeholder < DomainPriority::Programmatic);
        assert!(DomainPriority::Programmatic < DomainPriority::UserGenerated);
    }

    #[test]
    fn with_priority_keeps_bounds() {
        let domain = Domain::new(1.0, 4.0, DomainPriority::Placeholder).expect("domain");
        let promoted = domain.with_priority(DomainPriority::UserGenerated);
        assert_eq!(promoted.as_range(), (1.0, 4.0));
        assert_eq!(promoted.priority(), DomainPriority::UserGenerated);
        assert_eq!(domain.priority(), DomainPriority::Placeholder);
    }
}
