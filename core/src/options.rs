use crate::error::LeapError;
use crate::error::Result;

/// Independent switches that shape one search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub forward: bool,
    pub backward: bool,
    /// Search every visible view instead of only the focused one.
    pub all_editors: bool,
    /// Force a case-sensitive scan even for an all-lowercase anchor.
    pub case_sensitive: bool,
}

impl SearchOptions {
    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    pub fn backward() -> Self {
        Self {
            backward: true,
            ..Self::default()
        }
    }

    pub fn bidirectional() -> Self {
        Self {
            forward: true,
            backward: true,
            ..Self::default()
        }
    }

    pub fn with_all_editors(mut self, all_editors: bool) -> Self {
        self.all_editors = all_editors;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.forward && !self.backward {
            return Err(LeapError::NoDirection);
        }
        Ok(())
    }

    /// Typing any uppercase character in the anchor opts into a
    /// case-sensitive scan for that search.
    pub fn is_case_sensitive(&self, anchor: &str) -> bool {
        self.case_sensitive || anchor.to_lowercase() != anchor
    }
}
