//! Ordered collection of requirements.

use crate::error::Result;

use super::config::{ConfigCheck, ConfigSource};
use super::requirement::Requirement;

/// An ordered set of requirements and recommendations.
///
/// Insertion order is kept so reports are stable; every view is a fresh
/// filter over the underlying sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementCollection {
    requirements: Vec<Requirement>,
}

impl RequirementCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a requirement.
    pub fn add(&mut self, requirement: Requirement) {
        self.requirements.push(requirement);
    }

    /// Add a mandatory requirement.
    pub fn add_requirement(
        &mut self,
        fulfilled: bool,
        test_message: impl Into<String>,
        help_html: impl Into<String>,
        help_text: Option<String>,
    ) {
        self.add(Requirement::new(
            fulfilled,
            test_message,
            help_html,
            help_text,
            false,
        ));
    }

    /// Add an optional recommendation.
    pub fn add_recommendation(
        &mut self,
        fulfilled: bool,
        test_message: impl Into<String>,
        help_html: impl Into<String>,
        help_text: Option<String>,
    ) {
        self.add(Requirement::new(
            fulfilled,
            test_message,
            help_html,
            help_text,
            true,
        ));
    }

    /// Evaluate `check` against `source` and add it as a mandatory requirement.
    pub fn add_config_requirement(
        &mut self,
        source: &dyn ConfigSource,
        check: ConfigCheck<'_>,
    ) -> Result<()> {
        let requirement = check.evaluate(source, false)?;
        self.add(requirement);
        Ok(())
    }

    /// Evaluate `check` against `source` and add it as a recommendation.
    pub fn add_config_recommendation(
        &mut self,
        source: &dyn ConfigSource,
        check: ConfigCheck<'_>,
    ) -> Result<()> {
        let requirement = check.evaluate(source, true)?;
        self.add(requirement);
        Ok(())
    }

    /// Append every entry of `other`, keeping its order.
    pub fn add_collection(&mut self, other: &RequirementCollection) {
        self.requirements.extend(other.requirements.iter().cloned());
    }

    /// Both requirements and recommendations.
    pub fn all(&self) -> &[Requirement] {
        &self.requirements
    }

    /// All mandatory requirements.
    pub fn requirements(&self) -> Vec<&Requirement> {
        self.filter(|r| !r.is_optional())
    }

    /// Mandatory requirements that were not met.
    pub fn failed_requirements(&self) -> Vec<&Requirement> {
        self.filter(|r| !r.is_optional() && !r.is_fulfilled())
    }

    /// All optional recommendations.
    pub fn recommendations(&self) -> Vec<&Requirement> {
        self.filter(|r| r.is_optional())
    }

    /// Recommendations that were not met.
    pub fn failed_recommendations(&self) -> Vec<&Requirement> {
        self.filter(|r| r.is_optional() && !r.is_fulfilled())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the collection holds no entries.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    fn filter(&self, keep: impl Fn(&Requirement) -> bool) -> Vec<&Requirement> {
        self.requirements.iter().filter(|r| keep(r)).collect()
    }
}
