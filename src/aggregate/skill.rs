//! Skill Entity
//!
//! Internal entity of the trainer account request aggregate. A skill has a
//! local identity, an immutable name and a level that can only go up.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, SkillId, SkillLevel, SkillName};

/// Skill owned by exactly one trainer account request.
///
/// Equality is by identity: two skills with the same name and level built by
/// separate `create` calls are different skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    name: SkillName,
    level: SkillLevel,
}

impl Skill {
    /// Create a new skill with a freshly generated local identity
    pub fn create(name: SkillName, level: SkillLevel) -> Self {
        Self {
            id: SkillId::generate(),
            name,
            level,
        }
    }

    /// Rebuild a skill with a known identity (repository loads)
    pub fn restore(id: SkillId, name: SkillName, level: SkillLevel) -> Self {
        Self { id, name, level }
    }

    /// Raise the level. Equal levels are accepted; a lower level fails and
    /// leaves the skill untouched.
    pub fn upgrade_level(&mut self, new_level: SkillLevel) -> Result<(), DomainError> {
        if !new_level.is_at_least(self.level) {
            return Err(DomainError::skill_cannot_downgrade(
                self.name.as_str(),
                self.level,
                new_level,
            ));
        }

        self.level = new_level;
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &SkillId {
        &self.id
    }

    pub fn name(&self) -> &SkillName {
        &self.name
    }

    pub fn level(&self) -> SkillLevel {
        self.level
    }
}

impl PartialEq for Skill {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Skill {}

impl std::hash::Hash for Skill {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
