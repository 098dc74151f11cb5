//! Editor-side validation helpers
//!
//! These run in the editor before generation. The generator never consults
//! them; duplicate names or odd times still produce code.

use crate::error::CodegenError;
use crate::model::Automation;
use chrono::NaiveTime;
use std::collections::HashMap;

/// Registry of automation names in use, keyed by name, valued by the id of
/// the block that owns it
///
/// Each owner holds at most one name; claiming a new name releases the
/// previous one.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashMap<String, String>,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a decoded program, reporting every duplicate
    ///
    /// Automations without a block id are keyed by their position.
    pub fn from_program(automations: &[Automation]) -> (Self, Vec<CodegenError>) {
        let mut registry = Self::new();
        let mut errors = Vec::new();

        for (index, automation) in automations.iter().enumerate() {
            let owner = automation
                .id
                .clone()
                .unwrap_or_else(|| format!("#{index}"));
            if let Err(e) = registry.claim(&automation.name, &owner) {
                tracing::debug!("{}", e);
                errors.push(e);
            }
        }

        (registry, errors)
    }

    /// Claim `name` for `owner`
    pub fn claim(&mut self, name: &str, owner: &str) -> Result<(), CodegenError> {
        if let Some(current) = self.names.get(name) {
            if current == owner {
                return Ok(());
            }
            return Err(CodegenError::DuplicateName {
                name: name.to_string(),
                owner: current.clone(),
            });
        }

        self.release(owner);
        self.names.insert(name.to_string(), owner.to_string());
        Ok(())
    }

    /// Release whatever name `owner` holds
    pub fn release(&mut self, owner: &str) {
        self.names.retain(|_, o| o != owner);
    }

    #[must_use]
    pub fn owner_of(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Normalize a user-entered time of day to `HH:MM:SS`
///
/// Returns `None` when no hour was entered. Components that are missing,
/// unparseable or out of range become zero.
#[must_use]
pub fn normalize_time(input: &str) -> Option<String> {
    let parts: Vec<&str> = input.trim().split(':').map(str::trim).collect();
    if parts[0].is_empty() {
        return None;
    }

    let component = |index: usize, max: u32| -> u32 {
        parts
            .get(index)
            .and_then(|part| leading_int(part))
            .and_then(|value| u32::try_from(value).ok())
            .filter(|value| *value <= max)
            .unwrap_or(0)
    };

    let time = NaiveTime::from_hms_opt(component(0, 23), component(1, 59), component(2, 59))?;
    Some(time.format("%H:%M:%S").to_string())
}

/// Parse an optional sign followed by leading digits, ignoring the rest
fn leading_int(s: &str) -> Option<i64> {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Trigger;

    #[test]
    fn test_claim_and_release() {
        let mut registry = NameRegistry::new();
        registry.claim("Morning", "blk-1").unwrap();
        registry.claim("Morning", "blk-1").unwrap();

        let err = registry.claim("Morning", "blk-2").unwrap_err();
        assert!(matches!(
            err,
            CodegenError::DuplicateName { ref name, ref owner } if name == "Morning" && owner == "blk-1"
        ));

        registry.release("blk-1");
        registry.claim("Morning", "blk-2").unwrap();
        assert_eq!(registry.owner_of("Morning"), Some("blk-2"));
    }

    #[test]
    fn test_rename_releases_previous_name() {
        let mut registry = NameRegistry::new();
        registry.claim("Old", "blk-1").unwrap();
        registry.claim("New", "blk-1").unwrap();

        assert_eq!(registry.owner_of("Old"), None);
        assert_eq!(registry.owner_of("New"), Some("blk-1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_from_program_reports_duplicates() {
        let program = vec![
            Automation::new("Lights", Some(Trigger::event("DoorOpenEvent"))).with_id("a"),
            Automation::new("Fan", None).with_id("b"),
            Automation::new("Lights", Some(Trigger::time("08:00"))),
        ];
        let (registry, errors) = NameRegistry::from_program(&program);

        assert_eq!(registry.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Duplicate automation name \"Lights\" (already used by a)"
        );
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time("8:30").as_deref(), Some("08:30:00"));
        assert_eq!(normalize_time(" 18 : 05 : 09 ").as_deref(), Some("18:05:09"));
        assert_eq!(normalize_time("23").as_deref(), Some("23:00:00"));
        assert_eq!(normalize_time("7pm").as_deref(), Some("07:00:00"));
    }

    #[test]
    fn test_normalize_time_clamps_invalid_components() {
        assert_eq!(normalize_time("25:61:99").as_deref(), Some("00:00:00"));
        assert_eq!(normalize_time("-1:30").as_deref(), Some("00:30:00"));
        assert_eq!(normalize_time("ab:cd").as_deref(), Some("00:00:00"));
    }

    #[test]
    fn test_normalize_time_without_hour() {
        assert_eq!(normalize_time(""), None);
        assert_eq!(normalize_time("   "), None);
        assert_eq!(normalize_time(":30"), None);
    }
}
