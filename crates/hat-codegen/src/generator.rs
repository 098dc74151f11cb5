//! Code generator entry points

use crate::model::Automation;
use crate::order::Order;
use crate::policy::Quoting;
use serde::{Deserialize, Serialize};

/// Generator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Quoting applied to every string literal written by the generator
    #[serde(default)]
    pub quoting: Quoting,
}

/// Code for one expression together with its binding strength
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub code: String,
    pub order: Order,
}

impl Emitted {
    pub fn new(code: impl Into<String>, order: Order) -> Self {
        Self {
            code: code.into(),
            order,
        }
    }

    pub fn atomic(code: impl Into<String>) -> Self {
        Self::new(code, Order::Atomic)
    }

    /// Code suitable as an operand of an operator at level `outer`
    #[must_use]
    pub fn within(self, outer: Order) -> String {
        if self.order.needs_parens_within(outer) {
            format!("({})", self.code)
        } else {
            self.code
        }
    }
}

/// Emits Hat source text from an automation program
///
/// Emission is a pure function of the input tree: the generator holds no
/// state besides its configuration, and every absent input is replaced by a
/// fallback value instead of failing.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    pub(crate) config: GeneratorConfig,
}

impl CodeGenerator {
    /// Create a new generator
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Emit a whole program: every automation in order, each followed by a
    /// blank line
    #[must_use]
    pub fn emit_program(&self, automations: &[Automation]) -> String {
        let code: String = automations
            .iter()
            .map(|automation| self.emit_automation(automation))
            .collect();

        tracing::debug!(
            "Generated {} automations ({} bytes)",
            automations.len(),
            code.len()
        );
        code
    }

    pub(crate) fn quote(&self, text: &str) -> String {
        self.config.quoting.quote(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, Expr, Function, Trigger};
    use hat_devices::DeviceHandle;

    fn sample(name: &str, event: &str) -> Automation {
        Automation::new(name, Some(Trigger::event(event))).with_action(Action::run(Expr::call(
            Function::ToggleDevice,
            vec![Some(Expr::device(DeviceHandle::new("hass", "light.x")))],
        )))
    }

    #[test]
    fn test_program_is_concatenation() {
        let generator = CodeGenerator::default();
        let a1 = sample("A1", "DoorOpenEvent");
        let a2 = sample("A2", "DoorCloseEvent");

        let program = generator.emit_program(&[a1.clone(), a2.clone()]);
        assert_eq!(
            program,
            generator.emit_automation(&a1) + &generator.emit_automation(&a2)
        );
        assert!(program.find("\"A1\"").unwrap() < program.find("\"A2\"").unwrap());
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(CodeGenerator::default().emit_program(&[]), "");
    }

    #[test]
    fn test_emission_is_deterministic() {
        let generator = CodeGenerator::default();
        let program = vec![sample("A1", "DoorOpenEvent"), sample("A2", "LightOnEvent")];
        assert_eq!(generator.emit_program(&program), generator.emit_program(&program));
    }

    #[test]
    fn test_within_parenthesizes_looser_operands() {
        assert_eq!(Emitted::atomic("1").within(Order::Arithmetic), "1");
        assert_eq!(
            Emitted::new("1 + 2", Order::Arithmetic).within(Order::Arithmetic),
            "(1 + 2)"
        );
        assert_eq!(
            Emitted::new("1 + 2", Order::Arithmetic).within(Order::Relational),
            "1 + 2"
        );
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GeneratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.quoting, Quoting::Verbatim);

        let config: GeneratorConfig = serde_json::from_str(r#"{"quoting":"escaped"}"#).unwrap();
        assert_eq!(config.quoting, Quoting::Escaped);
    }
}
