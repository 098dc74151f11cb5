//! Automation emission

use crate::generator::CodeGenerator;
use crate::model::{Automation, BinaryOperator, Condition, Expr, Function, Trigger};
use hat_devices::{DeviceHandle, EventKind};

/// Trigger token written when an automation has no usable trigger
const MISSING_TRIGGER: &str = "None";

impl CodeGenerator {
    /// Emit one complete `automation` block, followed by a blank line
    #[must_use]
    pub fn emit_automation(&self, automation: &Automation) -> String {
        let (trigger, guard) = self.emit_trigger(automation.trigger.as_ref());

        let mut code = format!(
            "automation {} ({}) {{\n",
            self.quote(&automation.name),
            trigger
        );
        if let Some(guard) = guard {
            code.push_str(&guard);
        }
        if let Some(condition) = &automation.condition {
            code.push_str(&self.emit_condition(&Condition {
                expr: Some(condition.clone()),
            }));
        }
        for guard in &automation.conditions {
            code.push_str(&self.emit_condition(guard));
        }
        code.push_str(&self.emit_body(&automation.actions));
        code.push_str("}\n\n");
        code
    }

    /// Resolve the trigger token and the implicit guard line it carries
    fn emit_trigger(&self, trigger: Option<&Trigger>) -> (String, Option<String>) {
        match trigger {
            None => (MISSING_TRIGGER.to_string(), None),
            Some(Trigger::Event { event }) => (event_token(event), None),
            Some(Trigger::DeviceEvent { event, device }) => {
                (event_token(event), Some(self.device_guard(device)))
            }
            Some(Trigger::Time { time }) => (
                EventKind::ClockTickEvent.name().to_string(),
                Some(self.time_guard(time)),
            ),
        }
    }

    /// `if (get_device() == "<handle>")`
    fn device_guard(&self, device: &DeviceHandle) -> String {
        let matches_device = Expr::binary(
            BinaryOperator::Equals,
            Some(Expr::call(Function::GetDevice, vec![])),
            Some(Expr::string(device.to_string())),
        );
        format!("if ({})\n", self.emit_expr(&matches_device).code)
    }

    /// `if event_time() == time("<time>")`
    fn time_guard(&self, time: &str) -> String {
        let at_time = Expr::binary(
            BinaryOperator::Equals,
            Some(Expr::call(Function::EventTime, vec![])),
            Some(Expr::call(Function::Time, vec![Some(Expr::string(time))])),
        );
        self.emit_condition(&Condition {
            expr: Some(at_time),
        })
    }
}

fn event_token(event: &str) -> String {
    if event.is_empty() {
        MISSING_TRIGGER.to_string()
    } else {
        event.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::{CodeGenerator, GeneratorConfig};
    use crate::model::{Action, Automation, BinaryOperator, Condition, Expr, Function, Trigger};
    use crate::policy::Quoting;
    use hat_devices::DeviceHandle;

    fn emit(automation: &Automation) -> String {
        CodeGenerator::default().emit_automation(automation)
    }

    fn turn_on(integration: &str, id: &str) -> Action {
        Action::run(Expr::call(
            Function::TurnOnDevice,
            vec![Some(Expr::device(DeviceHandle::new(integration, id)))],
        ))
    }

    #[test]
    fn test_trivial_automation() {
        let automation = Automation::new("A", Some(Trigger::event("DoorOpenEvent")))
            .with_action(turn_on("hass", "light.x"));
        assert_eq!(
            emit(&automation),
            "automation \"A\" (DoorOpenEvent) {\nrun turn_on_device(\"hass@light.x\")\n}\n\n"
        );
    }

    #[test]
    fn test_device_event_adds_guard_before_actions() {
        let automation = Automation::new(
            "Motion",
            Some(Trigger::device_event(
                "motion_detected",
                DeviceHandle::new("hass", "sensor.y"),
            )),
        )
        .with_action(turn_on("hass", "light.x"));

        assert_eq!(
            emit(&automation),
            "automation \"Motion\" (motion_detected) {\n\
             if (get_device() == \"hass@sensor.y\")\n\
             run turn_on_device(\"hass@light.x\")\n\
             }\n\n"
        );
    }

    #[test]
    fn test_time_trigger_desugars_to_clock_tick() {
        let automation = Automation::new("Morning", Some(Trigger::time("08:30")))
            .with_action(turn_on("hass", "light.x"));
        let code = emit(&automation);

        assert!(code.starts_with("automation \"Morning\" (ClockTickEvent) {\n"));
        assert!(code.contains("\nif event_time() == time(\"08:30\")\n"));
    }

    #[test]
    fn test_guard_precedes_user_condition() {
        let condition = Expr::call(
            Function::IsDeviceOff,
            vec![Some(Expr::device(DeviceHandle::new("hass", "light.x")))],
        );
        let automation = Automation::new("Evening", Some(Trigger::time("18:00")))
            .with_condition(condition)
            .with_action(turn_on("hass", "light.x"));

        assert_eq!(
            emit(&automation),
            "automation \"Evening\" (ClockTickEvent) {\n\
             if event_time() == time(\"18:00\")\n\
             if is_device_off(\"hass@light.x\")\n\
             run turn_on_device(\"hass@light.x\")\n\
             }\n\n"
        );
    }

    #[test]
    fn test_body_guards_follow_user_condition() {
        let automation = Automation::new("G", Some(Trigger::event("DoorOpenEvent")))
            .with_condition(Expr::boolean(true))
            .with_guard(Condition::new(Some(Expr::boolean(false))))
            .with_guard(Condition::new(None))
            .with_action(turn_on("hass", "light.x"));

        assert_eq!(
            emit(&automation),
            "automation \"G\" (DoorOpenEvent) {\n\
             if true\n\
             if false\n\
             if false\n\
             run turn_on_device(\"hass@light.x\")\n\
             }\n\n"
        );
    }

    #[test]
    fn test_missing_trigger_emits_none() {
        let automation = Automation::new("Orphan", None).with_action(turn_on("hass", "light.x"));
        assert!(emit(&automation).starts_with("automation \"Orphan\" (None) {\nrun "));

        let empty_event = Automation::new("Blank", Some(Trigger::event("")));
        assert_eq!(emit(&empty_event), "automation \"Blank\" (None) {\n}\n\n");
    }

    #[test]
    fn test_empty_action_list() {
        let automation = Automation::new("Nothing", Some(Trigger::event("LightOnEvent")));
        assert_eq!(
            emit(&automation),
            "automation \"Nothing\" (LightOnEvent) {\n}\n\n"
        );
    }

    #[test]
    fn test_condition_with_logical_operator() {
        let condition = Expr::binary(
            BinaryOperator::Or,
            Some(Expr::boolean(true)),
            None,
        );
        let automation =
            Automation::new("C", Some(Trigger::event("DoorOpenEvent"))).with_condition(condition);
        assert_eq!(
            emit(&automation),
            "automation \"C\" (DoorOpenEvent) {\nif (true) or (false)\n}\n\n"
        );
    }

    #[test]
    fn test_escaped_name_cannot_break_the_header_line() {
        let generator = CodeGenerator::new(GeneratorConfig {
            quoting: Quoting::Escaped,
        });
        let automation = Automation::new("a\"\nrun evil()", Some(Trigger::event("X")));
        assert_eq!(
            generator.emit_automation(&automation),
            "automation \"a\\\"\\nrun evil()\" (X) {\n}\n\n"
        );
    }

    #[test]
    fn test_escaped_quoting_covers_name_and_guard() {
        let generator = CodeGenerator::new(GeneratorConfig {
            quoting: Quoting::Escaped,
        });
        let automation = Automation::new(
            r#"The "big" one"#,
            Some(Trigger::device_event(
                "DoorOpenEvent",
                DeviceHandle::new("hass", r#"door"1"#),
            )),
        );
        assert_eq!(
            generator.emit_automation(&automation),
            "automation \"The \\\"big\\\" one\" (DoorOpenEvent) {\n\
             if (get_device() == \"hass@door\\\"1\")\n\
             }\n\n"
        );
    }
}
