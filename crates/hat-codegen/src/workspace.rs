//! Decoding of the editor's serialized workspace
//!
//! The editor saves its workspace as JSON: a list of top-level blocks, each
//! with `fields`, named `inputs` holding a connected (or shadow) block, and a
//! `next` link for statement chains. Only malformed JSON is an error; unknown
//! blocks and operators decode as unconnected inputs.

use crate::error::CodegenError;
use crate::model::{Action, Automation, BinaryOperator, Condition, Expr, Function, Trigger};
use hat_devices::DeviceHandle;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Serialized workspace root
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceState {
    #[serde(default)]
    pub blocks: TopBlocks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopBlocks {
    #[serde(default)]
    pub blocks: Vec<BlockState>,
}

/// One serialized block
#[derive(Debug, Clone, Deserialize)]
pub struct BlockState {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default)]
    pub inputs: HashMap<String, ConnectionState>,
    #[serde(default)]
    pub next: Option<Box<ConnectionState>>,
}

/// Whatever is plugged into an input or `next` connection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionState {
    #[serde(default)]
    pub block: Option<BlockState>,
    #[serde(default)]
    pub shadow: Option<BlockState>,
}

impl ConnectionState {
    /// The connected block, falling back to the shadow block
    pub fn target(&self) -> Option<&BlockState> {
        self.block.as_ref().or(self.shadow.as_ref())
    }
}

impl BlockState {
    /// Text of a field; numbers and booleans are rendered as text
    pub fn field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Block connected to an input
    pub fn input(&self, name: &str) -> Option<&BlockState> {
        self.inputs.get(name)?.target()
    }

    /// Next block in a statement chain
    pub fn next_block(&self) -> Option<&BlockState> {
        self.next.as_ref()?.target()
    }
}

/// Parse a serialized workspace and decode its automations
pub fn decode_workspace(json: &str) -> Result<Vec<Automation>, CodegenError> {
    let state: WorkspaceState = serde_json::from_str(json)?;
    Ok(decode_automations(&state))
}

/// Decode every top-level automation block, in workspace order
pub fn decode_automations(state: &WorkspaceState) -> Vec<Automation> {
    state
        .blocks
        .blocks
        .iter()
        .filter_map(|block| {
            let automation = decode_automation(block);
            if automation.is_none() {
                tracing::debug!(
                    "Ignoring top-level {} block outside any automation",
                    block.block_type
                );
            }
            automation
        })
        .collect()
}

/// Decode an `automation` or `automation_time_based` block
pub fn decode_automation(block: &BlockState) -> Option<Automation> {
    let trigger = match block.block_type.as_str() {
        "automation" => block.input("EVENT").and_then(decode_trigger),
        "automation_time_based" => block.field("TIME0").map(Trigger::time),
        _ => return None,
    };

    let (conditions, actions) = decode_body(block.input("ACTIONS"));
    Some(Automation {
        id: block.id.clone(),
        name: block.field("NAME").unwrap_or_default(),
        trigger,
        condition: block.input("CONDITIONS").and_then(decode_expr),
        conditions,
        actions,
    })
}

fn decode_trigger(block: &BlockState) -> Option<Trigger> {
    // `event_date` / `event_time` are value blocks, not events
    let event = match function_block(&block.block_type) {
        Some(_) => None,
        None => block.block_type.strip_prefix("event_"),
    };
    let Some(event) = event else {
        tracing::warn!("Unknown event block type: {}", block.block_type);
        return None;
    };

    match block.input("DEVICE").and_then(decode_device) {
        Some(device) => Some(Trigger::device_event(event, device)),
        None => Some(Trigger::event(event)),
    }
}

fn decode_device(block: &BlockState) -> Option<DeviceHandle> {
    let handle = if block.block_type == "device" {
        let integration = block.field("INTEGRATION")?;
        let device_id = block.field("DEVICE")?;
        DeviceHandle::try_new(integration, device_id)
    } else {
        block.block_type.strip_prefix("device_")?.parse()
    };

    match handle {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Invalid device block {}: {}", block.block_type, e);
            None
        }
    }
}

/// Walk a statement chain, splitting `condition` guards from actions
fn decode_body(first: Option<&BlockState>) -> (Vec<Condition>, Vec<Action>) {
    let mut conditions = Vec::new();
    let mut actions = Vec::new();
    let mut current = first;
    while let Some(block) = current {
        match block.block_type.as_str() {
            "condition" => {
                let expr = block.input("CONDITION").and_then(decode_expr);
                conditions.push(Condition::new(expr));
            }
            "action" => actions.push(Action {
                call: block.input("ACTION").and_then(decode_expr),
            }),
            "action_turn_on_device" => {
                actions.push(device_action(Function::TurnOnDevice, block));
            }
            "action_turn_off_device" => {
                actions.push(device_action(Function::TurnOffDevice, block));
            }
            other => tracing::warn!("Unknown statement block type: {}", other),
        }
        current = block.next_block();
    }
    (conditions, actions)
}

fn device_action(function: Function, block: &BlockState) -> Action {
    let device = block.input("NAME").and_then(decode_device).map(Expr::device);
    Action::run(Expr::call(function, vec![device]))
}

/// Decode a value block; `None` means "nothing usable connected"
pub fn decode_expr(block: &BlockState) -> Option<Expr> {
    let value = |name: &str| block.input(name).and_then(decode_expr);

    let expr = match block.block_type.as_str() {
        "const_string" => Expr::string(block.field("VALUE").unwrap_or_default()),
        "const_number" => {
            let number = block
                .fields
                .get("VALUE")
                .and_then(number_field)
                .unwrap_or_default();
            Expr::number(number)
        }
        "const_boolean" => Expr::boolean(block.field("VALUE").as_deref() == Some("true")),
        "const_null" => Expr::null(),
        "arithmetic_operation" | "comparison_operation" | "logical_operation" => {
            let op = block.field("OP").and_then(|op| operator(&op));
            let Some(op) = op else {
                tracing::warn!(
                    "Unrecognized operator {:?} in {} block",
                    block.field("OP"),
                    block.block_type
                );
                return None;
            };
            Expr::binary(op, value("LEFT"), value("RIGHT"))
        }
        "condition_and" => {
            Expr::binary(BinaryOperator::And, value("CONDITION1"), value("CONDITION2"))
        }
        "logical_not" => Expr::not(value("VALUE")),
        "condition_event_was_from_device" => {
            let device = block.input("NAME").and_then(decode_device);
            Expr::binary(
                BinaryOperator::Equals,
                Some(Expr::call(Function::GetDevice, vec![])),
                device.map(|d| Expr::string(d.to_string())),
            )
        }
        other => {
            // Function blocks first: `device_status` shares the device prefix
            if let Some(function) = function_block(other) {
                let args = function_inputs(function)
                    .iter()
                    .map(|name| value(*name))
                    .collect();
                Expr::call(function, args)
            } else if let Some(device) = decode_device(block) {
                Expr::device(device)
            } else {
                tracing::warn!("Unknown value block type: {}", other);
                return None;
            }
        }
    };
    Some(expr)
}

fn number_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn operator(token: &str) -> Option<BinaryOperator> {
    match token {
        "ADD" => Some(BinaryOperator::Add),
        "SUB" => Some(BinaryOperator::Subtract),
        "MUL" => Some(BinaryOperator::Multiply),
        "DIV" => Some(BinaryOperator::Divide),
        "GREATER" => Some(BinaryOperator::Greater),
        "LESSER" => Some(BinaryOperator::Lesser),
        "EQUALS" => Some(BinaryOperator::Equals),
        "AND" => Some(BinaryOperator::And),
        "OR" => Some(BinaryOperator::Or),
        _ => None,
    }
}

fn function_block(block_type: &str) -> Option<Function> {
    let function = match block_type {
        "get_device" => Function::GetDevice,
        "get_integration" => Function::GetIntegration,
        "event_date" => Function::EventDate,
        "event_time" => Function::EventTime,
        "time_function" => Function::Time,
        "turn_on_device" => Function::TurnOnDevice,
        "turn_off_device" => Function::TurnOffDevice,
        "device_status" => Function::DeviceStatus,
        "set_device_temperature" => Function::SetDeviceTemperature,
        "toggle_device" => Function::ToggleDevice,
        "is_device_on" => Function::IsDeviceOn,
        "is_device_off" => Function::IsDeviceOff,
        "get_device_state" => Function::GetDeviceState,
        "number" => Function::Number,
        "echo" => Function::Echo,
        _ => return None,
    };
    Some(function)
}

/// Input names of a function block, in argument order
fn function_inputs(function: Function) -> &'static [&'static str] {
    match function {
        Function::GetDevice | Function::GetIntegration | Function::EventDate | Function::EventTime => {
            &[]
        }
        Function::Time => &["TIME_STRING"],
        Function::TurnOnDevice
        | Function::TurnOffDevice
        | Function::DeviceStatus
        | Function::ToggleDevice
        | Function::IsDeviceOn
        | Function::IsDeviceOff
        | Function::GetDeviceState => &["DEVICE_ID"],
        Function::SetDeviceTemperature => &["DEVICE_ID", "TEMPERATURE"],
        Function::Number => &["VALUE"],
        Function::Echo => &["ACTION"],
    }
}
