//! The module data model — a unit of work with named, typed input/output
//! slots.
//!
//! A [`ModuleSpec`] declares the slots in order; a [`Module`] carries the
//! current values for one execution. The split keeps declarations shareable
//! and iteration order deterministic, which the processing pipeline relies
//! on.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::RuntimeError;
use crate::result::RuntimeResult;

/// The value type a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A boolean value.
    Bool,
    /// A signed integer value.
    Int,
    /// A floating-point value.
    Float,
    /// A text value.
    Text,
    /// Any JSON value.
    Json,
}

impl ItemKind {
    /// Returns the string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Returns whether `value` is acceptable for this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Text => value.is_string(),
            Self::Json => true,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named, typed input or output slot of a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleItem {
    /// Slot name, unique within its direction.
    pub name: String,
    /// The value type the slot accepts.
    pub kind: ItemKind,
    /// Whether a value must be present before the module body runs.
    pub required: bool,
    /// Default value applied when no value was supplied.
    pub default: Option<Value>,
    /// Human-readable description.
    pub description: String,
}

impl ModuleItem {
    /// Creates a required slot.
    pub fn required(name: &str, kind: ItemKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
            default: None,
            description: String::new(),
        }
    }

    /// Creates an optional slot.
    pub fn optional(name: &str, kind: ItemKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Ordered slot declarations for one kind of module.
///
/// Input order is load-bearing: processors that walk the inputs (default
/// filling, required-input checking) do so in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Module name.
    pub name: String,
    /// Input slot declarations, in order.
    pub inputs: Vec<ModuleItem>,
    /// Output slot declarations, in order.
    pub outputs: Vec<ModuleItem>,
}

impl ModuleSpec {
    /// Creates an empty spec with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Appends an input declaration.
    pub fn with_input(mut self, item: ModuleItem) -> Self {
        self.inputs.push(item);
        self
    }

    /// Appends an output declaration.
    pub fn with_output(mut self, item: ModuleItem) -> Self {
        self.outputs.push(item);
        self
    }

    /// Looks up an input declaration by name.
    pub fn input(&self, name: &str) -> Option<&ModuleItem> {
        self.inputs.iter().find(|item| item.name == name)
    }

    /// Looks up an output declaration by name.
    pub fn output(&self, name: &str) -> Option<&ModuleItem> {
        self.outputs.iter().find(|item| item.name == name)
    }
}

/// Execution status of one module run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// The module has not executed yet.
    Pending,
    /// A processor canceled the execution.
    Canceled,
    /// The module body ran to completion.
    Complete,
}

/// One unit of work: slot values plus execution status for a single run.
///
/// The runner owns the instance exclusively for the duration of one
/// execution; the `&mut` methods encode that ownership. Status transitions
/// are one-way: once [`ModuleStatus::Canceled`], the status never changes
/// again; once [`ModuleStatus::Complete`], only output values may still be
/// written.
#[derive(Debug)]
pub struct Module {
    id: Uuid,
    spec: Arc<ModuleSpec>,
    inputs: HashMap<String, Value>,
    outputs: HashMap<String, Value>,
    status: ModuleStatus,
    cancel_reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl Module {
    /// Creates a pending module for the given spec with no values set.
    pub fn new(spec: Arc<ModuleSpec>) -> Self {
        Self {
            id: Uuid::new_v4(),
            spec,
            inputs: HashMap::new(),
            outputs: HashMap::new(),
            status: ModuleStatus::Pending,
            cancel_reason: None,
            created_at: Utc::now(),
        }
    }

    /// Unique identifier of this run.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The slot declarations.
    pub fn spec(&self) -> &Arc<ModuleSpec> {
        &self.spec
    }

    /// Current execution status.
    pub fn status(&self) -> ModuleStatus {
        self.status
    }

    /// The cancellation reason, if a processor canceled this run.
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    /// When this module instance was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether this run was canceled.
    pub fn is_canceled(&self) -> bool {
        self.status == ModuleStatus::Canceled
    }

    /// Current value of an input slot.
    pub fn input(&self, name: &str) -> Option<&Value> {
        self.inputs.get(name)
    }

    /// Current value of an output slot.
    pub fn output(&self, name: &str) -> Option<&Value> {
        self.outputs.get(name)
    }

    /// All set input values.
    pub fn inputs(&self) -> &HashMap<String, Value> {
        &self.inputs
    }

    /// All set output values.
    pub fn outputs(&self) -> &HashMap<String, Value> {
        &self.outputs
    }

    /// Sets an input value.
    ///
    /// Inputs are writable only while the module is pending; the slot must
    /// be declared and the value must match its kind.
    pub fn set_input(&mut self, name: &str, value: Value) -> RuntimeResult<()> {
        if self.status != ModuleStatus::Pending {
            return Err(RuntimeError::validation(format!(
                "Cannot set input '{}': module '{}' is no longer pending",
                name, self.spec.name
            )));
        }
        let item = self.spec.input(name).ok_or_else(|| {
            RuntimeError::validation(format!(
                "Module '{}' declares no input named '{}'",
                self.spec.name, name
            ))
        })?;
        if !item.kind.accepts(&value) {
            return Err(RuntimeError::validation(format!(
                "Input '{}' expects a {} value",
                name, item.kind
            )));
        }
        self.inputs.insert(name.to_string(), value);
        Ok(())
    }

    /// Sets an output value.
    ///
    /// Outputs remain writable after completion (resolved output values) but
    /// not after cancellation.
    pub fn set_output(&mut self, name: &str, value: Value) -> RuntimeResult<()> {
        if self.status == ModuleStatus::Canceled {
            return Err(RuntimeError::validation(format!(
                "Cannot set output '{}': module '{}' was canceled",
                name, self.spec.name
            )));
        }
        let item = self.spec.output(name).ok_or_else(|| {
            RuntimeError::validation(format!(
                "Module '{}' declares no output named '{}'",
                self.spec.name, name
            ))
        })?;
        if !item.kind.accepts(&value) {
            return Err(RuntimeError::validation(format!(
                "Output '{}' expects a {} value",
                name, item.kind
            )));
        }
        self.outputs.insert(name.to_string(), value);
        Ok(())
    }

    /// Marks this run canceled with a reason.
    ///
    /// The first cancellation wins; later calls neither clear the status nor
    /// replace the recorded reason.
    pub fn cancel(&mut self, reason: impl Into<String>) {
        if self.status == ModuleStatus::Canceled {
            return;
        }
        self.status = ModuleStatus::Canceled;
        self.cancel_reason = Some(reason.into());
    }

    /// Marks a pending run complete. Has no effect on a canceled run.
    pub fn mark_complete(&mut self) {
        if self.status == ModuleStatus::Pending {
            self.status = ModuleStatus::Complete;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn greeting_spec() -> Arc<ModuleSpec> {
        Arc::new(
            ModuleSpec::new("greeting")
                .with_input(ModuleItem::required("name", ItemKind::Text))
                .with_input(
                    ModuleItem::optional("shout", ItemKind::Bool).with_default(json!(false)),
                )
                .with_output(ModuleItem::optional("message", ItemKind::Text)),
        )
    }

    #[test]
    fn test_set_input_checks_declaration_and_kind() {
        let mut module = Module::new(greeting_spec());
        module.set_input("name", json!("world")).unwrap();
        assert_eq!(module.input("name"), Some(&json!("world")));

        assert!(module.set_input("nope", json!(1)).is_err());
        assert!(module.set_input("shout", json!("loud")).is_err());
    }

    #[test]
    fn test_cancel_is_sticky_and_first_reason_wins() {
        let mut module = Module::new(greeting_spec());
        module.cancel("first");
        module.cancel("second");
        module.mark_complete();
        assert_eq!(module.status(), ModuleStatus::Canceled);
        assert_eq!(module.cancel_reason(), Some("first"));
    }

    #[test]
    fn test_outputs_writable_after_completion_but_not_inputs() {
        let mut module = Module::new(greeting_spec());
        module.set_input("name", json!("world")).unwrap();
        module.mark_complete();
        assert_eq!(module.status(), ModuleStatus::Complete);

        module.set_output("message", json!("Hello, world")).unwrap();
        assert!(module.set_input("name", json!("other")).is_err());
    }

    #[test]
    fn test_outputs_not_writable_after_cancellation() {
        let mut module = Module::new(greeting_spec());
        module.cancel("stop");
        assert!(module.set_output("message", json!("late")).is_err());
    }
}
