use std::fmt;

use serde::{Deserialize, Serialize};

/// A named quantity: a resource amount, a building count or a cost entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value<T> {
    pub name: String,
    pub value: T,
}

impl<T> Value<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Template for a unit of work a worker can carry out.
///
/// `consumes` and `produces` keep their declared order, which is the order
/// requirements are checked in when resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub name: String,
    #[serde(default)]
    pub consumes: Vec<Value<u32>>,
    pub produces: Vec<Value<u32>>,
    #[serde(default)]
    pub requires: Option<String>,
    #[serde(default = "default_duration_ticks")]
    pub duration_ticks: u32,
}

fn default_duration_ticks() -> u32 {
    1
}

impl TaskTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            consumes: Vec::new(),
            produces: Vec::new(),
            requires: None,
            duration_ticks: default_duration_ticks(),
        }
    }

    pub fn consuming(mut self, resource: impl Into<String>, amount: u32) -> Self {
        self.consumes.push(Value::new(resource, amount));
        self
    }

    pub fn producing(mut self, resource: impl Into<String>, amount: u32) -> Self {
        self.produces.push(Value::new(resource, amount));
        self
    }

    pub fn requiring(mut self, building: impl Into<String>) -> Self {
        self.requires = Some(building.into());
        self
    }

    pub fn lasting(mut self, ticks: u32) -> Self {
        self.duration_ticks = ticks;
        self
    }

    pub fn produces_resource(&self, resource: &str) -> bool {
        self.produces.iter().any(|output| output.name == resource)
    }
}

/// A kind of building and what it costs to put one up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingType {
    pub name: String,
    #[serde(default)]
    pub cost: Vec<Value<u32>>,
}

impl BuildingType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: Vec::new(),
        }
    }

    pub fn costing(mut self, resource: impl Into<String>, amount: u32) -> Self {
        self.cost.push(Value::new(resource, amount));
        self
    }
}

/// What the resolver is asked to make progress on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Resource(String),
    Construct(String),
}

impl Target {
    pub fn resource(name: impl Into<String>) -> Self {
        Self::Resource(name.into())
    }

    pub fn construct(building: impl Into<String>) -> Self {
        Self::Construct(building.into())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Resource(name) => write!(f, "{name}"),
            Target::Construct(building) => write!(f, "build:{building}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults_to_single_tick() {
        let task: TaskTemplate = serde_json::from_str(
            r#"{"name": "Collect Wood", "produces": [{"name": "Wood", "value": 1}], "requires": "Forest"}"#,
        )
        .unwrap();

        assert_eq!(task.duration_ticks, 1);
        assert!(task.consumes.is_empty());
        assert_eq!(task.requires.as_deref(), Some("Forest"));
        assert!(task.produces_resource("Wood"));
        assert!(!task.produces_resource("Stone"));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::resource("Pipe").to_string(), "Pipe");
        assert_eq!(Target::construct("House").to_string(), "build:House");
    }
}
