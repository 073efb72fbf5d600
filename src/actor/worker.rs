use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{actor::inventory::Inventory, blueprint::model::TaskTemplate};

/// How a finished task's consumption is charged against the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectPolicy {
    /// Add every product, then deduct every input exactly once.
    #[default]
    SinglePass,
    /// Deduct every input once per product entry. Tasks with more than one
    /// product pay for their inputs more than once.
    PerProduct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Working {
        task: TaskTemplate,
        remaining_ticks: u32,
    },
}

#[derive(Debug, Clone)]
pub struct Worker {
    id: Uuid,
    name: String,
    state: WorkerState,
}

impl Worker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            state: WorkerState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &WorkerState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, WorkerState::Idle)
    }

    pub fn active_task(&self) -> Option<&TaskTemplate> {
        match &self.state {
            WorkerState::Working { task, .. } => Some(task),
            WorkerState::Idle => None,
        }
    }

    /// Takes on `task`. Only an idle worker can be assigned; returns `false`
    /// and keeps the current task otherwise.
    pub fn assign(&mut self, task: &TaskTemplate) -> bool {
        if !self.is_idle() {
            tracing::warn!(
                "Worker {} is busy, not assigning {}",
                self.name,
                task.name
            );
            return false;
        }

        tracing::debug!(
            "Worker {} ({}) started task {}",
            self.name,
            self.id,
            task.name
        );
        self.state = WorkerState::Working {
            task: task.clone(),
            remaining_ticks: task.duration_ticks.max(1),
        };
        true
    }

    /// Spends one tick on the active task. When the task runs out of ticks
    /// its effects are applied, the worker goes idle and the finished task
    /// is returned.
    pub fn work(&mut self, inventory: &mut Inventory, policy: EffectPolicy) -> Option<TaskTemplate> {
        let WorkerState::Working { remaining_ticks, .. } = &mut self.state else {
            return None;
        };

        *remaining_ticks = remaining_ticks.saturating_sub(1);
        if *remaining_ticks > 0 {
            return None;
        }

        let WorkerState::Working { task, .. } =
            std::mem::replace(&mut self.state, WorkerState::Idle)
        else {
            return None;
        };

        apply_effects(&task, inventory, policy);
        tracing::debug!("Worker {} completed task {}", self.name, task.name);
        Some(task)
    }
}

pub fn apply_effects(task: &TaskTemplate, inventory: &mut Inventory, policy: EffectPolicy) {
    match policy {
        EffectPolicy::SinglePass => {
            for output in &task.produces {
                inventory.add_resource(&output.name, i64::from(output.value));
            }
            for input in &task.consumes {
                inventory.add_resource(&input.name, -i64::from(input.value));
            }
        }
        EffectPolicy::PerProduct => {
            for output in &task.produces {
                inventory.add_resource(&output.name, i64::from(output.value));
                for input in &task.consumes {
                    inventory.add_resource(&input.name, -i64::from(input.value));
                }
            }
        }
    }
}
