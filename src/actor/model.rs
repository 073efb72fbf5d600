use crate::actor::inventory::Report;

/// Events published by the dispatcher while a game runs.
#[derive(Clone, Debug)]
pub enum InternalMessage {
    Status { tick: u64, report: Report },
    TaskStarted { worker: String, task: String },
    TaskCompleted { worker: String, task: String },
    BuildingConstructed { worker: String, building: String },
    Unreachable { worker: String, target: String },
    GoalReached { tick: u64, goal: String },
    Stop,
}
