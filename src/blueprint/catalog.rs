use serde::{Deserialize, Serialize};

use crate::blueprint::model::{BuildingType, TaskTemplate};

/// Ordered, read-only tables of tasks and buildings.
///
/// Lookups scan in declared order and return the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub tasks: Vec<TaskTemplate>,
    #[serde(default)]
    pub buildings: Vec<BuildingType>,
}

impl Catalog {
    pub fn new(tasks: Vec<TaskTemplate>, buildings: Vec<BuildingType>) -> Self {
        Self { tasks, buildings }
    }

    pub fn task_producing(&self, resource: &str) -> Option<&TaskTemplate> {
        self.tasks
            .iter()
            .find(|task| task.produces_resource(resource))
    }

    pub fn task(&self, name: &str) -> Option<&TaskTemplate> {
        self.tasks.iter().find(|task| task.name == name)
    }

    pub fn building(&self, name: &str) -> Option<&BuildingType> {
        self.buildings.iter().find(|building| building.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(default_tasks(), default_buildings())
    }
}

fn default_tasks() -> Vec<TaskTemplate> {
    vec![
        TaskTemplate::new("Collect Wood")
            .producing("Wood", 1)
            .requiring("Forest"),
        TaskTemplate::new("Collect Stone")
            .producing("Stone", 1)
            .requiring("Quarry"),
        TaskTemplate::new("Collect Ore")
            .producing("Ore", 1)
            .requiring("Mine"),
        TaskTemplate::new("Make Pipes")
            .consuming("Ore", 3)
            .producing("Pipe", 1)
            .requiring("Factory"),
        TaskTemplate::new("Move in")
            .producing("Resident", 1)
            .requiring("House"),
    ]
}

fn default_buildings() -> Vec<BuildingType> {
    vec![
        BuildingType::new("Forest").costing("Wood", 10),
        BuildingType::new("Quarry").costing("Wood", 10),
        BuildingType::new("Mine").costing("Stone", 10),
        BuildingType::new("Factory")
            .costing("Wood", 5)
            .costing("Stone", 5),
        BuildingType::new("House")
            .costing("Wood", 4)
            .costing("Stone", 2)
            .costing("Pipe", 2),
    ]
}
