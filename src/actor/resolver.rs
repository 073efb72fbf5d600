use crate::{
    actor::{error::ResolveError, inventory::Inventory},
    blueprint::{
        catalog::Catalog,
        model::{BuildingType, TaskTemplate, Target},
    },
};

/// Result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// The task can start right now.
    RunTask(&'a TaskTemplate),
    /// The building was constructed on the spot; nothing for the worker to do.
    NoAction(&'a BuildingType),
    /// Nothing in the catalog leads to the target.
    Unreachable,
}

/// Greedy backward chainer over the catalog.
///
/// Each call follows the first unmet requirement it meets, depth first, and
/// stops at the first thing that can happen immediately. It is meant to be
/// called again once that has happened.
pub struct Resolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(
        &self,
        target: &Target,
        inventory: &mut Inventory,
    ) -> Result<Outcome<'a>, ResolveError> {
        let mut path = Vec::new();
        self.step(target, inventory, &mut path)
    }

    fn step(
        &self,
        target: &Target,
        inventory: &mut Inventory,
        path: &mut Vec<Target>,
    ) -> Result<Outcome<'a>, ResolveError> {
        if path.contains(target) {
            path.push(target.clone());
            return Err(ResolveError::CycleDetected {
                path: std::mem::take(path),
            });
        }

        path.push(target.clone());
        let outcome = match target {
            Target::Construct(name) => self.construct(name, inventory, path)?,
            Target::Resource(name) => self.produce(name, inventory, path)?,
        };
        path.pop();

        Ok(outcome)
    }

    fn construct(
        &self,
        name: &str,
        inventory: &mut Inventory,
        path: &mut Vec<Target>,
    ) -> Result<Outcome<'a>, ResolveError> {
        let Some(building) = self.catalog.building(name) else {
            tracing::debug!("No building named {} in catalog", name);
            return Ok(Outcome::Unreachable);
        };

        if let Some(missing) = inventory.first_shortfall(&building.cost) {
            tracing::debug!(
                "{} requires {} x {}, got {}",
                name,
                missing.value,
                missing.name,
                inventory.resource(&missing.name)
            );
            return self.step(&Target::resource(missing.name.as_str()), inventory, path);
        }

        let built = inventory.construct(building);
        debug_assert!(built, "ledger covered the cost of {name} but construction failed");
        tracing::info!("Constructed {}", name);

        Ok(Outcome::NoAction(building))
    }

    fn produce(
        &self,
        resource: &str,
        inventory: &mut Inventory,
        path: &mut Vec<Target>,
    ) -> Result<Outcome<'a>, ResolveError> {
        let Some(task) = self.catalog.task_producing(resource) else {
            tracing::debug!("No task produces {}", resource);
            return Ok(Outcome::Unreachable);
        };

        if let Some(building) = &task.requires {
            if !inventory.has_building(building) {
                tracing::debug!("{} requires building {}", task.name, building);
                return self.step(&Target::construct(building.as_str()), inventory, path);
            }
        }

        if let Some(missing) = inventory.first_shortfall(&task.consumes) {
            tracing::debug!(
                "{} requires {} x {}, got {}",
                task.name,
                missing.value,
                missing.name,
                inventory.resource(&missing.name)
            );
            return self.step(&Target::resource(missing.name.as_str()), inventory, path);
        }

        Ok(Outcome::RunTask(task))
    }
}
