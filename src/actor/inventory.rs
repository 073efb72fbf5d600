use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::blueprint::model::{BuildingType, Value};

/// Name-keyed counters that remember the order names were first seen in.
#[derive(Debug, Clone, Default)]
struct Tally<T> {
    entries: Vec<Value<T>>,
    index: HashMap<String, usize>,
}

impl<T: Copy + Default> Tally<T> {
    fn get(&self, name: &str) -> T {
        self.index
            .get(name)
            .map(|&i| self.entries[i].value)
            .unwrap_or_default()
    }

    fn entry(&mut self, name: &str) -> &mut T {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.entries.push(Value::new(name, T::default()));
                self.index.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].value
    }
}

/// Resource ledger and building registry for one game.
///
/// Unknown resources and buildings read as zero and are created on first
/// write.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    resources: Tally<i64>,
    buildings: Tally<u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(resources: &[Value<i64>], buildings: &[Value<u32>]) -> Self {
        let mut inventory = Self::new();
        for resource in resources {
            *inventory.resources.entry(&resource.name) = resource.value;
        }
        for building in buildings {
            *inventory.buildings.entry(&building.name) = building.value;
        }
        inventory
    }

    pub fn with_resource(mut self, name: &str, amount: i64) -> Self {
        *self.resources.entry(name) = amount;
        self
    }

    pub fn with_building(mut self, name: &str, count: u32) -> Self {
        *self.buildings.entry(name) = count;
        self
    }

    pub fn resource(&self, name: &str) -> i64 {
        self.resources.get(name)
    }

    pub fn building_count(&self, name: &str) -> u32 {
        self.buildings.get(name)
    }

    pub fn has_building(&self, name: &str) -> bool {
        self.building_count(name) > 0
    }

    pub fn add_resource(&mut self, name: &str, delta: i64) {
        *self.resources.entry(name) += delta;
    }

    /// First requirement in `requirements` the ledger cannot cover.
    ///
    /// A resource listed more than once is checked against the running
    /// total of its entries so far.
    pub fn first_shortfall<'a>(&self, requirements: &'a [Value<u32>]) -> Option<&'a Value<u32>> {
        let mut needed: HashMap<&str, i64> = HashMap::new();
        requirements.iter().find(|required| {
            let total = needed.entry(required.name.as_str()).or_insert(0);
            *total += i64::from(required.value);
            self.resource(&required.name) < *total
        })
    }

    pub fn covers(&self, requirements: &[Value<u32>]) -> bool {
        self.first_shortfall(requirements).is_none()
    }

    /// Pays for and records one new `building`.
    ///
    /// Leaves the inventory untouched and returns `false` when the ledger
    /// cannot cover the full cost.
    pub fn construct(&mut self, building: &BuildingType) -> bool {
        if !self.covers(&building.cost) {
            return false;
        }

        for cost in &building.cost {
            self.add_resource(&cost.name, -i64::from(cost.value));
        }
        *self.buildings.entry(&building.name) += 1;
        true
    }

    pub fn report(&self) -> Report {
        Report {
            resources: self.resources.entries.clone(),
            buildings: self.buildings.entries.clone(),
        }
    }
}

/// Point-in-time copy of every resource and building count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub resources: Vec<Value<i64>>,
    pub buildings: Vec<Value<u32>>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "** Resources: ")?;
        write_values(f, &self.resources)?;
        write!(f, " -- ")?;
        write_values(f, &self.buildings)
    }
}

fn write_values<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[Value<T>]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {}", value.name, value.value)?;
    }
    Ok(())
}
