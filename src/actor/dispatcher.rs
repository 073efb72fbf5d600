use std::future::Future;
use std::time::Duration;

use crate::actor::broker::Broker;
use crate::actor::error::DispatchError;
use crate::actor::inventory::Inventory;
use crate::actor::model::InternalMessage;
use crate::actor::resolver::{Outcome, Resolver};
use crate::actor::worker::{EffectPolicy, Worker};
use crate::blueprint::{catalog::Catalog, model::Target};
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GoalReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    GoalReached { ticks: u64 },
    TickLimit { ticks: u64 },
    Interrupted { ticks: u64 },
}

/// Owns the whole game state and moves it forward one tick at a time.
pub struct Dispatcher {
    catalog: Catalog,
    inventory: Inventory,
    workers: Vec<Worker>,
    goal: String,
    policy: EffectPolicy,
    broker: Broker,
    ticks: u64,
}

impl Dispatcher {
    pub fn new(
        catalog: Catalog,
        inventory: Inventory,
        workers: Vec<Worker>,
        goal: impl Into<String>,
        broker: Broker,
    ) -> Self {
        Self {
            catalog,
            inventory,
            workers,
            goal: goal.into(),
            policy: EffectPolicy::default(),
            broker,
            ticks: 0,
        }
    }

    pub fn from_config(config: &GameConfig, broker: Broker) -> Self {
        let inventory = Inventory::from_entries(&config.resources, &config.buildings);
        let workers = config.workers.iter().map(Worker::new).collect();

        Self::new(
            config.catalog.clone(),
            inventory,
            workers,
            config.goal.clone(),
            broker,
        )
        .with_policy(config.effect_policy)
    }

    pub fn with_policy(mut self, policy: EffectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn goal_reached(&self) -> bool {
        self.inventory.resource(&self.goal) >= 1
    }

    /// Runs one tick: report status, stop if the goal is in the ledger,
    /// otherwise give every worker, in order, one unit of work.
    ///
    /// A busy worker spends the tick on its task. An idle worker asks the
    /// resolver for a plan towards the goal and, when one is ready, starts
    /// it; a construction or an unreachable goal leaves it idle.
    pub fn tick(&mut self) -> Result<TickOutcome, DispatchError> {
        self.ticks += 1;

        self.broker.publish(InternalMessage::Status {
            tick: self.ticks,
            report: self.inventory.report(),
        });

        if self.goal_reached() {
            tracing::info!("{} reached after {} ticks", self.goal, self.ticks);
            self.broker.publish(InternalMessage::GoalReached {
                tick: self.ticks,
                goal: self.goal.clone(),
            });
            return Ok(TickOutcome::GoalReached);
        }

        let resolver = Resolver::new(&self.catalog);
        let goal = Target::resource(self.goal.as_str());

        for worker in self.workers.iter_mut() {
            if !worker.is_idle() {
                if let Some(task) = worker.work(&mut self.inventory, self.policy) {
                    tracing::info!("{} completed task {}", worker.name(), task.name);
                    self.broker.publish(InternalMessage::TaskCompleted {
                        worker: worker.name().to_string(),
                        task: task.name,
                    });
                }
                continue;
            }

            let outcome = resolver
                .resolve(&goal, &mut self.inventory)
                .map_err(|source| DispatchError::Resolve {
                    worker: worker.name().to_string(),
                    goal: self.goal.clone(),
                    source,
                })?;

            match outcome {
                Outcome::RunTask(task) => {
                    worker.assign(task);
                    tracing::info!("{} starting new task {}", worker.name(), task.name);
                    self.broker.publish(InternalMessage::TaskStarted {
                        worker: worker.name().to_string(),
                        task: task.name.clone(),
                    });
                }
                Outcome::NoAction(building) => {
                    self.broker.publish(InternalMessage::BuildingConstructed {
                        worker: worker.name().to_string(),
                        building: building.name.clone(),
                    });
                }
                Outcome::Unreachable => {
                    tracing::warn!("{} has no way to reach {}", worker.name(), self.goal);
                    self.broker.publish(InternalMessage::Unreachable {
                        worker: worker.name().to_string(),
                        target: self.goal.clone(),
                    });
                }
            }
        }

        Ok(TickOutcome::Continue)
    }

    /// Ticks every `period` until the goal is reached, `max_ticks` ticks
    /// have run or `shutdown` resolves. The first tick fires one period
    /// after the call.
    pub async fn run<F>(
        &mut self,
        period: Duration,
        max_ticks: Option<u64>,
        shutdown: F,
    ) -> Result<RunOutcome, DispatchError>
    where
        F: Future,
    {
        let mut interval =
            tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        tokio::pin!(shutdown);

        tracing::info!(
            "Running towards {} with {} worker(s), one tick every {:?}",
            self.goal,
            self.workers.len(),
            period
        );

        loop {
            if max_ticks.is_some_and(|max| self.ticks >= max) {
                tracing::warn!("Tick limit reached before {} was produced", self.goal);
                return Ok(RunOutcome::TickLimit { ticks: self.ticks });
            }

            tokio::select! {
                _ = interval.tick() => {}
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping after {} ticks", self.ticks);
                    return Ok(RunOutcome::Interrupted { ticks: self.ticks });
                }
            }

            if self.tick()? == TickOutcome::GoalReached {
                return Ok(RunOutcome::GoalReached { ticks: self.ticks });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::model::TaskTemplate;

    fn dispatcher(broker: Broker) -> Dispatcher {
        Dispatcher::from_config(&GameConfig::default(), broker)
    }

    #[test]
    fn test_first_tick_starts_collecting_wood() {
        let broker = Broker::new();
        let mut dispatcher = dispatcher(broker);

        assert_eq!(dispatcher.tick().unwrap(), TickOutcome::Continue);

        let worker = &dispatcher.workers()[0];
        assert_eq!(worker.name(), "Bob");
        assert_eq!(worker.active_task().unwrap().name, "Collect Wood");
        assert_eq!(dispatcher.inventory().resource("Wood"), 0);

        dispatcher.tick().unwrap();
        assert!(dispatcher.workers()[0].is_idle());
        assert_eq!(dispatcher.inventory().resource("Wood"), 1);
    }

    #[test]
    fn test_goal_checked_before_work() {
        let inventory = Inventory::new().with_resource("Resident", 1);
        let mut dispatcher = Dispatcher::new(
            Catalog::default(),
            inventory,
            vec![Worker::new("Bob")],
            "Resident",
            Broker::new(),
        );

        assert_eq!(dispatcher.tick().unwrap(), TickOutcome::GoalReached);
        assert!(dispatcher.workers()[0].is_idle());
        assert_eq!(dispatcher.ticks(), 1);
    }

    #[test]
    fn test_unreachable_goal_keeps_worker_idle() {
        let broker = Broker::new();
        let mut events = broker.subscribe();
        let mut dispatcher = Dispatcher::new(
            Catalog::default(),
            Inventory::new(),
            vec![Worker::new("Bob")],
            "Gold",
            broker,
        );

        for _ in 0..3 {
            assert_eq!(dispatcher.tick().unwrap(), TickOutcome::Continue);
            assert!(dispatcher.workers()[0].is_idle());
        }

        assert!(matches!(events.try_recv(), Ok(InternalMessage::Status { tick: 1, .. })));
        assert!(matches!(
            events.try_recv(),
            Ok(InternalMessage::Unreachable { target, .. }) if target == "Gold"
        ));
    }

    #[test]
    fn test_construction_leaves_worker_idle() {
        let broker = Broker::new();
        let mut events = broker.subscribe();
        let inventory = Inventory::new()
            .with_resource("Wood", 10)
            .with_building("Forest", 1);
        let mut dispatcher = Dispatcher::new(
            Catalog::default(),
            inventory,
            vec![Worker::new("Bob")],
            "Stone",
            broker,
        );

        dispatcher.tick().unwrap();

        assert!(dispatcher.workers()[0].is_idle());
        assert_eq!(dispatcher.inventory().building_count("Quarry"), 1);
        assert_eq!(dispatcher.inventory().resource("Wood"), 0);

        let _status = events.try_recv();
        assert!(matches!(
            events.try_recv(),
            Ok(InternalMessage::BuildingConstructed { building, .. }) if building == "Quarry"
        ));
    }

    #[test]
    fn test_every_worker_gets_a_turn() {
        let foragers = |goal: &str| {
            Dispatcher::new(
                Catalog::new(
                    vec![TaskTemplate::new("Forage").producing("Berry", 1)],
                    vec![],
                ),
                Inventory::new(),
                vec![Worker::new("Ann"), Worker::new("Bob")],
                goal,
                Broker::new(),
            )
        };

        let mut dispatcher = foragers("Pie");
        dispatcher.tick().unwrap();
        assert!(dispatcher.workers().iter().all(Worker::is_idle));

        let mut dispatcher = foragers("Berry");
        dispatcher.tick().unwrap();
        assert!(dispatcher.workers().iter().all(|w| !w.is_idle()));

        dispatcher.tick().unwrap();
        assert_eq!(dispatcher.inventory().resource("Berry"), 2);
        assert_eq!(dispatcher.tick().unwrap(), TickOutcome::GoalReached);
    }

    #[test]
    fn test_cycle_is_fatal() {
        let catalog = Catalog::new(
            vec![TaskTemplate::new("Loop").consuming("Egg", 1).producing("Egg", 1)],
            vec![],
        );
        let mut dispatcher = Dispatcher::new(
            catalog,
            Inventory::new(),
            vec![Worker::new("Bob")],
            "Egg",
            Broker::new(),
        );

        let err = dispatcher.tick().unwrap_err();
        assert!(err.to_string().starts_with("worker Bob could not plan towards Egg"));
    }

    #[tokio::test]
    async fn test_run_reaches_goal() {
        let broker = Broker::new();
        let mut dispatcher = dispatcher(broker);

        let outcome = dispatcher
            .run(Duration::from_millis(1), None, std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::GoalReached { ticks: 95 });
        assert_eq!(dispatcher.inventory().resource("Resident"), 1);
    }

    #[tokio::test]
    async fn test_run_stops_at_tick_limit() {
        let mut dispatcher = dispatcher(Broker::new());

        let outcome = dispatcher
            .run(Duration::from_millis(1), Some(5), std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::TickLimit { ticks: 5 });
    }

    #[tokio::test]
    async fn test_run_with_zero_tick_limit_does_not_tick() {
        let mut dispatcher = dispatcher(Broker::new());

        let outcome = dispatcher
            .run(Duration::from_secs(60), Some(0), std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::TickLimit { ticks: 0 });
        assert!(dispatcher.workers()[0].is_idle());
    }

    #[tokio::test]
    async fn test_run_interrupted() {
        let mut dispatcher = dispatcher(Broker::new());

        let outcome = dispatcher
            .run(Duration::from_secs(60), None, async {})
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Interrupted { ticks: 0 });
    }
}
