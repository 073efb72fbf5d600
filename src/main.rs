use homestead::{
    actor::{broker::Broker, dispatcher, model::InternalMessage},
    config::GameConfig,
    instrumentation,
};
use std::{env, path::Path};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = match env::args().nth(1) {
        Some(path) => GameConfig::from_file(Path::new(&path))?,
        None => GameConfig::default(),
    };

    instrumentation::init_tracing_subscriber(config.logging.json)?;
    tracing::info!("Starting the homestead...");

    let broker = Broker::new();
    let mut events = broker.subscribe();

    let reporter = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(InternalMessage::Status { report, .. }) => println!("\n{report}"),
                Ok(InternalMessage::GoalReached { goal, tick }) => {
                    println!("{goal} reached on tick {tick}!");
                }
                Ok(InternalMessage::Stop) => break,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Status reporter skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut dispatcher = dispatcher::Dispatcher::from_config(&config, broker.clone());
    let result = dispatcher
        .run(config.tick_interval(), config.max_ticks, tokio::signal::ctrl_c())
        .await;

    broker.publish(InternalMessage::Stop);
    if let Err(e) = reporter.await {
        tracing::warn!("Status reporter stopped with error: {}", e);
    }

    match result {
        Ok(outcome) => {
            tracing::info!("Finished: {:?}", outcome);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Stopping on fatal configuration error: {}", e);
            Err(e.into())
        }
    }
}
