use crate::blueprint::model::Target;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The requirement chain came back around to a target it was already
    /// trying to satisfy. `path` runs from the outermost target to the repeat.
    #[error("dependency cycle detected: {}", render_path(.path))]
    CycleDetected { path: Vec<Target> },
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("worker {worker} could not plan towards {goal}: {source}")]
    Resolve {
        worker: String,
        goal: String,
        #[source]
        source: ResolveError,
    },
}

fn render_path(path: &[Target]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
