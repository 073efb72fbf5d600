pub mod subscriber;

pub use subscriber::init_tracing_subscriber;
