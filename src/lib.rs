pub mod actor {
    pub mod broker;
    pub mod dispatcher;
    pub mod error;
    pub mod inventory;
    pub mod model;
    pub mod resolver;
    pub mod worker;
}

pub mod blueprint {
    pub mod catalog;
    pub mod model;
}

pub mod config;
pub mod instrumentation;
