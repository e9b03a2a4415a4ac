pub mod engine;
pub mod error;
pub mod plugin;
pub mod record;
pub mod report;

pub use engine::{Analysis, Engine, RunConfig, analyse};
pub use error::Error;

#[cfg(test)]
mod test;
