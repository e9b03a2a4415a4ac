mod common;
mod plugins;
mod report;
