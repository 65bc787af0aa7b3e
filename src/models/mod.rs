// Data structures shared by the services and handlers

pub mod cluster;
pub mod response;

pub use cluster::*;
pub use response::*;
