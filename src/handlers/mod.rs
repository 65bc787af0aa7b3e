pub mod cluster_handler;
pub mod health_handler;
pub mod page_handler;
