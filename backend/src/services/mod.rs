//! Business logic services for the Cat Box Planner

pub mod order;

pub use order::OrderService;
