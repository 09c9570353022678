pub mod controller;
pub mod schema;
