pub mod business_rule;
mod converter;
mod schema;

pub use schema::setup_schema;
