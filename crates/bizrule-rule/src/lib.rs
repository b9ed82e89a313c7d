pub mod db;
pub mod error;
pub mod model;
pub mod registry;

pub use db::{business_rule, setup_schema};
pub use error::{Result, RuleError};
pub use model::{BusinessRule, RuleFilter, RuleForm, DEFAULT_PAGE_SIZE, DEFAULT_RULES, MAX_PAGE_SIZE, NAME_MAX_LENGTH};
pub use registry::BusinessRuleRegistry;
