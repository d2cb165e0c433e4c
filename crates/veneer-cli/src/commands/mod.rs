pub mod dispatch;
pub mod export;
pub mod forget;
pub mod import;
pub mod last;
pub mod paths;
pub mod remove;
pub mod reset_visibility;
pub mod schema;
pub mod set;
pub mod shared;
pub mod tree;
