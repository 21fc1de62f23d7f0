pub mod permissions;
pub mod rules;
