pub mod time_slots;
pub mod validation_rules;
pub mod validator;
