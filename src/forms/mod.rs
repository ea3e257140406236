pub mod field;
pub mod form;
pub mod login_form;
pub mod order_form;
pub mod phone_mask;
