pub mod auth;
pub mod dispatch;
pub mod navigation;
pub mod session_gate;
