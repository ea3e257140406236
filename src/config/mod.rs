pub mod app;
pub mod messages;

pub use app::BookingConfig;
pub use messages::Messages;
