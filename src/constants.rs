// Order form field names
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_PHONE_NUMBER: &str = "phoneNumber";
pub const FIELD_TABLE: &str = "table";
pub const FIELD_GUESTS: &str = "guests";
pub const FIELD_DATE_TIME: &str = "data";

// Login form field names
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";

// Session store
pub const DEFAULT_SESSION_KEY: &str = "email";

// Routes
pub const ROUTE_LOGIN_PAGE: &str = "login-page";
pub const ROUTE_HOME: &str = "/";

// Date formats (chrono syntax)
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%y %H:%M";
pub const SUBMIT_DATE_FORMAT: &str = "%m/%d/%y %H:%M";
/// Value kept in the date field; the picker only renders `DISPLAY_DATE_FORMAT`.
pub const FIELD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// Phone input mask
pub const PHONE_MASK: &str = "+380 99 999 99 99";
pub const PHONE_MASK_CHAR: char = '_';

// Password symbols
pub const PASSWORD_SYMBOLS: [char; 8] = ['!', '@', '#', '$', '%', '&', '*', '?'];

// Defaults
pub const DEFAULT_TABLE_COUNT: u8 = 10;
pub const DEFAULT_LOCALE: &str = "ru";
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;
pub const DEFAULT_OPENING_HOUR: u32 = 9;
pub const ORDER_MIN_LENGTH: usize = 6;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const MIN_GUESTS: f64 = 1.0;
