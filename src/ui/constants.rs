// ui/constants.rs

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

pub const SHEET_KEYS: &str = "↑↓ select · +/- adjust · Tab focus · b buff · s status · i item · m money · d remove · t start · e end · r reset · q quit";
pub const FORM_KEYS: &str = "Tab next field · Enter confirm · Esc cancel";

// Money input policy.
pub const MONEY_STEP: i64 = 10;
pub const MONEY_MIN: i64 = 10;
pub const MONEY_MAX: i64 = 1000;
