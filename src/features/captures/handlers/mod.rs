mod capture_handler;

pub use capture_handler::*;
