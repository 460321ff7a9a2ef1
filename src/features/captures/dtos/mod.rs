mod capture_dto;

pub use capture_dto::*;
