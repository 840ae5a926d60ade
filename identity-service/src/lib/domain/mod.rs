pub mod principal;
pub mod profile;
