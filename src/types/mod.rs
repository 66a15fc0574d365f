pub mod epw_data;
pub mod location;
