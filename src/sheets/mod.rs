pub mod auth;
pub mod http_client;
pub mod hub_values_api;
#[cfg(test)]
pub(crate) mod in_memory_values_api;
pub mod sheet_service;
pub mod string_table;
pub mod value_input_option;
pub mod value_range_factory;
pub mod values_api;
