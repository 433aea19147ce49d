pub mod bind_data;
pub mod compile_schemas;
