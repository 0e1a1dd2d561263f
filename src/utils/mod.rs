pub mod address;
pub mod id_generator;
