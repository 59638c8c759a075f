// Library exports for samconfusion
pub mod accuracy;
pub mod collector;
pub mod config;
pub mod matrix;
pub mod noise;
pub mod output;
pub mod pipeline;
pub mod read_name;
pub mod sam;
