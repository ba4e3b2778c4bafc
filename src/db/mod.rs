pub mod pool;
pub mod stock;

pub use pool::create_pool;
