// Market data primitives
pub mod candle;

pub use candle::Candle;
