mod automation;
mod state;
mod token;

pub use token::LiquidityGenerator;
