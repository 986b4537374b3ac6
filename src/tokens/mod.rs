pub mod registry;
pub mod token;

// Re-export
pub use registry::{SOL_MINT, TokenRegistry, USDC_MINT, default_solana_tokens, mint_list};
pub use token::Token;
