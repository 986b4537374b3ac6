use crate::common::{PriceScannerError, is_valid_price};
use crate::tokens::Token;
use std::collections::HashSet;

pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
pub const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
pub const JUP_MINT: &str = "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN";
pub const RAY_MINT: &str = "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R";
pub const ORCA_MINT: &str = "orcaEKTdK7LKz57vaAYr9QeNsVEPfiu6QeMU1kektZE";

/// Fixed set of tokens a scan covers, in declaration order.
/// Symbols and mints are unique.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
}

impl TokenRegistry {
    pub fn new(tokens: Vec<Token>) -> Result<Self, PriceScannerError> {
        if tokens.is_empty() {
            return Err(PriceScannerError::InvalidToken(
                "Token registry cannot be empty".to_string(),
            ));
        }

        let mut symbols = HashSet::new();
        let mut mints = HashSet::new();
        for token in &tokens {
            if token.symbol.is_empty() || token.mint.is_empty() {
                return Err(PriceScannerError::InvalidToken(format!(
                    "Token needs both symbol and mint: {:?}",
                    token
                )));
            }
            if !symbols.insert(token.symbol.as_str()) {
                return Err(PriceScannerError::InvalidToken(format!(
                    "Duplicate symbol {}",
                    token.symbol
                )));
            }
            if !mints.insert(token.mint.as_str()) {
                return Err(PriceScannerError::InvalidToken(format!(
                    "Duplicate mint {}",
                    token.mint
                )));
            }
            if let Some(peg) = token.peg {
                if !is_valid_price(peg) {
                    return Err(PriceScannerError::InvalidToken(format!(
                        "Invalid peg {} for {}",
                        peg, token.symbol
                    )));
                }
            }
        }

        Ok(Self { tokens })
    }

    /// SOL, the two USD stablecoins (pegged at 1.0) and the major SPL tokens
    pub fn solana_default() -> Self {
        Self {
            tokens: default_solana_tokens(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn by_mint(&self, mint: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.mint == mint)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::solana_default()
    }
}

pub fn default_solana_tokens() -> Vec<Token> {
    vec![
        Token::create("SOL", SOL_MINT),
        Token::pegged("USDC", USDC_MINT, 1.0),
        Token::pegged("USDT", USDT_MINT, 1.0),
        Token::create("BONK", BONK_MINT),
        Token::create("JUP", JUP_MINT),
        Token::create("RAY", RAY_MINT),
        Token::create("ORCA", ORCA_MINT),
    ]
}

/// Comma-separated mint list, the form the batch price endpoints take
pub fn mint_list(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.mint.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
