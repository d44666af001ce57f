// src/application/dto/format.rs
// Display helpers for addresses, hashes and explorer links

/// Default block explorer for generated links
pub const DEFAULT_EXPLORER_URL: &str = "https://etherscan.io";

/// `0x1234567890...7890` style shortening, keeping `head` leading and
/// `tail` trailing characters. Short inputs are returned unchanged.
pub fn shorten(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= head + tail {
        return value.to_string();
    }

    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", start, end)
}

pub fn short_address(address: &str) -> String {
    shorten(address, 6, 4)
}

pub fn short_hash(hash: &str) -> String {
    shorten(hash, 8, 6)
}

pub fn explorer_tx_url(explorer: &str, hash: &str) -> String {
    format!("{}/tx/{}", explorer.trim_end_matches('/'), hash)
}

pub fn explorer_address_url(explorer: &str, address: &str) -> String {
    format!("{}/address/{}", explorer.trim_end_matches('/'), address)
}
