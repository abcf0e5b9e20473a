//! Masking helpers for values that must not appear in logs

/// Mask an access token for logging, keeping only the last 4 characters
///
/// Tokens of 8 characters or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= 8 {
        return "*".repeat(len.max(4));
    }
    let tail: String = token.chars().skip(len - 4).collect();
    format!("****{}", tail)
}
