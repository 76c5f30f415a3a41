//! 密码摘要
//!
//! **警告**：这里是不加盐的SHA-256，也没有任何校验流程，只为与既有`Users`表中的数据保持一致。
//! 不适合用于真实的身份认证。

use sha2::{Digest, Sha256};

/// 摘要长度（十六进制字符数）
pub const DIGEST_HEX_LEN: usize = 64;

/// 将明文映射为固定长度摘要
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> String;
}

/// SHA-256十六进制摘要
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl CredentialHasher for Sha256Hasher {
    fn hash(&self, plaintext: &str) -> String {
        hash_password(plaintext)
    }
}

/// 计算明文的SHA-256摘要（小写十六进制）
pub fn hash_password(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    format!("{:x}", hasher.finalize())
}
