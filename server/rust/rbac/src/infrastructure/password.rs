use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Argon2id parameters: memory = 19456 KiB, iterations = 2, parallelism = 1
fn argon2_instance() -> anyhow::Result<Argon2<'static>> {
    let params = Params::new(19456, 2, 1, None)
        .map_err(|e| anyhow::anyhow!("invalid argon2 params: {}", e))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// hash_password は平文パスワードから PHC 形式の Argon2id ハッシュを生成する。
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2_instance()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash failed: {}", e))?;
    Ok(hash.to_string())
}

/// verify_password は PHC 文字列と照合する。ハッシュ自体が不正な場合はエラーを返す。
/// 検証パラメータは PHC 文字列に埋め込まれた値が使われる。
pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("malformed password hash: {}", e))?;
    Ok(argon2_instance()?
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_correct_password() {
        let hashed = hash_password("admin-password").unwrap();
        assert!(verify_password("admin-password", &hashed).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hashed = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn test_hash_contains_argon2id_identifier() {
        assert!(hash_password("x").unwrap().starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_malformed_hash_is_error() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }
}
