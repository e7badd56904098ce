use crate::config::{AppConfig, Argon2Config};
use crate::errors::AcademyError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 由配置构造 Argon2 参数，启动时也用它校验配置
pub fn argon2_params(config: &Argon2Config) -> Result<Params, AcademyError> {
    Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| AcademyError::password_hash(format!("Argon2 参数错误: {e}")))
}

/// 哈希密码（Argon2id，参数取自配置）
pub fn hash_password(password: &str) -> Result<String, AcademyError> {
    let params = argon2_params(&AppConfig::get().argon2)?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AcademyError::password_hash(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码，参数从 PHC 字符串中读取
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("bismillah").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("bismillah", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_invalid_params_are_internal_errors() {
        let config = Argon2Config {
            memory_cost: 1,
            time_cost: 1,
            parallelism: 1,
        };
        let err = argon2_params(&config).unwrap_err();
        assert!(matches!(err, AcademyError::PasswordHash(_)));

        let config = Argon2Config {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        };
        assert!(argon2_params(&config).is_ok());
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
