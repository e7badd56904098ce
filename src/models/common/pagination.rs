use serde::{Deserialize, Serialize};
use ts_rs::TS;

const MAX_PAGE_SIZE: i64 = 100;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_lenient_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_lenient_i64")]
    pub size: i64,
}

/// 存储层使用的分页规范化，page 从 1 开始，size 限制在 1..=100
pub fn normalize(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1) as u64;
    let size = size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE) as u64;
    (page, size)
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, size: u64, total: u64, pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: size as i64,
            total: total as i64,
            total_pages: pages as i64,
        }
    }
}

// 查询字符串中的数字以字符串形式出现，JSON 中则是数字
fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct LenientI64;

    impl Visitor<'_> for LenientI64 {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            i64::try_from(value).map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            value
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(LenientI64)
}

/// 可选查询参数的宽松解析
///
/// `#[serde(flatten)]` 会把查询字符串中的值缓冲为字符串，布尔和数字字段需要从字符串解析。
pub fn deserialize_optional_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    let raw = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Bool(value)) => value.to_string(),
        Some(Raw::Int(value)) => value.to_string(),
        Some(Raw::Str(value)) => value,
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(D::Error::custom)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clamps_values() {
        assert_eq!(normalize(None, None), (1, 10));
        assert_eq!(normalize(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize(Some(3), Some(500)), (3, 100));
    }

    #[test]
    fn test_query_accepts_strings_and_numbers() {
        let q: PaginationQuery = serde_json::from_str(r#"{"page":"2","size":25}"#).unwrap();
        assert_eq!((q.page, q.size), (2, 25));

        let q: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(normalize(Some(q.page), Some(q.size)), (1, 10));
    }

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_optional_lenient")]
        approved: Option<bool>,
        #[serde(default, deserialize_with = "deserialize_optional_lenient")]
        teacher_id: Option<i64>,
    }

    #[test]
    fn test_optional_lenient_values() {
        let f: Filter = serde_json::from_str(r#"{"approved":"true","teacher_id":"7"}"#).unwrap();
        assert_eq!(f.approved, Some(true));
        assert_eq!(f.teacher_id, Some(7));

        let f: Filter = serde_json::from_str(r#"{"approved":false,"teacher_id":""}"#).unwrap();
        assert_eq!(f.approved, Some(false));
        assert_eq!(f.teacher_id, None);

        let f: Filter = serde_json::from_str("{}").unwrap();
        assert!(f.approved.is_none() && f.teacher_id.is_none());

        assert!(serde_json::from_str::<Filter>(r#"{"approved":"maybe"}"#).is_err());
    }
}
