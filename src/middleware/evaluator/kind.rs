use std::fmt;
use std::str::FromStr;

/// 문자열 비교 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// `src`가 `key`로 끝나는지
    Suffix,
    /// `src`가 `key`로 시작하는지
    Prefix,
    /// `src`가 `key`를 포함하는지 (대소문자 구분)
    Contains,
    /// 소문자로 바꾼 뒤 포함 여부
    ContainsIgnoreCase,
}

impl MatchKind {
    pub const VALID_VALUES: &'static str =
        "valid values are 'suffix', 'prefix', 'contains', 'contains_ignorecase'";

    /// 정규화된 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suffix => "suffix",
            Self::Prefix => "prefix",
            Self::Contains => "contains",
            Self::ContainsIgnoreCase => "contains_ignorecase",
        }
    }

    /// 비교를 수행합니다. 빈 `key`는 항상 일치합니다.
    pub fn matches(&self, src: &str, key: &str) -> bool {
        match self {
            Self::Suffix => src.ends_with(key),
            Self::Prefix => src.starts_with(key),
            Self::Contains => src.contains(key),
            Self::ContainsIgnoreCase => src.to_lowercase().contains(&key.to_lowercase()),
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "suffix" => Ok(Self::Suffix),
            "prefix" => Ok(Self::Prefix),
            "contains" => Ok(Self::Contains),
            "contains_ignorecase" | "contains-ignore-case" => Ok(Self::ContainsIgnoreCase),
            _ => Err(format!("Invalid match kind: {}", s)),
        }
    }
}
