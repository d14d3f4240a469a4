use std::fmt;
use std::fmt::{Display, Formatter};

/// HTTP method (hashed into the digest material, so the spelling matters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Other(&'static str),
}

impl Default for HttpMethod {
    fn default() -> Self {
        HttpMethod::Get
    }
}

impl Display for HttpMethod {
    /// Convert to the uppercase wire token
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Other(s) => s,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::HttpMethod;

    #[test]
    fn renders_uppercase_tokens() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Other("DELETE").to_string(), "DELETE");
    }
}
