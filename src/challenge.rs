use std::collections::HashMap;
use std::str::FromStr;

use crate::{Error, Result};

/// Digest challenge fields pulled from a `WWW-Authenticate` header value.
///
/// Only the directives that feed the response hash are kept. A real Atlas
/// challenge looks like:
///
/// ```text
/// Digest realm="MMS Public API", domain="", nonce="kWVA9Ciu7lNaN5QdjPe8kxPMReVjbt+B", algorithm=MD5, qop="auth", stale=false
/// ```
///
/// `domain`, `algorithm`, `stale` and anything else the server sends are
/// tolerated and skipped. A challenge is only valid paired with the request
/// that drew it; never reuse one across a different method or path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WwwAuthFields {
    /// Authorization realm ("MMS Public API" for Atlas)
    pub realm: String,
    /// Server nonce
    pub nonce: String,
    /// Digest variant, always "auth" here
    pub qop: String,
}

impl WwwAuthFields {
    /// Parse a `WWW-Authenticate` header value.
    ///
    /// # Errors
    /// `BadChallenge` if the scheme is not Digest or a quoted value never
    /// closes; `ChallengeFieldMissing` if `realm`, `nonce` or `qop` is
    /// absent. A missing nonce would poison the response hash downstream,
    /// so the parser refuses early rather than defaulting fields to empty.
    pub fn parse(input: &str) -> Result<Self> {
        let mut input = input.trim();
        if let Some(rest) = input.strip_prefix("Digest") {
            input = rest;
        } else if let Some(scheme) = leading_scheme(input) {
            return Err(Error::BadChallenge(format!(
                "unsupported auth scheme: {scheme}"
            )));
        }

        let mut kv = parse_directives(input)?;

        Ok(Self {
            realm: kv
                .remove("realm")
                .ok_or(Error::ChallengeFieldMissing("realm"))?,
            nonce: kv
                .remove("nonce")
                .ok_or(Error::ChallengeFieldMissing("nonce"))?,
            qop: kv.remove("qop").ok_or(Error::ChallengeFieldMissing("qop"))?,
        })
    }
}

impl FromStr for WwwAuthFields {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse(input)
    }
}

/// A scheme token is a bare leading word with no `=`; `realm="x"` has none.
fn leading_scheme(input: &str) -> Option<&str> {
    let first = input.split_whitespace().next()?;
    if first.contains('=') {
        None
    } else {
        Some(first)
    }
}

/// Scan the comma-separated `key="value"` directive list into a map.
/// Handles both quoted and plain tokens in any order.
fn parse_directives(input: &str) -> Result<HashMap<String, String>> {
    #[derive(Debug)]
    enum State {
        Space,
        Name(usize),
        ValueBegin,
        Quoted,
        QuotedEscape,
        Plain,
    }

    let mut state = State::Space;
    let mut parsed = HashMap::new();
    let mut key: Option<&str> = None;
    let mut value = String::new();

    for (i, c) in input.char_indices() {
        match state {
            State::Space => {
                if c.is_alphabetic() {
                    state = State::Name(i);
                }
            }
            State::Name(start) => {
                if c == '=' {
                    key = Some(&input[start..i]);
                    state = State::ValueBegin;
                }
            }
            State::ValueBegin => {
                value.clear();
                state = match c {
                    '"' => State::Quoted,
                    _ => {
                        value.push(c);
                        State::Plain
                    }
                };
            }
            State::Quoted => match c {
                '"' => {
                    if let Some(k) = key.take() {
                        parsed.insert(k.to_string(), std::mem::take(&mut value));
                    }
                    state = State::Space;
                }
                '\\' => state = State::QuotedEscape,
                _ => value.push(c),
            },
            State::QuotedEscape => {
                value.push(c);
                state = State::Quoted;
            }
            State::Plain => {
                if c == ',' || c.is_ascii_whitespace() {
                    if let Some(k) = key.take() {
                        parsed.insert(k.to_string(), std::mem::take(&mut value));
                    }
                    state = State::Space;
                } else {
                    value.push(c);
                }
            }
        }
    }

    match state {
        State::Plain => {
            if let Some(k) = key.take() {
                parsed.insert(k.to_string(), value);
            }
        }
        State::Space => {}
        _ => {
            return Err(Error::BadChallenge(format!(
                "directive list ends mid-value ({state:?})"
            )))
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::{parse_directives, WwwAuthFields};
    use crate::Error;

    const ATLAS_CHALLENGE: &str = r#"Digest realm="MMS Public API", domain="", nonce="kWVA9Ciu7lNaN5QdjPe8kxPMReVjbt+B", algorithm=MD5, qop="auth", stale=false"#;

    #[test]
    fn parses_real_atlas_challenge() {
        let fields = WwwAuthFields::parse(ATLAS_CHALLENGE).unwrap();

        assert_eq!(
            fields,
            WwwAuthFields {
                realm: "MMS Public API".to_string(),
                nonce: "kWVA9Ciu7lNaN5QdjPe8kxPMReVjbt+B".to_string(),
                qop: "auth".to_string(),
            }
        );
    }

    #[test]
    fn tolerates_directive_order_and_unquoted_qop() {
        let src = r#"Digest qop=auth, stale=false, nonce="abc123", algorithm=MD5, realm="MMS Public API""#;
        let fields = WwwAuthFields::parse(src).unwrap();

        assert_eq!(fields.realm, "MMS Public API");
        assert_eq!(fields.nonce, "abc123");
        assert_eq!(fields.qop, "auth");
    }

    #[test]
    fn round_trips_known_fields() {
        let src = format!(
            r#"Digest realm="{}", nonce="{}", qop="{}""#,
            "api@example.org", "5TsQWLVdgBdmrQ0Xsxb", "auth"
        );
        let fields = WwwAuthFields::parse(&src).unwrap();

        assert_eq!(fields.realm, "api@example.org");
        assert_eq!(fields.nonce, "5TsQWLVdgBdmrQ0Xsxb");
        assert_eq!(fields.qop, "auth");
    }

    #[test]
    fn missing_fields_fail_loudly() {
        let err = WwwAuthFields::parse(r#"Digest realm="r", qop="auth""#).unwrap_err();
        assert!(matches!(err, Error::ChallengeFieldMissing("nonce")));

        let err = WwwAuthFields::parse(r#"Digest nonce="n", qop="auth""#).unwrap_err();
        assert!(matches!(err, Error::ChallengeFieldMissing("realm")));

        let err = WwwAuthFields::parse(r#"Digest realm="r", nonce="n""#).unwrap_err();
        assert!(matches!(err, Error::ChallengeFieldMissing("qop")));
    }

    #[test]
    fn wrong_scheme_is_bad_challenge() {
        let err = WwwAuthFields::parse(r#"Basic realm="MMS Public API""#).unwrap_err();
        assert!(matches!(err, Error::BadChallenge(_)));
    }

    #[test]
    fn unterminated_quote_is_bad_challenge() {
        let err = WwwAuthFields::parse(r#"Digest realm="MMS Public API"#).unwrap_err();
        assert!(matches!(err, Error::BadChallenge(_)));
    }

    #[test]
    fn directive_scan_handles_escapes_and_plain_tokens() {
        let map = parse_directives(r#"realm="a \"quoted\" realm", algorithm=MD5"#).unwrap();

        assert_eq!(map.get("realm").unwrap(), "a \"quoted\" realm");
        assert_eq!(map.get("algorithm").unwrap(), "MD5");
    }

    #[test]
    fn empty_input_reports_missing_realm() {
        let err = WwwAuthFields::parse("").unwrap_err();
        assert!(matches!(err, Error::ChallengeFieldMissing("realm")));
    }
}
