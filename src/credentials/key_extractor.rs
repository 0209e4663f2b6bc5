/// Field holding the shared access key in every hub connection string.
pub const SHARED_ACCESS_KEY_FIELD: &str = "SharedAccessKey";

/// Splits a string into tokens, skipping leading delimiters before each token.
///
/// The delimiter set may change between calls, which lets a connection string
/// be read as alternating `name=` / `value;` tokens.
struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn next_token(&mut self, delimiters: &[char]) -> Option<&'a str> {
        let remaining = &self.input[self.position..];
        let start = remaining.find(|c: char| !delimiters.contains(&c))?;
        let remaining = &remaining[start..];

        match remaining.find(|c: char| delimiters.contains(&c)) {
            Some(end) => {
                // consume the token and the single delimiter that ended it
                self.position += start + end + 1;
                Some(&remaining[..end])
            }
            None => {
                self.position = self.input.len();
                Some(remaining)
            }
        }
    }
}

/// Return the value of the first `name=value` pair whose name equals `field`.
///
/// Best-effort scan: duplicates are not detected, and the scan stops with
/// `None` as soon as a name has no matching value.
pub fn extract_field<'a>(connection_string: &'a str, field: &str) -> Option<&'a str> {
    let mut tokenizer = Tokenizer::new(connection_string);

    while let Some(name) = tokenizer.next_token(&['=']) {
        let value = tokenizer.next_token(&[';'])?;
        if name == field {
            return Some(value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONN: &str = "HostName=a;SharedAccessKeyName=b;SharedAccessKey=c";

    #[test]
    fn finds_shared_access_key() {
        assert_eq!(extract_field(CONN, SHARED_ACCESS_KEY_FIELD), Some("c"));
    }

    #[test]
    fn finds_every_field_by_name() {
        assert_eq!(extract_field(CONN, "HostName"), Some("a"));
        assert_eq!(extract_field(CONN, "SharedAccessKeyName"), Some("b"));
    }

    #[test]
    fn absent_field_yields_nothing() {
        assert_eq!(extract_field(CONN, "DeviceId"), None);
        assert_eq!(extract_field("", SHARED_ACCESS_KEY_FIELD), None);
    }

    #[test]
    fn value_keeps_base64_padding() {
        let conn = "HostName=myhub.azure-devices.net;SharedAccessKeyName=iothubowner;SharedAccessKey=abc123==";
        assert_eq!(extract_field(conn, SHARED_ACCESS_KEY_FIELD), Some("abc123=="));
    }

    #[test]
    fn first_match_wins() {
        let conn = "SharedAccessKey=first;SharedAccessKey=second";
        assert_eq!(extract_field(conn, SHARED_ACCESS_KEY_FIELD), Some("first"));
    }

    #[test]
    fn dangling_name_stops_the_scan() {
        assert_eq!(extract_field("HostName=a;SharedAccessKey", SHARED_ACCESS_KEY_FIELD), None);
        assert_eq!(extract_field("HostName=", "HostName"), None);
    }
}
