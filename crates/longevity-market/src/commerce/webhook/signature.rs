use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default replay window for signed webhook deliveries.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature header is malformed")]
    MalformedHeader,
    #[error("signature header carries no v1 signatures")]
    NoSignatures,
    #[error("signature timestamp is {age_secs}s old")]
    Expired { age_secs: i64 },
    #[error("no signature matches the payload")]
    Mismatch,
}

/// Checks a `t=<unix>,v1=<hex>` header against the raw request body.
pub fn verify(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), SignatureError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| SignatureError::MalformedHeader)?,
                )
            }
            "v1" => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(SignatureError::NoSignatures);
    }

    let matched = signatures.iter().any(|candidate| {
        let Ok(expected) = hex::decode(candidate) else {
            return false;
        };
        keyed_mac(secret, timestamp, payload)
            .verify_slice(&expected)
            .is_ok()
    });
    if !matched {
        return Err(SignatureError::Mismatch);
    }

    let age_secs = now - timestamp;
    if tolerance_secs > 0 && age_secs > tolerance_secs {
        return Err(SignatureError::Expired { age_secs });
    }

    Ok(())
}

/// Produces a header in the same format the payment provider sends.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let digest = keyed_mac(secret, timestamp, payload).finalize().into_bytes();
    format!("t={timestamp},v1={}", hex::encode(digest))
}

fn keyed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("hmac accepts keys of any length"),
    };
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"id":"evt_1","type":"checkout.session.completed"}"#;

    #[test]
    fn accepts_freshly_signed_payload() {
        let header = signature_header(SECRET, 1_700_000_000, BODY);
        assert_eq!(verify(BODY, &header, SECRET, 300, 1_700_000_010), Ok(()));
    }

    #[test]
    fn rejects_tampered_body() {
        let header = signature_header(SECRET, 1_700_000_000, BODY);
        let err = verify(b"{}", &header, SECRET, 300, 1_700_000_000).unwrap_err();
        assert_eq!(err, SignatureError::Mismatch);
    }

    #[test]
    fn rejects_wrong_secret() {
        let header = signature_header("whsec_other", 1_700_000_000, BODY);
        let err = verify(BODY, &header, SECRET, 300, 1_700_000_000).unwrap_err();
        assert_eq!(err, SignatureError::Mismatch);
    }

    #[test]
    fn rejects_stale_timestamp() {
        let header = signature_header(SECRET, 1_700_000_000, BODY);
        let err = verify(BODY, &header, SECRET, 300, 1_700_000_301).unwrap_err();
        assert_eq!(err, SignatureError::Expired { age_secs: 301 });
    }

    #[test]
    fn any_matching_v1_entry_is_enough() {
        let valid = signature_header(SECRET, 1_700_000_000, BODY);
        let digest = valid.split_once(",v1=").map(|(_, sig)| sig).unwrap();
        let header = format!("t=1700000000,v1=deadbeef,v0=ignored,v1={digest}");
        assert_eq!(verify(BODY, &header, SECRET, 300, 1_700_000_000), Ok(()));
    }

    #[test]
    fn malformed_headers_are_reported() {
        assert_eq!(
            verify(BODY, "garbage", SECRET, 300, 0),
            Err(SignatureError::MalformedHeader)
        );
        assert_eq!(
            verify(BODY, "t=abc,v1=00", SECRET, 300, 0),
            Err(SignatureError::MalformedHeader)
        );
        assert_eq!(
            verify(BODY, "t=10", SECRET, 300, 10),
            Err(SignatureError::NoSignatures)
        );
    }
}
