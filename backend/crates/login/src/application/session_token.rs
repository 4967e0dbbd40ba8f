//! Session Cookie Token
//!
//! Cookie value: base64url(session_id (16 bytes) || HMAC-SHA256(secret, session_id)).

use uuid::Uuid;

const SESSION_ID_LEN: usize = 16;
const SIGNATURE_LEN: usize = 32;

/// Sign a session ID for the cookie
pub fn sign_session_token(session_id: Uuid, secret: &[u8; 32]) -> String {
    let id_bytes = session_id.as_bytes();
    let signature = platform::crypto::hmac_sha256(secret, id_bytes);

    let mut token = Vec::with_capacity(SESSION_ID_LEN + SIGNATURE_LEN);
    token.extend_from_slice(id_bytes);
    token.extend_from_slice(&signature);

    platform::crypto::to_base64_url(&token)
}

/// Verify and extract session ID from signed token
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> Option<Uuid> {
    let token_data = platform::crypto::from_base64_url(token).ok()?;
    if token_data.len() != SESSION_ID_LEN + SIGNATURE_LEN {
        return None;
    }

    let id_bytes: [u8; SESSION_ID_LEN] = token_data[..SESSION_ID_LEN].try_into().ok()?;
    let provided_signature = &token_data[SESSION_ID_LEN..];

    let expected_signature = platform::crypto::hmac_sha256(secret, &id_bytes);

    if !platform::crypto::constant_time_eq(provided_signature, &expected_signature) {
        return None;
    }

    Some(Uuid::from_bytes(id_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let secret = [7u8; 32];
        let session_id = Uuid::new_v4();

        let token = sign_session_token(session_id, &secret);
        assert_eq!(verify_session_token(&token, &secret), Some(session_id));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session_token(Uuid::new_v4(), &[7u8; 32]);
        assert_eq!(verify_session_token(&token, &[8u8; 32]), None);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let secret = [7u8; 32];
        let token = sign_session_token(Uuid::new_v4(), &secret);

        // Swap in a different session ID, keep the signature
        let mut bytes = platform::crypto::from_base64_url(&token).unwrap();
        bytes[0] ^= 0x01;
        let forged = platform::crypto::to_base64_url(&bytes);

        assert_eq!(verify_session_token(&forged, &secret), None);
        assert_eq!(verify_session_token("not-base64!", &secret), None);
        assert_eq!(verify_session_token("", &secret), None);
    }
}
