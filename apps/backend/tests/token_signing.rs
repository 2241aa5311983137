//! Cross-validation of the hand-rolled compact JWS against an ecosystem
//! JWT decoder, plus the pinned reference token.

use std::time::SystemTime;

use greenquest_backend::auth::claims::RealtimeClaims;
use greenquest_backend::auth::jws::sign_compact;
use greenquest_backend::auth::identity;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

const SECRET: &[u8] = b"testsecret";

#[test]
fn ecosystem_decoder_accepts_our_tokens() {
    let claims = RealtimeClaims::session("u_42", SystemTime::now(), None).unwrap();
    let token = sign_compact(&claims, SECRET).unwrap();

    let validation = Validation::new(Algorithm::HS256);
    let decoded = decode::<RealtimeClaims>(&token, &DecodingKey::from_secret(SECRET), &validation)
        .expect("token should verify with a standard JWT library");

    assert_eq!(decoded.claims.user_id, "u_42");
    assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
}

#[test]
fn ecosystem_decoder_rejects_wrong_secret() {
    let claims = RealtimeClaims::session("u_42", SystemTime::now(), None).unwrap();
    let token = sign_compact(&claims, SECRET).unwrap();

    let validation = Validation::new(Algorithm::HS256);
    let result = decode::<RealtimeClaims>(
        &token,
        &DecodingKey::from_secret(b"wrong-secret"),
        &validation,
    );
    assert!(result.is_err());
}

#[test]
fn pinned_reference_token_for_uuid_caller() {
    // End-to-end over the normalizer: the UUID caller id becomes the
    // underscore form before it is embedded in the claims.
    let user_id = identity::normalize("11111111-1111-1111-1111-111111111111");
    let claims = RealtimeClaims::at(user_id, 1000, 3600, None);
    let token = sign_compact(&claims, SECRET).unwrap();

    assert_eq!(
        token,
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
         eyJ1c2VyX2lkIjoiMTExMTExMTFfMTExMV8xMTExXzExMTFfMTExMTExMTExMTExIiwiaWF0IjoxMDAwLCJleHAiOjQ2MDB9.\
         nucjibDgo1FDBuDXzrr4T_VwIRm9WzA7JAMLU_lHlVs"
    );

    // The expired fixture still verifies cryptographically.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    decode::<RealtimeClaims>(&token, &DecodingKey::from_secret(SECRET), &validation)
        .expect("pinned token should verify");
}

#[test]
fn scoped_tokens_carry_call_cids_through_a_decoder() {
    let claims = RealtimeClaims::session(
        "u_42",
        SystemTime::now(),
        Some(vec!["audio:room1".to_string()]),
    )
    .unwrap();
    let token = sign_compact(&claims, SECRET).unwrap();

    let validation = Validation::new(Algorithm::HS256);
    let decoded =
        decode::<RealtimeClaims>(&token, &DecodingKey::from_secret(SECRET), &validation).unwrap();

    assert_eq!(
        decoded.claims.call_cids,
        Some(vec!["audio:room1".to_string()])
    );
}
