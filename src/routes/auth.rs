use actix_web::http::header;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while authenticating a caller
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Claims carried by marketplace-issued access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
}

impl Claims {
    /// Whether the caller may read data scoped to `subject_id`.
    ///
    /// Callers read their own data; the admin role reads anyone's.
    pub fn can_act_for(&self, subject_id: &str) -> bool {
        self.sub == subject_id || self.role.as_deref() == Some("admin")
    }
}

/// Extract and verify the caller's bearer token
pub fn authenticate(req: &HttpRequest, secret: &str) -> Result<Claims, AuthError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn issue_token(sub: &str, role: Option<&str>) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            role: role.map(String::from),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_authenticates() {
        let token = issue_token("inf_1", None);
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        let claims = authenticate(&req, SECRET).unwrap();
        assert_eq!(claims.sub, "inf_1");
        assert!(claims.can_act_for("inf_1"));
        assert!(!claims.can_act_for("inf_2"));
    }

    #[test]
    fn test_admin_can_act_for_anyone() {
        let token = issue_token("ops_1", Some("admin"));
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        let claims = authenticate(&req, SECRET).unwrap();
        assert!(claims.can_act_for("inf_1"));
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(authenticate(&req, SECRET), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("inf_1", None);
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert!(matches!(
            authenticate(&req, "other-secret"),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
