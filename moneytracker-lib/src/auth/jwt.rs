use crate::user::UserId;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone)]
pub struct JWTAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    exp: usize,
    sub: UserId,
}

impl JWTAuth {
    const EXPIRE_TIME: u64 = 7 * 24 * 60 * 60;

    pub fn from_secret(secret: Vec<u8>) -> JWTAuth {
        JWTAuth {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
        }
    }

    pub fn create_token(&self, user_id: UserId) -> String {
        let expiry = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after the epoch")
            .as_secs()
            + Self::EXPIRE_TIME;
        let claims = Claims {
            exp: expiry as usize,
            sub: user_id,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .expect("HS256 encoding does not fail")
    }

    pub fn validate_token(&self, token: &str) -> Result<UserId, jsonwebtoken::errors::Error> {
        let token_data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::JWTAuth;

    #[test]
    fn token_round_trip() {
        let secret: [u8; 32] = rand::random();
        let jwt_auth = JWTAuth::from_secret(secret.to_vec());

        let token = jwt_auth.create_token("someone".to_owned());
        let user_id = jwt_auth.validate_token(&token).unwrap();
        assert_eq!(user_id, "someone");
    }

    #[test]
    fn token_rejected_with_different_secret() {
        let secret: [u8; 32] = rand::random();
        let jwt_auth = JWTAuth::from_secret(secret.to_vec());
        let token = jwt_auth.create_token("someone".to_owned());

        let other_secret: [u8; 32] = rand::random();
        let other_auth = JWTAuth::from_secret(other_secret.to_vec());
        assert!(other_auth.validate_token(&token).is_err());
    }
}
