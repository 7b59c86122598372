use serde::{Deserialize, Serialize};

/// JWT payload used for authentication.
///
/// `sub` carries the user id in string form; the verifier parses it back
/// into a `Uuid` and rejects tokens whose subject does not parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user ID, string form
    pub exp: usize,  // expires at (unix timestamp)
}
