//! Base URL sets for the restaurants and authentication services.

/// The pair of base URLs a client is constructed against: one for
/// restaurant/order operations, one for authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api: String,
    pub authentication: String,
}

impl Endpoints {
    /// The production endpoint set.
    pub fn production() -> Self {
        Self {
            api: "https://api.wixrestaurants.com/v2".to_string(),
            authentication: "https://auth.wixrestaurants.com/v2".to_string(),
        }
    }

    /// A caller-supplied endpoint set, for alternate deployments or tests.
    pub fn custom(api: &str, authentication: &str) -> Self {
        Self {
            api: api.to_string(),
            authentication: authentication.to_string(),
        }
    }
}
