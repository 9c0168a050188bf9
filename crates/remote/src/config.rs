//! Where the remote store lives and whose data is addressed.

/// User whose orders are read and written when none is configured.
pub const DEFAULT_USER_ID: &str = "u1";

/// Connection settings for the remote document store.
///
/// Collections are addressed as `{base_url}/{collection}.json`; the
/// optional `auth_token` is passed as the store's `auth` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub user_id: String,
    pub auth_token: Option<String>,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        RemoteConfig {
            base_url: base_url.into(),
            user_id: DEFAULT_USER_ID.to_string(),
            auth_token: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// `{base}/orders/{user}.json`
    pub fn orders_url(&self) -> String {
        self.url(&format!("orders/{}", self.user_id))
    }

    /// `{base}/products.json`
    pub fn products_url(&self) -> String {
        self.url("products")
    }

    /// `{base}/products/{id}.json`
    pub fn product_url(&self, product_id: &str) -> String {
        self.url(&format!("products/{}", product_id))
    }

    fn url(&self, path: &str) -> String {
        let mut url = format!("{}/{}.json", self.base_url.trim_end_matches('/'), path);
        if let Some(ref token) = self.auth_token {
            url.push_str("?auth=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }
}

/// The URL without its query string, safe to log.
pub(crate) fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_urls() {
        let config = RemoteConfig::new("https://shop.example.com/");
        assert_eq!(config.orders_url(), "https://shop.example.com/orders/u1.json");
        assert_eq!(config.products_url(), "https://shop.example.com/products.json");
        assert_eq!(
            config.product_url("p7"),
            "https://shop.example.com/products/p7.json"
        );
    }

    #[test]
    fn user_and_token() {
        let config = RemoteConfig::new("https://shop.example.com")
            .with_user("u42")
            .with_auth_token("secret");
        assert_eq!(
            config.orders_url(),
            "https://shop.example.com/orders/u42.json?auth=secret"
        );
        assert_eq!(
            redact(&config.orders_url()),
            "https://shop.example.com/orders/u42.json"
        );
    }

    #[test]
    fn token_is_query_encoded() {
        let config = RemoteConfig::new("https://shop.example.com").with_auth_token("a+b&c=d#e f");
        assert_eq!(
            config.products_url(),
            "https://shop.example.com/products.json?auth=a%2Bb%26c%3Dd%23e%20f"
        );
    }
}
