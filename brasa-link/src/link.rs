//! Deep-link construction and entry URL parsing

use crate::error::{LinkError, LinkResult};

/// Chat deep link to a fixed destination number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    base_url: String,
    phone: String,
}

impl DeepLink {
    /// Create a deep link template
    ///
    /// `phone` is the international number without `+` or separators.
    pub fn new(base_url: &str, phone: &str) -> LinkResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(LinkError::InvalidConfig(format!(
                "Base URL must be http(s): {}",
                base_url
            )));
        }

        let phone = phone.trim();
        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(LinkError::InvalidConfig(format!(
                "Phone must be digits only: {:?}",
                phone
            )));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Full URL with the text percent-encoded into the `text` parameter
    pub fn url_for(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.phone,
            urlencoding::encode(text)
        )
    }
}

/// Read a query parameter from a URL (first occurrence, percent-decoded)
///
/// Accepts full URLs (`https://host/?mesa=4`) and bare query strings
/// (`?mesa=4`, `mesa=4`). Fragments are ignored. Empty values count as
/// absent.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let query = match without_fragment.split_once('?') {
        Some((_, q)) => q,
        None if without_fragment.contains('=') => without_fragment,
        None => return None,
    };

    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
        .filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_encodes_text() {
        let link = DeepLink::new("https://wa.me/", "51936684281").unwrap();
        let url = link.url_for("*Pedido #PB1*\nTotal: S/ 60.00 & más");

        assert_eq!(
            url,
            "https://wa.me/51936684281?text=%2APedido%20%23PB1%2A%0ATotal%3A%20S%2F%2060.00%20%26%20m%C3%A1s"
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            DeepLink::new("wa.me", "519"),
            Err(LinkError::InvalidConfig(_))
        ));
        assert!(matches!(
            DeepLink::new("https://wa.me", "+51 936"),
            Err(LinkError::InvalidConfig(_))
        ));
        assert!(DeepLink::new("https://wa.me", "").is_err());
    }

    #[test]
    fn test_query_param_variants() {
        assert_eq!(
            query_param("https://brasa.pe/?mesa=4", "mesa").as_deref(),
            Some("4")
        );
        assert_eq!(
            query_param("https://brasa.pe/menu?x=1&mesa=12#top", "mesa").as_deref(),
            Some("12")
        );
        assert_eq!(query_param("?mesa=Terraza%202", "mesa").as_deref(), Some("Terraza 2"));
        assert_eq!(query_param("mesa=3", "mesa").as_deref(), Some("3"));
    }

    #[test]
    fn test_query_param_absent() {
        assert_eq!(query_param("https://brasa.pe/", "mesa"), None);
        assert_eq!(query_param("https://brasa.pe/?mesa=", "mesa"), None);
        assert_eq!(query_param("https://brasa.pe/?table=3", "mesa"), None);
    }
}
