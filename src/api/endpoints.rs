//! Felt REST endpoints, resolved against the base URL once per client.

use crate::error::{Error, Result};
use url::Url;

/// Endpoint URLs for one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
    maps: Url,
}

impl Endpoints {
    /// Resolve the endpoints for `base_url`.
    ///
    /// A missing trailing slash is added so relative joins keep the
    /// version prefix (`/api/v1` would otherwise lose `v1`).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base = Url::parse(&normalized)?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!("Base URL {} cannot hold paths", base)));
        }
        let maps = base.join("maps")?;

        Ok(Self { base, maps })
    }

    /// Normalized base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `POST maps`
    pub fn maps(&self) -> Url {
        self.maps.clone()
    }

    /// `POST maps/{map_id}/layers`
    pub fn layers(&self, map_id: &str) -> Result<Url> {
        self.map_path(map_id, &["layers"])
    }

    /// `POST maps/{map_id}/layers/{layer_id}/finish_upload`
    pub fn finish_upload(&self, map_id: &str, layer_id: &str) -> Result<Url> {
        self.map_path(map_id, &["layers", layer_id, "finish_upload"])
    }

    /// `GET maps/{map_id}/elements`
    pub fn elements(&self, map_id: &str) -> Result<Url> {
        self.map_path(map_id, &["elements"])
    }

    // Ids are pushed as single segments, so `/` or `?` in them get escaped.
    fn map_path(&self, map_id: &str, rest: &[&str]) -> Result<Url> {
        if map_id.is_empty() {
            return Err(Error::invalid_input("Map id must not be empty"));
        }

        let mut url = self.maps.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("Base URL {} cannot hold paths", self.base)))?
            .pop_if_empty()
            .push(map_id)
            .extend(rest);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates() {
        let endpoints = Endpoints::new("https://felt.com/api/v1/").unwrap();
        assert_eq!(endpoints.maps().as_str(), "https://felt.com/api/v1/maps");
        assert_eq!(
            endpoints.layers("m1").unwrap().as_str(),
            "https://felt.com/api/v1/maps/m1/layers"
        );
        assert_eq!(
            endpoints.finish_upload("m1", "l9").unwrap().as_str(),
            "https://felt.com/api/v1/maps/m1/layers/l9/finish_upload"
        );
        assert_eq!(
            endpoints.elements("m1").unwrap().as_str(),
            "https://felt.com/api/v1/maps/m1/elements"
        );
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let endpoints = Endpoints::new("http://localhost:8080/api/v1").unwrap();
        assert_eq!(endpoints.maps().as_str(), "http://localhost:8080/api/v1/maps");
    }

    #[test]
    fn test_ids_are_escaped() {
        let endpoints = Endpoints::new("https://felt.com/api/v1/").unwrap();
        assert_eq!(
            endpoints.elements("a/b?c").unwrap().as_str(),
            "https://felt.com/api/v1/maps/a%2Fb%3Fc/elements"
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(Endpoints::new("not a url"), Err(Error::Url(_))));
        assert!(matches!(Endpoints::new("mailto:x@y.z"), Err(Error::Config(_))));

        let endpoints = Endpoints::new("https://felt.com/api/v1/").unwrap();
        assert!(matches!(endpoints.layers(""), Err(Error::InvalidInput(_))));
    }
}
