/// HTTP endpoint paths served by the bridge.
pub mod endpoints {
    pub const BUILDER: &str = "/builder";
    pub const HEALTH: &str = "/health";
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_defaults() {
        let h = HealthResponse::default();
        assert_eq!(h.status, "ok");
        assert!(!h.version.is_empty());
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoints::BUILDER, "/builder");
        assert_eq!(endpoints::HEALTH, "/health");
    }
}
