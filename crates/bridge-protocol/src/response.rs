use serde::{Deserialize, Serialize};

/// Successful build result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderResponse {
    /// Base64-encoded signed transaction envelope.
    pub transaction_envelope: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_snake_case() {
        let r = BuilderResponse {
            transaction_envelope: "AAAA".into(),
        };
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({"transaction_envelope": "AAAA"})
        );
    }
}
