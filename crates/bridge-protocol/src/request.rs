use serde::{Deserialize, Deserializer, Serialize};

use bridge_crypto::SigningKey;
use bridge_types::AccountId;

use crate::error::{BuildError, RequestError};
use crate::operation::OperationDescriptor;

/// One `{type, body}` pair as it arrives on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawOperation {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub body: serde_json::Value,
}

/// A decoded but unchecked build request. Absent and `null` fields are
/// both read as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    /// Decimal sequence number, kept exactly as sent. Empty asks the builder
    /// to look it up.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequence_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operations: Vec<RawOperation>,
    /// Hex-encoded 32-byte signing seeds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub signers: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl BuilderRequest {
    /// Decode a request body. Any decoding failure is a malformed request.
    pub fn from_json(bytes: &[u8]) -> Result<Self, BuildError> {
        serde_json::from_slice(bytes).map_err(|e| BuildError::MalformedInput(e.to_string()))
    }

    /// Turn raw operations into typed descriptors and normalize every field.
    pub fn process(self) -> Result<ProcessedRequest, RequestError> {
        let operations = self
            .operations
            .into_iter()
            .enumerate()
            .map(|(i, raw)| OperationDescriptor::from_raw(i, &raw.kind, raw.body))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProcessedRequest {
            source: self.source.trim().to_owned(),
            sequence_number: self.sequence_number,
            operations,
            signers: self
                .signers
                .into_iter()
                .map(|s| s.trim().to_owned())
                .collect(),
        })
    }
}

/// A request whose operations have typed bodies. Every field except the
/// sequence number is trimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedRequest {
    source: String,
    sequence_number: String,
    operations: Vec<OperationDescriptor>,
    signers: Vec<String>,
}

impl ProcessedRequest {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sequence_number(&self) -> &str {
        &self.sequence_number
    }

    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    /// Enforce field constraints, stopping at the first failure.
    pub fn validate(self) -> Result<ValidatedRequest, RequestError> {
        if self.source.is_empty() {
            return Err(RequestError::missing("source", "source is required"));
        }
        let source = AccountId::parse(&self.source)
            .map_err(|e| RequestError::invalid("source", &self.source, e.to_string()))?;

        if self.operations.is_empty() {
            return Err(RequestError::missing(
                "operations",
                "at least one operation is required",
            ));
        }
        for (i, op) in self.operations.iter().enumerate() {
            op.validate(i)?;
        }

        // Seeds are secret, so the error carries the position only.
        let signers = self
            .signers
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                SigningKey::from_hex(seed).map_err(|_| {
                    RequestError::invalid(
                        "signers",
                        "",
                        format!("signer {i} is not a valid 32-byte hex seed"),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedRequest {
            source,
            sequence_number: self.sequence_number,
            operations: self.operations,
            signers,
        })
    }
}

/// A request that passed validation and is ready for assembly.
#[derive(Clone, Debug)]
pub struct ValidatedRequest {
    source: AccountId,
    sequence_number: String,
    operations: Vec<OperationDescriptor>,
    signers: Vec<SigningKey>,
}

impl ValidatedRequest {
    pub fn source(&self) -> &AccountId {
        &self.source
    }

    /// The caller's sequence number, or `None` when it must be looked up.
    pub fn sequence_number(&self) -> Option<&str> {
        (!self.sequence_number.is_empty()).then_some(self.sequence_number.as_str())
    }

    /// The sequence field as sent, empty when none was given.
    pub fn raw_sequence_number(&self) -> &str {
        &self.sequence_number
    }

    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn signers(&self) -> &[SigningKey] {
        &self.signers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestErrorKind;
    use serde_json::json;

    const SEED: &str = "0101010101010101010101010101010101010101010101010101010101010101";

    fn request(value: serde_json::Value) -> BuilderRequest {
        BuilderRequest::from_json(value.to_string().as_bytes()).unwrap()
    }

    fn payment() -> serde_json::Value {
        json!({"type": "payment", "body": {"destination": "GDEST", "amount": "1", "asset": "native"}})
    }

    fn validate(value: serde_json::Value) -> Result<ValidatedRequest, RequestError> {
        request(value).process()?.validate()
    }

    #[test]
    fn malformed_json_rejected() {
        for body in [&b"{"[..], b"not json", b"[1,2]", b"{\"operations\": 5}"] {
            assert!(matches!(
                BuilderRequest::from_json(body),
                Err(BuildError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn valid_request_passes() {
        let validated = validate(json!({
            "source": " GSOURCE ",
            "sequence_number": "7",
            "operations": [payment()],
            "signers": [SEED],
        }))
        .unwrap();
        assert_eq!(validated.source().as_str(), "GSOURCE");
        assert_eq!(validated.sequence_number(), Some("7"));
        assert_eq!(validated.operations().len(), 1);
        assert_eq!(validated.signers().len(), 1);
    }

    #[test]
    fn empty_sequence_means_lookup() {
        let validated = validate(json!({"source": "GSOURCE", "operations": [payment()]})).unwrap();
        assert_eq!(validated.sequence_number(), None);
        assert_eq!(validated.raw_sequence_number(), "");
        assert!(validated.signers().is_empty());
    }

    #[test]
    fn zero_sequence_is_left_to_resolution() {
        let validated = validate(json!({
            "source": "GSOURCE",
            "sequence_number": "0",
            "operations": [payment()],
        }))
        .unwrap();
        assert_eq!(validated.sequence_number(), Some("0"));
    }

    #[test]
    fn missing_source() {
        let err = validate(json!({"operations": [payment()]})).unwrap_err();
        assert_eq!(err.kind(), RequestErrorKind::MissingParameter);
        assert_eq!(err.field(), "source");
    }

    #[test]
    fn invalid_source() {
        let err = validate(json!({"source": "not-an-account", "operations": [payment()]})).unwrap_err();
        assert_eq!(err.kind(), RequestErrorKind::InvalidParameter);
        assert_eq!(err.value(), "not-an-account");
    }

    #[test]
    fn non_numeric_sequence_is_left_to_resolution() {
        let validated = validate(json!({
            "source": "GSOURCE",
            "sequence_number": "twelve",
            "operations": [payment()],
        }))
        .unwrap();
        assert_eq!(validated.sequence_number(), Some("twelve"));
    }

    #[test]
    fn padded_sequence_kept_verbatim() {
        let validated = validate(json!({
            "source": "GSOURCE",
            "sequence_number": " 7 ",
            "operations": [payment()],
        }))
        .unwrap();
        assert_eq!(validated.sequence_number(), Some(" 7 "));
        assert_eq!(validated.raw_sequence_number(), " 7 ");
    }

    #[test]
    fn null_sequence_means_lookup() {
        let validated = validate(json!({
            "source": "GSOURCE",
            "sequence_number": null,
            "operations": [payment()],
        }))
        .unwrap();
        assert_eq!(validated.sequence_number(), None);
    }

    #[test]
    fn null_signers_means_unsigned() {
        let validated = validate(json!({
            "source": "GSOURCE",
            "operations": [payment()],
            "signers": null,
        }))
        .unwrap();
        assert!(validated.signers().is_empty());
    }

    #[test]
    fn null_source_and_operations_read_as_missing() {
        let err = validate(json!({"source": null, "operations": [payment()]})).unwrap_err();
        assert_eq!(err.field(), "source");
        assert_eq!(err.kind(), RequestErrorKind::MissingParameter);

        let err = validate(json!({"source": "GSOURCE", "operations": null})).unwrap_err();
        assert_eq!(err.field(), "operations");
        assert_eq!(err.kind(), RequestErrorKind::MissingParameter);
    }

    #[test]
    fn no_operations() {
        let err = validate(json!({"source": "GSOURCE", "operations": []})).unwrap_err();
        assert_eq!(err.field(), "operations");
        assert_eq!(err.kind(), RequestErrorKind::MissingParameter);
    }

    #[test]
    fn unknown_operation_fails_processing() {
        let err = request(json!({"source": "GSOURCE", "operations": [payment(), {"type": "nope"}]}))
            .process()
            .unwrap_err();
        assert_eq!(err.field(), "operations[1].type");
    }

    #[test]
    fn operation_errors_carry_index() {
        let err = validate(json!({
            "source": "GSOURCE",
            "operations": [
                payment(),
                {"type": "create_account", "body": {"destination": "GNEW", "starting_balance": "abc"}},
            ],
        }))
        .unwrap_err();
        assert_eq!(err.field(), "operations[1].body.starting_balance");
        assert_eq!(err.value(), "abc");
    }

    #[test]
    fn bad_signer_does_not_echo_secret() {
        let err = validate(json!({
            "source": "GSOURCE",
            "operations": [payment()],
            "signers": [SEED, "deadbeef"],
        }))
        .unwrap_err();
        assert_eq!(err.field(), "signers");
        assert!(err.value().is_empty());
        assert!(err.message().contains("signer 1"));
        assert!(!err.to_string().contains("deadbeef"));
    }

    #[test]
    fn processing_preserves_operation_order() {
        let processed = request(json!({
            "source": "GSOURCE",
            "operations": [
                {"type": "inflation"},
                payment(),
                {"type": "account_merge", "body": {"destination": "GDEST"}},
            ],
        }))
        .process()
        .unwrap();
        let kinds: Vec<_> = processed.operations().iter().map(|o| o.kind()).collect();
        assert_eq!(kinds, ["inflation", "payment", "account_merge"]);
    }
}
