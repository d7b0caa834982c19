//! Sequence-number resolution.
//!
//! A request either names its sequence number or leaves it to the ledger.
//! Both branches resolve to a single `u64` before composition starts, and
//! zero is the one value that means "could not resolve".

use bridge_horizon::AccountLoader;
use bridge_protocol::{BuildError, ValidatedRequest};
use bridge_types::{AccountId, SequenceNumber};

/// Where the sequence number of a build comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceSource<'a> {
    /// The caller supplied it.
    Explicit(&'a str),
    /// Ask the ledger for the source account's current sequence.
    Lookup(&'a AccountId),
}

impl<'a> SequenceSource<'a> {
    pub fn from_request(request: &'a ValidatedRequest) -> Self {
        match request.sequence_number() {
            Some(raw) => Self::Explicit(raw),
            None => Self::Lookup(request.source()),
        }
    }

    /// Resolve to a raw value. Every failure yields zero.
    pub async fn resolve(self, loader: &dyn AccountLoader) -> u64 {
        match self {
            Self::Explicit(raw) => raw.parse().unwrap_or(0),
            Self::Lookup(account) => match loader.load_account(account).await {
                Ok(resp) => resp.sequence.parse().unwrap_or_else(|_| {
                    tracing::warn!(
                        account = %account,
                        sequence = %resp.sequence,
                        "ledger reported an unparseable sequence"
                    );
                    0
                }),
                Err(e) => {
                    tracing::warn!(account = %account, error = %e, "account lookup failed");
                    0
                }
            },
        }
    }
}

/// Resolve the sequence number for `request`.
///
/// Zero, however it arose, is reported against the caller's raw
/// `sequence_number` field.
pub async fn resolve_sequence(
    request: &ValidatedRequest,
    loader: &dyn AccountLoader,
) -> Result<SequenceNumber, BuildError> {
    let source = SequenceSource::from_request(request);
    let value = source.resolve(loader).await;
    SequenceNumber::new(value).map_err(|_| {
        tracing::warn!(
            ?source,
            sequence_number = request.raw_sequence_number(),
            "sequence number is invalid"
        );
        BuildError::invalid_sequence(request.raw_sequence_number())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_horizon::StaticAccountLoader;
    use bridge_protocol::BuilderRequest;
    use serde_json::json;

    fn validated(sequence: &str) -> ValidatedRequest {
        let body = json!({
            "source": "GSOURCE",
            "sequence_number": sequence,
            "operations": [{"type": "inflation"}],
        });
        BuilderRequest::from_json(body.to_string().as_bytes())
            .unwrap()
            .process()
            .unwrap()
            .validate()
            .unwrap()
    }

    fn loader(sequence: &str) -> StaticAccountLoader {
        StaticAccountLoader::new().with_account(AccountId::parse("GSOURCE").unwrap(), sequence)
    }

    #[test]
    fn source_branches() {
        let explicit = validated("9");
        assert_eq!(SequenceSource::from_request(&explicit), SequenceSource::Explicit("9"));

        let lookup = validated("");
        assert!(matches!(
            SequenceSource::from_request(&lookup),
            SequenceSource::Lookup(id) if id.as_str() == "GSOURCE"
        ));
    }

    #[tokio::test]
    async fn explicit_value() {
        let seq = resolve_sequence(&validated("9"), &StaticAccountLoader::new())
            .await
            .unwrap();
        assert_eq!(seq.value(), 9);
    }

    #[tokio::test]
    async fn looked_up_value() {
        let seq = resolve_sequence(&validated(""), &loader("42")).await.unwrap();
        assert_eq!(seq.value(), 42);
    }

    #[tokio::test]
    async fn explicit_zero_rejected() {
        let err = resolve_sequence(&validated("0"), &loader("42")).await.unwrap_err();
        assert_eq!(err.field_and_value(), Some(("sequence_number", "0")));
    }

    #[tokio::test]
    async fn padded_value_rejected_verbatim() {
        let err = resolve_sequence(&validated(" 7 "), &loader("42")).await.unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter { .. }));
        assert_eq!(err.field_and_value(), Some(("sequence_number", " 7 ")));

        let err = resolve_sequence(&validated(" 0 "), &loader("42")).await.unwrap_err();
        assert_eq!(err.field_and_value(), Some(("sequence_number", " 0 ")));
    }

    #[tokio::test]
    async fn whitespace_only_is_not_a_lookup() {
        let request = validated("   ");
        assert_eq!(SequenceSource::from_request(&request), SequenceSource::Explicit("   "));
        let err = resolve_sequence(&request, &loader("42")).await.unwrap_err();
        assert_eq!(err.field_and_value(), Some(("sequence_number", "   ")));
    }

    #[tokio::test]
    async fn unknown_account_collapses_to_zero() {
        let err = resolve_sequence(&validated(""), &StaticAccountLoader::new())
            .await
            .unwrap_err();
        assert_eq!(err.field_and_value(), Some(("sequence_number", "")));
        assert_eq!(err.to_response().message, "Sequence number is invalid");
    }

    #[tokio::test]
    async fn unparseable_ledger_value_collapses_to_zero() {
        let err = resolve_sequence(&validated(""), &loader("n/a")).await.unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter { .. }));

        let err = resolve_sequence(&validated(""), &loader("0")).await.unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter { .. }));
    }
}
