use serde::{Deserialize, Serialize};

use bridge_types::{Asset, TypeError};

/// Canonical asset reference in a request.
///
/// Requests may name an asset in any of these forms; all deserialize to the
/// same canonical descriptor:
///
/// - `"native"` or `{"type": "native"}`
/// - `"USD:GISSUER"`
/// - `{"code": "usd", "issuer": "GISSUER"}` (codes are upper-cased)
///
/// An object naming neither a type nor a code and issuer is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAsset", into = "String")]
pub enum AssetDescriptor {
    Native,
    Credit { code: String, issuer: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAsset {
    Shorthand(String),
    Object {
        #[serde(rename = "type", default)]
        asset_type: Option<String>,
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        issuer: Option<String>,
    },
}

impl TryFrom<RawAsset> for AssetDescriptor {
    type Error = String;

    fn try_from(raw: RawAsset) -> Result<Self, Self::Error> {
        match raw {
            RawAsset::Shorthand(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("native") {
                    return Ok(Self::Native);
                }
                let (code, issuer) = s
                    .split_once(':')
                    .ok_or_else(|| format!("asset {s:?} is neither \"native\" nor CODE:ISSUER"))?;
                Ok(Self::credit(code, issuer))
            }
            RawAsset::Object {
                asset_type,
                code,
                issuer,
            } => {
                let asset_type = asset_type.as_deref().map(str::trim).unwrap_or_default();
                if asset_type.eq_ignore_ascii_case("native") {
                    return Ok(Self::Native);
                }
                match (code, issuer) {
                    (Some(code), Some(issuer)) => Ok(Self::credit(&code, &issuer)),
                    (None, None) if asset_type.is_empty() => {
                        Err("asset requires a type or a code and issuer".into())
                    }
                    _ => Err("credit asset requires both code and issuer".into()),
                }
            }
        }
    }
}

impl From<AssetDescriptor> for String {
    fn from(asset: AssetDescriptor) -> Self {
        asset.describe()
    }
}

impl AssetDescriptor {
    fn credit(code: &str, issuer: &str) -> Self {
        Self::Credit {
            code: code.trim().to_ascii_uppercase(),
            issuer: issuer.trim().to_owned(),
        }
    }

    /// Resolve into a typed asset.
    pub fn to_asset(&self) -> Result<Asset, TypeError> {
        match self {
            Self::Native => Ok(Asset::Native),
            Self::Credit { code, issuer } => Asset::credit(code, issuer),
        }
    }

    /// Display form used in error values.
    pub fn describe(&self) -> String {
        match self {
            Self::Native => "native".into(),
            Self::Credit { code, issuer } => format!("{code}:{issuer}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<AssetDescriptor, serde_json::Error> {
        serde_json::from_value(json)
    }

    #[test]
    fn native_forms() {
        for json in [
            serde_json::json!("native"),
            serde_json::json!("NATIVE"),
            serde_json::json!({"type": "native"}),
            serde_json::json!({"type": " Native "}),
        ] {
            assert_eq!(parse(json).unwrap(), AssetDescriptor::Native);
        }
    }

    #[test]
    fn credit_forms_normalize() {
        let expected = AssetDescriptor::Credit {
            code: "USD".into(),
            issuer: "GISSUER".into(),
        };
        assert_eq!(parse(serde_json::json!("usd:GISSUER")).unwrap(), expected);
        assert_eq!(
            parse(serde_json::json!({"code": " usd ", "issuer": "GISSUER"})).unwrap(),
            expected
        );
        assert_eq!(
            parse(serde_json::json!({"type": "credit_alphanum4", "code": "USD", "issuer": "GISSUER"}))
                .unwrap(),
            expected
        );
    }

    #[test]
    fn incomplete_credit_rejected() {
        assert!(parse(serde_json::json!({"code": "USD"})).is_err());
        assert!(parse(serde_json::json!({"type": "credit_alphanum4"})).is_err());
        assert!(parse(serde_json::json!("USD")).is_err());
    }

    #[test]
    fn empty_object_is_not_native() {
        let err = parse(serde_json::json!({})).unwrap_err();
        assert!(err.to_string().contains("type or a code and issuer"));
        assert!(parse(serde_json::json!({"type": ""})).is_err());
    }

    #[test]
    fn serializes_to_shorthand() {
        let usd = parse(serde_json::json!({"code": "USD", "issuer": "GISSUER"})).unwrap();
        let json = serde_json::to_value(&usd).unwrap();
        assert_eq!(json, serde_json::json!("USD:GISSUER"));
        assert_eq!(parse(json).unwrap(), usd);
    }

    #[test]
    fn to_asset_validates() {
        assert_eq!(AssetDescriptor::Native.to_asset().unwrap(), Asset::Native);
        let bad = AssetDescriptor::Credit {
            code: "TOOLONGASSETCODE".into(),
            issuer: "GISSUER".into(),
        };
        assert!(bad.to_asset().is_err());
        assert_eq!(bad.describe(), "TOOLONGASSETCODE:GISSUER");
    }
}
