use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use bridge_tx::{
    ComposeError, Operation, OperationBody, SetOptions, SignerUpdate, TransactionMutator,
    AUTH_FLAGS_MASK, MAX_DATA_NAME_LEN, MAX_DATA_VALUE_LEN, MAX_HOME_DOMAIN_LEN, MAX_PATH_LEN,
};
use bridge_types::{AccountId, Amount, Asset, AssetCode, Price};

use crate::asset::AssetDescriptor;
use crate::error::RequestError;

// ---------------------------------------------------------------------------
// OperationDescriptor
// ---------------------------------------------------------------------------

/// A typed, normalized operation from a build request.
///
/// Field values are still the caller's strings; [`Self::validate`] checks
/// them and [`Self::to_mutator`] turns them into a composable mutator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationDescriptor {
    CreateAccount(CreateAccountBody),
    Payment(PaymentBody),
    PathPayment(PathPaymentBody),
    ManageOffer(ManageOfferBody),
    CreatePassiveOffer(CreatePassiveOfferBody),
    SetOptions(SetOptionsBody),
    ChangeTrust(ChangeTrustBody),
    AllowTrust(AllowTrustBody),
    AccountMerge(AccountMergeBody),
    Inflation(InflationBody),
    ManageData(ManageDataBody),
}

impl OperationDescriptor {
    /// Decode the body for `kind` and normalize it.
    pub fn from_raw(
        index: usize,
        kind: &str,
        body: serde_json::Value,
    ) -> Result<Self, RequestError> {
        let mut descriptor = match kind.trim() {
            "" => {
                return Err(RequestError::missing(
                    format!("operations[{index}].type"),
                    "operation type is required",
                ))
            }
            "create_account" => Self::CreateAccount(decode(index, body)?),
            "payment" => Self::Payment(decode(index, body)?),
            "path_payment" => Self::PathPayment(decode(index, body)?),
            "manage_offer" => Self::ManageOffer(decode(index, body)?),
            "create_passive_offer" => Self::CreatePassiveOffer(decode(index, body)?),
            "set_options" => Self::SetOptions(decode(index, body)?),
            "change_trust" => Self::ChangeTrust(decode(index, body)?),
            "allow_trust" => Self::AllowTrust(decode(index, body)?),
            "account_merge" => Self::AccountMerge(decode(index, body)?),
            "inflation" => Self::Inflation(decode(index, body)?),
            "manage_data" => Self::ManageData(decode(index, body)?),
            other => {
                return Err(RequestError::invalid(
                    format!("operations[{index}].type"),
                    other,
                    "unknown operation type",
                ))
            }
        };
        descriptor.body_mut().normalize();
        Ok(descriptor)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateAccount(_) => "create_account",
            Self::Payment(_) => "payment",
            Self::PathPayment(_) => "path_payment",
            Self::ManageOffer(_) => "manage_offer",
            Self::CreatePassiveOffer(_) => "create_passive_offer",
            Self::SetOptions(_) => "set_options",
            Self::ChangeTrust(_) => "change_trust",
            Self::AllowTrust(_) => "allow_trust",
            Self::AccountMerge(_) => "account_merge",
            Self::Inflation(_) => "inflation",
            Self::ManageData(_) => "manage_data",
        }
    }

    /// Check every field of the operation at position `index`.
    pub fn validate(&self, index: usize) -> Result<(), RequestError> {
        self.to_operation(index).map(|_| ())
    }

    /// Build the typed operation.
    pub fn to_operation(&self, index: usize) -> Result<Operation, RequestError> {
        let path = FieldPath::at(index);
        let body = self.body();
        let source = optional_account(&path, "source", body.source())?;
        Ok(Operation {
            source,
            body: body.build(&path)?,
        })
    }

    /// Convert into a composable mutator. Failure here means the descriptor
    /// skipped validation, so it is reported as a composition failure.
    pub fn to_mutator(&self, index: usize) -> Result<TransactionMutator, ComposeError> {
        self.to_operation(index)
            .map(TransactionMutator::Operation)
            .map_err(|e| ComposeError::InvalidOperation(format!("{}: {e}", self.kind())))
    }

    fn body(&self) -> &dyn BodyDescriptor {
        match self {
            Self::CreateAccount(b) => b,
            Self::Payment(b) => b,
            Self::PathPayment(b) => b,
            Self::ManageOffer(b) => b,
            Self::CreatePassiveOffer(b) => b,
            Self::SetOptions(b) => b,
            Self::ChangeTrust(b) => b,
            Self::AllowTrust(b) => b,
            Self::AccountMerge(b) => b,
            Self::Inflation(b) => b,
            Self::ManageData(b) => b,
        }
    }

    fn body_mut(&mut self) -> &mut dyn BodyDescriptor {
        match self {
            Self::CreateAccount(b) => b,
            Self::Payment(b) => b,
            Self::PathPayment(b) => b,
            Self::ManageOffer(b) => b,
            Self::CreatePassiveOffer(b) => b,
            Self::SetOptions(b) => b,
            Self::ChangeTrust(b) => b,
            Self::AllowTrust(b) => b,
            Self::AccountMerge(b) => b,
            Self::Inflation(b) => b,
            Self::ManageData(b) => b,
        }
    }
}

fn decode<T: DeserializeOwned>(index: usize, body: serde_json::Value) -> Result<T, RequestError> {
    // A bodiless operation (inflation) may omit the body entirely.
    let body = if body.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        body
    };
    serde_json::from_value(body).map_err(|e| {
        RequestError::invalid(format!("operations[{index}].body"), "", e.to_string())
    })
}

/// Per-kind behaviour shared by every body type.
trait BodyDescriptor {
    fn source(&self) -> Option<&str>;
    fn normalize(&mut self);
    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError>;
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Prefix for the field paths of one operation body.
struct FieldPath(String);

impl FieldPath {
    fn at(index: usize) -> Self {
        Self(format!("operations[{index}].body"))
    }

    fn field(&self, name: &str) -> String {
        format!("{}.{name}", self.0)
    }
}

fn trim(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_owned();
    }
}

fn trim_opt(s: &mut Option<String>) {
    if let Some(v) = s {
        trim(v);
        if v.is_empty() {
            *s = None;
        }
    }
}

fn account(path: &FieldPath, name: &str, value: &str) -> Result<AccountId, RequestError> {
    if value.is_empty() {
        return Err(RequestError::missing(path.field(name), format!("{name} is required")));
    }
    AccountId::parse(value).map_err(|e| RequestError::invalid(path.field(name), value, e.to_string()))
}

fn optional_account(
    path: &FieldPath,
    name: &str,
    value: Option<&str>,
) -> Result<Option<AccountId>, RequestError> {
    value.map(|v| account(path, name, v)).transpose()
}

fn amount(path: &FieldPath, name: &str, value: &str) -> Result<Amount, RequestError> {
    if value.is_empty() {
        return Err(RequestError::missing(path.field(name), format!("{name} is required")));
    }
    Amount::parse(value).map_err(|e| RequestError::invalid(path.field(name), value, e.to_string()))
}

fn positive_amount(path: &FieldPath, name: &str, value: &str) -> Result<Amount, RequestError> {
    let parsed = amount(path, name, value)?;
    if !parsed.is_positive() {
        return Err(RequestError::invalid(
            path.field(name),
            value,
            format!("{name} must be positive"),
        ));
    }
    Ok(parsed)
}

fn price(path: &FieldPath, name: &str, value: &str) -> Result<Price, RequestError> {
    if value.is_empty() {
        return Err(RequestError::missing(path.field(name), format!("{name} is required")));
    }
    Price::parse(value).map_err(|e| RequestError::invalid(path.field(name), value, e.to_string()))
}

fn asset(
    path: &FieldPath,
    name: &str,
    value: &Option<AssetDescriptor>,
) -> Result<Asset, RequestError> {
    let descriptor = value
        .as_ref()
        .ok_or_else(|| RequestError::missing(path.field(name), format!("{name} is required")))?;
    descriptor
        .to_asset()
        .map_err(|e| RequestError::invalid(path.field(name), descriptor.describe(), e.to_string()))
}

fn byte(path: &FieldPath, name: &str, value: Option<u32>) -> Result<Option<u8>, RequestError> {
    value
        .map(|v| {
            u8::try_from(v).map_err(|_| {
                RequestError::invalid(path.field(name), v.to_string(), format!("{name} must be 0-255"))
            })
        })
        .transpose()
}

fn flags(path: &FieldPath, name: &str, value: Option<u32>) -> Result<Option<u32>, RequestError> {
    match value {
        Some(v) if v & !AUTH_FLAGS_MASK != 0 => Err(RequestError::invalid(
            path.field(name),
            v.to_string(),
            "unknown account flag",
        )),
        other => Ok(other),
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateAccountBody {
    pub source: Option<String>,
    pub destination: String,
    pub starting_balance: String,
}

impl BodyDescriptor for CreateAccountBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.destination);
        trim(&mut self.starting_balance);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        Ok(OperationBody::CreateAccount {
            destination: account(path, "destination", &self.destination)?,
            starting_balance: positive_amount(path, "starting_balance", &self.starting_balance)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentBody {
    pub source: Option<String>,
    pub destination: String,
    pub amount: String,
    pub asset: Option<AssetDescriptor>,
}

impl BodyDescriptor for PaymentBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.destination);
        trim(&mut self.amount);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        Ok(OperationBody::Payment {
            destination: account(path, "destination", &self.destination)?,
            asset: asset(path, "asset", &self.asset)?,
            amount: positive_amount(path, "amount", &self.amount)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathPaymentBody {
    pub source: Option<String>,
    pub destination: String,
    pub destination_amount: String,
    pub destination_asset: Option<AssetDescriptor>,
    pub send_max: String,
    pub send_asset: Option<AssetDescriptor>,
    pub path: Vec<AssetDescriptor>,
}

impl BodyDescriptor for PathPaymentBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.destination);
        trim(&mut self.destination_amount);
        trim(&mut self.send_max);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        if self.path.len() > MAX_PATH_LEN {
            return Err(RequestError::invalid(
                path.field("path"),
                self.path.len().to_string(),
                format!("path may contain at most {MAX_PATH_LEN} assets"),
            ));
        }
        let hops = self
            .path
            .iter()
            .enumerate()
            .map(|(i, hop)| asset(path, &format!("path[{i}]"), &Some(hop.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OperationBody::PathPayment {
            send_asset: asset(path, "send_asset", &self.send_asset)?,
            send_max: positive_amount(path, "send_max", &self.send_max)?,
            destination: account(path, "destination", &self.destination)?,
            dest_asset: asset(path, "destination_asset", &self.destination_asset)?,
            dest_amount: positive_amount(path, "destination_amount", &self.destination_amount)?,
            path: hops,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManageOfferBody {
    pub source: Option<String>,
    pub selling: Option<AssetDescriptor>,
    pub buying: Option<AssetDescriptor>,
    pub amount: String,
    pub price: String,
    pub offer_id: String,
}

impl BodyDescriptor for ManageOfferBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.amount);
        trim(&mut self.price);
        trim(&mut self.offer_id);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        let offer_id = if self.offer_id.is_empty() {
            0
        } else {
            self.offer_id.parse::<u64>().map_err(|_| {
                RequestError::invalid(path.field("offer_id"), &self.offer_id, "offer_id must be an unsigned integer")
            })?
        };
        let amount = amount(path, "amount", &self.amount)?;
        // A zero amount deletes an offer, which needs an offer to delete.
        if !amount.is_positive() && offer_id == 0 {
            return Err(RequestError::invalid(
                path.field("amount"),
                &self.amount,
                "amount must be positive when creating an offer",
            ));
        }

        Ok(OperationBody::ManageOffer {
            selling: asset(path, "selling", &self.selling)?,
            buying: asset(path, "buying", &self.buying)?,
            amount,
            price: price(path, "price", &self.price)?,
            offer_id,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreatePassiveOfferBody {
    pub source: Option<String>,
    pub selling: Option<AssetDescriptor>,
    pub buying: Option<AssetDescriptor>,
    pub amount: String,
    pub price: String,
}

impl BodyDescriptor for CreatePassiveOfferBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.amount);
        trim(&mut self.price);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        Ok(OperationBody::CreatePassiveOffer {
            selling: asset(path, "selling", &self.selling)?,
            buying: asset(path, "buying", &self.buying)?,
            amount: positive_amount(path, "amount", &self.amount)?,
            price: price(path, "price", &self.price)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SetOptionsBody {
    pub source: Option<String>,
    pub inflation_dest: Option<String>,
    pub set_flags: Option<u32>,
    pub clear_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub medium_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String>,
    pub signer: Option<SignerBody>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignerBody {
    pub public_key: String,
    pub weight: u32,
}

impl BodyDescriptor for SetOptionsBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim_opt(&mut self.inflation_dest);
        trim_opt(&mut self.home_domain);
        if let Some(signer) = &mut self.signer {
            trim(&mut signer.public_key);
        }
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        let set_flags = flags(path, "set_flags", self.set_flags)?;
        let clear_flags = flags(path, "clear_flags", self.clear_flags)?;
        if let (Some(set), Some(clear)) = (set_flags, clear_flags) {
            if set & clear != 0 {
                return Err(RequestError::invalid(
                    path.field("clear_flags"),
                    clear.to_string(),
                    "a flag cannot be both set and cleared",
                ));
            }
        }

        if let Some(domain) = &self.home_domain {
            if domain.len() > MAX_HOME_DOMAIN_LEN {
                return Err(RequestError::invalid(
                    path.field("home_domain"),
                    domain,
                    format!("home_domain may be at most {MAX_HOME_DOMAIN_LEN} characters"),
                ));
            }
        }

        let signer = match &self.signer {
            Some(s) => Some(SignerUpdate {
                key: account(path, "signer.public_key", &s.public_key)?,
                weight: byte(path, "signer.weight", Some(s.weight))?.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(OperationBody::SetOptions(SetOptions {
            inflation_destination: optional_account(
                path,
                "inflation_dest",
                self.inflation_dest.as_deref(),
            )?,
            clear_flags,
            set_flags,
            master_weight: byte(path, "master_weight", self.master_weight)?,
            low_threshold: byte(path, "low_threshold", self.low_threshold)?,
            medium_threshold: byte(path, "medium_threshold", self.medium_threshold)?,
            high_threshold: byte(path, "high_threshold", self.high_threshold)?,
            home_domain: self.home_domain.clone(),
            signer,
        }))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChangeTrustBody {
    pub source: Option<String>,
    pub asset: Option<AssetDescriptor>,
    /// Trust limit; absent means the maximum representable amount.
    pub limit: Option<String>,
}

impl BodyDescriptor for ChangeTrustBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim_opt(&mut self.limit);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        let trusted = asset(path, "asset", &self.asset)?;
        if trusted.is_native() {
            return Err(RequestError::invalid(
                path.field("asset"),
                "native",
                "cannot change trust for the native asset",
            ));
        }
        let limit = match &self.limit {
            Some(limit) => amount(path, "limit", limit)?,
            None => Amount::from_stroops(i64::MAX),
        };
        Ok(OperationBody::ChangeTrust {
            asset: trusted,
            limit,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AllowTrustBody {
    pub source: Option<String>,
    pub trustor: String,
    pub asset_code: String,
    pub authorize: bool,
}

impl BodyDescriptor for AllowTrustBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.trustor);
        trim(&mut self.asset_code);
        self.asset_code.make_ascii_uppercase();
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        if self.asset_code.is_empty() {
            return Err(RequestError::missing(path.field("asset_code"), "asset_code is required"));
        }
        let asset_code = AssetCode::parse(&self.asset_code).map_err(|e| {
            RequestError::invalid(path.field("asset_code"), &self.asset_code, e.to_string())
        })?;
        Ok(OperationBody::AllowTrust {
            trustor: account(path, "trustor", &self.trustor)?,
            asset_code,
            authorize: self.authorize,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccountMergeBody {
    pub source: Option<String>,
    pub destination: String,
}

impl BodyDescriptor for AccountMergeBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.destination);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        Ok(OperationBody::AccountMerge {
            destination: account(path, "destination", &self.destination)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InflationBody {
    pub source: Option<String>,
}

impl BodyDescriptor for InflationBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
    }

    fn build(&self, _path: &FieldPath) -> Result<OperationBody, RequestError> {
        Ok(OperationBody::Inflation)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManageDataBody {
    pub source: Option<String>,
    pub name: String,
    /// Base64-encoded value; absent deletes the entry.
    pub data: Option<String>,
}

impl BodyDescriptor for ManageDataBody {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn normalize(&mut self) {
        trim_opt(&mut self.source);
        trim(&mut self.name);
        trim_opt(&mut self.data);
    }

    fn build(&self, path: &FieldPath) -> Result<OperationBody, RequestError> {
        if self.name.is_empty() {
            return Err(RequestError::missing(path.field("name"), "name is required"));
        }
        if self.name.len() > MAX_DATA_NAME_LEN {
            return Err(RequestError::invalid(
                path.field("name"),
                &self.name,
                format!("name may be at most {MAX_DATA_NAME_LEN} bytes"),
            ));
        }
        let value = match &self.data {
            Some(encoded) => {
                let bytes = STANDARD.decode(encoded).map_err(|_| {
                    RequestError::invalid(path.field("data"), encoded, "data must be base64")
                })?;
                if bytes.len() > MAX_DATA_VALUE_LEN {
                    return Err(RequestError::invalid(
                        path.field("data"),
                        encoded,
                        format!("data may be at most {MAX_DATA_VALUE_LEN} bytes"),
                    ));
                }
                Some(bytes)
            }
            None => None,
        };
        Ok(OperationBody::ManageData {
            name: self.name.clone(),
            value,
        })
    }
}
