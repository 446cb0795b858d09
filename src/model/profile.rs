//! Organisation profile supplied by onboarding.
//!
//! The profile uses an explicit schema with optional fields rather than a
//! dynamic map: scope rules can only meaningfully reference the fields
//! onboarding collects, and unknown fields in the input are ignored. Rule
//! evaluation sees profile values through the [`FieldValue`] view.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Hosting model can arrive as a list of model ids (`["cloud", "on-prem"]`)
/// or as a map of model id to enabled flag (`{"cloud": true}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostingModel {
    Listed(Vec<String>),
    Flagged(IndexMap<String, bool>),
}

/// Organisation profile used as scope-rule evaluation input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganisationProfile {
    pub organisation_size: Option<String>,
    pub industry: Option<String>,
    pub hosting_model: Option<HostingModel>,
    pub supplier_reliance: Option<String>,
    pub critical_assets: Vec<String>,
    pub locations: Vec<String>,
    pub remote_work: Option<bool>,
    /// Question ids explicitly descoped by the organisation (e.g. Annex A
    /// controls excluded in the statement of applicability).
    pub excluded_controls: Vec<String>,
}

/// Borrowed view of a profile field for rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
    List(&'a [String]),
    Map(&'a IndexMap<String, bool>),
}

impl OrganisationProfile {
    /// Look up a rule field by its wire name. Unknown fields return `None`
    /// and are ignored by rule evaluation (the rule fails closed for
    /// value-comparing operators).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "organisationSize" => self.organisation_size.as_deref().map(FieldValue::Text),
            "industry" => self.industry.as_deref().map(FieldValue::Text),
            "hostingModel" => self.hosting_model.as_ref().map(|model| match model {
                HostingModel::Listed(list) => FieldValue::List(list),
                HostingModel::Flagged(map) => FieldValue::Map(map),
            }),
            "supplierReliance" => self.supplier_reliance.as_deref().map(FieldValue::Text),
            "criticalAssets" => Some(FieldValue::List(&self.critical_assets)),
            "locations" => Some(FieldValue::List(&self.locations)),
            "remoteWork" => self.remote_work.map(FieldValue::Flag),
            _ => None,
        }
    }
}
