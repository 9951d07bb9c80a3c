//! Search criteria: the filter parameters used to query the remote API.

use serde::{Deserialize, Serialize};

/// Parameters for an upstream job search.
///
/// All fields are optional; absent values fall back to upstream defaults.
/// No validation is performed beyond type coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<WorkHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Search radius around the location, in kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

impl SearchCriteria {
    /// Effective page number (1-based, default 1).
    pub fn get_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Effective page size, falling back to the configured default.
    pub fn get_page_size(&self, default: u32) -> u32 {
        self.page_size.unwrap_or(default)
    }
}

/// Contract type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Permanent,
    Contract,
    Temporary,
    Internship,
}

impl ContractType {
    /// Single-letter code used in the outbound query string.
    pub fn code(&self) -> &'static str {
        match self {
            ContractType::Permanent => "p",
            ContractType::Contract => "c",
            ContractType::Temporary => "t",
            ContractType::Internship => "i",
        }
    }

    /// Parse a form parameter value; unknown values coerce to `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "permanent" | "p" => Some(ContractType::Permanent),
            "contract" | "c" => Some(ContractType::Contract),
            "temporary" | "t" => Some(ContractType::Temporary),
            "internship" | "i" => Some(ContractType::Internship),
            _ => None,
        }
    }
}

/// Working-hours filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkHours {
    #[serde(rename = "full")]
    FullTime,
    #[serde(rename = "part")]
    PartTime,
}

impl WorkHours {
    /// Single-letter code used in the outbound query string.
    pub fn code(&self) -> &'static str {
        match self {
            WorkHours::FullTime => "f",
            WorkHours::PartTime => "p",
        }
    }

    /// Parse a form parameter value; unknown values coerce to `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "full" | "f" => Some(WorkHours::FullTime),
            "part" => Some(WorkHours::PartTime),
            _ => None,
        }
    }
}
