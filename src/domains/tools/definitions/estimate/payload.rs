//! Wire-format projection of the estimation parameters.
//!
//! The remote API expects camelCase field names; the tool surface uses
//! snake_case. The projection is an explicit serialization step so the wire
//! semantics stay intentional and independently testable. Optional fields
//! that were left unset are omitted from the serialized body entirely -
//! they must never appear as null keys.

use serde::Serialize;

use super::invoke::EstimateInvestmentParams;

/// JSON body sent to `POST {api_base_url}/api/estimate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatePayload {
    // Acquisition
    pub purchase_price: f64,
    pub notary_rate: f64,
    pub renovation: f64,
    pub furniture: f64,
    pub agency_fees: f64,

    // Exploitation
    pub rent: f64,
    pub vacancy_months: f64,
    pub management_pct: f64,
    pub copro_charges: f64,
    pub ll_insurance: f64,
    pub property_tax: f64,
    pub other_annual: f64,

    // Depreciation & tax
    pub building_years: u32,
    pub furniture_years: u32,
    pub land_share: f64,

    // Financing
    pub loan_years: u32,
    pub loan_rate: f64,
    pub loan_insurance_rate: f64,
    pub down_payment: f64,

    // Objectives
    pub target_monthly_cf: f64,

    // Resale / IRR (omitted from the body when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resale_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resale_price: Option<f64>,
}

impl From<&EstimateInvestmentParams> for EstimatePayload {
    fn from(params: &EstimateInvestmentParams) -> Self {
        Self {
            purchase_price: params.purchase_price,
            notary_rate: params.notary_rate,
            renovation: params.renovation,
            furniture: params.furniture,
            agency_fees: params.agency_fees,
            rent: params.rent,
            vacancy_months: params.vacancy_months,
            management_pct: params.management_pct,
            copro_charges: params.copro_charges,
            ll_insurance: params.ll_insurance,
            property_tax: params.property_tax,
            other_annual: params.other_annual,
            building_years: params.building_years,
            furniture_years: params.furniture_years,
            land_share: params.land_share,
            loan_years: params.loan_years,
            loan_rate: params.loan_rate,
            loan_insurance_rate: params.loan_insurance_rate,
            down_payment: params.down_payment,
            target_monthly_cf: params.target_monthly_cf,
            resale_years: params.resale_years,
            resale_price: params.resale_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_map(payload: &EstimatePayload) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(payload).unwrap() {
            serde_json::Value::Object(map) => map,
            other => panic!("expected JSON object, got {}", other),
        }
    }

    #[test]
    fn test_default_payload_has_20_fields_and_no_resale_keys() {
        let params = EstimateInvestmentParams::default();
        let payload = EstimatePayload::from(&params);
        let map = as_map(&payload);

        assert_eq!(map.len(), 20);
        assert!(!map.contains_key("resaleYears"));
        assert!(!map.contains_key("resalePrice"));
    }

    #[test]
    fn test_default_payload_values() {
        let params = EstimateInvestmentParams::default();
        let map = as_map(&EstimatePayload::from(&params));

        assert_eq!(map["purchasePrice"], serde_json::json!(50000.0));
        assert_eq!(map["notaryRate"], serde_json::json!(0.08));
        assert_eq!(map["renovation"], serde_json::json!(10000.0));
        assert_eq!(map["rent"], serde_json::json!(500.0));
        assert_eq!(map["vacancyMonths"], serde_json::json!(0.5));
        assert_eq!(map["buildingYears"], serde_json::json!(30));
        assert_eq!(map["furnitureYears"], serde_json::json!(7));
        assert_eq!(map["landShare"], serde_json::json!(0.15));
        assert_eq!(map["loanYears"], serde_json::json!(20));
        assert_eq!(map["loanRate"], serde_json::json!(0.035));
        assert_eq!(map["loanInsuranceRate"], serde_json::json!(0.002));
        assert_eq!(map["downPayment"], serde_json::json!(5000.0));
        assert_eq!(map["targetMonthlyCf"], serde_json::json!(0.0));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let params = EstimateInvestmentParams::default();
        let map = as_map(&EstimatePayload::from(&params));

        for key in [
            "purchasePrice",
            "notaryRate",
            "renovation",
            "furniture",
            "agencyFees",
            "rent",
            "vacancyMonths",
            "managementPct",
            "coproCharges",
            "llInsurance",
            "propertyTax",
            "otherAnnual",
            "buildingYears",
            "furnitureYears",
            "landShare",
            "loanYears",
            "loanRate",
            "loanInsuranceRate",
            "downPayment",
            "targetMonthlyCf",
        ] {
            assert!(map.contains_key(key), "missing wire field: {}", key);
        }
    }

    #[test]
    fn test_resale_fields_serialized_when_set() {
        let params = EstimateInvestmentParams {
            resale_years: Some(10),
            resale_price: Some(80000.0),
            ..Default::default()
        };
        let map = as_map(&EstimatePayload::from(&params));

        assert_eq!(map.len(), 22);
        assert_eq!(map["resaleYears"], serde_json::json!(10));
        assert_eq!(map["resalePrice"], serde_json::json!(80000.0));
    }
}
