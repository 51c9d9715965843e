//! Garment customization rules per service and tailoring sub-service.

use models::order::Customization;

use crate::errors::ServiceError;

pub const SERVICE_TYPES: [&str; 4] = ["Tailoring", "Aari", "Embroidery", "SareeFleeting"];
pub const TAILORING_SUB_SERVICES: [&str; 5] = ["Blouse", "Chudithar", "Frogs", "Leganga", "PattuPaavadaai-Set"];

const BLOUSE_TYPES: [&str; 5] = ["Normal", "Lining", "Pipping", "Princess", "Pattern"];
const CHUDITHAR_TYPES: [&str; 3] = ["Lining", "Pipping", "Pattern"];
const NECK_SHAPES: [&str; 6] = ["U-Shape", "Round", "Diamond", "V", "Square", "Others"];
const SHORT_STYLES: [&str; 3] = ["Puff", "Puff with Border", "Pattern"];
const ELBOW_STYLES: [&str; 6] = ["Top Puff", "Puff with Border", "Long Puff with Border", "V Puff", "Long V Puff", "Pattern"];
const CHUDITHAR_HAND_TYPES: [&str; 4] = ["Short", "Elbow", "3/4", "Full"];
const BOTTOM_TYPES: [&str; 5] = ["Normal", "Patiala", "StraightCut", "Palazzo", "Gathering"];
const POCKETS: [&str; 2] = ["Pocket", "WithoutPocket"];
const FROCK_NECKS: [&str; 4] = ["Round", "V Shape", "U Shape", "Boat"];
const FROCK_HANDS: [&str; 4] = ["Top Puff", "Puff with Border", "Short Puff", "Short Pattern"];
const FRONT_DESIGNS: [&str; 3] = ["Front Pleat", "Front Shape", "Front Border"];

/// `details[key]` must be one of `allowed`; `label` names it in the error.
fn one_of(c: &Customization, key: &str, allowed: &[&str], label: &str) -> Result<(), ServiceError> {
    match c.detail(key) {
        Some(v) if allowed.contains(&v) => Ok(()),
        v => Err(ServiceError::validation(format!("Invalid {label}: {}", v.unwrap_or("none")))),
    }
}

/// Check one order line: service type, sub-service and customization details.
pub fn validate_item(service_type: &str, sub_service: Option<&str>, c: &Customization) -> Result<(), ServiceError> {
    if !SERVICE_TYPES.contains(&service_type) {
        return Err(ServiceError::validation(format!("Invalid service type: {service_type}")));
    }
    if c.kind.trim().is_empty() {
        return Err(ServiceError::validation("Customization type is required"));
    }
    if service_type != "Tailoring" {
        return Ok(());
    }
    match sub_service {
        Some("Blouse") => validate_blouse(c),
        Some("Chudithar") => validate_chudithar(c),
        Some("Frogs") => validate_frock(c, false),
        Some("PattuPaavadaai-Set") => validate_frock(c, true),
        Some("Leganga") => Ok(()),
        other => Err(ServiceError::validation(format!("Invalid sub-service: {}", other.unwrap_or("none")))),
    }
}

fn validate_blouse(c: &Customization) -> Result<(), ServiceError> {
    if !BLOUSE_TYPES.contains(&c.kind.as_str()) {
        return Err(ServiceError::validation(format!("Invalid blouse type: {}", c.kind)));
    }
    match c.kind.as_str() {
        "Pipping" => one_of(c, "pippingType", &["Saree", "Contrast"], "pipping type"),
        "Princess" => one_of(c, "princessType", &["Full", "Patti"], "princess type"),
        "Pattern" => {
            one_of(c, "neckShape", &NECK_SHAPES, "neck shape")?;
            match c.detail("handType") {
                None => Ok(()),
                Some("Short") => one_of(c, "shortStyle", &SHORT_STYLES, "short hand style"),
                Some("Elbow") => one_of(c, "elbowStyle", &ELBOW_STYLES, "elbow hand style"),
                Some(other) => Err(ServiceError::validation(format!("Invalid hand type: {other}"))),
            }
        }
        _ => Ok(()),
    }
}

fn validate_chudithar(c: &Customization) -> Result<(), ServiceError> {
    if !CHUDITHAR_TYPES.contains(&c.kind.as_str()) {
        return Err(ServiceError::validation(format!("Invalid chudithar type: {}", c.kind)));
    }
    match c.kind.as_str() {
        "Pipping" => one_of(c, "pippingType", &["Self", "Contrast"], "pipping type"),
        "Pattern" => {
            one_of(c, "neckShape", &NECK_SHAPES, "neck shape")?;
            if let Some(hand) = c.detail("handType") {
                if !CHUDITHAR_HAND_TYPES.contains(&hand) {
                    return Err(ServiceError::validation(format!("Invalid hand type: {hand}")));
                }
                let key = format!("{}Style", hand.to_lowercase());
                let styles: &[&str] = if hand == "Short" { &SHORT_STYLES } else { &ELBOW_STYLES };
                one_of(c, &key, styles, &format!("{} style", hand.to_lowercase()))?;
            }
            one_of(c, "bottomType", &BOTTOM_TYPES, "bottom type")?;
            one_of(c, "pocket", &POCKETS, "pocket option")
        }
        _ => Ok(()),
    }
}

/// Frogs and PattuPaavadaai-Set share neck and hand rules; the set also needs a front design.
fn validate_frock(c: &Customization, with_front_design: bool) -> Result<(), ServiceError> {
    one_of(c, "neck", &FROCK_NECKS, "neck type")?;
    one_of(c, "hand", &FROCK_HANDS, "hand type")?;
    if with_front_design {
        one_of(c, "frontDesign", &FRONT_DESIGNS, "front design")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn c(kind: &str, details: serde_json::Value) -> Customization {
        Customization { kind: kind.into(), details: serde_json::from_value(details).unwrap() }
    }

    fn tailoring(sub: &str, cust: &Customization) -> Result<(), ServiceError> {
        validate_item("Tailoring", Some(sub), cust)
    }

    #[test]
    fn service_and_sub_service_are_checked() {
        let any = c("Normal", json!({}));
        assert!(validate_item("Aari", None, &any).is_ok());
        assert!(validate_item("Knitting", None, &any).is_err());
        assert!(validate_item("Tailoring", None, &any).is_err());
        assert!(tailoring("Saree", &any).is_err());
        assert!(tailoring("Leganga", &c("Anything", json!({}))).is_ok());
        assert!(validate_item("Embroidery", None, &c(" ", json!({}))).is_err());
    }

    #[test]
    fn blouse_rules() {
        assert!(tailoring("Blouse", &c("Normal", json!({}))).is_ok());
        assert!(tailoring("Blouse", &c("Fancy", json!({}))).is_err());
        assert!(tailoring("Blouse", &c("Pipping", json!({"pippingType": "Contrast"}))).is_ok());
        assert!(tailoring("Blouse", &c("Pipping", json!({"pippingType": "Self"}))).is_err());
        assert!(tailoring("Blouse", &c("Princess", json!({"princessType": "Patti"}))).is_ok());
        assert!(tailoring("Blouse", &c("Pattern", json!({"neckShape": "V"}))).is_ok());
        assert!(tailoring("Blouse", &c("Pattern", json!({}))).is_err());
        assert!(tailoring("Blouse", &c("Pattern", json!({"neckShape": "V", "handType": "Short", "shortStyle": "Puff"}))).is_ok());
        assert!(tailoring("Blouse", &c("Pattern", json!({"neckShape": "V", "handType": "Elbow", "elbowStyle": "Puff"}))).is_err());
        assert!(tailoring("Blouse", &c("Pattern", json!({"neckShape": "V", "handType": "Full"}))).is_err());
    }

    #[test]
    fn chudithar_rules() {
        assert!(tailoring("Chudithar", &c("Normal", json!({}))).is_err());
        assert!(tailoring("Chudithar", &c("Pipping", json!({"pippingType": "Self"}))).is_ok());
        let full = json!({
            "neckShape": "Round",
            "handType": "3/4",
            "3/4Style": "V Puff",
            "bottomType": "Patiala",
            "pocket": "Pocket"
        });
        assert!(tailoring("Chudithar", &c("Pattern", full)).is_ok());
        let short_with_elbow_style = json!({
            "neckShape": "Round",
            "handType": "Short",
            "shortStyle": "Long V Puff",
            "bottomType": "Patiala",
            "pocket": "Pocket"
        });
        assert!(tailoring("Chudithar", &c("Pattern", short_with_elbow_style)).is_err());
        let no_pocket = json!({"neckShape": "Round", "bottomType": "Palazzo"});
        assert!(tailoring("Chudithar", &c("Pattern", no_pocket)).is_err());
    }

    #[test]
    fn frock_rules_and_front_design_by_sub_service() {
        let base = json!({"neck": "Boat", "hand": "Short Puff"});
        assert!(tailoring("Frogs", &c("Party", base.clone())).is_ok());
        assert!(tailoring("PattuPaavadaai-Set", &c("Party", base)).is_err());
        let set = json!({"neck": "Boat", "hand": "Short Puff", "frontDesign": "Front Pleat"});
        assert!(tailoring("PattuPaavadaai-Set", &c("Party", set)).is_ok());
        assert!(tailoring("Frogs", &c("Party", json!({"neck": "Square", "hand": "Short Puff"}))).is_err());
    }
}
