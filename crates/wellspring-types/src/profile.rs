//! User profile types for Wellspring.
//!
//! A profile is the optional biometric/goal record collected by the chat
//! sidebar form. It is held in session state and -- when profile sending is
//! enabled -- transmitted to the agent under `variables.profile`. Absent
//! fields are omitted from the transmitted object entirely.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "sedentary"),
            ActivityLevel::Light => write!(f, "light"),
            ActivityLevel::Moderate => write!(f, "moderate"),
            ActivityLevel::Active => write!(f, "active"),
            ActivityLevel::VeryActive => write!(f, "very_active"),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => Err(format!("invalid activity level: '{other}'")),
        }
    }
}

/// Coaching goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Lose => write!(f, "lose"),
            Goal::Maintain => write!(f, "maintain"),
            Goal::Gain => write!(f, "gain"),
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(format!("invalid goal: '{other}'")),
        }
    }
}

/// Optional user profile sent to the agent as structured variables.
///
/// Every field is optional; `None` fields are skipped during serialization
/// so the agent only sees what the user actually filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

/// Raw sidebar form input before measurement parsing.
///
/// Height and weight arrive as free text ("175 cm", "78 kg"); the numeric
/// value is extracted and the unit discarded (centimetres and kilograms are
/// the contract with the agent).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub activity: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl Profile {
    /// Build a profile from raw form input.
    ///
    /// Zero or unparsable measurements become `None` rather than errors:
    /// the profile is best-effort personalization, never a gate on chatting.
    pub fn from_form(form: &ProfileForm) -> Self {
        Profile {
            age: form.age.filter(|a| *a > 0),
            sex: form
                .sex
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            height_cm: form.height.as_deref().and_then(parse_measurement),
            weight_kg: form.weight.as_deref().and_then(parse_measurement),
            activity: form.activity,
            goal: form.goal,
        }
    }

    /// Whether every field is absent.
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.sex.is_none()
            && self.height_cm.is_none()
            && self.weight_kg.is_none()
            && self.activity.is_none()
            && self.goal.is_none()
    }

    /// The profile as a JSON object with absent fields omitted.
    pub fn to_variables(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Extract a positive numeric value from free text such as "175 cm".
///
/// Keeps digits and the decimal point, discards everything else. Returns
/// `None` for unparsable or non-positive input.
pub fn parse_measurement(s: &str) -> Option<f64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    digits.parse::<f64>().ok().filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_roundtrip() {
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ] {
            let s = level.to_string();
            let parsed: ActivityLevel = s.parse().unwrap();
            assert_eq!(level, parsed);
        }
    }

    #[test]
    fn test_activity_level_serde() {
        let json = serde_json::to_string(&ActivityLevel::VeryActive).unwrap();
        assert_eq!(json, "\"very_active\"");
        let parsed: ActivityLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ActivityLevel::VeryActive);
    }

    #[test]
    fn test_goal_roundtrip() {
        for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
            let s = goal.to_string();
            let parsed: Goal = s.parse().unwrap();
            assert_eq!(goal, parsed);
        }
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("175 cm"), Some(175.0));
        assert_eq!(parse_measurement("78.5 kg"), Some(78.5));
        assert_eq!(parse_measurement("180"), Some(180.0));
        assert_eq!(parse_measurement("tall"), None);
        assert_eq!(parse_measurement(""), None);
        assert_eq!(parse_measurement("0 kg"), None);
    }

    #[test]
    fn test_from_form_parses_measurements() {
        let form = ProfileForm {
            age: Some(22),
            sex: Some("male".to_string()),
            height: Some("175 cm".to_string()),
            weight: Some("78 kg".to_string()),
            activity: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Lose),
        };
        let profile = Profile::from_form(&form);
        assert_eq!(profile.age, Some(22));
        assert_eq!(profile.height_cm, Some(175.0));
        assert_eq!(profile.weight_kg, Some(78.0));
        assert!(!profile.is_empty());
    }

    #[test]
    fn test_from_form_drops_invalid_fields() {
        let form = ProfileForm {
            age: Some(0),
            sex: Some("   ".to_string()),
            height: Some("tall".to_string()),
            weight: None,
            activity: None,
            goal: None,
        };
        let profile = Profile::from_form(&form);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_to_variables_omits_absent_fields() {
        let profile = Profile {
            age: Some(30),
            sex: None,
            height_cm: Some(170.0),
            weight_kg: None,
            activity: Some(ActivityLevel::Light),
            goal: None,
        };
        let vars = profile.to_variables();
        let obj = vars.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["age"], 30);
        assert_eq!(obj["activity"], "light");
        assert!(!obj.contains_key("sex"));
        assert!(!obj.contains_key("goal"));
    }
}
