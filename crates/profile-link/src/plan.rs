//! Change planning between recorded state and desired configuration.
//!
//! Links cannot be updated in place, so any difference in a configurable
//! attribute plans a replacement.

use crate::resource_data::ResourceData;
use serde_json::Value;

/// What applying the desired configuration requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// No link is recorded yet
    Create,
    /// Recorded link already matches
    NoOp,
    /// Recorded link must be deleted and created again
    Replace {
        /// Attributes whose change forces the replacement
        attributes: Vec<String>,
    },
}

impl PlanAction {
    /// True when nothing needs to change
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Compare refreshed `prior` data against `desired` configuration.
///
/// Computed attributes are never compared. An unset attribute only equals
/// another unset attribute; an empty string is a value.
pub fn plan(prior: &ResourceData, desired: &ResourceData) -> PlanAction {
    if prior.id().is_empty() {
        return PlanAction::Create;
    }

    let attributes: Vec<String> = desired
        .schema()
        .iter()
        .filter(|a| a.force_new && !a.computed)
        .filter(|a| !same_value(prior.get(a.name), desired.get(a.name)))
        .map(|a| a.name.to_string())
        .collect();

    if attributes.is_empty() {
        PlanAction::NoOp
    } else {
        PlanAction::Replace { attributes }
    }
}

fn same_value(prior: Option<&Value>, desired: Option<&Value>) -> bool {
    let prior = prior.filter(|v| !v.is_null());
    let desired = desired.filter(|v| !v.is_null());
    prior == desired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TRUSTED_PROFILE_LINK_SCHEMA;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn desired(config: Value) -> ResourceData {
        ResourceData::from_config(&TRUSTED_PROFILE_LINK_SCHEMA, config).unwrap()
    }

    fn recorded(config: Value) -> ResourceData {
        let mut data = desired(config);
        data.set_id("Profile-abc/link-1");
        data.set("entity_tag", json!("1-link-1")).unwrap();
        data.set("created_at", json!("2024-03-01T10:15:30.000Z")).unwrap();
        data
    }

    #[test]
    fn test_plan_create_without_id() {
        let config = json!({
            "profile_id": "Profile-abc",
            "cr_type": "VSI",
            "link": [{"crn": "crn:v1:vsi", "namespace": ""}]
        });
        assert_eq!(plan(&desired(config.clone()), &desired(config)), PlanAction::Create);
    }

    #[test]
    fn test_plan_noop_ignores_computed() {
        let config = json!({
            "profile_id": "Profile-abc",
            "cr_type": "IKS_SA",
            "link": [{"crn": "crn:v1:c1", "namespace": "default", "name": "sa-1"}]
        });
        assert!(plan(&recorded(config.clone()), &desired(config)).is_noop());
    }

    #[test]
    fn test_plan_replace_lists_changed_attributes() {
        let prior = recorded(json!({
            "profile_id": "Profile-abc",
            "cr_type": "IKS_SA",
            "link": [{"crn": "crn:v1:c1", "namespace": "default", "name": "sa-1"}]
        }));
        let next = desired(json!({
            "profile_id": "Profile-abc",
            "cr_type": "IKS_SA",
            "link": [{"crn": "crn:v1:c1", "namespace": "default", "name": "sa-2"}],
            "name": "ci"
        }));

        assert_eq!(
            plan(&prior, &next),
            PlanAction::Replace {
                attributes: vec!["link".to_string(), "name".to_string()],
            }
        );
    }

    #[test]
    fn test_plan_empty_name_differs_from_unset() {
        let prior = recorded(json!({
            "profile_id": "Profile-abc",
            "cr_type": "VSI",
            "link": [{"crn": "crn:v1:vsi", "namespace": ""}]
        }));
        let next = desired(json!({
            "profile_id": "Profile-abc",
            "cr_type": "VSI",
            "link": [{"crn": "crn:v1:vsi", "namespace": ""}],
            "name": ""
        }));

        assert_eq!(
            plan(&prior, &next),
            PlanAction::Replace {
                attributes: vec!["name".to_string()],
            }
        );
    }
}
