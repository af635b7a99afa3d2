//! Unit tests for the trusted profile link resource

#[cfg(test)]
mod tests {
    use crate::error::{LinkResourceError, SessionError};
    use crate::plan::plan;
    use crate::resource::TrustedProfileLinkResource;
    use crate::resource_data::ResourceData;
    use crate::schema::TRUSTED_PROFILE_LINK_SCHEMA;
    use crate::test_utils::*;
    use chrono::{Duration, TimeZone, Utc};
    use iam_identity_client::{ComputeResourceType, MockOperation, ProfileLink, ProfileLinkLink};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    const VSI_CRN: &str = "crn:v1:bluemix:public:is:us-south:a/abc::instance:0717-vsi";
    const CLUSTER_CRN: &str = "crn:v1:bluemix:public:containers-kubernetes:us-south:a/abc:cluster1::";

    fn vsi_config() -> ResourceData {
        create_test_config(json!({
            "profile_id": "profile-abc",
            "cr_type": "VSI",
            "link": [{"crn": VSI_CRN, "namespace": ""}]
        }))
    }

    fn iks_config() -> ResourceData {
        create_test_config(json!({
            "profile_id": "profile-abc",
            "cr_type": "IKS_SA",
            "link": [{"crn": CLUSTER_CRN, "namespace": "default", "name": "sa-1"}]
        }))
    }

    fn server_link(id: &str, name: Option<&str>) -> ProfileLink {
        ProfileLink {
            id: id.to_string(),
            entity_tag: format!("7-{}", id),
            created_at: Some(Utc.with_ymd_and_hms(2023, 11, 2, 8, 0, 0).unwrap()),
            modified_at: Some(Utc.with_ymd_and_hms(2023, 12, 24, 18, 30, 5).unwrap() + Duration::milliseconds(250)),
            name: name.map(str::to_string),
            cr_type: ComputeResourceType::RoksSa,
            link: ProfileLinkLink {
                crn: Some(CLUSTER_CRN.to_string()),
                namespace: Some("ops".to_string()),
                name: Some("builder".to_string()),
            },
        }
    }

    fn only_error(diags: crate::error::Diagnostics) -> LinkResourceError {
        assert_eq!(diags.len(), 1, "expected a single diagnostic, got: {}", diags);
        diags.into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn test_create_vsi_link() {
        let (resource, mock) = create_test_resource();
        mock.set_next_id(123);
        let mut data = vsi_config();

        resource.create(&mut data).await.unwrap();

        assert_eq!(data.id(), "profile-abc/link-123");
        assert_eq!(data.get_str("profile_id"), Some("profile-abc"));
        assert_eq!(data.get_str("cr_type"), Some("VSI"));
        assert_eq!(data.get("link"), Some(&json!([{"crn": VSI_CRN, "namespace": ""}])));
        assert_eq!(data.get("name"), None);
        assert_eq!(data.get_str("entity_tag"), Some("1-link-123"));
        assert_eq!(data.get_str("created_at"), Some("2024-03-01T10:15:30.000Z"));
        assert_eq!(data.get_str("modified_at"), Some("2024-03-01T10:15:30.000Z"));

        assert_eq!(mock.calls(MockOperation::CreateLink), 1);
        assert_eq!(mock.calls(MockOperation::GetLink), 1);
        assert_eq!(mock.link_count(), 1);
    }

    #[tokio::test]
    async fn test_create_iks_link_keeps_top_level_name_unset() {
        let (resource, mock) = create_test_resource();
        let mut data = iks_config();

        resource.create(&mut data).await.unwrap();

        assert_eq!(data.id(), "profile-abc/link-1");
        assert_eq!(data.get("name"), None);
        assert_eq!(
            data.get("link"),
            Some(&json!([{"crn": CLUSTER_CRN, "namespace": "default", "name": "sa-1"}]))
        );

        let stored = mock.stored_link("profile-abc", "link-1").unwrap();
        assert_eq!(stored.name, None);
        assert_eq!(stored.cr_type, ComputeResourceType::IksSa);
        assert_eq!(stored.link.name.as_deref(), Some("sa-1"));
    }

    #[tokio::test]
    async fn test_create_sends_empty_name_as_value() {
        let (resource, mock) = create_test_resource();
        let mut data = create_test_config(json!({
            "profile_id": "profile-abc",
            "cr_type": "VSI",
            "link": [{"crn": VSI_CRN, "namespace": ""}],
            "name": ""
        }));

        resource.create(&mut data).await.unwrap();

        assert_eq!(mock.stored_link("profile-abc", "link-1").unwrap().name.as_deref(), Some(""));
        assert_eq!(data.get_str("name"), Some(""));
    }

    #[tokio::test]
    async fn test_create_then_plan_is_noop() {
        let (resource, _mock) = create_test_resource();
        let mut data = iks_config();

        resource.create(&mut data).await.unwrap();

        assert!(plan(&data, &iks_config()).is_noop());
    }

    #[tokio::test]
    async fn test_create_rejects_service_account_without_name() {
        let (resource, mock) = create_test_resource();
        let mut data = create_test_config(json!({
            "profile_id": "profile-abc",
            "cr_type": "ROKS_SA",
            "link": [{"crn": CLUSTER_CRN, "namespace": "ops"}]
        }));

        let err = only_error(resource.create(&mut data).await.unwrap_err());

        assert!(matches!(err, LinkResourceError::InvalidConfiguration(_)));
        assert_eq!(data.id(), "");
        assert_eq!(mock.calls(MockOperation::CreateLink), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_profile_id_with_separator() {
        let (resource, mock) = create_test_resource();
        let mut data = create_test_config(json!({
            "profile_id": "team/a",
            "cr_type": "VSI",
            "link": [{"crn": VSI_CRN, "namespace": ""}]
        }));

        let err = only_error(resource.create(&mut data).await.unwrap_err());

        assert!(matches!(err, LinkResourceError::InvalidConfiguration(_)));
        assert_eq!(data.id(), "");
        assert_eq!(mock.calls(MockOperation::CreateLink), 0);
        assert_eq!(mock.link_count(), 0);
    }

    #[tokio::test]
    async fn test_create_failure_reports_raw_response() {
        let (resource, mock) = create_test_resource();
        mock.fail_next(MockOperation::CreateLink, 400, r#"{"errors":[{"code":"invalid_crn"}]}"#);
        let mut data = vsi_config();

        let err = only_error(resource.create(&mut data).await.unwrap_err());

        assert!(matches!(
            err,
            LinkResourceError::RemoteOperationFailed { operation: "CreateLink", .. }
        ));
        assert!(err.to_string().contains(r#"{"errors":[{"code":"invalid_crn"}]}"#), "{}", err);
        assert_eq!(data.id(), "");
        assert_eq!(mock.calls(MockOperation::GetLink), 0);
        assert_eq!(mock.link_count(), 0);
    }

    #[tokio::test]
    async fn test_create_without_session_credentials() {
        let resource = TrustedProfileLinkResource::new(Arc::new(UnauthenticatedSession));
        let mut data = vsi_config();

        let err = only_error(resource.create(&mut data).await.unwrap_err());

        assert!(matches!(
            err,
            LinkResourceError::ClientUnavailable(SessionError::MissingCredentials(_))
        ));
        assert_eq!(data.id(), "");
    }

    #[tokio::test]
    async fn test_read_missing_link_clears_id() {
        let (resource, mock) = create_test_resource();
        let mut data = vsi_config();
        resource.create(&mut data).await.unwrap();

        mock.remove_link("profile-abc", "link-1");
        resource.read(&mut data).await.unwrap();
        assert_eq!(data.id(), "");
        assert_eq!(mock.calls(MockOperation::GetLink), 2);

        // Nothing left to read
        resource.read(&mut data).await.unwrap();
        assert_eq!(data.id(), "");
        assert_eq!(mock.calls(MockOperation::GetLink), 2);
    }

    #[tokio::test]
    async fn test_read_server_error_keeps_id() {
        let (resource, mock) = create_test_resource();
        let mut data = vsi_config();
        resource.create(&mut data).await.unwrap();

        mock.fail_next(MockOperation::GetLink, 500, "internal error");
        let err = only_error(resource.read(&mut data).await.unwrap_err());

        assert!(matches!(
            err,
            LinkResourceError::RemoteOperationFailed { operation: "GetLink", .. }
        ));
        assert!(err.to_string().contains("internal error"));
        assert_eq!(data.id(), "profile-abc/link-1");
    }

    #[tokio::test]
    async fn test_read_refreshes_computed_attributes_from_server() {
        let (resource, mock) = create_test_resource();
        let mut data = vsi_config();
        resource.create(&mut data).await.unwrap();

        let mut changed = mock.stored_link("profile-abc", "link-1").unwrap();
        changed.entity_tag = "2-link-1".to_string();
        changed.modified_at = Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        mock.add_link("profile-abc", changed);

        resource.read(&mut data).await.unwrap();

        assert_eq!(data.get_str("entity_tag"), Some("2-link-1"));
        assert_eq!(data.get_str("created_at"), Some("2024-03-01T10:15:30.000Z"));
        assert_eq!(data.get_str("modified_at"), Some("2024-04-01T00:00:00.000Z"));
    }

    #[tokio::test]
    async fn test_read_without_timestamps_unsets_them() {
        let (resource, mock) = create_test_resource();
        let mut link = server_link("link-9", None);
        link.created_at = None;
        link.modified_at = None;
        mock.add_link("profile-abc", link);

        let mut data = resource.import("profile-abc/link-9").unwrap();
        data.set("created_at", json!("stale")).unwrap();
        resource.read(&mut data).await.unwrap();

        assert_eq!(data.get("created_at"), None);
        assert_eq!(data.get("modified_at"), None);
    }

    #[tokio::test]
    async fn test_read_with_empty_id_is_noop() {
        let resource = TrustedProfileLinkResource::new(Arc::new(UnauthenticatedSession));
        let mut data = ResourceData::new(&TRUSTED_PROFILE_LINK_SCHEMA);

        resource.read(&mut data).await.unwrap();
        assert_eq!(data.id(), "");
    }

    #[tokio::test]
    async fn test_read_rejects_malformed_id() {
        let (resource, mock) = create_test_resource();
        let mut data = ResourceData::import(&TRUSTED_PROFILE_LINK_SCHEMA, "link-without-profile");

        let err = only_error(resource.read(&mut data).await.unwrap_err());

        assert!(matches!(err, LinkResourceError::InvalidIdentifier(_)));
        assert_eq!(mock.calls(MockOperation::GetLink), 0);
    }

    #[tokio::test]
    async fn test_import_then_read_rebuilds_state() {
        let (resource, mock) = create_test_resource();
        mock.add_link("Profile-f00d", server_link("link-7", Some("ci-runner")));

        let mut data = resource.import("Profile-f00d/link-7").unwrap();
        resource.read(&mut data).await.unwrap();

        assert_eq!(data.id(), "Profile-f00d/link-7");
        assert_eq!(data.get_str("profile_id"), Some("Profile-f00d"));
        assert_eq!(data.get_str("cr_type"), Some("ROKS_SA"));
        assert_eq!(data.get_str("name"), Some("ci-runner"));
        assert_eq!(
            data.get("link"),
            Some(&json!([{"crn": CLUSTER_CRN, "namespace": "ops", "name": "builder"}]))
        );
        assert_eq!(data.get_str("entity_tag"), Some("7-link-7"));
        assert_eq!(data.get_str("created_at"), Some("2023-11-02T08:00:00.000Z"));
        assert_eq!(data.get_str("modified_at"), Some("2023-12-24T18:30:05.250Z"));

        let desired = create_test_config(json!({
            "profile_id": "Profile-f00d",
            "cr_type": "ROKS_SA",
            "link": [{"crn": CLUSTER_CRN, "namespace": "ops", "name": "builder"}],
            "name": "ci-runner"
        }));
        assert!(plan(&data, &desired).is_noop());
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_id() {
        let (resource, _mock) = create_test_resource();
        for bad in ["link-7", "/link-7", "Profile-f00d/", "a/b/c"] {
            assert!(matches!(
                resource.import(bad).unwrap_err(),
                LinkResourceError::InvalidIdentifier(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_delete_clears_id() {
        let (resource, mock) = create_test_resource();
        let mut data = iks_config();
        resource.create(&mut data).await.unwrap();

        resource.delete(&mut data).await.unwrap();

        assert_eq!(data.id(), "");
        assert_eq!(mock.link_count(), 0);
        assert_eq!(mock.calls(MockOperation::DeleteLink), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_link_is_reported() {
        let (resource, mock) = create_test_resource();
        let mut data = ResourceData::import(&TRUSTED_PROFILE_LINK_SCHEMA, "profile-abc/link-404");

        let err = only_error(resource.delete(&mut data).await.unwrap_err());

        assert!(matches!(
            err,
            LinkResourceError::RemoteOperationFailed { operation: "DeleteLink", .. }
        ));
        assert_eq!(data.id(), "profile-abc/link-404");
        assert_eq!(mock.calls(MockOperation::DeleteLink), 1);
    }

    #[tokio::test]
    async fn test_delete_without_session_credentials() {
        let resource = TrustedProfileLinkResource::new(Arc::new(UnauthenticatedSession));
        let mut data = ResourceData::import(&TRUSTED_PROFILE_LINK_SCHEMA, "profile-abc/link-1");

        let err = only_error(resource.delete(&mut data).await.unwrap_err());

        assert!(matches!(err, LinkResourceError::ClientUnavailable(_)));
        assert_eq!(data.id(), "profile-abc/link-1");
    }
}
