use super::{add_core_to_scheme, add_to_scheme, scheme, GroupVersionKind, Scheme, SchemeError};
use crate::{ConfigMap, SonataFlow};

#[test]
fn global_scheme_knows_workflow_and_config_map() {
    let scheme = scheme();
    assert_eq!(
        scheme.lookup("SonataFlow").map(GroupVersionKind::api_version),
        Some("sonataflow.org/v1alpha08".to_string())
    );
    assert_eq!(
        scheme.lookup("ConfigMap").map(GroupVersionKind::api_version),
        Some("v1".to_string())
    );
}

#[test]
fn registration_is_idempotent() {
    let mut scheme = Scheme::new();
    add_to_scheme(&mut scheme).expect("first registration");
    add_to_scheme(&mut scheme).expect("second registration");
    add_core_to_scheme(&mut scheme).expect("core registration");
    assert_eq!(scheme.kinds().count(), 2);
}

#[test]
fn conflicting_registration_is_rejected() {
    let mut scheme = Scheme::new();
    add_core_to_scheme(&mut scheme).expect("core registration");
    let err = scheme
        .register(GroupVersionKind::new("example.org", "v2", "ConfigMap"))
        .expect_err("must conflict");
    assert!(matches!(err, SchemeError::Conflict { .. }));
}

#[test]
fn stamp_sets_type_meta() {
    let mut config_map = ConfigMap::new("greet-props", "default");
    scheme().stamp(&mut config_map).expect("must stamp");
    assert_eq!(config_map.type_meta.api_version, "v1");
    assert_eq!(config_map.type_meta.kind, "ConfigMap");

    let mut flow = SonataFlow::default();
    scheme().stamp(&mut flow).expect("must stamp");
    assert_eq!(flow.type_meta.api_version, "sonataflow.org/v1alpha08");
    assert_eq!(flow.type_meta.kind, "SonataFlow");
}

#[test]
fn stamp_on_empty_scheme_fails() {
    let mut flow = SonataFlow::default();
    let err = Scheme::new().stamp(&mut flow).expect_err("must fail");
    assert_eq!(
        err,
        SchemeError::Unregistered {
            kind: "SonataFlow".to_string()
        }
    );
}

#[test]
fn global_scheme_matches_registered_kinds() {
    let mut registered = Scheme::new();
    add_to_scheme(&mut registered).expect("workflow registration");
    add_core_to_scheme(&mut registered).expect("core registration");

    let global = scheme().kinds().cloned().collect::<Vec<_>>();
    let expected = registered.kinds().cloned().collect::<Vec<_>>();
    assert_eq!(global, expected);
}
