#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::thread;

use tenant_index::{
    AccessResolver, Claim, DEFAULT_TENANT_CLAIM, IndexDescriptor, IndexNameBuilder, IndexType,
    NamingPrefix, RequestIdentity, TenantId, TenantIndexConfig,
};
use time::macros::datetime;

fn resolver() -> AccessResolver {
    AccessResolver::from_config(&TenantIndexConfig::default()).unwrap()
}

fn logs() -> IndexType {
    IndexType::new("logs").unwrap()
}

fn descriptor_for(tenant: &str) -> IndexDescriptor {
    let builder = IndexNameBuilder::yearly(NamingPrefix::none());
    let tenant = TenantId::new(tenant).unwrap();
    builder
        .build_for_tenants(&logs(), [&tenant])
        .into_iter()
        .next()
        .unwrap()
}

#[test]
fn anonymous_identity_gets_nothing() {
    let resolver = resolver();
    let identity = RequestIdentity::anonymous();

    assert!(resolver.authorized_tenants(&identity).is_deny_all());
    assert!(resolver.accessible_indices(&logs(), &identity).is_empty());
    assert!(!resolver.is_accessible(&descriptor_for("acme"), &identity));
}

#[test]
fn absent_identity_gets_nothing() {
    let resolver = resolver();
    let identity: Option<RequestIdentity> = None;

    assert!(resolver.accessible_indices(&logs(), &identity).is_empty());
    assert!(!resolver.is_accessible(&descriptor_for("acme"), &identity));
}

#[test]
fn authenticated_identity_without_tenant_claims_gets_nothing() {
    let identity = RequestIdentity::builder()
        .subject_id("user-1")
        .claim("role", "admin")
        .claim("scope", "*")
        .build();

    let resolver = resolver();
    assert!(resolver.accessible_indices(&logs(), &identity).is_empty());
    assert!(!resolver.is_accessible(&descriptor_for("admin"), &identity));
}

#[test]
fn only_malformed_claims_gets_nothing() {
    let identity = RequestIdentity::builder()
        .claim(DEFAULT_TENANT_CLAIM, "*")
        .claim(DEFAULT_TENANT_CLAIM, "")
        .claim(DEFAULT_TENANT_CLAIM, "acme.*")
        .build();

    let resolver = resolver();
    assert!(resolver.accessible_indices(&logs(), &identity).is_empty());
    assert!(
        resolver
            .accessible_indices_in_range(
                &logs(),
                datetime!(2020-01-01 0:00 UTC),
                datetime!(2024-01-01 0:00 UTC),
                &identity,
            )
            .unwrap()
            .is_empty()
    );
}

#[test]
fn claim_grants_exactly_its_tenant() {
    let identity = RequestIdentity::builder()
        .claim(DEFAULT_TENANT_CLAIM, "CustomerKAM_1")
        .build();
    let resolver = resolver();

    let indices = resolver.accessible_indices(&logs(), &identity);
    assert_eq!(indices.len(), 1);
    assert_eq!(indices[0].pattern(), "logs_customerkam_1_*");

    assert!(resolver.is_accessible(&descriptor_for("customerkam_1"), &identity));
    assert!(!resolver.is_accessible(&descriptor_for("customerkam_2"), &identity));
}

#[test]
fn range_lookup_is_grouped_per_tenant() {
    let cfg = TenantIndexConfig {
        prefix: "db_prefixx_1".to_owned(),
        ..TenantIndexConfig::default()
    };
    let resolver = AccessResolver::from_config(&cfg).unwrap();
    let identity = RequestIdentity::builder()
        .claims([
            Claim::new(DEFAULT_TENANT_CLAIM, "globex"),
            Claim::new(DEFAULT_TENANT_CLAIM, "acme"),
        ])
        .build();

    let indices = resolver
        .accessible_indices_in_range(
            &logs(),
            datetime!(2022-07-01 0:00 UTC),
            datetime!(2024-01-01 0:00 UTC),
            &identity,
        )
        .unwrap();

    let patterns: Vec<&str> = indices.iter().map(IndexDescriptor::pattern).collect();
    assert_eq!(
        patterns,
        [
            "logs_db_prefixx_1_globex_2022",
            "logs_db_prefixx_1_globex_2023",
            "logs_db_prefixx_1_acme_2022",
            "logs_db_prefixx_1_acme_2023",
        ]
    );
}

#[test]
fn inverted_range_fails_even_without_access() {
    let err = resolver()
        .accessible_indices_in_range(
            &logs(),
            datetime!(2024-01-01 0:00 UTC),
            datetime!(2023-01-01 0:00 UTC),
            &RequestIdentity::anonymous(),
        )
        .unwrap_err();
    assert!(err.to_string().contains("is after its end"));
}

#[test]
fn range_outside_the_utc_calendar_fails_instead_of_panicking() {
    let identity = RequestIdentity::builder()
        .claim(DEFAULT_TENANT_CLAIM, "acme")
        .build();
    let err = resolver()
        .accessible_indices_in_range(
            &logs(),
            datetime!(9999-12-31 20:00 -05:00),
            datetime!(9999-12-31 21:00 -05:00),
            &identity,
        )
        .unwrap_err();
    assert!(
        err.to_string().contains("outside the representable UTC calendar"),
        "{err}"
    );
}

#[test]
fn resolver_is_shared_across_threads() {
    let resolver = Arc::new(resolver());

    let handles: Vec<_> = ["acme", "globex", "initech", "umbrella"]
        .into_iter()
        .map(|tenant| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || {
                let identity = RequestIdentity::builder()
                    .claim(DEFAULT_TENANT_CLAIM, tenant)
                    .build();
                resolver
                    .accessible_indices(&IndexType::new("events").unwrap(), &identity)
                    .into_iter()
                    .map(|d| d.pattern().to_owned())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (handle, tenant) in handles.into_iter().zip(["acme", "globex", "initech", "umbrella"]) {
        assert_eq!(handle.join().unwrap(), [format!("events_{tenant}_*")]);
    }
}
