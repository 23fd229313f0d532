//! Property-based tests for merge, flag rendering, validation and task
//! generation.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use nodeup_api::{KubeletConfigSpec, Role};
use nodeup_cli::application::services::kubelet::{NodeSpec, plan_kubelet};
use nodeup_cli::domain::config::{VALID_CONFIG_KEYS, validate_config_key, validate_config_value};
use nodeup_cli::domain::distro::Distribution;
use nodeup_cli::domain::flags::build_flags;
use nodeup_cli::domain::labels::validate_taint;
use nodeup_cli::domain::merge::json_merge_struct;
use nodeup_cli::domain::task::duplicate_keys;
use nodeup_cli::domain::version::KubernetesVersion;

use crate::mocks::{FakeKeyStore, InMemoryAssets, StaticMetadata, cluster, instance_group};

fn any_distro() -> impl Strategy<Value = Distribution> {
    prop_oneof![
        Just(Distribution::Debian),
        Just(Distribution::Ubuntu),
        Just(Distribution::CentOs),
        Just(Distribution::Rhel),
        Just(Distribution::CoreOs),
        Just(Distribution::ContainerOs),
    ]
}

fn any_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Master), Just(Role::Node)]
}

fn sparse_kubelet() -> impl Strategy<Value = KubeletConfigSpec> {
    (
        proptest::option::of(1i32..500),
        proptest::option::of("[a-z]{1,8}\\.local"),
        proptest::option::of(any::<bool>()),
        proptest::option::of(0i32..10),
    )
        .prop_map(|(max_pods, cluster_domain, allow_privileged, log_level)| {
            KubeletConfigSpec {
                max_pods,
                cluster_domain,
                allow_privileged,
                log_level,
                ..KubeletConfigSpec::default()
            }
        })
}

// ============================================================================
// json_merge_struct() property tests
// ============================================================================

proptest! {
    /// A field left unset in the layer keeps its earlier value; a set one wins.
    #[test]
    fn prop_merge_unset_never_overwrites(
        base in sparse_kubelet(),
        layer in sparse_kubelet(),
    ) {
        let mut merged = base.clone();
        json_merge_struct(&mut merged, &layer).expect("merge");

        prop_assert_eq!(merged.max_pods, layer.max_pods.or(base.max_pods));
        prop_assert_eq!(merged.cluster_domain, layer.cluster_domain.or(base.cluster_domain));
        prop_assert_eq!(merged.allow_privileged, layer.allow_privileged.or(base.allow_privileged));
        prop_assert_eq!(merged.log_level, layer.log_level.or(base.log_level));
    }

    /// Merging an empty layer changes nothing.
    #[test]
    fn prop_merge_empty_layer_is_identity(base in sparse_kubelet()) {
        let mut merged = base.clone();
        json_merge_struct(&mut merged, &KubeletConfigSpec::default()).expect("merge");
        prop_assert_eq!(merged, base);
    }
}

// ============================================================================
// build_flags() property tests
// ============================================================================

proptest! {
    /// Every rendered token is a `--name=value` flag with no blanks between.
    #[test]
    fn prop_flags_are_well_formed(config in sparse_kubelet()) {
        let flags = build_flags(&config);
        prop_assert!(!flags.starts_with(' ') && !flags.ends_with(' '), "padding: {:?}", flags);
        prop_assert!(!flags.contains("  "), "double space: {:?}", flags);
        for token in flags.split_whitespace() {
            prop_assert!(token.starts_with("--") && token.contains('='), "bad token: {}", token);
        }
    }

    /// Each set field yields exactly one flag.
    #[test]
    fn prop_flag_count_matches_set_fields(config in sparse_kubelet()) {
        let expected = usize::from(config.max_pods.is_some())
            + usize::from(config.cluster_domain.is_some())
            + usize::from(config.allow_privileged.is_some())
            + usize::from(config.log_level.is_some());
        prop_assert_eq!(build_flags(&config).split_whitespace().count(), expected);
    }
}

// ============================================================================
// validate_taint() property tests
// ============================================================================

proptest! {
    /// Well-formed taints are accepted for every effect.
    #[test]
    fn prop_well_formed_taints_accepted(
        prefix in proptest::option::of("[a-z][a-z0-9]{0,8}\\.io"),
        key in "[A-Za-z][A-Za-z0-9]{0,10}",
        value in "[A-Za-z0-9]{0,10}",
        effect in prop_oneof![Just("NoSchedule"), Just("PreferNoSchedule"), Just("NoExecute")],
    ) {
        let taint = match prefix {
            Some(p) => format!("{p}/{key}={value}:{effect}"),
            None => format!("{key}={value}:{effect}"),
        };
        prop_assert!(validate_taint(&taint).is_ok(), "rejected: {}", taint);
    }

    /// Anything without an effect is rejected.
    #[test]
    fn prop_taints_without_effect_rejected(key in "[a-z]{1,10}", value in "[a-z]{0,10}") {
        let taint = format!("{key}={value}");
        prop_assert!(validate_taint(&taint).is_err(), "accepted: {}", taint);
    }
}

// ============================================================================
// validate_config_key() and validate_config_value() property tests
// ============================================================================

proptest! {
    /// Arbitrary keys (not in whitelist) are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,20}\\.[a-z_]{1,20}") {
        if !VALID_CONFIG_KEYS.contains(&key.as_str()) {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {key}");
        }
    }

    /// Relative asset paths are rejected.
    #[test]
    fn prop_relative_asset_paths_rejected(path in "[a-z]{1,12}(/[a-z]{1,8}){0,3}") {
        prop_assert!(validate_config_value("assets.paths", &path).is_err());
    }

    /// Positive timeouts are accepted, zero is not.
    #[test]
    fn prop_timeout_must_be_positive(secs in 1u64..10_000) {
        prop_assert!(validate_config_value("metadata.timeout_secs", &secs.to_string()).is_ok());
        prop_assert!(validate_config_value("metadata.timeout_secs", "0").is_err());
    }
}

#[test]
fn test_every_whitelisted_key_is_accepted() {
    for key in VALID_CONFIG_KEYS {
        assert!(validate_config_key(key).is_ok(), "rejected {key}");
    }
}

// ============================================================================
// KubernetesVersion property tests
// ============================================================================

proptest! {
    /// `v` prefix and short form parse to the same version.
    #[test]
    fn prop_version_forms_agree(major in 1u64..3, minor in 0u64..30) {
        let short = KubernetesVersion::parse(&format!("v{major}.{minor}")).expect("short");
        let full = KubernetesVersion::parse(&format!("{major}.{minor}.0")).expect("full");
        prop_assert_eq!(short, full);
    }
}

// ============================================================================
// plan_kubelet() property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No two tasks of any build manage the same resource, and the build ends
    /// with the kubelet service.
    #[test]
    fn prop_builds_have_unique_keys(
        role in any_role(),
        distro in any_distro(),
        minor in 5u64..12,
        patch in 0u64..10,
    ) {
        let c = cluster(&format!("1.{minor}.{patch}"));
        let ig = instance_group(role);
        let node = NodeSpec { cluster: &c, instance_group: Some(&ig), role, distro };
        let tasks = plan_kubelet(&node, &InMemoryAssets::all(), &FakeKeyStore, &StaticMetadata("10.0.0.1"))
            .expect("plan");

        prop_assert!(duplicate_keys(&tasks).is_empty(), "duplicates: {:?}", duplicate_keys(&tasks));
        let last = tasks.last().map(nodeup_cli::domain::task::Task::key);
        prop_assert_eq!(last.as_deref(), Some("service:kubelet.service"));
    }
}
