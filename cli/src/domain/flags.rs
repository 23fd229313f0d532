//! Kubelet command-line flags from a resolved configuration.
//!
//! Unset fields produce no flag. Maps render as sorted `k=v` pairs joined by
//! commas, lists as comma-joined values.

use std::collections::BTreeMap;
use std::fmt::Display;

use nodeup_api::KubeletConfigSpec;

/// Accumulates `--name=value` flags in insertion order.
#[derive(Debug, Default)]
struct FlagSet {
    flags: Vec<String>,
}

impl FlagSet {
    fn opt<T: Display>(&mut self, name: &str, value: Option<&T>) {
        if let Some(value) = value {
            self.flags.push(format!("--{name}={value}"));
        }
    }

    fn text(&mut self, name: &str, value: Option<&String>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.flags.push(format!("--{name}={value}"));
        }
    }

    fn map(&mut self, name: &str, value: &BTreeMap<String, String>) {
        if value.is_empty() {
            return;
        }
        let joined = value
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        self.flags.push(format!("--{name}={joined}"));
    }

    fn list(&mut self, name: &str, value: &[String]) {
        if !value.is_empty() {
            self.flags.push(format!("--{name}={}", value.join(",")));
        }
    }

    fn finish(self) -> String {
        self.flags.join(" ")
    }
}

/// Render `config` as the kubelet's argument string.
#[must_use]
pub fn build_flags(config: &KubeletConfigSpec) -> String {
    let mut f = FlagSet::default();
    f.text("api-servers", config.api_servers.as_ref());
    f.opt("anonymous-auth", config.anonymous_auth.as_ref());
    f.text("authorization-mode", config.authorization_mode.as_ref());
    f.text("client-ca-file", config.client_ca_file.as_ref());
    f.text("tls-cert-file", config.tls_cert_file.as_ref());
    f.text("tls-private-key-file", config.tls_private_key_file.as_ref());
    f.text("kubeconfig", config.kubeconfig_path.as_ref());
    f.opt("require-kubeconfig", config.require_kubeconfig.as_ref());
    f.opt("v", config.log_level.as_ref());
    f.text("pod-manifest-path", config.pod_manifest_path.as_ref());
    f.text("hostname-override", config.hostname_override.as_ref());
    f.text("pod-infra-container-image", config.pod_infra_container_image.as_ref());
    f.text("seccomp-profile-root", config.seccomp_profile_root.as_ref());
    f.opt("allow-privileged", config.allow_privileged.as_ref());
    f.opt("enable-debugging-handlers", config.enable_debugging_handlers.as_ref());
    f.opt("register-node", config.register_node.as_ref());
    f.text("network-plugin", config.network_plugin_name.as_ref());
    f.opt("network-plugin-mtu", config.network_plugin_mtu.as_ref());
    f.opt("image-gc-high-threshold", config.image_gc_high_threshold_percent.as_ref());
    f.opt("image-gc-low-threshold", config.image_gc_low_threshold_percent.as_ref());
    f.text("cluster-dns", config.cluster_dns.as_ref());
    f.text("cluster-domain", config.cluster_domain.as_ref());
    f.text("cgroup-root", config.cgroup_root.as_ref());
    f.opt("configure-cbr0", config.configure_cbr0.as_ref());
    f.text("hairpin-mode", config.hairpin_mode.as_ref());
    f.opt("babysit-daemons", config.babysit_daemons.as_ref());
    f.opt("max-pods", config.max_pods.as_ref());
    f.text("pod-cidr", config.pod_cidr.as_ref());
    f.text("resolv-conf", config.resolv_conf.as_ref());
    f.opt("reconcile-cidr", config.reconcile_cidr.as_ref());
    f.opt("register-schedulable", config.register_schedulable.as_ref());
    f.opt("serialize-image-pulls", config.serialize_image_pulls.as_ref());
    f.map("node-labels", &config.node_labels);
    f.text("non-masquerade-cidr", config.non_masquerade_cidr.as_ref());
    f.text("eviction-hard", config.eviction_hard.as_ref());
    f.text("volume-plugin-dir", config.volume_plugin_directory.as_ref());
    f.list("register-with-taints", &config.taints);
    f.map("feature-gates", &config.feature_gates);
    f.map("kube-reserved", &config.kube_reserved);
    f.map("system-reserved", &config.system_reserved);
    f.text("enforce-node-allocatable", config.enforce_node_allocatable.as_ref());
    f.text("runtime-request-timeout", config.runtime_request_timeout.as_ref());
    f.opt("fail-swap-on", config.fail_swap_on.as_ref());
    f.text("cloud-provider", config.cloud_provider.as_ref());
    f.text("kubelet-cgroups", config.kubelet_cgroups.as_ref());
    f.text("runtime-cgroups", config.runtime_cgroups.as_ref());
    f.text("system-cgroups", config.system_cgroups.as_ref());
    f.text("cgroup-driver", config.cgroup_driver.as_ref());
    f.finish()
}
