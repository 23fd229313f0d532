//! Client kubeconfig for the kubelet, authenticating with embedded PKI.
//!
//! Pure rendering only; the caller fetches the credentials.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::domain::error::ConfigError;

/// Where the kubelet reads its kubeconfig.
pub const KUBELET_KUBECONFIG_PATH: &str = "/var/lib/kubelet/kubeconfig";

const CLUSTER_NAME: &str = "local";
const CONTEXT_NAME: &str = "service-account-context";

/// PEM material embedded in the kubeconfig.
#[derive(Debug, Clone, Copy)]
pub struct PkiCredentials<'a> {
    pub ca_certificate: &'a [u8],
    pub certificate: &'a [u8],
    pub private_key: &'a [u8],
}

#[derive(Serialize)]
struct Kubeconfig<'a> {
    #[serde(rename = "apiVersion")]
    api_version: &'a str,
    kind: &'a str,
    users: Vec<Named<'a, User>>,
    clusters: Vec<Named<'a, Cluster>>,
    contexts: Vec<Named<'a, Context<'a>>>,
    #[serde(rename = "current-context")]
    current_context: &'a str,
}

#[derive(Serialize)]
struct Named<'a, T> {
    name: &'a str,
    #[serde(flatten)]
    item: T,
}

#[derive(Serialize)]
struct User {
    user: UserData,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct UserData {
    client_certificate_data: String,
    client_key_data: String,
}

#[derive(Serialize)]
struct Cluster {
    cluster: ClusterData,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ClusterData {
    certificate_authority_data: String,
    server: String,
}

#[derive(Serialize)]
struct Context<'a> {
    context: ContextData<'a>,
}

#[derive(Serialize)]
struct ContextData<'a> {
    cluster: &'a str,
    user: &'a str,
}

/// API server endpoint the kubelet talks to.
///
/// Masters reach their own apiserver on loopback.
#[must_use]
pub fn api_server_url(is_master: bool, master_internal_name: &str) -> String {
    if is_master {
        "https://127.0.0.1".to_string()
    } else {
        format!("https://{master_internal_name}")
    }
}

/// Render a kubeconfig for `user_id` against `server`.
///
/// # Errors
///
/// Returns `ConfigError::Kubeconfig` if the document cannot be serialized.
pub fn render_pki_kubeconfig(
    credentials: PkiCredentials<'_>,
    server: &str,
    user_id: &str,
) -> Result<String, ConfigError> {
    let doc = Kubeconfig {
        api_version: "v1",
        kind: "Config",
        users: vec![Named {
            name: user_id,
            item: User {
                user: UserData {
                    client_certificate_data: STANDARD.encode(credentials.certificate),
                    client_key_data: STANDARD.encode(credentials.private_key),
                },
            },
        }],
        clusters: vec![Named {
            name: CLUSTER_NAME,
            item: Cluster {
                cluster: ClusterData {
                    certificate_authority_data: STANDARD.encode(credentials.ca_certificate),
                    server: server.to_string(),
                },
            },
        }],
        contexts: vec![Named {
            name: CONTEXT_NAME,
            item: Context {
                context: ContextData {
                    cluster: CLUSTER_NAME,
                    user: user_id,
                },
            },
        }],
        current_context: CONTEXT_NAME,
    };
    Ok(serde_yaml::to_string(&doc)?)
}
