//! Kubernetes client configuration.

use minijinja::context;

use coecreds_core::Cluster;

use super::{ScriptWriter, Scripts, TemplateRenderer, POSIX_SOURCE_DIR};
use crate::bundle::{CA_CERT_FILE, CERT_FILE, KEY_FILE};
use crate::BundleError;

/// File name of the generated kubeconfig.
pub const KUBECONFIG_FILE: &str = "config";

/// Name of the kubeconfig user entry.
const USER_NAME: &str = "admin";

// Relative paths in a kubeconfig resolve against the kubeconfig's directory.
const KUBECONFIG_TEMPLATE: &str = r#"apiVersion: v1
kind: Config
clusters:
- name: {{ cluster_name }}
  cluster:
    server: {{ server }}
    certificate-authority: {{ ca_file }}
contexts:
- name: {{ cluster_name }}
  context:
    cluster: {{ cluster_name }}
    user: {{ user_name }}
current-context: {{ cluster_name }}
users:
- name: {{ user_name }}
  user:
    client-certificate: {{ cert_file }}
    client-key: {{ key_file }}
preferences: {}
"#;

const ENV_BODY: &str = r#"export KUBECONFIG=$DIR/{{ kubeconfig }}
"#;

/// Writes a kubeconfig that points `kubectl` at the cluster endpoint, plus a
/// POSIX script exporting `KUBECONFIG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KubernetesWriter;

impl ScriptWriter for KubernetesWriter {
    fn generate(
        &self,
        cluster: &Cluster,
        renderer: &TemplateRenderer,
    ) -> Result<Scripts, BundleError> {
        let mut scripts = Scripts::new();

        let kubeconfig = renderer.render(
            KUBECONFIG_FILE,
            KUBECONFIG_TEMPLATE,
            context! {
                cluster_name => cluster.display_name(),
                server => &cluster.coe_endpoint,
                user_name => USER_NAME,
                ca_file => CA_CERT_FILE,
                cert_file => CERT_FILE,
                key_file => KEY_FILE,
            },
        )?;
        scripts.insert(KUBECONFIG_FILE.to_string(), kubeconfig);

        let env = renderer.render(
            "kube.env",
            &format!("{}{}", POSIX_SOURCE_DIR, ENV_BODY),
            context! { kubeconfig => KUBECONFIG_FILE },
        )?;
        scripts.insert("kube.env".to_string(), env);

        Ok(scripts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(cluster: &Cluster) -> Scripts {
        KubernetesWriter
            .generate(cluster, &TemplateRenderer::new())
            .unwrap()
    }

    #[test]
    fn test_kubeconfig_references_endpoint_and_bundle_files() {
        let cluster = Cluster::new("c1", "t1", "https://10.0.0.1:6443").with_name("prod");
        let scripts = render(&cluster);
        let config = String::from_utf8(scripts[KUBECONFIG_FILE].clone()).unwrap();

        assert!(config.contains("    server: https://10.0.0.1:6443\n"));
        assert!(config.contains("    certificate-authority: ca.pem\n"));
        assert!(config.contains("    client-certificate: cert.pem\n"));
        assert!(config.contains("    client-key: key.pem\n"));
        assert!(config.contains("current-context: prod\n"));
    }

    #[test]
    fn test_unnamed_cluster_uses_id() {
        let cluster = Cluster::new("c1", "t1", "https://10.0.0.1:6443");
        let config = String::from_utf8(render(&cluster)[KUBECONFIG_FILE].clone()).unwrap();
        assert!(config.contains("- name: c1\n"));
    }

    #[test]
    fn test_env_script_exports_kubeconfig() {
        let cluster = Cluster::new("c1", "t1", "https://10.0.0.1:6443");
        let env = String::from_utf8(render(&cluster)["kube.env"].clone()).unwrap();
        assert!(env.ends_with("export KUBECONFIG=$DIR/config\n"));
    }
}
