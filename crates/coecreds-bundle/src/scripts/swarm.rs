//! Docker Swarm connection scripts.

use minijinja::context;

use coecreds_core::Cluster;

use super::{ScriptWriter, Scripts, TemplateRenderer, POSIX_SOURCE_DIR};
use crate::BundleError;

const BASH_BODY: &str = r#"export DOCKER_HOST={{ docker_host }}
export DOCKER_TLS_VERIFY=1
export DOCKER_CERT_PATH=$DIR
export DOCKER_VERSION={{ docker_version }}
"#;

const CMD_TEMPLATE: &str = r#"set DOCKER_HOST={{ docker_host }}
set DOCKER_TLS_VERIFY=1
set DOCKER_CERT_PATH=%~dp0
set DOCKER_VERSION={{ docker_version }}
"#;

const PS1_TEMPLATE: &str = r#"$env:DOCKER_HOST="{{ docker_host }}"
$env:DOCKER_TLS_VERIFY=1
$env:DOCKER_CERT_PATH=$PSScriptRoot
$env:DOCKER_VERSION="{{ docker_version }}"
"#;

const FISH_TEMPLATE: &str = r#"set DIR (dirname (status -f))

set -x DOCKER_HOST {{ docker_host }}
set -x DOCKER_TLS_VERIFY 1
set -x DOCKER_CERT_PATH $DIR
set -x DOCKER_VERSION {{ docker_version }}
"#;

/// Writes Docker client environment scripts for POSIX shells, `cmd.exe`,
/// PowerShell and fish.
///
/// Each script points the Docker client at the cluster endpoint and at the
/// certificate files sitting next to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwarmWriter;

impl ScriptWriter for SwarmWriter {
    fn generate(
        &self,
        cluster: &Cluster,
        renderer: &TemplateRenderer,
    ) -> Result<Scripts, BundleError> {
        let ctx = context! {
            docker_host => &cluster.coe_endpoint,
            docker_version => cluster.container_version.as_deref().unwrap_or_default(),
        };

        let bash = format!("{}{}", POSIX_SOURCE_DIR, BASH_BODY);

        let mut scripts = Scripts::new();
        for (name, template) in [
            ("docker.env", bash.as_str()),
            ("docker.cmd", CMD_TEMPLATE),
            ("docker.ps1", PS1_TEMPLATE),
            ("docker.fish", FISH_TEMPLATE),
        ] {
            scripts.insert(name.to_string(), renderer.render(name, template, &ctx)?);
        }

        Ok(scripts)
    }
}
