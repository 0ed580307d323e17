use serde::Serialize;

use crate::container::binding::Binding;
use crate::container::descriptor::ServiceId;
use crate::container::ioc_container::Container;
use crate::container::scope::ServiceScope;
use crate::errors::ContainerError;

/// Serializable view of a container's registrations
#[derive(Debug, Clone, Serialize)]
pub struct ContainerSnapshot {
    pub bindings: Vec<BindingInfo>,
    pub aliases: Vec<AliasInfo>,
    /// Identifiers with a cached shared instance
    pub instances: Vec<ServiceId>,
}

/// One registered binding
#[derive(Debug, Clone, Serialize)]
pub struct BindingInfo {
    pub service: ServiceId,
    pub concrete: String,
    pub is_factory: bool,
    pub scope: ServiceScope,
    pub arguments: Vec<String>,
    pub setters: usize,
    pub extenders: usize,
}

/// One alias edge
#[derive(Debug, Clone, Serialize)]
pub struct AliasInfo {
    pub alias: ServiceId,
    pub target: ServiceId,
}

impl BindingInfo {
    fn new(service: &ServiceId, binding: &Binding) -> Self {
        Self {
            service: service.clone(),
            concrete: binding.concrete().describe(),
            is_factory: binding.concrete().is_factory(),
            scope: binding.scope(),
            arguments: binding.arguments().keys().map(ToString::to_string).collect(),
            setters: binding.setters().len(),
            extenders: binding.extenders().len(),
        }
    }
}

impl ContainerSnapshot {
    pub fn capture(container: &Container) -> Self {
        let mut bindings: Vec<BindingInfo> = container
            .bindings()
            .iter()
            .map(|(service, binding)| BindingInfo::new(service, binding))
            .collect();
        bindings.sort_by(|a, b| a.service.cmp(&b.service));

        let mut aliases: Vec<AliasInfo> = container
            .aliases()
            .iter()
            .map(|(alias, target)| AliasInfo {
                alias: alias.clone(),
                target: target.clone(),
            })
            .collect();
        aliases.sort_by(|a, b| a.alias.cmp(&b.alias));

        Self {
            bindings,
            aliases,
            instances: container.instance_ids(),
        }
    }

    pub fn binding(&self, service: &str) -> Option<&BindingInfo> {
        self.bindings.iter().find(|info| info.service.as_str() == service)
    }

    pub fn to_json(&self) -> Result<String, ContainerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Container {
    /// Describe the current registrations for diagnostics
    pub fn snapshot(&self) -> ContainerSnapshot {
        ContainerSnapshot::capture(self)
    }
}
