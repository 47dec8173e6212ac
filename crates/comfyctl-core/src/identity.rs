use crate::plan::{ExportError, InstallPlan};
use comfyctl_schema::{PlanId, ShortId};
use serde::Serialize;

/// Deterministic fingerprint of a resolved plan.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlanDigest {
    pub plan_id: PlanId,
    pub short_id: ShortId,
}

/// Hash the plan's canonical JSON followed by its exported environment.
///
/// Equal documents resolved for the same workflow always produce the same
/// digest; any change to an exported value changes it.
pub fn compute_plan_digest(plan: &InstallPlan) -> Result<PlanDigest, ExportError> {
    let mut hasher = blake3::Hasher::new();

    hasher.update(plan.canonical_json()?.as_bytes());

    if let Some(workflow) = &plan.workflow {
        hasher.update(format!("workflow:{workflow}").as_bytes());
    }
    for (name, value) in plan.environment() {
        hasher.update(format!("env:{name}={value}\n").as_bytes());
    }

    let hex = hasher.finalize().to_hex().to_string();
    let short = hex[..12].to_owned();

    Ok(PlanDigest {
        plan_id: PlanId::new(hex),
        short_id: ShortId::new(short),
    })
}

impl InstallPlan {
    pub fn digest(&self) -> Result<PlanDigest, ExportError> {
        compute_plan_digest(self)
    }
}
