//! Configuration of a composed resource from its template.

use std::collections::BTreeMap;

use tracing::debug;
use weft_resource::{
    Composed, Composite, LABEL_CLAIM_NAME, LABEL_CLAIM_NAMESPACE, LABEL_NAME_PREFIX,
};
use weft_template::Template;

use crate::error::{ComposeError, ComposeResult};

/// Configures a composed resource with a template's base document and
/// lineage metadata from the composite.
pub trait Configurator: Send + Sync {
    fn configure(
        &self,
        composite: &dyn Composite,
        composed: &mut Composed,
        template: &Template,
    ) -> ComposeResult<()>;
}

/// Configurator that applies the raw base template and restores identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfigurator;

impl Configurator for DefaultConfigurator {
    fn configure(
        &self,
        composite: &dyn Composite,
        composed: &mut Composed,
        template: &Template,
    ) -> ComposeResult<()> {
        let labels = composite.labels();
        let prefix = labels.get(LABEL_NAME_PREFIX).cloned().unwrap_or_default();
        // Without a name prefix there is no deterministic naming scheme, so
        // fail before touching the composed resource at all.
        if prefix.is_empty() {
            return Err(ComposeError::MissingNamePrefix(LABEL_NAME_PREFIX));
        }

        // Applying the base overwrites the whole document, so identity is
        // captured first and restored afterwards.
        let name = composed.name();
        let mut namespace = composed.namespace();
        if namespace.is_empty() {
            namespace = labels.get(LABEL_CLAIM_NAMESPACE).cloned().unwrap_or_default();
        }

        composed
            .replace_document(template.base.clone())
            .map_err(ComposeError::Unmarshal)?;

        // Lineage labels are copied even when empty-valued on the composite,
        // overwriting same-named labels carried by the base. They track
        // ancestry in case the composed resource is itself a composite.
        let mut lineage = BTreeMap::new();
        lineage.insert(LABEL_NAME_PREFIX.to_string(), prefix.clone());
        lineage.insert(
            LABEL_CLAIM_NAME.to_string(),
            labels.get(LABEL_CLAIM_NAME).cloned().unwrap_or_default(),
        );
        lineage.insert(
            LABEL_CLAIM_NAMESPACE.to_string(),
            labels.get(LABEL_CLAIM_NAMESPACE).cloned().unwrap_or_default(),
        );
        composed.merge_labels(&lineage)?;

        composed.set_generate_name(&format!("{}-", prefix))?;
        composed.set_name(&name)?;
        composed.set_namespace(&namespace)?;

        debug!(name = %name, prefix = %prefix, "Configured composed resource");
        Ok(())
    }
}
