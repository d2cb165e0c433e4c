//! Service object owning the override state of the active model.
//!
//! `OverrideService` replaces any process-wide store: it owns the schema
//! registry, the key-value backend and, while a model is loaded, the raw
//! root, its path mapping, the override document and the enriched tree.
//!
//! Every mutation follows the same protocol:
//! 1. Apply the change to the in-memory document
//! 2. Bump `updated_at`
//! 3. Re-enrich the tree
//! 4. Persist the document
//!
//! A failure in step 4 is returned as `OverrideError::Persistence`; the
//! in-memory state keeps the mutation.

use chrono::Utc;
use veneer_core::NodePath;
use veneer_core::enhanced::EnhancedNode;
use veneer_core::envelope::{EXPORT_VERSION, ExportEnvelope};
use veneer_core::keys::{LAST_ACTIVE_MODEL_KEY, document_key};
use veneer_core::overrides::{NodeOverride, OverrideDocument};
use veneer_core::scene::SceneNode;
use veneer_core::traversal::TraversalOptions;
use veneer_schema::SchemaRegistry;
use veneer_store::{KeyValueStore, StoreError};

use crate::browse::filter_for_browse;
use crate::codec;
use crate::enrich::enrich_cooperative;
use crate::error::OverrideError;
use crate::path_map::{PathMapping, build_path_mapping_cooperative};

/// State held while a model is loaded.
struct ActiveModel {
    model_key: String,
    root: SceneNode,
    mapping: PathMapping,
    document: OverrideDocument,
    tree: Vec<EnhancedNode>,
}

impl ActiveModel {
    async fn refresh(&mut self, options: TraversalOptions) {
        self.tree = enrich_cooperative(&self.root, &self.mapping, &self.document, options).await;
    }
}

/// Owns the override document, path map and enriched tree of one model at a time.
pub struct OverrideService<S> {
    store: S,
    registry: SchemaRegistry,
    options: TraversalOptions,
    export_version: String,
    active: Option<ActiveModel>,
}

impl<S: KeyValueStore> OverrideService<S> {
    /// Create a service with explicit traversal limits and export version.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Schema` if the schema registry cannot be built.
    pub fn new(
        store: S,
        options: TraversalOptions,
        export_version: impl Into<String>,
    ) -> Result<Self, OverrideError> {
        Ok(Self {
            store,
            registry: SchemaRegistry::new()?,
            options,
            export_version: export_version.into(),
            active: None,
        })
    }

    /// Create a service with default limits writing the built-in export version.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Schema` if the schema registry cannot be built.
    pub fn with_defaults(store: S) -> Result<Self, OverrideError> {
        Self::new(store, TraversalOptions::default(), EXPORT_VERSION)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Load `model_key` with the scene snapshot `root`.
    ///
    /// The stored document is loaded if present, otherwise an empty one is
    /// created (and written on the first mutation). Any previously loaded
    /// model is replaced. The model key is then recorded as the last active
    /// model; a failure there is returned after the model is loaded.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Validation` for an empty model key, or
    /// `OverrideError::Persistence` if the stored document cannot be read or
    /// the last-active pointer cannot be written.
    pub async fn init_for_model(
        &mut self,
        model_key: &str,
        root: SceneNode,
    ) -> Result<(), OverrideError> {
        if model_key.is_empty() {
            return Err(OverrideError::Validation(
                "modelKey: must not be empty".to_string(),
            ));
        }

        let mapping = build_path_mapping_cooperative(&root, self.options).await;
        let document = self.load_document(model_key).await?;

        let mut active = ActiveModel {
            model_key: model_key.to_string(),
            root,
            mapping,
            document,
            tree: Vec::new(),
        };
        active.refresh(self.options).await;
        tracing::info!(
            model_key,
            nodes = active.mapping.len(),
            overrides = active.document.overrides.len(),
            "model loaded"
        );
        self.active = Some(active);

        self.store
            .put(LAST_ACTIVE_MODEL_KEY, model_key)
            .await
            .map_err(|e| persistence_failed(LAST_ACTIVE_MODEL_KEY, e))
    }

    /// Replace the scene snapshot of the loaded model, keeping its document.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Precondition` if no model is loaded.
    pub async fn reload_tree(&mut self, root: SceneNode) -> Result<(), OverrideError> {
        let options = self.options;
        let active = self.active.as_mut().ok_or_else(OverrideError::no_model)?;
        active.mapping = build_path_mapping_cooperative(&root, options).await;
        active.root = root;
        active.refresh(options).await;
        tracing::debug!(model_key = %active.model_key, "tree reloaded");
        Ok(())
    }

    /// Drop the in-memory state. The persisted document is kept.
    /// Returns the key of the model that was loaded.
    pub fn unload(&mut self) -> Option<String> {
        let active = self.active.take()?;
        tracing::debug!(model_key = %active.model_key, "model unloaded");
        Some(active.model_key)
    }

    /// Delete the persisted document of `model_key`.
    ///
    /// Clears the last-active pointer if it names this model. If the model is
    /// currently loaded its in-memory document is reset to empty.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Persistence` if the store fails.
    pub async fn delete_persisted(&mut self, model_key: &str) -> Result<(), OverrideError> {
        let key = document_key(model_key);
        self.store
            .delete(&key)
            .await
            .map_err(|e| persistence_failed(&key, e))?;

        if self.last_active_model().await?.as_deref() == Some(model_key) {
            self.store
                .delete(LAST_ACTIVE_MODEL_KEY)
                .await
                .map_err(|e| persistence_failed(LAST_ACTIVE_MODEL_KEY, e))?;
        }

        let options = self.options;
        if let Some(active) = self.active.as_mut().filter(|a| a.model_key == model_key) {
            active.document = OverrideDocument::new(model_key, Utc::now());
            active.refresh(options).await;
        }
        tracing::info!(model_key, "persisted overrides deleted");
        Ok(())
    }

    /// Model key recorded by the most recent `init_for_model`.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Persistence` if the store fails.
    pub async fn last_active_model(&self) -> Result<Option<String>, OverrideError> {
        let value = self
            .store
            .get(LAST_ACTIVE_MODEL_KEY)
            .await
            .map_err(|e| persistence_failed(LAST_ACTIVE_MODEL_KEY, e))?;
        Ok(value.filter(|key| !key.is_empty()))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Merge `partial` into the entry for `path`.
    ///
    /// Fields present in `partial` replace stored ones; absent fields are kept.
    /// `path` does not need to resolve in the loaded tree.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Precondition` if no model is loaded, or
    /// `OverrideError::Persistence` after the change has been applied.
    pub async fn set_override(
        &mut self,
        path: &str,
        partial: NodeOverride,
    ) -> Result<(), OverrideError> {
        let options = self.options;
        let active = self.active.as_mut().ok_or_else(OverrideError::no_model)?;
        if !active.mapping.contains_path(path) {
            tracing::debug!(path, "override set on a path outside the loaded tree");
        }
        active.document.merge(path, partial);
        active.document.touch(Utc::now());
        active.refresh(options).await;
        self.persist().await
    }

    /// Merge `partial` into the entry of the node with `id`.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Precondition` if no model is loaded or `id` is
    /// not part of the loaded snapshot, or `OverrideError::Persistence`.
    pub async fn set_override_for_id(
        &mut self,
        id: &str,
        partial: NodeOverride,
    ) -> Result<NodePath, OverrideError> {
        let path = self
            .path_for(id)
            .map(str::to_string)
            .ok_or_else(|| match self.active {
                Some(_) => OverrideError::Precondition(format!("unknown node id '{id}'")),
                None => OverrideError::no_model(),
            })?;
        self.set_override(&path, partial).await?;
        Ok(path)
    }

    /// Delete the whole entry for `path`.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Precondition` if no model is loaded, or
    /// `OverrideError::Persistence` after the change has been applied.
    pub async fn remove_override(&mut self, path: &str) -> Result<(), OverrideError> {
        let options = self.options;
        let active = self.active.as_mut().ok_or_else(OverrideError::no_model)?;
        if active.document.remove(path).is_none() {
            tracing::debug!(path, "no override to remove");
        }
        active.document.touch(Utc::now());
        active.refresh(options).await;
        self.persist().await
    }

    /// Drop `visible` from every entry, pruning entries left empty.
    /// Returns how many entries carried a `visible` field.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Precondition` if no model is loaded, or
    /// `OverrideError::Persistence` after the change has been applied.
    pub async fn reset_all_visibility(&mut self) -> Result<usize, OverrideError> {
        let options = self.options;
        let active = self.active.as_mut().ok_or_else(OverrideError::no_model)?;
        let cleared = active.document.clear_visibility();
        active.document.touch(Utc::now());
        active.refresh(options).await;
        tracing::debug!(cleared, "visibility overrides reset");
        self.persist().await?;
        Ok(cleared)
    }

    // -----------------------------------------------------------------------
    // Import / export
    // -----------------------------------------------------------------------

    /// Wrap the loaded document in a versioned envelope stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Precondition` if no document is loaded.
    pub fn export_document(&self) -> Result<ExportEnvelope, OverrideError> {
        let active = self.active.as_ref().ok_or_else(OverrideError::no_model)?;
        tracing::info!(
            model_key = %active.model_key,
            overrides = active.document.overrides.len(),
            "exporting overrides"
        );
        Ok(codec::export_settings(
            &active.document,
            &self.export_version,
            Utc::now(),
        ))
    }

    /// Replace the loaded document with the one in `text`.
    ///
    /// `target_model_key` must name the loaded model; the imported document is
    /// re-keyed to it whatever model it was exported from. Paths that do not
    /// resolve in the loaded tree are kept.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError::Precondition` if no model or a different model
    /// is loaded, `OverrideError::Validation` if `text` does not conform (the
    /// loaded document is untouched), or `OverrideError::Persistence` after
    /// the import has been applied.
    pub async fn import_document(
        &mut self,
        text: &str,
        target_model_key: &str,
    ) -> Result<(), OverrideError> {
        let options = self.options;
        let envelope = {
            let active = self.active.as_ref().ok_or_else(OverrideError::no_model)?;
            if active.model_key != target_model_key {
                return Err(OverrideError::Precondition(format!(
                    "model '{target_model_key}' is not loaded (active: '{}')",
                    active.model_key
                )));
            }
            codec::parse_envelope(text, &self.registry, &self.export_version)?
        };

        let source = envelope.model_key.clone();
        let document = codec::into_document(envelope, target_model_key, Utc::now());
        let active = self.active.as_mut().ok_or_else(OverrideError::no_model)?;
        active.document = document;
        active.refresh(options).await;
        tracing::info!(
            model_key = target_model_key,
            source_model_key = %source,
            overrides = active.document.overrides.len(),
            "overrides imported"
        );
        self.persist().await
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn model_key(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.model_key.as_str())
    }

    #[must_use]
    pub fn document(&self) -> Option<&OverrideDocument> {
        self.active.as_ref().map(|a| &a.document)
    }

    #[must_use]
    pub fn mapping(&self) -> Option<&PathMapping> {
        self.active.as_ref().map(|a| &a.mapping)
    }

    /// Enriched children of the loaded root; empty when nothing is loaded.
    #[must_use]
    pub fn tree(&self) -> &[EnhancedNode] {
        self.active
            .as_ref()
            .map(|a| a.tree.as_slice())
            .unwrap_or_default()
    }

    /// Browse-mode view of [`Self::tree`].
    #[must_use]
    pub fn browse_tree(&self) -> Vec<EnhancedNode> {
        filter_for_browse(self.tree(), self.options.max_depth)
    }

    /// Path assigned to the node with `id` in the loaded snapshot.
    #[must_use]
    pub fn path_for(&self, id: &str) -> Option<&str> {
        self.active.as_ref().and_then(|a| a.mapping.get(id))
    }

    /// Whether `path` addresses a node of the loaded snapshot.
    #[must_use]
    pub fn resolves(&self, path: &str) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.mapping.contains_path(path))
    }

    #[must_use]
    pub fn override_for(&self, path: &str) -> Option<&NodeOverride> {
        self.active.as_ref().and_then(|a| a.document.get(path))
    }

    #[must_use]
    pub const fn options(&self) -> TraversalOptions {
        self.options
    }

    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    async fn load_document(&self, model_key: &str) -> Result<OverrideDocument, OverrideError> {
        let key = document_key(model_key);
        let stored = self
            .store
            .get(&key)
            .await
            .map_err(|e| persistence_failed(&key, e))?;

        let Some(text) = stored else {
            tracing::debug!(model_key, "no stored overrides; starting empty");
            return Ok(OverrideDocument::new(model_key, Utc::now()));
        };

        let mut document: OverrideDocument = serde_json::from_str(&text).map_err(|e| {
            OverrideError::Persistence(StoreError::Backend(format!(
                "stored document '{key}' is unreadable: {e}"
            )))
        })?;
        if document.model_key != model_key {
            tracing::warn!(
                stored = %document.model_key,
                model_key,
                "stored document carried a different model key"
            );
            document.model_key = model_key.to_string();
        }
        document.prune();
        Ok(document)
    }

    async fn persist(&self) -> Result<(), OverrideError> {
        let active = self.active.as_ref().ok_or_else(OverrideError::no_model)?;
        let key = document_key(&active.model_key);
        let text = serde_json::to_string(&active.document)
            .map_err(|e| persistence_failed(&key, StoreError::Backend(e.to_string())))?;
        self.store
            .put(&key, &text)
            .await
            .map_err(|e| persistence_failed(&key, e))?;
        tracing::debug!(%key, bytes = text.len(), "overrides persisted");
        Ok(())
    }
}

fn persistence_failed(key: &str, error: StoreError) -> OverrideError {
    tracing::warn!(key, %error, "persistence failed; in-memory state kept");
    OverrideError::Persistence(error)
}
