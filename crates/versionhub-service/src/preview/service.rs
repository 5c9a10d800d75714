//! Preview resolution: user tree, source file, optional version, preview.

use std::sync::Arc;

use tracing::{debug, error, info};

use versionhub_core::error::{PreviewError, TreeError, VersionError};
use versionhub_core::traits::{MimeIconProvider, PreviewProvider, UserTree, VersionStore};
use versionhub_core::types::{FileNode, PreviewMode, PreviewRequest};

use super::outcome::{NotFoundCause, PreviewOutcome, PreviewRejection, ResolutionStage};
use super::validator::{RequestValidator, ValidationError};
use crate::context::RequestContext;

/// Raw parameters of a preview request, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewQuery {
    /// Path of the file inside the user's tree.
    pub file: String,
    /// Requested width in pixels.
    pub width: i64,
    /// Requested height in pixels.
    pub height: i64,
    /// Version token; empty for the live file.
    pub version: String,
    /// Whether a missing preview may be answered with a mimetype icon.
    pub mime_fallback: bool,
}

/// Resolves preview requests against the user tree, the version store and
/// the preview provider.
///
/// Holds no per-request state; one instance serves all requests.
#[derive(Debug, Clone)]
pub struct PreviewResolutionService {
    validator: RequestValidator,
    tree: Arc<dyn UserTree>,
    versions: Arc<dyn VersionStore>,
    previews: Arc<dyn PreviewProvider>,
    icons: Arc<dyn MimeIconProvider>,
}

impl PreviewResolutionService {
    /// Creates a new preview resolution service.
    pub fn new(
        tree: Arc<dyn UserTree>,
        versions: Arc<dyn VersionStore>,
        previews: Arc<dyn PreviewProvider>,
        icons: Arc<dyn MimeIconProvider>,
    ) -> Self {
        Self {
            validator: RequestValidator::new(),
            tree,
            versions,
            previews,
            icons,
        }
    }

    /// Resolve `query` for the user of `ctx` and return its preview.
    ///
    /// Invalid parameters are rejected before any collaborator is called. A
    /// non-empty version token must name a stored version; the live file is
    /// never substituted for it. Previews are always requested cropped to
    /// the exact size in [`PreviewMode::Fill`].
    pub async fn get_preview(
        &self,
        ctx: &RequestContext,
        query: &PreviewQuery,
    ) -> Result<PreviewOutcome, PreviewRejection> {
        let request = self
            .validator
            .validate(&query.file, query.width, query.height, &query.version)
            .map_err(|e| self.reject(ctx, query, ResolutionStage::ValidatingInput, e.into()))?;

        let folder = self.tree.user_folder(&ctx.user).await.map_err(|e| {
            let rejection = tree_rejection(e, NotFoundCause::UserTree);
            self.reject(ctx, query, ResolutionStage::ResolvingUserTree, rejection)
        })?;

        let source = folder.get(&request.file_id).await.map_err(|e| {
            let rejection = tree_rejection(e, NotFoundCause::SourceFile);
            self.reject(ctx, query, ResolutionStage::ResolvingSourceFile, rejection)
        })?;

        let target = match request.version.as_deref() {
            None => source.clone(),
            Some(token) => {
                match self.versions.get_version_file(&ctx.user, &source, token).await {
                    Ok(version) => version,
                    Err(VersionError::NotFound { .. }) => {
                        return self.not_found_after_source(
                            ctx,
                            query,
                            &source,
                            ResolutionStage::ResolvingVersion,
                            NotFoundCause::Version,
                        );
                    }
                    Err(VersionError::Backend(e)) => {
                        return Err(self.reject(
                            ctx,
                            query,
                            ResolutionStage::ResolvingVersion,
                            PreviewRejection::Internal(e),
                        ));
                    }
                }
            }
        };

        let mime_hint = target.mime_type.clone();
        let preview_request = PreviewRequest::new(
            target,
            request.width,
            request.height,
            true,
            PreviewMode::Fill,
            mime_hint,
        );

        match self.previews.get_preview(&preview_request).await {
            Ok(preview) => {
                debug!(
                    user = %ctx.user,
                    file = %query.file,
                    version = %query.version,
                    stage = %ResolutionStage::Done,
                    preview = %preview.name,
                    mime_type = %preview.mime_type,
                    "Resolved preview"
                );
                Ok(PreviewOutcome::Preview(preview))
            }
            Err(PreviewError::Unavailable { .. }) => self.not_found_after_source(
                ctx,
                query,
                &source,
                ResolutionStage::RequestingPreview,
                NotFoundCause::Preview,
            ),
            Err(PreviewError::InvalidArgument(reason)) => Err(self.reject(
                ctx,
                query,
                ResolutionStage::RequestingPreview,
                ValidationError::Refused(reason).into(),
            )),
            Err(PreviewError::Backend(e)) => Err(self.reject(
                ctx,
                query,
                ResolutionStage::RequestingPreview,
                PreviewRejection::Internal(e),
            )),
        }
    }

    /// Answer a not-found that happened after the source file was resolved,
    /// falling back to the source's mimetype icon when the client allows it.
    fn not_found_after_source(
        &self,
        ctx: &RequestContext,
        query: &PreviewQuery,
        source: &FileNode,
        stage: ResolutionStage,
        cause: NotFoundCause,
    ) -> Result<PreviewOutcome, PreviewRejection> {
        if query.mime_fallback {
            if let Some(url) = self.icons.mime_icon_url(&source.mime_type) {
                info!(
                    user = %ctx.user,
                    file = %query.file,
                    stage = %stage,
                    cause = %cause,
                    icon = %url,
                    "Falling back to mimetype icon"
                );
                return Ok(PreviewOutcome::MimeIcon(url));
            }
        }
        Err(self.reject(ctx, query, stage, PreviewRejection::NotFound(cause)))
    }

    fn reject(
        &self,
        ctx: &RequestContext,
        query: &PreviewQuery,
        stage: ResolutionStage,
        rejection: PreviewRejection,
    ) -> PreviewRejection {
        match &rejection {
            PreviewRejection::Internal(e) => error!(
                user = %ctx.user,
                origin = ctx.origin(),
                file = %query.file,
                version = %query.version,
                stage = %stage,
                error = %e,
                "Preview request failed"
            ),
            PreviewRejection::NotFound(cause) => info!(
                user = %ctx.user,
                origin = ctx.origin(),
                file = %query.file,
                version = %query.version,
                stage = %stage,
                cause = %cause,
                "Preview not found"
            ),
            other => info!(
                user = %ctx.user,
                origin = ctx.origin(),
                file = %query.file,
                stage = %stage,
                reason = %other,
                "Preview request rejected"
            ),
        }
        rejection
    }
}

fn tree_rejection(err: TreeError, cause: NotFoundCause) -> PreviewRejection {
    match err {
        TreeError::NotFound(_) => PreviewRejection::NotFound(cause),
        TreeError::Forbidden(reason) => PreviewRejection::Forbidden(reason),
        TreeError::Backend(e) => PreviewRejection::Internal(e),
    }
}
