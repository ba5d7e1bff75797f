//! Catalog navigation driven entirely by interaction tokens.

pub mod controller;
pub mod media;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod render;
pub mod repository;

use shared::{
    error::NavError,
    protocol::{MediaRef, Notice, PresentationPayload, Reply},
    token::Command,
};
use tracing::{error, info, warn};

pub use controller::{Controller, Outcome, Screen};
pub use media::{DirectoryMedia, MediaStore};
pub use render::Renderer;
pub use repository::CatalogRepository;

/// Decodes a token, runs the transition and renders the result. Never
/// fails: errors come back as notices.
pub struct Navigator<R, M> {
    controller: Controller<R>,
    media: M,
    renderer: Renderer,
}

impl<R: CatalogRepository, M: MediaStore> Navigator<R, M> {
    pub fn new(repository: R, media: M, renderer: Renderer) -> Self {
        Self {
            controller: Controller::new(repository),
            media,
            renderer,
        }
    }

    pub fn repository(&self) -> &R {
        self.controller.repository()
    }

    pub fn welcome(&self) -> PresentationPayload {
        self.renderer.welcome()
    }

    pub async fn handle(&self, raw_token: &str) -> Reply {
        match self.try_handle(raw_token).await {
            Ok(reply) => reply,
            Err(NavError::MalformedToken(token)) => {
                warn!(%token, "rejected malformed token");
                Reply::Notice(Notice::InvalidSelection)
            }
            Err(NavError::DataUnavailable(source)) => {
                let cause = format!("{source:#}");
                error!(token = %raw_token, error = %cause, "catalog read failed");
                Reply::Notice(Notice::Unavailable)
            }
        }
    }

    async fn try_handle(&self, raw_token: &str) -> Result<Reply, NavError> {
        let command = Command::decode(raw_token)?;
        let reply = match self.controller.transition(command).await? {
            Outcome::Screen(screen) => {
                let media = self.media_for(&screen).await;
                Reply::Show(self.renderer.render(&screen, media))
            }
            Outcome::Notice(notice) => Reply::Notice(notice),
            Outcome::Intent(intent) => {
                info!(?intent, "handing off intent");
                Reply::Intent(intent)
            }
        };
        Ok(reply)
    }

    async fn media_for(&self, screen: &Screen) -> Option<MediaRef> {
        let Screen::Product(detail) = screen else {
            return None;
        };
        let photo = &detail.product.photo;
        if self.media.exists(photo).await {
            Some(MediaRef {
                path: self.media.locate(photo),
            })
        } else {
            warn!(product_id = %detail.product.id, %photo, "product photo missing");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
